//! Pipeline planner
//!
//! Converts a plan graph into an ExecutionPlan by walking it in post-order
//! with an explicit work stack.

use std::sync::Arc;

use tracing::debug;

use super::execution_plan::{ExecutionPlan, Step};
use super::ir::PlanNode;
use crate::concat::ConcatArgs;

enum Visit<'a> {
    Enter(&'a PlanNode),
    Exit { arity: usize, args: ConcatArgs },
}

/// Pipeline planner
pub struct Planner;

impl Planner {
    /// Plan a graph into an execution plan
    pub fn plan(root: &Arc<PlanNode>) -> ExecutionPlan {
        let mut steps = Vec::new();
        let mut work = vec![Visit::Enter(root)];

        while let Some(visit) = work.pop() {
            match visit {
                Visit::Enter(PlanNode::Scan { table }) => {
                    steps.push(Step::Scan(Arc::clone(table)));
                }
                Visit::Enter(PlanNode::Concat { inputs, args }) => {
                    work.push(Visit::Exit {
                        arity: inputs.len(),
                        args: *args,
                    });
                    // Reversed so the first child is planned first
                    work.extend(inputs.iter().rev().map(|child| Visit::Enter(child)));
                }
                Visit::Exit { arity, args } => steps.push(Step::Concat { arity, args }),
            }
        }

        debug!(steps = steps.len(), "planned");
        ExecutionPlan::new(steps)
    }
}
