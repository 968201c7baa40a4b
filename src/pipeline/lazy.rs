//! Deferred tables
//!
//! A [`LazyFrame`] is a handle to a plan graph. Building a concat only links
//! plan nodes; nothing is checked or copied until `collect`.

use std::sync::Arc;

use tracing::debug;

use super::execution_plan::ExecutionPlan;
use super::executor::Executor;
use super::ir::PlanNode;
use super::planner::Planner;
use crate::concat::{Concat, ConcatArgs};
use crate::error::{Error, Result};
use crate::table::{Schema, Table};

#[derive(Clone, Debug)]
pub struct LazyFrame {
    root: Arc<PlanNode>,
}

impl LazyFrame {
    /// Plan that reads `table`
    pub fn scan(table: Table) -> Self {
        LazyFrame {
            root: Arc::new(PlanNode::scan(table)),
        }
    }

    pub fn root(&self) -> &Arc<PlanNode> {
        &self.root
    }

    /// Linearized plan, as `collect` would run it
    pub fn plan(&self) -> ExecutionPlan {
        Planner::plan(&self.root)
    }

    /// Run the plan
    pub fn collect(&self) -> Result<Table> {
        Executor::new().execute(&self.plan())
    }

    /// Output schema, with all schema and shape checks of `collect` but
    /// without materializing any column
    pub fn collect_schema(&self) -> Result<Schema> {
        Executor::new()
            .resolve_shape(&self.plan())
            .map(|shape| shape.schema)
    }
}

impl From<Table> for LazyFrame {
    fn from(table: Table) -> Self {
        LazyFrame::scan(table)
    }
}

impl Concat for LazyFrame {
    /// Link `inputs` under one concat node.
    ///
    /// An input that is itself a concat of the same mode has its children
    /// spliced in, so `concat([concat([a, b]), c])` builds the same single
    /// node as `concat([a, b, c])`. A uniquely owned child hands over its
    /// child list without copying, which keeps repeated two-input chaining
    /// linear overall.
    fn concat_all(inputs: Vec<Self>, args: ConcatArgs) -> Result<Self> {
        if inputs.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mode = args.mode();
        let mut children: Vec<Arc<PlanNode>> = Vec::with_capacity(inputs.len());

        for input in inputs {
            let mut node = input.root;
            if let Some(PlanNode::Concat {
                inputs: grandchildren,
                args: child_args,
            }) = Arc::get_mut(&mut node)
            {
                if child_args.mode() == mode {
                    if children.is_empty() {
                        std::mem::swap(&mut children, grandchildren);
                    } else {
                        children.append(grandchildren);
                    }
                    continue;
                }
            }
            match &*node {
                PlanNode::Concat {
                    inputs: grandchildren,
                    args: child_args,
                } if child_args.mode() == mode => {
                    children.extend(grandchildren.iter().cloned());
                }
                _ => children.push(node),
            }
        }

        debug!(children = children.len(), ?mode, "built concat node");
        Ok(LazyFrame {
            root: Arc::new(PlanNode::Concat {
                inputs: children,
                args,
            }),
        })
    }
}
