//! Linear execution plan
//!
//! A plan graph flattened into post-order: running the steps front to back
//! against a value stack evaluates the graph without recursion.

use std::sync::Arc;

use crate::concat::ConcatArgs;
use crate::table::Table;

/// A single step of an [`ExecutionPlan`]
#[derive(Clone, Debug)]
pub enum Step {
    /// Push a source table
    Scan(Arc<Table>),

    /// Pop the top `arity` values, concatenate them in push order, push the result
    Concat { arity: usize, args: ConcatArgs },
}

/// Steps in post-order
#[derive(Clone, Debug, Default)]
pub struct ExecutionPlan {
    steps: Vec<Step>,
}

impl ExecutionPlan {
    pub(crate) fn new(steps: Vec<Step>) -> Self {
        ExecutionPlan { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps in plan
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if plan is empty
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of concat steps
    pub fn concat_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, Step::Concat { .. }))
            .count()
    }
}
