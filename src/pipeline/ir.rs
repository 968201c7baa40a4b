//! Plan graph for deferred concatenation
//!
//! A plan is a DAG of `Arc<PlanNode>`: leaves scan materialized tables and
//! every concat node holds a flat list of children. The same node may be
//! referenced from several places.

use std::fmt;
use std::sync::Arc;

use crate::concat::ConcatArgs;
use crate::table::Table;

pub enum PlanNode {
    /// Read an already materialized table
    Scan { table: Arc<Table> },

    /// Concatenate the results of `inputs`, in order
    Concat {
        inputs: Vec<Arc<PlanNode>>,
        args: ConcatArgs,
    },
}

impl PlanNode {
    pub fn scan(table: Table) -> Self {
        PlanNode::Scan {
            table: Arc::new(table),
        }
    }

    /// Number of direct children
    pub fn arity(&self) -> usize {
        match self {
            PlanNode::Scan { .. } => 0,
            PlanNode::Concat { inputs, .. } => inputs.len(),
        }
    }
}

// Shows one level only; children are summarized by count.
impl fmt::Debug for PlanNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanNode::Scan { table } => f
                .debug_struct("Scan")
                .field("shape", &table.shape())
                .finish(),
            PlanNode::Concat { inputs, args } => f
                .debug_struct("Concat")
                .field("arity", &inputs.len())
                .field("args", args)
                .finish(),
        }
    }
}

impl Drop for PlanNode {
    // Unlinks children onto a heap worklist so dropping a deeply nested plan
    // does not recurse once per level.
    fn drop(&mut self) {
        let PlanNode::Concat { inputs, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(inputs);
        while let Some(node) = pending.pop() {
            if let Ok(mut node) = Arc::try_unwrap(node) {
                if let PlanNode::Concat { inputs, .. } = &mut node {
                    pending.append(inputs);
                }
            }
        }
    }
}
