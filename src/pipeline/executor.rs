//! Pipeline executor
//!
//! Runs an ExecutionPlan against a value stack. The same loop produces full
//! tables (`execute`) or only schema and height (`resolve_shape`).

use std::sync::Arc;

use tracing::{debug, trace};

use super::execution_plan::{ExecutionPlan, Step};
use crate::concat::driver::{self, Shape};
use crate::concat::ConcatArgs;
use crate::error::{Error, Result};
use crate::table::Table;

/// Execution statistics
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Number of steps executed
    pub steps_executed: usize,

    /// Number of source tables read
    pub scans: usize,

    /// Number of concat steps run
    pub concats: usize,

    /// Total inputs consumed by concat steps
    pub concat_inputs: usize,
}

/// What the executor computes per step
pub trait Operand: Sized {
    fn scan(table: &Arc<Table>) -> Self;
    fn concat(inputs: Vec<Self>, args: ConcatArgs) -> Result<Self>;
}

impl Operand for Table {
    fn scan(table: &Arc<Table>) -> Self {
        // Column storage is shared, not copied
        Table::clone(table)
    }

    fn concat(inputs: Vec<Self>, args: ConcatArgs) -> Result<Self> {
        driver::concat_tables(inputs, args.mode())
    }
}

impl Operand for Shape {
    fn scan(table: &Arc<Table>) -> Self {
        Shape::of(&**table)
    }

    fn concat(inputs: Vec<Self>, args: ConcatArgs) -> Result<Self> {
        driver::concat_shapes(&inputs, args.mode())
    }
}

/// Pipeline executor
#[derive(Debug, Default)]
pub struct Executor {
    stats: ExecutionStats,
}

impl Executor {
    /// Create a new executor
    pub fn new() -> Self {
        Executor::default()
    }

    /// Materialize the plan's result
    pub fn execute(&mut self, plan: &ExecutionPlan) -> Result<Table> {
        self.run(plan)
    }

    /// Schema and height of the plan's result, with every check `execute`
    /// performs but no column data touched
    pub fn resolve_shape(&mut self, plan: &ExecutionPlan) -> Result<Shape> {
        self.run(plan)
    }

    /// Get execution statistics
    pub fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    fn run<V: Operand>(&mut self, plan: &ExecutionPlan) -> Result<V> {
        debug!(steps = plan.len(), "executing plan");
        let mut values: Vec<V> = Vec::new();

        for step in plan.steps() {
            match step {
                Step::Scan(table) => {
                    values.push(V::scan(table));
                    self.stats.scans += 1;
                }
                Step::Concat { arity, args } => {
                    let start = values.len().saturating_sub(*arity);
                    let inputs = values.split_off(start);
                    trace!(inputs = inputs.len(), mode = ?args.mode(), "concat step");
                    self.stats.concat_inputs += inputs.len();
                    values.push(V::concat(inputs, *args)?);
                    self.stats.concats += 1;
                }
            }
            self.stats.steps_executed += 1;
        }

        values.pop().ok_or(Error::EmptyInput)
    }
}
