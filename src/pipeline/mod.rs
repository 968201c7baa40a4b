//! Deferred execution of concatenations
//!
//! 1. **IR**: a DAG of plan nodes, built by `concat` on [`LazyFrame`]s
//! 2. **Planner**: flattens the DAG into a post-order list of steps
//! 3. **Executor**: runs the steps against a value stack
//!
//! ## Architecture
//!
//! ```text
//! concat([concat([a, b]), c])
//!     ↓  (same-mode children spliced at build time)
//! PlanNode: Concat[Scan(a), Scan(b), Scan(c)]
//!     ↓
//! ExecutionPlan: [Scan(a), Scan(b), Scan(c), Concat(3)]
//!     ↓
//! Executor: one driver call with three inputs
//! ```
//!
//! Every stage walks the graph with explicit worklists, so plan depth never
//! turns into call-stack depth.

pub mod execution_plan;
pub mod executor;
pub mod ir;
pub mod lazy;
pub mod planner;

pub use execution_plan::{ExecutionPlan, Step};
pub use executor::{ExecutionStats, Executor, Operand};
pub use ir::PlanNode;
pub use lazy::LazyFrame;
pub use planner::Planner;
