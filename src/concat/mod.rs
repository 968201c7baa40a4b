//! Table concatenation
//!
//! One call combines any number of inputs:
//!
//! ```text
//! inputs ──> reconcile (schema) ──> shape (row counts) ──> align (columns) ──> output
//! ```
//!
//! Reconciliation and shape checks run over all inputs before any output
//! column is built, so a failed concat leaves nothing behind.
//!
//! ## Modes
//!
//! - **vertical**: identical schemas, rows stacked
//! - **vertical_relaxed**: same names, types widened to a common supertype
//! - **horizontal** (strict): columns side by side, heights equal or 1 (broadcast)
//! - **horizontal** (non-strict): columns side by side, short inputs null-padded

pub mod align;
pub mod driver;
pub mod reconcile;
pub mod shape;
pub mod supertype;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::table::{Column, Table};

pub use driver::{Shape, TableShape};

/// The four combination rules the engine implements
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConcatMode {
    Vertical,
    VerticalRelaxed,
    Horizontal,
    HorizontalRelaxed,
}

/// Orientation named by the caller
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum How {
    #[default]
    Vertical,
    VerticalRelaxed,
    Horizontal,
}

impl FromStr for How {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vertical" => Ok(How::Vertical),
            "vertical_relaxed" => Ok(How::VerticalRelaxed),
            "horizontal" => Ok(How::Horizontal),
            other => Err(Error::UnknownConcatMode(other.to_string())),
        }
    }
}

impl fmt::Display for How {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            How::Vertical => "vertical",
            How::VerticalRelaxed => "vertical_relaxed",
            How::Horizontal => "horizontal",
        })
    }
}

/// Arguments of a concat call.
///
/// `strict` only affects [`How::Horizontal`]: strict concat broadcasts
/// single-row inputs and rejects any other height difference, non-strict
/// concat pads every shorter input with nulls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConcatArgs {
    pub how: How,
    pub strict: bool,
}

impl ConcatArgs {
    pub fn new(how: How) -> Self {
        ConcatArgs { how, strict: false }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn mode(&self) -> ConcatMode {
        match (self.how, self.strict) {
            (How::Vertical, _) => ConcatMode::Vertical,
            (How::VerticalRelaxed, _) => ConcatMode::VerticalRelaxed,
            (How::Horizontal, true) => ConcatMode::Horizontal,
            (How::Horizontal, false) => ConcatMode::HorizontalRelaxed,
        }
    }
}

impl From<How> for ConcatArgs {
    fn from(how: How) -> Self {
        ConcatArgs::new(how)
    }
}

/// Values that can be concatenated: eager tables and deferred plans.
pub trait Concat: Sized {
    fn concat_all(inputs: Vec<Self>, args: ConcatArgs) -> Result<Self>;
}

impl Concat for Table {
    fn concat_all(inputs: Vec<Self>, args: ConcatArgs) -> Result<Self> {
        driver::concat_tables(inputs, args.mode())
    }
}

/// Concatenate `inputs` in order.
///
/// Works on [`Table`]s (computed now) and [`LazyFrame`](crate::LazyFrame)s
/// (computed on `collect`). The same input may appear more than once.
pub fn concat<F, I>(inputs: I, args: impl Into<ConcatArgs>) -> Result<F>
where
    F: Concat,
    I: IntoIterator<Item = F>,
{
    F::concat_all(inputs.into_iter().collect(), args.into())
}

/// Append columns end to end, widening to their common supertype.
pub fn concat_columns<I>(columns: I) -> Result<Column>
where
    I: IntoIterator<Item = Column>,
{
    align::stack_columns(columns)
}
