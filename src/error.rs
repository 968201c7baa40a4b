//! Error taxonomy for table construction and concatenation

use thiserror::Error;

use crate::table::ElementType;

/// No type in the widening lattice can hold both operands.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no common supertype for {left} and {right}")]
pub struct NoCommonType {
    pub left: ElementType,
    pub right: ElementType,
}

/// What exactly disagreed between two schemas in a vertical concat.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Mismatch {
    #[error("expected {expected} columns, found {found}")]
    Width { expected: usize, found: usize },

    #[error("found column {found:?} in its place")]
    Name { found: String },

    #[error("expected type {expected}, found {found}")]
    Type {
        expected: ElementType,
        found: ElementType,
    },

    #[error(transparent)]
    NoCommonType(#[from] NoCommonType),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("cannot concatenate an empty sequence of inputs")]
    EmptyInput,

    /// Vertical modes: input `input` does not line up with the inputs before it.
    #[error("schema mismatch at input {input}, column {column:?}: {mismatch}")]
    SchemaMismatch {
        input: usize,
        column: String,
        #[source]
        mismatch: Mismatch,
    },

    /// Horizontal modes: `name` appears in both input `first` and input `second`.
    #[error("duplicate column {name:?} in inputs {first} and {second}")]
    DuplicateColumnName {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("cannot combine height {found} of input {input} with height {expected}")]
    ShapeError {
        input: usize,
        expected: usize,
        found: usize,
    },

    /// Column-wise append: no type in the widening lattice holds both.
    #[error(transparent)]
    NoCommonType(#[from] NoCommonType),

    #[error("{names} column names given for {columns} columns")]
    ColumnCount { names: usize, columns: usize },

    #[error("column {column:?} has length {found}, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("duplicate column name {name:?}")]
    DuplicateField { name: String },

    #[error("cannot append a {found} column to a {expected} column")]
    ColumnTypeMismatch {
        expected: ElementType,
        found: ElementType,
    },

    #[error("cannot cast {from} to {to} without loss")]
    InvalidCast { from: ElementType, to: ElementType },

    #[error("unknown concat mode {0:?}, expected vertical, vertical_relaxed or horizontal")]
    UnknownConcatMode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
