//! tablecat: columnar table concatenation
//!
//! Combines any number of typed tables, eagerly or through a deferred plan,
//! with vertical (row stacking) and horizontal (column union) modes.

pub mod concat;
pub mod error;
pub mod pipeline;
pub mod table;

pub use concat::{concat, concat_columns, Concat, ConcatArgs, ConcatMode, How};
pub use error::{Error, Mismatch, NoCommonType, Result};
pub use pipeline::LazyFrame;
pub use table::{Bitmap, Column, ElementType, Field, Schema, Table, Value};
