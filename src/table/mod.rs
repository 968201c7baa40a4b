//! Core table and column types

pub mod bitmap;
pub mod column;
pub mod dtype;
pub mod schema;

pub use bitmap::Bitmap;
pub use column::{Array, Column, NativeType};
pub use dtype::{ElementType, Value};
pub use schema::{Field, Schema};

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::pipeline::LazyFrame;

/// A table is an immutable collection of named, typed, equal-length columns
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    /// Build a table, checking that names are unique and all columns have
    /// the same length.
    pub fn new(names: Vec<String>, columns: Vec<Column>) -> Result<Self> {
        if names.len() != columns.len() {
            return Err(Error::ColumnCount {
                names: names.len(),
                columns: columns.len(),
            });
        }
        let height = columns.first().map_or(0, Column::len);
        let mut seen = HashSet::with_capacity(names.len());
        for (name, column) in names.iter().zip(&columns) {
            if !seen.insert(name.as_str()) {
                return Err(Error::DuplicateField { name: name.clone() });
            }
            if column.len() != height {
                return Err(Error::ColumnLength {
                    column: name.clone(),
                    expected: height,
                    found: column.len(),
                });
            }
        }
        Ok(Table {
            names,
            columns,
            height,
        })
    }

    /// Build a table from `(name, column)` pairs
    pub fn from_columns<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        let (names, columns) = pairs
            .into_iter()
            .map(|(name, column)| (name.into(), column))
            .unzip();
        Table::new(names, columns)
    }

    /// Table with no columns and no rows
    pub fn empty() -> Self {
        Table {
            names: Vec::new(),
            columns: Vec::new(),
            height: 0,
        }
    }

    /// Assemble a table whose invariants the caller already guarantees.
    pub(crate) fn from_parts(names: Vec<String>, columns: Vec<Column>, height: usize) -> Self {
        debug_assert_eq!(names.len(), columns.len());
        debug_assert!(columns.iter().all(|c| c.len() == height));
        Table {
            names,
            columns,
            height,
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Column>) {
        (self.names, self.columns)
    }

    pub fn row_count(&self) -> usize {
        self.height
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.columns.len())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[idx])
    }

    pub fn schema(&self) -> Schema {
        self.names
            .iter()
            .zip(&self.columns)
            .map(|(name, column)| Field::new(name.clone(), column.dtype()))
            .collect()
    }

    /// Re-check the table invariants.
    pub fn validate(&self) -> Result<()> {
        Table::new(self.names.clone(), self.columns.clone()).map(|_| ())
    }

    /// Defer further work on this table into a plan
    pub fn lazy(self) -> LazyFrame {
        LazyFrame::scan(self)
    }
}
