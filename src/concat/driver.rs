//! Accumulation driver: one flat N-ary concat over any number of inputs
//!
//! All N inputs are reconciled and validated in a single left-to-right pass
//! before any output column is allocated, then aligned with one loop over
//! the inputs. Nothing here recurses, so the input count only costs time
//! and memory, never stack.

use tracing::debug;

use super::shape::{self, Fit};
use super::{align, reconcile, ConcatMode};
use crate::error::{Error, Result};
use crate::table::{Schema, Table};

/// Anything that can report the schema and height of a table, whether the
/// table exists yet or not.
pub trait TableShape {
    fn schema(&self) -> Schema;
    fn row_count(&self) -> usize;
}

impl TableShape for Table {
    fn schema(&self) -> Schema {
        Table::schema(self)
    }

    fn row_count(&self) -> usize {
        Table::row_count(self)
    }
}

/// Schema and height of a table that has not been materialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    pub schema: Schema,
    pub height: usize,
}

impl Shape {
    pub fn of(table: &impl TableShape) -> Self {
        Shape {
            schema: table.schema(),
            height: table.row_count(),
        }
    }
}

impl TableShape for Shape {
    fn schema(&self) -> Schema {
        self.schema.clone()
    }

    fn row_count(&self) -> usize {
        self.height
    }
}

/// Everything known about a concat result before alignment
#[derive(Clone, Debug)]
pub struct Resolved {
    pub schema: Schema,
    pub height: usize,
    /// Per-input fit, horizontal modes only
    pub fits: Option<Vec<Fit>>,
}

/// Reconcile schemas and validate shapes for `inputs` under `mode`.
pub fn resolve<T: TableShape>(inputs: &[T], mode: ConcatMode) -> Result<Resolved> {
    if inputs.is_empty() {
        return Err(Error::EmptyInput);
    }
    let schemas: Vec<Schema> = inputs.iter().map(TableShape::schema).collect();
    let heights: Vec<usize> = inputs.iter().map(TableShape::row_count).collect();

    let resolved = match mode {
        ConcatMode::Vertical | ConcatMode::VerticalRelaxed => Resolved {
            schema: reconcile::vertical(&schemas, mode == ConcatMode::VerticalRelaxed)?,
            height: heights.iter().sum(),
            fits: None,
        },
        ConcatMode::Horizontal | ConcatMode::HorizontalRelaxed => {
            let schema = reconcile::horizontal(&schemas)?;
            let layout = if mode == ConcatMode::Horizontal {
                // Zero-width inputs have no rows to line up
                let extents: Vec<Option<usize>> = schemas
                    .iter()
                    .zip(&heights)
                    .map(|(schema, &height)| (!schema.is_empty()).then_some(height))
                    .collect();
                shape::strict(&extents)?
            } else {
                shape::relaxed(&heights)?
            };
            Resolved {
                schema,
                height: layout.height,
                fits: Some(layout.fits),
            }
        }
    };
    Ok(resolved)
}

/// Concatenate materialized tables.
pub fn concat_tables(mut inputs: Vec<Table>, mode: ConcatMode) -> Result<Table> {
    debug!(inputs = inputs.len(), ?mode, "concatenating tables");
    let resolved = resolve(&inputs, mode)?;

    if inputs.len() == 1 {
        if let Some(table) = inputs.pop() {
            table.validate()?;
            return Ok(table);
        }
    }

    let Resolved {
        schema,
        height,
        fits,
    } = resolved;
    let (names, columns) = match fits {
        None => {
            let names = schema.names().map(str::to_owned).collect();
            (names, align::stack(inputs, &schema)?)
        }
        Some(fits) => align::side_by_side(inputs, &fits, height)?,
    };
    debug!(rows = height, cols = columns.len(), "concatenated");
    Ok(Table::from_parts(names, columns, height))
}

/// Shape of the concat of `inputs`, running every check `concat_tables`
/// would without touching column data.
pub fn concat_shapes(inputs: &[Shape], mode: ConcatMode) -> Result<Shape> {
    let resolved = resolve(inputs, mode)?;
    Ok(Shape {
        schema: resolved.schema,
        height: resolved.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Value};

    fn frame(pairs: Vec<(&str, Column)>) -> Table {
        Table::from_columns(pairs).unwrap()
    }

    #[test]
    fn test_vertical_sums_rows() {
        let t = frame(vec![
            ("a", Column::from(vec![1i64, 2])),
            ("b", Column::from(vec!["x", "y"])),
        ]);
        let out =
            concat_tables(vec![t.clone(), t.clone(), t.clone()], ConcatMode::Vertical).unwrap();
        assert_eq!(out.shape(), (6, 2));
        assert_eq!(out.schema(), t.schema());
        assert_eq!(out.column("b").unwrap().get(5), Value::Utf8("y".to_string()));
    }

    #[test]
    fn test_single_input_is_returned_as_is() {
        let t = frame(vec![("a", Column::from(vec![1i64, 2]))]);
        for mode in [
            ConcatMode::Vertical,
            ConcatMode::VerticalRelaxed,
            ConcatMode::Horizontal,
            ConcatMode::HorizontalRelaxed,
        ] {
            let out = concat_tables(vec![t.clone()], mode).unwrap();
            assert_eq!(out, t);
            assert!(out.columns()[0].shares_values_with(&t.columns()[0]));
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            concat_tables(Vec::new(), ConcatMode::Vertical),
            Err(Error::EmptyInput)
        );
        assert_eq!(
            concat_shapes(&[], ConcatMode::Horizontal),
            Err(Error::EmptyInput)
        );
    }

    #[test]
    fn test_shapes_match_tables() {
        let a = frame(vec![("a", Column::from(vec![1i8, 2, 3]))]);
        let b = frame(vec![("b", Column::from(vec![1.5f64]))]);
        let shapes = [Shape::of(&a), Shape::of(&b)];

        for mode in [ConcatMode::Horizontal, ConcatMode::HorizontalRelaxed] {
            let table = concat_tables(vec![a.clone(), b.clone()], mode).unwrap();
            assert_eq!(concat_shapes(&shapes, mode).unwrap(), Shape::of(&table));
        }
    }

    #[test]
    fn test_zero_width_input_fits_any_height() {
        let a = frame(vec![("a", Column::from(vec![1i64, 2, 3]))]);
        for mode in [ConcatMode::Horizontal, ConcatMode::HorizontalRelaxed] {
            let out = concat_tables(vec![a.clone(), Table::empty()], mode).unwrap();
            assert_eq!(out, a);
            let shape = concat_shapes(&[Shape::of(&Table::empty()), Shape::of(&a)], mode).unwrap();
            assert_eq!(shape, Shape::of(&a));
        }

        let out = concat_tables(vec![Table::empty(), Table::empty()], ConcatMode::Horizontal);
        assert_eq!(out.unwrap().shape(), (0, 0));
    }

    #[test]
    fn test_no_output_on_failure() {
        let a = frame(vec![("a", Column::from(vec![1i64, 2, 3]))]);
        let b = frame(vec![("b", Column::from(vec![1i64, 2]))]);
        let err = concat_tables(vec![a, b], ConcatMode::Horizontal).unwrap_err();
        assert_eq!(
            err,
            Error::ShapeError {
                input: 1,
                expected: 3,
                found: 2
            }
        );
    }
}
