//! Column alignment: turning validated inputs into output columns
//!
//! Inputs are consumed. The first input's columns become the accumulator and
//! every later input is appended onto it, so a column that nobody else holds
//! grows in place and one still shared with the caller is copied once.

use tracing::trace;

use super::shape::Fit;
use super::supertype;
use crate::error::{Error, Result};
use crate::table::{Column, Schema, Table};

/// Stack the rows of `inputs` under `schema`, widening each segment to the
/// schema's type for that column.
pub fn stack<I>(inputs: I, schema: &Schema) -> Result<Vec<Column>>
where
    I: IntoIterator<Item = Table>,
{
    let mut inputs = inputs.into_iter();
    let first = inputs.next().ok_or(Error::EmptyInput)?;
    let (_, columns) = first.into_parts();
    let mut acc = columns
        .into_iter()
        .zip(schema)
        .map(|(column, field)| column.cast(field.dtype))
        .collect::<Result<Vec<_>>>()?;

    for (offset, table) in inputs.enumerate() {
        trace!(input = offset + 1, rows = table.row_count(), "stacking input");
        for (out, (column, field)) in acc.iter_mut().zip(table.columns().iter().zip(schema)) {
            out.append(&column.cast(field.dtype)?)?;
        }
    }
    Ok(acc)
}

/// Place `inputs` side by side, fitting each to `height` as `fits` says.
pub fn side_by_side<I>(inputs: I, fits: &[Fit], height: usize) -> Result<(Vec<String>, Vec<Column>)>
where
    I: IntoIterator<Item = Table>,
{
    let mut names = Vec::new();
    let mut columns = Vec::new();

    for (input, (table, &fit)) in inputs.into_iter().zip(fits).enumerate() {
        trace!(input, rows = table.row_count(), ?fit, "placing input");
        let found = table.row_count();
        let (table_names, table_columns) = table.into_parts();
        names.extend(table_names);
        for column in table_columns {
            let column = match fit {
                Fit::Keep => column,
                Fit::Broadcast => column.broadcast(height).ok_or(Error::ShapeError {
                    input,
                    expected: height,
                    found,
                })?,
                Fit::Pad(n) => {
                    let mut column = column;
                    column.extend_nulls(n);
                    column
                }
            };
            columns.push(column);
        }
    }
    Ok((names, columns))
}

/// Append columns end to end, widened to their common supertype.
pub fn stack_columns<I>(columns: I) -> Result<Column>
where
    I: IntoIterator<Item = Column>,
{
    let columns: Vec<Column> = columns.into_iter().collect();
    let dtype = supertype::resolve_all(columns.iter().map(Column::dtype))?
        .ok_or(Error::EmptyInput)?;

    let mut columns = columns.into_iter();
    let mut acc = match columns.next() {
        Some(first) => first.cast(dtype)?,
        None => return Err(Error::EmptyInput),
    };
    for column in columns {
        acc.append(&column.cast(dtype)?)?;
    }
    Ok(acc)
}
