//! Schema reconciliation: the output schema of a concat, before any data moves

use std::collections::HashMap;

use super::supertype;
use crate::error::{Error, Mismatch, Result};
use crate::table::Schema;

/// Output schema for stacking rows.
///
/// Every input must have the same column names in the same order. Strict
/// mode also requires identical types; relaxed mode folds the supertype of
/// each column left to right across the inputs.
pub fn vertical(schemas: &[Schema], relaxed: bool) -> Result<Schema> {
    let (first, rest) = schemas.split_first().ok_or(Error::EmptyInput)?;
    let mut out = first.clone();

    for (offset, schema) in rest.iter().enumerate() {
        let input = offset + 1;
        if schema.len() != out.len() {
            let column = schema
                .fields()
                .get(out.len())
                .or_else(|| out.fields().get(schema.len()))
                .map(|f| f.name.clone())
                .unwrap_or_default();
            return Err(Error::SchemaMismatch {
                input,
                column,
                mismatch: Mismatch::Width {
                    expected: out.len(),
                    found: schema.len(),
                },
            });
        }

        for (acc, field) in out.fields_mut().iter_mut().zip(schema) {
            let mismatch = |mismatch| Error::SchemaMismatch {
                input,
                column: acc.name.clone(),
                mismatch,
            };
            if acc.name != field.name {
                return Err(mismatch(Mismatch::Name {
                    found: field.name.clone(),
                }));
            }
            if acc.dtype == field.dtype {
                continue;
            }
            if !relaxed {
                return Err(mismatch(Mismatch::Type {
                    expected: acc.dtype,
                    found: field.dtype,
                }));
            }
            let widened = supertype::resolve(acc.dtype, field.dtype)
                .map_err(|e| mismatch(Mismatch::NoCommonType(e)))?;
            acc.dtype = widened;
        }
    }
    Ok(out)
}

/// Output schema for placing inputs side by side.
///
/// Columns of all inputs in input order. A name may appear only once across
/// all inputs.
pub fn horizontal(schemas: &[Schema]) -> Result<Schema> {
    if schemas.is_empty() {
        return Err(Error::EmptyInput);
    }
    let width = schemas.iter().map(Schema::len).sum();
    let mut owner: HashMap<&str, usize> = HashMap::with_capacity(width);
    let mut out = Schema::default();

    for (input, schema) in schemas.iter().enumerate() {
        for field in schema {
            if let Some(&first) = owner.get(field.name.as_str()) {
                return Err(Error::DuplicateColumnName {
                    name: field.name.clone(),
                    first,
                    second: input,
                });
            }
            owner.insert(&field.name, input);
            out.push(field.clone());
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoCommonType;
    use crate::table::{ElementType, Field};
    use ElementType::*;

    fn schema(fields: &[(&str, ElementType)]) -> Schema {
        fields.iter().map(|&(n, t)| Field::new(n, t)).collect()
    }

    #[test]
    fn test_vertical_strict_identical() {
        let s = schema(&[("a", Int64), ("b", Utf8)]);
        let out = vertical(&[s.clone(), s.clone(), s.clone()], false).unwrap();
        assert_eq!(out, s);
    }

    #[test]
    fn test_vertical_strict_rejects_type_difference() {
        let err = vertical(
            &[schema(&[("a", Int8), ("b", Boolean)]), schema(&[("a", Int8), ("b", Int64)])],
            false,
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::SchemaMismatch {
                input: 1,
                column: "b".to_string(),
                mismatch: Mismatch::Type {
                    expected: Boolean,
                    found: Int64
                },
            }
        );
    }

    #[test]
    fn test_vertical_relaxed_widens() {
        let out = vertical(
            &[schema(&[("a", Int8), ("b", Boolean)]), schema(&[("a", Int16), ("b", Int64)])],
            true,
        )
        .unwrap();
        assert_eq!(out, schema(&[("a", Int16), ("b", Int64)]));
    }

    #[test]
    fn test_vertical_relaxed_folds_across_inputs() {
        let out = vertical(
            &[
                schema(&[("x", Boolean)]),
                schema(&[("x", Int32)]),
                schema(&[("x", Float32)]),
            ],
            true,
        )
        .unwrap();
        assert_eq!(out, schema(&[("x", Float64)]));
    }

    #[test]
    fn test_vertical_relaxed_no_common_type() {
        let err = vertical(
            &[schema(&[("a", Int64)]), schema(&[("a", Int8)]), schema(&[("a", Utf8)])],
            true,
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::SchemaMismatch {
                input: 2,
                column: "a".to_string(),
                mismatch: Mismatch::NoCommonType(NoCommonType {
                    left: Int64,
                    right: Utf8
                }),
            }
        );
    }

    #[test]
    fn test_vertical_name_and_width_mismatch() {
        let err = vertical(&[schema(&[("a", Int8)]), schema(&[("b", Int8)])], true).unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaMismatch { input: 1, ref column, mismatch: Mismatch::Name { ref found } }
                if column == "a" && found == "b"
        ));

        let err = vertical(
            &[schema(&[("a", Int8)]), schema(&[("a", Int8), ("b", Int8)])],
            true,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaMismatch {
                input: 1,
                mismatch: Mismatch::Width { expected: 1, found: 2 },
                ..
            }
        ));
    }

    #[test]
    fn test_horizontal_union() {
        let out = horizontal(&[
            schema(&[("a", Int64), ("b", Int64)]),
            schema(&[("c", Utf8)]),
            schema(&[]),
        ])
        .unwrap();
        assert_eq!(out, schema(&[("a", Int64), ("b", Int64), ("c", Utf8)]));
    }

    #[test]
    fn test_horizontal_duplicate() {
        let err = horizontal(&[
            schema(&[("a", Int64)]),
            schema(&[("b", Int64)]),
            schema(&[("a", Float64)]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateColumnName {
                name: "a".to_string(),
                first: 0,
                second: 2,
            }
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(vertical(&[], false), Err(Error::EmptyInput));
        assert_eq!(horizontal(&[]), Err(Error::EmptyInput));
    }
}
