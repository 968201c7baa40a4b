//! Supertype resolution over the element-type lattice
//!
//! ```text
//!            f64
//!          /  |  \
//!       f32  i64  \
//!             |    |
//!            i32   |
//!             |    |
//!            i16   |
//!             |    |
//!            i8    |
//!              \   |
//!               bool
//! ```
//!
//! Any integer or boolean meeting a float goes straight to f64, never f32.
//! Opaque kinds (utf8, date, timestamp) sit outside the lattice.

use crate::error::NoCommonType;
use crate::table::ElementType;

/// Smallest type that holds every value of both `a` and `b` exactly.
///
/// Commutative and associative, so it can be folded over any number of
/// types in any grouping.
pub fn resolve(a: ElementType, b: ElementType) -> Result<ElementType, NoCommonType> {
    use ElementType::*;

    if a == b {
        return Ok(a);
    }
    let no_common = NoCommonType { left: a, right: b };
    if !a.is_numeric() || !b.is_numeric() {
        return Err(no_common);
    }

    if a.is_float() || b.is_float() {
        return Ok(Float64);
    }
    // Integer/boolean pair: the wider bit width wins
    Ok(if a.bit_width() >= b.bit_width() { a } else { b })
}

/// Fold [`resolve`] left to right over a sequence of types.
///
/// Returns `Ok(None)` for an empty sequence. The error reports the running
/// supertype and the type that could not join it.
pub fn resolve_all<I>(types: I) -> Result<Option<ElementType>, NoCommonType>
where
    I: IntoIterator<Item = ElementType>,
{
    let mut acc = None;
    for dtype in types {
        acc = Some(match acc {
            None => dtype,
            Some(acc) => resolve(acc, dtype)?,
        });
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ElementType::*;

    const ALL: [ElementType; 10] = [
        Boolean, Int8, Int16, Int32, Int64, Float32, Float64, Utf8, Date, Timestamp,
    ];

    #[test]
    fn test_integer_widening() {
        assert_eq!(resolve(Int8, Int16), Ok(Int16));
        assert_eq!(resolve(Int32, Int8), Ok(Int32));
        assert_eq!(resolve(Int64, Boolean), Ok(Int64));
        assert_eq!(resolve(Boolean, Int8), Ok(Int8));
    }

    #[test]
    fn test_float_widening() {
        assert_eq!(resolve(Int64, Float64), Ok(Float64));
        assert_eq!(resolve(Int8, Float32), Ok(Float64));
        assert_eq!(resolve(Boolean, Float32), Ok(Float64));
        assert_eq!(resolve(Float32, Float64), Ok(Float64));
        assert_eq!(resolve(Float32, Float32), Ok(Float32));
    }

    #[test]
    fn test_opaque_types() {
        assert_eq!(resolve(Utf8, Utf8), Ok(Utf8));
        assert_eq!(
            resolve(Utf8, Int64),
            Err(NoCommonType {
                left: Utf8,
                right: Int64
            })
        );
        assert!(resolve(Date, Timestamp).is_err());
        assert!(resolve(Boolean, Date).is_err());
    }

    #[test]
    fn test_resolve_all() {
        assert_eq!(resolve_all([]), Ok(None));
        assert_eq!(resolve_all([Boolean, Int8, Int32]), Ok(Some(Int32)));
        assert_eq!(resolve_all([Int8, Float32, Int64]), Ok(Some(Float64)));
        assert_eq!(
            resolve_all([Int8, Int16, Utf8]),
            Err(NoCommonType {
                left: Int16,
                right: Utf8
            })
        );
    }

    fn element_type() -> impl Strategy<Value = ElementType> {
        proptest::sample::select(ALL.to_vec())
    }

    proptest! {
        #[test]
        fn resolve_is_commutative(a in element_type(), b in element_type()) {
            prop_assert_eq!(resolve(a, b).ok(), resolve(b, a).ok());
        }

        #[test]
        fn resolve_is_associative(a in element_type(), b in element_type(), c in element_type()) {
            let left = resolve(a, b).and_then(|ab| resolve(ab, c)).ok();
            let right = resolve(b, c).and_then(|bc| resolve(a, bc)).ok();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn resolve_is_an_upper_bound(a in element_type(), b in element_type()) {
            if let Ok(t) = resolve(a, b) {
                prop_assert_eq!(resolve(a, t), Ok(t));
                prop_assert_eq!(resolve(b, t), Ok(t));
            }
        }
    }
}
