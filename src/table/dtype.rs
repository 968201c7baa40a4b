//! Element types and scalar values

use std::fmt;

/// Element type of a column.
///
/// Numeric kinds and `Boolean` take part in widening. `Utf8`, `Date` and
/// `Timestamp` are opaque: they only ever match themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Utf8,
    /// Days since epoch (1970-01-01) as i32
    Date,
    /// Nanoseconds since epoch as i64
    Timestamp,
}

impl ElementType {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ElementType::Int8 | ElementType::Int16 | ElementType::Int32 | ElementType::Int64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, ElementType::Float32 | ElementType::Float64)
    }

    /// Boolean, integer or float: the kinds that widen.
    pub fn is_numeric(self) -> bool {
        self == ElementType::Boolean || self.is_integer() || self.is_float()
    }

    /// Bit width of numeric kinds (boolean counts as 1).
    pub fn bit_width(self) -> Option<u8> {
        match self {
            ElementType::Boolean => Some(1),
            ElementType::Int8 => Some(8),
            ElementType::Int16 => Some(16),
            ElementType::Int32 | ElementType::Float32 => Some(32),
            ElementType::Int64 | ElementType::Float64 => Some(64),
            ElementType::Utf8 | ElementType::Date | ElementType::Timestamp => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Boolean => "bool",
            ElementType::Int8 => "i8",
            ElementType::Int16 => "i16",
            ElementType::Int32 => "i32",
            ElementType::Int64 => "i64",
            ElementType::Float32 => "f32",
            ElementType::Float64 => "f64",
            ElementType::Utf8 => "utf8",
            ElementType::Date => "date",
            ElementType::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A single cell read back out of a column.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Utf8(String),
    Date(i32),
    Timestamp(i64),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_predicates() {
        assert!(ElementType::Boolean.is_numeric());
        assert!(!ElementType::Boolean.is_integer());
        assert!(ElementType::Int16.is_integer());
        assert!(ElementType::Float32.is_float());
        assert!(!ElementType::Date.is_numeric());
        assert_eq!(ElementType::Utf8.bit_width(), None);
        assert_eq!(ElementType::Int32.bit_width(), Some(32));
    }

    #[test]
    fn test_display() {
        assert_eq!(ElementType::Int64.to_string(), "i64");
        assert_eq!(ElementType::Timestamp.to_string(), "timestamp");
    }
}
