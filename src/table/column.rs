//! Typed column with a validity bitmap for nulls
//!
//! Value storage sits behind an `Arc` so that cloning a column, or passing an
//! input column through to a concat result untouched, never copies data.
//! Every in-place extension goes through `Arc::make_mut`: a column that is
//! still shared gets its own copy first (copy-on-write).

use std::sync::Arc;

use super::{Bitmap, ElementType, Value};
use crate::concat::supertype;
use crate::error::{Error, Result};

/// Values of one element type plus optional validity.
///
/// Null slots always hold `T::default()`.
#[derive(Clone, Debug)]
pub struct Array<T> {
    values: Arc<Vec<T>>,
    /// None = all valid
    validity: Option<Bitmap>,
}

impl<T: Clone + Default> Array<T> {
    /// Array without nulls
    pub fn new(values: Vec<T>) -> Self {
        Array {
            values: Arc::new(values),
            validity: None,
        }
    }

    /// Array from optional values (`None` = null)
    pub fn from_options<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut values = Vec::with_capacity(iter.size_hint().0);
        let mut validity = Bitmap::new_all_valid(0);
        for v in iter {
            validity.push(v.is_some());
            values.push(v.unwrap_or_default());
        }
        let validity = (validity.null_count() > 0).then_some(validity);
        Array {
            values: Arc::new(values),
            validity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw values, including the default placeholders at null slots
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn validity(&self) -> Option<&Bitmap> {
        self.validity.as_ref()
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        self.validity.as_ref().map_or(true, |bm| bm.get(i))
    }

    /// Value at `i`, `None` if null
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    pub fn get(&self, i: usize) -> Option<&T> {
        let v = &self.values[i];
        self.is_valid(i).then_some(v)
    }

    pub fn null_count(&self) -> usize {
        self.validity.as_ref().map_or(0, Bitmap::null_count)
    }

    /// True if `self` and `other` share value storage
    pub fn shares_values_with(&self, other: &Array<T>) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }

    fn append(&mut self, other: &Array<T>) {
        let len = self.len();
        match (&mut self.validity, &other.validity) {
            (None, None) => {}
            (Some(bm), None) => bm.extend_constant(other.len(), true),
            (Some(bm), Some(other_bm)) => bm.extend_from_bitmap(other_bm),
            (None, Some(other_bm)) => {
                let mut bm = Bitmap::new_all_valid(len);
                bm.extend_from_bitmap(other_bm);
                self.validity = Some(bm);
            }
        }
        Arc::make_mut(&mut self.values).extend_from_slice(&other.values);
    }

    fn extend_nulls(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let len = self.len();
        self.validity
            .get_or_insert_with(|| Bitmap::new_all_valid(len))
            .extend_constant(n, false);
        Arc::make_mut(&mut self.values).resize(len + n, T::default());
    }

    /// Repeat the single element of a length-1 array `n` times
    fn broadcast(&self, n: usize) -> Array<T> {
        debug_assert_eq!(self.len(), 1);
        if self.is_valid(0) {
            Array::new(vec![self.values[0].clone(); n])
        } else {
            Array {
                values: Arc::new(vec![T::default(); n]),
                validity: Some(Bitmap::new_all_null(n)),
            }
        }
    }

    fn map<U: Clone + Default>(&self, f: impl Fn(&T) -> U) -> Array<U> {
        let values = match &self.validity {
            None => self.values.iter().map(f).collect(),
            Some(bm) => self
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| if bm.get(i) { f(v) } else { U::default() })
                .collect(),
        };
        Array {
            values: Arc::new(values),
            validity: self.validity.clone(),
        }
    }
}

impl<T: Clone + Default + PartialEq> PartialEq for Array<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && (0..self.len()).all(|i| self.get(i) == other.get(i))
    }
}

/// A typed column of data
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Boolean(Array<bool>),
    Int8(Array<i8>),
    Int16(Array<i16>),
    Int32(Array<i32>),
    Int64(Array<i64>),
    Float32(Array<f32>),
    Float64(Array<f64>),
    Utf8(Array<String>),
    /// Days since epoch (1970-01-01) as i32
    Date(Array<i32>),
    /// Nanoseconds since epoch (1970-01-01 00:00:00) as i64
    Timestamp(Array<i64>),
}

/// Run `$body` against the array inside any column variant.
macro_rules! with_array {
    ($column:expr, $arr:ident => $body:expr) => {
        match $column {
            Column::Boolean($arr) => $body,
            Column::Int8($arr) => $body,
            Column::Int16($arr) => $body,
            Column::Int32($arr) => $body,
            Column::Int64($arr) => $body,
            Column::Float32($arr) => $body,
            Column::Float64($arr) => $body,
            Column::Utf8($arr) => $body,
            Column::Date($arr) => $body,
            Column::Timestamp($arr) => $body,
        }
    };
}

/// Like `with_array!`, rewrapping the resulting array in the same variant.
macro_rules! map_array {
    ($column:expr, $arr:ident => $body:expr) => {
        match $column {
            Column::Boolean($arr) => Column::Boolean($body),
            Column::Int8($arr) => Column::Int8($body),
            Column::Int16($arr) => Column::Int16($body),
            Column::Int32($arr) => Column::Int32($body),
            Column::Int64($arr) => Column::Int64($body),
            Column::Float32($arr) => Column::Float32($body),
            Column::Float64($arr) => Column::Float64($body),
            Column::Utf8($arr) => Column::Utf8($body),
            Column::Date($arr) => Column::Date($body),
            Column::Timestamp($arr) => Column::Timestamp($body),
        }
    };
}

impl Column {
    /// Date column without nulls
    pub fn new_date(data: Vec<i32>) -> Self {
        Column::Date(Array::new(data))
    }

    /// Timestamp column without nulls
    pub fn new_timestamp(data: Vec<i64>) -> Self {
        Column::Timestamp(Array::new(data))
    }

    /// Column of `len` nulls
    pub fn full_null(dtype: ElementType, len: usize) -> Self {
        fn nulls<T: Clone + Default>(len: usize) -> Array<T> {
            let mut arr = Array::new(Vec::new());
            arr.extend_nulls(len);
            arr
        }
        match dtype {
            ElementType::Boolean => Column::Boolean(nulls(len)),
            ElementType::Int8 => Column::Int8(nulls(len)),
            ElementType::Int16 => Column::Int16(nulls(len)),
            ElementType::Int32 => Column::Int32(nulls(len)),
            ElementType::Int64 => Column::Int64(nulls(len)),
            ElementType::Float32 => Column::Float32(nulls(len)),
            ElementType::Float64 => Column::Float64(nulls(len)),
            ElementType::Utf8 => Column::Utf8(nulls(len)),
            ElementType::Date => Column::Date(nulls(len)),
            ElementType::Timestamp => Column::Timestamp(nulls(len)),
        }
    }

    pub fn dtype(&self) -> ElementType {
        match self {
            Column::Boolean(_) => ElementType::Boolean,
            Column::Int8(_) => ElementType::Int8,
            Column::Int16(_) => ElementType::Int16,
            Column::Int32(_) => ElementType::Int32,
            Column::Int64(_) => ElementType::Int64,
            Column::Float32(_) => ElementType::Float32,
            Column::Float64(_) => ElementType::Float64,
            Column::Utf8(_) => ElementType::Utf8,
            Column::Date(_) => ElementType::Date,
            Column::Timestamp(_) => ElementType::Timestamp,
        }
    }

    pub fn len(&self) -> usize {
        with_array!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn null_count(&self) -> usize {
        with_array!(self, a => a.null_count())
    }

    pub fn validity(&self) -> Option<&Bitmap> {
        with_array!(self, a => a.validity())
    }

    /// Cell at row `i`
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    pub fn get(&self, i: usize) -> Value {
        let value = match self {
            Column::Boolean(a) => a.get(i).map(|v| Value::Boolean(*v)),
            Column::Int8(a) => a.get(i).map(|v| Value::Int8(*v)),
            Column::Int16(a) => a.get(i).map(|v| Value::Int16(*v)),
            Column::Int32(a) => a.get(i).map(|v| Value::Int32(*v)),
            Column::Int64(a) => a.get(i).map(|v| Value::Int64(*v)),
            Column::Float32(a) => a.get(i).map(|v| Value::Float32(*v)),
            Column::Float64(a) => a.get(i).map(|v| Value::Float64(*v)),
            Column::Utf8(a) => a.get(i).map(|v| Value::Utf8(v.clone())),
            Column::Date(a) => a.get(i).map(|v| Value::Date(*v)),
            Column::Timestamp(a) => a.get(i).map(|v| Value::Timestamp(*v)),
        };
        value.unwrap_or(Value::Null)
    }

    /// All cells, in row order
    pub fn to_values(&self) -> Vec<Value> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    /// True if both columns read from the same value storage
    pub fn shares_values_with(&self, other: &Column) -> bool {
        match (self, other) {
            (Column::Boolean(a), Column::Boolean(b)) => a.shares_values_with(b),
            (Column::Int8(a), Column::Int8(b)) => a.shares_values_with(b),
            (Column::Int16(a), Column::Int16(b)) => a.shares_values_with(b),
            (Column::Int32(a), Column::Int32(b)) => a.shares_values_with(b),
            (Column::Int64(a), Column::Int64(b)) => a.shares_values_with(b),
            (Column::Float32(a), Column::Float32(b)) => a.shares_values_with(b),
            (Column::Float64(a), Column::Float64(b)) => a.shares_values_with(b),
            (Column::Utf8(a), Column::Utf8(b)) => a.shares_values_with(b),
            (Column::Date(a), Column::Date(b)) => a.shares_values_with(b),
            (Column::Timestamp(a), Column::Timestamp(b)) => a.shares_values_with(b),
            _ => false,
        }
    }

    /// Append `other` to the end of this column.
    ///
    /// Both columns must have the same element type. Storage still shared
    /// with another column is copied before it is extended.
    pub fn append(&mut self, other: &Column) -> Result<()> {
        let (expected, found) = (self.dtype(), other.dtype());
        match (self, other) {
            (Column::Boolean(a), Column::Boolean(b)) => a.append(b),
            (Column::Int8(a), Column::Int8(b)) => a.append(b),
            (Column::Int16(a), Column::Int16(b)) => a.append(b),
            (Column::Int32(a), Column::Int32(b)) => a.append(b),
            (Column::Int64(a), Column::Int64(b)) => a.append(b),
            (Column::Float32(a), Column::Float32(b)) => a.append(b),
            (Column::Float64(a), Column::Float64(b)) => a.append(b),
            (Column::Utf8(a), Column::Utf8(b)) => a.append(b),
            (Column::Date(a), Column::Date(b)) => a.append(b),
            (Column::Timestamp(a), Column::Timestamp(b)) => a.append(b),
            _ => return Err(Error::ColumnTypeMismatch { expected, found }),
        }
        Ok(())
    }

    /// Pad the tail with `n` nulls
    pub fn extend_nulls(&mut self, n: usize) {
        with_array!(self, a => a.extend_nulls(n))
    }

    /// Repeat the single row of a length-1 column `n` times.
    ///
    /// Returns `None` if the column does not have exactly one row.
    pub fn broadcast(&self, n: usize) -> Option<Column> {
        if self.len() != 1 {
            return None;
        }
        Some(map_array!(self, a => a.broadcast(n)))
    }

    /// Convert to a wider element type.
    ///
    /// Only conversions the supertype lattice allows are accepted, so the
    /// result always holds every input value exactly. Casting to the column's
    /// own type is free and shares storage.
    pub fn cast(&self, to: ElementType) -> Result<Column> {
        let from = self.dtype();
        if from == to {
            return Ok(self.clone());
        }
        let invalid = Error::InvalidCast { from, to };
        if supertype::resolve(from, to) != Ok(to) {
            return Err(invalid);
        }
        let column = match to {
            ElementType::Int8 => self.widen_int(|v| v as i8).map(Column::Int8),
            ElementType::Int16 => self.widen_int(|v| v as i16).map(Column::Int16),
            ElementType::Int32 => self.widen_int(|v| v as i32).map(Column::Int32),
            ElementType::Int64 => self.widen_int(|v| v).map(Column::Int64),
            ElementType::Float64 => self.widen_float().map(Column::Float64),
            _ => None,
        };
        column.ok_or(invalid)
    }

    fn widen_int<T: Clone + Default>(&self, f: impl Fn(i64) -> T) -> Option<Array<T>> {
        let array = match self {
            Column::Boolean(a) => a.map(|&v| f(i64::from(v))),
            Column::Int8(a) => a.map(|&v| f(i64::from(v))),
            Column::Int16(a) => a.map(|&v| f(i64::from(v))),
            Column::Int32(a) => a.map(|&v| f(i64::from(v))),
            Column::Int64(a) => a.map(|&v| f(v)),
            _ => return None,
        };
        Some(array)
    }

    fn widen_float(&self) -> Option<Array<f64>> {
        let array = match self {
            Column::Boolean(a) => a.map(|&v| f64::from(u8::from(v))),
            Column::Int8(a) => a.map(|&v| f64::from(v)),
            Column::Int16(a) => a.map(|&v| f64::from(v)),
            Column::Int32(a) => a.map(|&v| f64::from(v)),
            Column::Int64(a) => a.map(|&v| v as f64),
            Column::Float32(a) => a.map(|&v| f64::from(v)),
            Column::Float64(a) => a.clone(),
            _ => return None,
        };
        Some(array)
    }
}

/// Rust types stored directly in a column variant
pub trait NativeType: Clone + Default + Send + Sync + 'static {
    fn into_column(array: Array<Self>) -> Column;
}

macro_rules! native_type {
    ($ty:ty, $variant:ident) => {
        impl NativeType for $ty {
            fn into_column(array: Array<Self>) -> Column {
                Column::$variant(array)
            }
        }
    };
}

native_type!(bool, Boolean);
native_type!(i8, Int8);
native_type!(i16, Int16);
native_type!(i32, Int32);
native_type!(i64, Int64);
native_type!(f32, Float32);
native_type!(f64, Float64);
native_type!(String, Utf8);

impl<T: NativeType> From<Vec<T>> for Column {
    fn from(data: Vec<T>) -> Self {
        T::into_column(Array::new(data))
    }
}

impl<T: NativeType> From<Vec<Option<T>>> for Column {
    fn from(data: Vec<Option<T>>) -> Self {
        T::into_column(Array::from_options(data))
    }
}

impl From<Vec<&str>> for Column {
    fn from(data: Vec<&str>) -> Self {
        Column::Utf8(Array::new(data.into_iter().map(str::to_owned).collect()))
    }
}

impl From<Vec<Option<&str>>> for Column {
    fn from(data: Vec<Option<&str>>) -> Self {
        Column::Utf8(Array::from_options(
            data.into_iter().map(|v| v.map(str::to_owned)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_options() {
        let col = Column::from(vec![Some(1i64), None, Some(3)]);
        assert_eq!(col.len(), 3);
        assert_eq!(col.null_count(), 1);
        assert_eq!(
            col.to_values(),
            vec![Value::Int64(1), Value::Null, Value::Int64(3)]
        );

        // No nulls: no bitmap
        let col = Column::from(vec![Some(1i64), Some(2)]);
        assert!(col.validity().is_none());
    }

    #[test]
    fn test_equality_ignores_bitmap_presence() {
        let a = Column::from(vec![1i32, 2]);
        let mut b = Column::from(vec![Some(1i32)]);
        b.append(&Column::from(vec![Some(2i32), None])).unwrap();
        assert_ne!(a, b);

        let mut c = Column::from(vec![1i32]);
        c.extend_nulls(1);
        assert_eq!(c.to_values(), vec![Value::Int32(1), Value::Null]);
        assert_eq!(Column::from(vec![Some(1i32), None]), c);
    }

    #[test]
    fn test_append_copy_on_write() {
        let original = Column::from(vec![1i64, 2]);
        let mut grown = original.clone();
        assert!(grown.shares_values_with(&original));

        grown.append(&Column::from(vec![Some(3i64), None])).unwrap();

        assert_eq!(original.len(), 2);
        assert!(original.validity().is_none());
        assert_eq!(
            grown.to_values(),
            vec![Value::Int64(1), Value::Int64(2), Value::Int64(3), Value::Null]
        );
        assert!(!grown.shares_values_with(&original));
    }

    #[test]
    fn test_append_type_mismatch() {
        let mut a = Column::from(vec![1i64]);
        let err = a.append(&Column::from(vec![1i8])).unwrap_err();
        assert_eq!(
            err,
            Error::ColumnTypeMismatch {
                expected: ElementType::Int64,
                found: ElementType::Int8,
            }
        );
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_broadcast() {
        let col = Column::from(vec!["x"]);
        let out = col.broadcast(3).unwrap();
        assert_eq!(out, Column::from(vec!["x", "x", "x"]));

        let null = Column::from(vec![None::<f64>]);
        assert_eq!(null.broadcast(2).unwrap().null_count(), 2);

        assert!(Column::from(vec![1i8, 2]).broadcast(4).is_none());
    }

    #[test]
    fn test_cast_bool_to_int() {
        let col = Column::from(vec![Some(true), Some(false), None]);
        let out = col.cast(ElementType::Int64).unwrap();
        assert_eq!(
            out.to_values(),
            vec![Value::Int64(1), Value::Int64(0), Value::Null]
        );
    }

    #[test]
    fn test_cast_int_to_float() {
        let col = Column::from(vec![Some(i64::MAX), None]);
        let out = col.cast(ElementType::Float64).unwrap();
        assert_eq!(out.dtype(), ElementType::Float64);
        assert_eq!(out.get(0), Value::Float64(i64::MAX as f64));
        assert!(out.get(1).is_null());
    }

    #[test]
    fn test_cast_same_type_shares_storage() {
        let col = Column::from(vec![1i16, 2]);
        assert!(col.cast(ElementType::Int16).unwrap().shares_values_with(&col));
    }

    #[test]
    fn test_cast_narrowing_rejected() {
        let col = Column::from(vec![300i16]);
        assert_eq!(
            col.cast(ElementType::Int8).unwrap_err(),
            Error::InvalidCast {
                from: ElementType::Int16,
                to: ElementType::Int8,
            }
        );
        assert!(Column::from(vec!["a"]).cast(ElementType::Int64).is_err());
        assert!(Column::from(vec![1i32]).cast(ElementType::Float32).is_err());
    }

    #[test]
    fn test_full_null() {
        let col = Column::full_null(ElementType::Date, 3);
        assert_eq!(col.dtype(), ElementType::Date);
        assert_eq!(col.null_count(), 3);
    }
}
