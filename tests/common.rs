//! Test helpers with base structures
#![allow(dead_code)]

use minarrow::traits::type_unions::{Float, Integer};
use minarrow::{
    Array, BooleanArray, CategoricalArray, FloatArray, IntegerArray, MaskedArray, NumericArray,
    StringArray, TextArray,
};

/// A values column and the value set it is looked up in, of one logical type.
pub struct LookupCase {
    pub name: &'static str,
    pub values: Array,
    pub value_set: Array,
}

/// Every case follows the same shape:
///
/// ```text
/// values    = [a, b, null, c, b]
/// value_set = [b, null, d, b]
/// ```
///
/// `a` and `c` are absent, `b` is canonical at 0 and the value-set null sits at 1.
pub struct TestColumns {
    pub cases: Vec<LookupCase>,
}

/// `IsIn` under `Match` for every case in [`TestColumns`].
pub const MATCH_IS_IN: [Option<bool>; 5] =
    [Some(false), Some(true), Some(true), Some(false), Some(true)];
/// `IndexIn` under `Match` for every case in [`TestColumns`].
pub const MATCH_INDEX_IN: [Option<i32>; 5] = [None, Some(0), Some(1), None, Some(0)];

fn int_arr_null<T: Integer>(vals: &[Option<T>]) -> IntegerArray<T> {
    let mut a = IntegerArray::<T>::with_capacity(vals.len(), true);
    for v in vals {
        match v {
            Some(x) => a.push(*x),
            None => a.push_null(),
        }
    }
    a
}

fn float_arr_null<T: Float>(vals: &[Option<T>]) -> FloatArray<T> {
    let mut a = FloatArray::<T>::with_capacity(vals.len(), true);
    for v in vals {
        match v {
            Some(x) => a.push(*x),
            None => a.push_null(),
        }
    }
    a
}

fn str_arr_null<T: Integer>(vals: &[Option<&str>]) -> StringArray<T> {
    let filled: Vec<&str> = vals.iter().map(|v| v.unwrap_or("")).collect();
    let mut a = StringArray::<T>::from_slice(&filled);
    for (i, v) in vals.iter().enumerate() {
        if v.is_none() {
            a.set_null(i);
        }
    }
    a
}

fn dict_arr_null(vals: &[Option<&str>]) -> CategoricalArray<u32> {
    let mut a = CategoricalArray::<u32>::default();
    for v in vals {
        a.push_str(v.unwrap_or("?"));
    }
    for (i, v) in vals.iter().enumerate() {
        if v.is_none() {
            a.set_null(i);
        }
    }
    a
}

macro_rules! int_case {
    ($name:expr, $variant:ident, $ty:ty) => {
        LookupCase {
            name: $name,
            values: Array::NumericArray(NumericArray::$variant(
                int_arr_null::<$ty>(&[Some(11), Some(22), None, Some(33), Some(22)]).into(),
            )),
            value_set: Array::NumericArray(NumericArray::$variant(
                int_arr_null::<$ty>(&[Some(22), None, Some(44), Some(22)]).into(),
            )),
        }
    };
}

impl TestColumns {
    /// build once – reuse in every `#[test]`
    pub fn new() -> Self {
        let mut cases = vec![
            int_case!("i32", Int32, i32),
            int_case!("i64", Int64, i64),
            int_case!("u32", UInt32, u32),
            int_case!("u64", UInt64, u64),
        ];
        #[cfg(feature = "extended_numeric_types")]
        cases.extend([
            int_case!("i8", Int8, i8),
            int_case!("i16", Int16, i16),
            int_case!("u8", UInt8, u8),
            int_case!("u16", UInt16, u16),
        ]);

        // -0.0 in values must find 0.0 in the value set
        cases.push(LookupCase {
            name: "f32",
            values: Array::NumericArray(NumericArray::Float32(
                float_arr_null(&[Some(1.5_f32), Some(-0.0), None, Some(2.5), Some(-0.0)]).into(),
            )),
            value_set: Array::NumericArray(NumericArray::Float32(
                float_arr_null(&[Some(0.0_f32), None, Some(f32::NAN), Some(0.0)]).into(),
            )),
        });
        cases.push(LookupCase {
            name: "f64",
            values: Array::NumericArray(NumericArray::Float64(
                float_arr_null(&[Some(1.5_f64), Some(-0.0), None, Some(2.5), Some(-0.0)]).into(),
            )),
            value_set: Array::NumericArray(NumericArray::Float64(
                float_arr_null(&[Some(0.0_f64), None, Some(f64::NAN), Some(0.0)]).into(),
            )),
        });

        let values = [Some("a"), Some("bb"), None, Some("c"), Some("bb")];
        let value_set = [Some("bb"), None, Some("dd"), Some("bb")];
        cases.push(LookupCase {
            name: "str",
            values: Array::TextArray(TextArray::String32(str_arr_null::<u32>(&values).into())),
            value_set: Array::TextArray(TextArray::String32(
                str_arr_null::<u32>(&value_set).into(),
            )),
        });
        #[cfg(feature = "large_string")]
        cases.push(LookupCase {
            name: "lstr",
            values: Array::TextArray(TextArray::String64(str_arr_null::<u64>(&values).into())),
            value_set: Array::TextArray(TextArray::String64(
                str_arr_null::<u64>(&value_set).into(),
            )),
        });
        // separate dictionaries with different code assignments
        cases.push(LookupCase {
            name: "dict",
            values: Array::TextArray(TextArray::Categorical32(dict_arr_null(&values).into())),
            value_set: Array::TextArray(TextArray::Categorical32(
                dict_arr_null(&value_set).into(),
            )),
        });

        Self { cases }
    }
}

/// Asserts an `IsIn` output slot by slot. `None` means the slot must be null.
pub fn assert_is_in(label: &str, arr: &BooleanArray<()>, expect: &[Option<bool>]) {
    assert_eq!(arr.len(), expect.len(), "{label}: length mismatch");
    for (i, e) in expect.iter().enumerate() {
        let valid = arr.null_mask.as_ref().map_or(true, |m| m.get(i));
        match e {
            Some(b) => {
                assert!(valid, "{label}: expected valid @ {i}");
                assert_eq!(arr.data.get(i), *b, "{label}: val @ {i}");
            }
            None => assert!(!valid, "{label}: expected null @ {i}"),
        }
    }
}

/// Asserts an `IndexIn` output slot by slot. `None` means the slot must be null.
pub fn assert_index_in(label: &str, arr: &IntegerArray<i32>, expect: &[Option<i32>]) {
    assert_eq!(arr.data.len(), expect.len(), "{label}: length mismatch");
    let mask = arr
        .null_mask
        .as_ref()
        .expect("index_in output always carries a mask");
    for (i, e) in expect.iter().enumerate() {
        match e {
            Some(v) => {
                assert!(mask.get(i), "{label}: expected valid @ {i}");
                assert_eq!(arr.data[i], *v, "{label}: val @ {i}");
            }
            None => assert!(!mask.get(i), "{label}: expected null @ {i}"),
        }
    }
}

/// Nullable `Int32` column from options.
pub fn i32_array(vals: &[Option<i32>]) -> Array {
    Array::NumericArray(NumericArray::Int32(int_arr_null(vals).into()))
}

/// Nullable `String32` column from options.
pub fn str_array(vals: &[Option<&str>]) -> Array {
    Array::TextArray(TextArray::String32(str_arr_null::<u32>(vals).into()))
}
