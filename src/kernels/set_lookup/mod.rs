// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Set Lookup Kernels Module** - *IsIn and IndexIn over a Value Set*
//!
//! Set-lookup kernels test each element of a values column against a value set.
//!
//! ## Operations
//! - **IsIn**: one boolean per value, true when the value occurs in the value set
//! - **IndexIn**: one `i32` per value, the position of the value's first occurrence
//!   in the value set, or null when absent
//!
//! Each call builds a [`LookupTable`] over the value set once, then probes it in a
//! single pass over the values. Callers probing several columns against the same
//! value set can build the table themselves and call its `probe_*` methods.
//!
//! ## Entry points
//! - [`set_lookup`] takes a [`SetLookupOperator`] and returns an [`Array`]
//! - [`is_in`] / [`index_in`] dispatch on the `Array` variant and return typed arrays
//! - `is_in_int`, `is_in_float`, `is_in_str`, `is_in_dict` and their `index_in_*`
//!   counterparts take windowed `(array, offset, len)` views directly
//!
//! ## Null handling
//! Controlled by [`NullMatchingBehavior`] on [`SetLookupOptions`]. The default,
//! `Match`, treats null as a value that can be found in the value set.
//!
//! ## Types
//! Values and value set must share one logical type. Integers and floats of every
//! enabled width, `String32`, `String64` and `Categorical32` are supported. Floats
//! match by value with all NaNs equal and `-0.0 == 0.0`. Categorical columns match
//! on dictionary content, so the two sides may use different dictionaries.

pub(crate) mod probe;
pub mod table;

use std::mem::discriminant;

use minarrow::{
    Array, BooleanArray, CategoricalAVT, CategoricalArray, FloatAVT, FloatArray, Integer,
    IntegerAVT, IntegerArray, MaskedArray, NumericArray, StringAVT, StringArray, TextArray,
};

use crate::config::{DEFAULT_PARALLEL_THRESHOLD, DEFAULT_PROBE_CHUNK};
use crate::errors::{KernelError, log_type_mismatch};
pub use crate::operators::{NullMatchingBehavior, SetLookupOperator};
use crate::traits::lookup_column::LookupColumn;
pub use table::LookupTable;

/// Per-call options for set-lookup kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetLookupOptions {
    /// How nulls in the values and the value set interact.
    pub null_matching: NullMatchingBehavior,
    /// Allow the chunked parallel probe. Ignored without `parallel_probe`.
    pub parallel: bool,
    /// Minimum values length before the probe goes parallel.
    pub parallel_threshold: usize,
    /// Values per parallel task, before rounding to whole bitmap bytes.
    pub chunk_size: usize,
}

impl Default for SetLookupOptions {
    fn default() -> Self {
        Self {
            null_matching: NullMatchingBehavior::default(),
            parallel: cfg!(feature = "parallel_probe"),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            chunk_size: DEFAULT_PROBE_CHUNK,
        }
    }
}

impl SetLookupOptions {
    /// Create new options with default settings (`Match`, parallel where available)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set null matching behaviour
    pub fn null_matching(mut self, null_matching: NullMatchingBehavior) -> Self {
        self.null_matching = null_matching;
        self
    }

    /// Enable the chunked parallel probe
    ///
    /// Has no effect unless the `parallel_probe` feature is enabled.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the minimum values length for the parallel probe
    pub fn parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Set the number of values per parallel task
    ///
    /// Rounded up to a multiple of 8 when used.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Chunk size actually used by the probe: at least 8 and a multiple of 8.
    ///
    /// Sizes too large to round up are rounded down to the largest multiple of 8.
    #[inline]
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.clamp(8, usize::MAX & !7).next_multiple_of(8)
    }
}

/// Builds the table over `value_set` and runs `IsIn` for `values`.
#[inline]
fn is_in_column<'a, C>(
    values: &C,
    value_set: &C,
    options: &SetLookupOptions,
) -> Result<BooleanArray<()>, KernelError>
where
    C: LookupColumn<'a>,
{
    LookupTable::build(value_set)?.probe_is_in(values, options)
}

/// Builds the table over `value_set` and runs `IndexIn` for `values`.
#[inline]
fn index_in_column<'a, C>(
    values: &C,
    value_set: &C,
    options: &SetLookupOptions,
) -> Result<IntegerArray<i32>, KernelError>
where
    C: LookupColumn<'a>,
{
    LookupTable::build(value_set)?.probe_index_in(values, options)
}

// Typed, windowed entry points

/// `IsIn` for integer views.
pub fn is_in_int<'a, T>(
    values: IntegerAVT<'a, T>,
    value_set: IntegerAVT<'a, T>,
    options: &SetLookupOptions,
) -> Result<BooleanArray<()>, KernelError>
where
    IntegerAVT<'a, T>: LookupColumn<'a>,
{
    is_in_column(&values, &value_set, options)
}

/// `IndexIn` for integer views.
pub fn index_in_int<'a, T>(
    values: IntegerAVT<'a, T>,
    value_set: IntegerAVT<'a, T>,
    options: &SetLookupOptions,
) -> Result<IntegerArray<i32>, KernelError>
where
    IntegerAVT<'a, T>: LookupColumn<'a>,
{
    index_in_column(&values, &value_set, options)
}

/// `IsIn` for float views. NaN matches NaN and `-0.0` matches `0.0`.
pub fn is_in_float<'a, T>(
    values: FloatAVT<'a, T>,
    value_set: FloatAVT<'a, T>,
    options: &SetLookupOptions,
) -> Result<BooleanArray<()>, KernelError>
where
    FloatAVT<'a, T>: LookupColumn<'a>,
{
    is_in_column(&values, &value_set, options)
}

/// `IndexIn` for float views. NaN matches NaN and `-0.0` matches `0.0`.
pub fn index_in_float<'a, T>(
    values: FloatAVT<'a, T>,
    value_set: FloatAVT<'a, T>,
    options: &SetLookupOptions,
) -> Result<IntegerArray<i32>, KernelError>
where
    FloatAVT<'a, T>: LookupColumn<'a>,
{
    index_in_column(&values, &value_set, options)
}

/// `IsIn` for UTF-8 string views.
pub fn is_in_str<'a, T: Integer>(
    values: StringAVT<'a, T>,
    value_set: StringAVT<'a, T>,
    options: &SetLookupOptions,
) -> Result<BooleanArray<()>, KernelError>
where
    StringAVT<'a, T>: LookupColumn<'a>,
{
    is_in_column(&values, &value_set, options)
}

/// `IndexIn` for UTF-8 string views.
pub fn index_in_str<'a, T: Integer>(
    values: StringAVT<'a, T>,
    value_set: StringAVT<'a, T>,
    options: &SetLookupOptions,
) -> Result<IntegerArray<i32>, KernelError>
where
    StringAVT<'a, T>: LookupColumn<'a>,
{
    index_in_column(&values, &value_set, options)
}

/// `IsIn` for dictionary-encoded views, matched on dictionary content.
pub fn is_in_dict<'a, T: Integer>(
    values: CategoricalAVT<'a, T>,
    value_set: CategoricalAVT<'a, T>,
    options: &SetLookupOptions,
) -> Result<BooleanArray<()>, KernelError>
where
    CategoricalAVT<'a, T>: LookupColumn<'a>,
{
    is_in_column(&values, &value_set, options)
}

/// `IndexIn` for dictionary-encoded views, matched on dictionary content.
///
/// Indices are positions in the value-set column, not dictionary codes.
pub fn index_in_dict<'a, T: Integer>(
    values: CategoricalAVT<'a, T>,
    value_set: CategoricalAVT<'a, T>,
    options: &SetLookupOptions,
) -> Result<IntegerArray<i32>, KernelError>
where
    CategoricalAVT<'a, T>: LookupColumn<'a>,
{
    index_in_column(&values, &value_set, options)
}

// Array dispatch

#[inline(always)]
fn int_view<T>(arr: &IntegerArray<T>) -> IntegerAVT<'_, T> {
    (arr, 0, arr.data.len())
}

#[inline(always)]
fn float_view<T>(arr: &FloatArray<T>) -> FloatAVT<'_, T> {
    (arr, 0, arr.data.len())
}

#[inline(always)]
fn str_view<T: Integer>(arr: &StringArray<T>) -> StringAVT<'_, T> {
    arr.tuple_ref(0, MaskedArray::len(arr))
}

#[inline(always)]
fn dict_view<T: Integer>(arr: &CategoricalArray<T>) -> CategoricalAVT<'_, T> {
    arr.tuple_ref(0, MaskedArray::len(arr))
}

/// Logical type label used in error messages.
fn logical_type(arr: &Array) -> &'static str {
    match arr {
        Array::NumericArray(num) => match num {
            #[cfg(feature = "extended_numeric_types")]
            NumericArray::Int8(_) => "Int8",
            #[cfg(feature = "extended_numeric_types")]
            NumericArray::Int16(_) => "Int16",
            NumericArray::Int32(_) => "Int32",
            NumericArray::Int64(_) => "Int64",
            #[cfg(feature = "extended_numeric_types")]
            NumericArray::UInt8(_) => "UInt8",
            #[cfg(feature = "extended_numeric_types")]
            NumericArray::UInt16(_) => "UInt16",
            NumericArray::UInt32(_) => "UInt32",
            NumericArray::UInt64(_) => "UInt64",
            NumericArray::Float32(_) => "Float32",
            NumericArray::Float64(_) => "Float64",
            _ => "Numeric",
        },
        Array::TextArray(text) => match text {
            TextArray::String32(_) => "String32",
            #[cfg(feature = "large_string")]
            TextArray::String64(_) => "String64",
            TextArray::Categorical32(_) => "Categorical32",
            _ => "Text",
        },
        Array::BooleanArray(_) => "Boolean",
        _ => "Unsupported",
    }
}

/// True if both arrays are the same variant down to width and offset size.
fn same_logical_type(a: &Array, b: &Array) -> bool {
    match (a, b) {
        (Array::NumericArray(x), Array::NumericArray(y)) => discriminant(x) == discriminant(y),
        (Array::TextArray(x), Array::TextArray(y)) => discriminant(x) == discriminant(y),
        _ => discriminant(a) == discriminant(b),
    }
}

/// Error for a pair of arrays that no dispatch arm accepted.
fn mismatch_or_unsupported(fname: &str, values: &Array, value_set: &Array) -> KernelError {
    if same_logical_type(values, value_set) {
        KernelError::UnsupportedType(format!(
            "{} => no lookup kernel for {}",
            fname,
            logical_type(values)
        ))
    } else {
        KernelError::TypeMismatch(log_type_mismatch(
            fname,
            logical_type(values),
            logical_type(value_set),
        ))
    }
}

/// Matches a `(values, value_set)` pair of `Array`s of the same supported type and
/// runs `$kernel` over full-length views of both.
macro_rules! dispatch_lookup {
    ($fname:expr, $values:expr, $value_set:expr, $options:expr, $kernel:ident) => {{
        match ($values, $value_set) {
            #[cfg(feature = "extended_numeric_types")]
            (Array::NumericArray(NumericArray::Int8(a)), Array::NumericArray(NumericArray::Int8(b))) => {
                $kernel(&int_view(a), &int_view(b), $options)
            }
            #[cfg(feature = "extended_numeric_types")]
            (Array::NumericArray(NumericArray::Int16(a)), Array::NumericArray(NumericArray::Int16(b))) => {
                $kernel(&int_view(a), &int_view(b), $options)
            }
            (Array::NumericArray(NumericArray::Int32(a)), Array::NumericArray(NumericArray::Int32(b))) => {
                $kernel(&int_view(a), &int_view(b), $options)
            }
            (Array::NumericArray(NumericArray::Int64(a)), Array::NumericArray(NumericArray::Int64(b))) => {
                $kernel(&int_view(a), &int_view(b), $options)
            }
            #[cfg(feature = "extended_numeric_types")]
            (Array::NumericArray(NumericArray::UInt8(a)), Array::NumericArray(NumericArray::UInt8(b))) => {
                $kernel(&int_view(a), &int_view(b), $options)
            }
            #[cfg(feature = "extended_numeric_types")]
            (Array::NumericArray(NumericArray::UInt16(a)), Array::NumericArray(NumericArray::UInt16(b))) => {
                $kernel(&int_view(a), &int_view(b), $options)
            }
            (Array::NumericArray(NumericArray::UInt32(a)), Array::NumericArray(NumericArray::UInt32(b))) => {
                $kernel(&int_view(a), &int_view(b), $options)
            }
            (Array::NumericArray(NumericArray::UInt64(a)), Array::NumericArray(NumericArray::UInt64(b))) => {
                $kernel(&int_view(a), &int_view(b), $options)
            }
            (Array::NumericArray(NumericArray::Float32(a)), Array::NumericArray(NumericArray::Float32(b))) => {
                $kernel(&float_view(a), &float_view(b), $options)
            }
            (Array::NumericArray(NumericArray::Float64(a)), Array::NumericArray(NumericArray::Float64(b))) => {
                $kernel(&float_view(a), &float_view(b), $options)
            }
            (Array::TextArray(TextArray::String32(a)), Array::TextArray(TextArray::String32(b))) => {
                $kernel(&str_view(a), &str_view(b), $options)
            }
            #[cfg(feature = "large_string")]
            (Array::TextArray(TextArray::String64(a)), Array::TextArray(TextArray::String64(b))) => {
                $kernel(&str_view(a), &str_view(b), $options)
            }
            (Array::TextArray(TextArray::Categorical32(a)), Array::TextArray(TextArray::Categorical32(b))) => {
                $kernel(&dict_view(a), &dict_view(b), $options)
            }
            (a, b) => Err(mismatch_or_unsupported($fname, a, b)),
        }
    }};
}

/// Set membership of every element of `values` in `value_set`.
///
/// # Errors
/// `TypeMismatch` if the two arrays differ in logical type, `UnsupportedType` if
/// the shared type has no lookup kernel, or any error from building and probing.
pub fn is_in(
    values: &Array,
    value_set: &Array,
    options: &SetLookupOptions,
) -> Result<BooleanArray<()>, KernelError> {
    dispatch_lookup!("is_in", values, value_set, options, is_in_column)
}

/// First-occurrence position in `value_set` of every element of `values`.
///
/// # Errors
/// As for [`is_in`].
pub fn index_in(
    values: &Array,
    value_set: &Array,
    options: &SetLookupOptions,
) -> Result<IntegerArray<i32>, KernelError> {
    dispatch_lookup!("index_in", values, value_set, options, index_in_column)
}

/// [`is_in`] with default options.
#[inline]
pub fn is_in_default(values: &Array, value_set: &Array) -> Result<BooleanArray<()>, KernelError> {
    is_in(values, value_set, &SetLookupOptions::default())
}

/// [`index_in`] with default options.
#[inline]
pub fn index_in_default(
    values: &Array,
    value_set: &Array,
) -> Result<IntegerArray<i32>, KernelError> {
    index_in(values, value_set, &SetLookupOptions::default())
}

/// Runs `op` and wraps the result as an `Array`.
///
/// `IsIn` returns `Array::BooleanArray`, `IndexIn` returns an `Int32` numeric array.
pub fn set_lookup(
    op: SetLookupOperator,
    values: &Array,
    value_set: &Array,
    options: &SetLookupOptions,
) -> Result<Array, KernelError> {
    match op {
        SetLookupOperator::IsIn => Ok(Array::BooleanArray(
            is_in(values, value_set, options)?.into(),
        )),
        SetLookupOperator::IndexIn => Ok(Array::from_int32(index_in(values, value_set, options)?)),
    }
}
