// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **LookupColumn trait** - *Per-type key extraction for set lookups*
//!
//! The set-lookup table and probe are written once against this trait. Each supported
//! array view supplies the three per-type pieces:
//! - **extraction**: `key_unchecked` reads the key at a logical position
//! - **hashing / equality**: the associated `Key` type's `Hash` and `Eq`
//! - **validity**: `is_valid`, from the view's optional null mask
//!
//! Views follow the Minarrow `(array, offset, len)` tuple convention, so windowed
//! inputs need no copying.
//!
//! | View | Key |
//! |------|-----|
//! | `IntegerAVT<T>` | `T` |
//! | `FloatAVT<f32 / f64>` | canonical bits (`u32` / `u64`) |
//! | `StringAVT<T>` | `&[u8]` byte span of the value |
//! | `CategoricalAVT<T>` | `&[u8]` of the dictionary entry the code resolves to |
//!
//! String keys hash the bytes, never offsets or codes, so equal content always matches
//! whichever buffer position or dictionary it came from.

use std::hash::Hash;

use minarrow::{Bitmask, CategoricalAVT, FloatAVT, Integer, IntegerAVT, MaskedArray, StringAVT};

use crate::traits::to_bits::ToBits;

/// A read-only column view that set-lookup kernels can key.
///
/// `Sync` is required because the probe may be split over worker threads that share
/// the values view.
pub trait LookupColumn<'a>: Sync {
    /// Hashable key extracted from one logical slot.
    type Key: Copy + Eq + Hash + Send + Sync + 'a;

    /// Number of logical slots in the view.
    fn len(&self) -> usize;

    /// Starting offset of the view within the underlying array.
    fn offset(&self) -> usize;

    /// Length of the underlying array.
    fn array_len(&self) -> usize;

    /// Validity mask of the underlying array, indexed from the array start.
    fn null_mask(&self) -> Option<&'a Bitmask>;

    /// Key at logical position `i` of the view.
    ///
    /// # Safety
    /// `i < self.len()` and the view window lies within the array.
    unsafe fn key_unchecked(&self, i: usize) -> Self::Key;

    /// True if the view is empty.
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if logical position `i` holds a value.
    #[inline(always)]
    fn is_valid(&self, i: usize) -> bool {
        self.null_mask()
            .map_or(true, |m| unsafe { m.get_unchecked(self.offset() + i) })
    }
}

macro_rules! impl_lookup_column_int {
    ($($ty:ty),*) => {
        $(
            impl<'a> LookupColumn<'a> for IntegerAVT<'a, $ty> {
                type Key = $ty;

                #[inline(always)]
                fn len(&self) -> usize {
                    self.2
                }

                #[inline(always)]
                fn offset(&self) -> usize {
                    self.1
                }

                #[inline(always)]
                fn array_len(&self) -> usize {
                    self.0.data.len()
                }

                #[inline(always)]
                fn null_mask(&self) -> Option<&'a Bitmask> {
                    self.0.null_mask.as_ref()
                }

                #[inline(always)]
                unsafe fn key_unchecked(&self, i: usize) -> $ty {
                    unsafe { *self.0.data.as_slice().get_unchecked(self.1 + i) }
                }
            }
        )*
    };
}

impl_lookup_column_int!(i32, i64, u32, u64);
#[cfg(feature = "extended_numeric_types")]
impl_lookup_column_int!(i8, i16, u8, u16);

macro_rules! impl_lookup_column_float {
    ($($ty:ty),*) => {
        $(
            impl<'a> LookupColumn<'a> for FloatAVT<'a, $ty> {
                type Key = <$ty as ToBits>::Bits;

                #[inline(always)]
                fn len(&self) -> usize {
                    self.2
                }

                #[inline(always)]
                fn offset(&self) -> usize {
                    self.1
                }

                #[inline(always)]
                fn array_len(&self) -> usize {
                    self.0.data.len()
                }

                #[inline(always)]
                fn null_mask(&self) -> Option<&'a Bitmask> {
                    self.0.null_mask.as_ref()
                }

                #[inline(always)]
                unsafe fn key_unchecked(&self, i: usize) -> Self::Key {
                    let v = unsafe { *self.0.data.as_slice().get_unchecked(self.1 + i) };
                    v.to_key_bits()
                }
            }
        )*
    };
}

impl_lookup_column_float!(f32, f64);

impl<'a, T: Integer + Send + Sync> LookupColumn<'a> for StringAVT<'a, T> {
    type Key = &'a [u8];

    #[inline(always)]
    fn len(&self) -> usize {
        self.2
    }

    #[inline(always)]
    fn offset(&self) -> usize {
        self.1
    }

    #[inline(always)]
    fn array_len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    fn null_mask(&self) -> Option<&'a Bitmask> {
        self.0.null_mask.as_ref()
    }

    #[inline(always)]
    unsafe fn key_unchecked(&self, i: usize) -> &'a [u8] {
        let arr: &'a _ = self.0;
        unsafe { arr.get_str_unchecked(self.1 + i) }.as_bytes()
    }
}

impl<'a, T: Integer + Send + Sync> LookupColumn<'a> for CategoricalAVT<'a, T> {
    type Key = &'a [u8];

    #[inline(always)]
    fn len(&self) -> usize {
        self.2
    }

    #[inline(always)]
    fn offset(&self) -> usize {
        self.1
    }

    #[inline(always)]
    fn array_len(&self) -> usize {
        self.0.data.len()
    }

    #[inline(always)]
    fn null_mask(&self) -> Option<&'a Bitmask> {
        self.0.null_mask.as_ref()
    }

    #[inline(always)]
    unsafe fn key_unchecked(&self, i: usize) -> &'a [u8] {
        let arr: &'a _ = self.0;
        unsafe { arr.get_str_unchecked(self.1 + i) }.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use minarrow::{Bitmask, CategoricalArray, FloatArray, IntegerArray, StringArray};

    use super::*;

    #[test]
    fn integer_view_reads_through_offset() {
        let arr = IntegerArray::<i64>::from_slice(&[10, 20, 30, 40]);
        let view: IntegerAVT<'_, i64> = (&arr, 1, 2);
        assert_eq!(view.len(), 2);
        assert_eq!(unsafe { view.key_unchecked(0) }, 20);
        assert_eq!(unsafe { view.key_unchecked(1) }, 30);
        assert!(view.is_valid(0));
    }

    #[test]
    fn validity_is_offset_into_the_array_mask() {
        let mut arr = IntegerArray::<i32>::from_slice(&[1, 2, 3]);
        let mut mask = Bitmask::new_set_all(3, true);
        mask.set(1, false);
        arr.null_mask = Some(mask);
        let view: IntegerAVT<'_, i32> = (&arr, 1, 2);
        assert!(!view.is_valid(0));
        assert!(view.is_valid(1));
    }

    #[test]
    fn float_view_canonicalises_keys() {
        let arr = FloatArray::<f64>::from_slice(&[-0.0, 0.0, f64::NAN]);
        let view: FloatAVT<'_, f64> = (&arr, 0, arr.data.len());
        assert_eq!(unsafe { view.key_unchecked(0) }, unsafe {
            view.key_unchecked(1)
        });
        assert_eq!(unsafe { view.key_unchecked(2) }, f64::NAN.to_bits());
    }

    #[test]
    fn string_keys_are_content_not_offsets() {
        let arr = StringArray::<u32>::from_slice(&["ab", "x", "ab"]);
        let view: StringAVT<'_, u32> = (&arr, 0, arr.len());
        let a = unsafe { view.key_unchecked(0) };
        let b = unsafe { view.key_unchecked(2) };
        assert_eq!(a, b);
        assert_eq!(a, b"ab");
    }

    #[test]
    fn categorical_keys_resolve_through_dictionary() {
        let arr = CategoricalArray::<u32>::from_values(vec!["red", "blue", "red"]);
        let view: CategoricalAVT<'_, u32> = (&arr, 0, arr.len());
        assert_eq!(unsafe { view.key_unchecked(0) }, b"red");
        assert_eq!(unsafe { view.key_unchecked(1) }, b"blue");
    }
}
