// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Validation and Buffer Helpers*
//!
//! Input validation run once before the hot loops, so the loops can read without
//! bounds checks, plus fallible buffer allocation for output columns.

use minarrow::{Bitmask, Vec64};

use crate::errors::{KernelError, allocation_failure};
use crate::traits::lookup_column::LookupColumn;

/// Validates that a `(offset, len)` window lies within an array of `array_len` slots.
///
/// # Returns
/// `Ok(())` if the window fits, otherwise `KernelError::OutOfBounds`.
#[inline(always)]
pub fn confirm_window(
    label: &str,
    offset: usize,
    len: usize,
    array_len: usize,
) -> Result<(), KernelError> {
    match offset.checked_add(len) {
        Some(end) if end <= array_len => Ok(()),
        _ => Err(KernelError::OutOfBounds(format!(
            "{}: window [{}, {}+{}) exceeds array length {}",
            label, offset, offset, len, array_len
        ))),
    }
}

/// Checks the mask is long enough to cover `required` slots.
/// Used so we can avoid bounds checks in the hot loop.
#[inline(always)]
pub fn confirm_mask_len(
    label: &str,
    mask: Option<&Bitmask>,
    required: usize,
) -> Result<(), KernelError> {
    if let Some(m) = mask {
        if m.len() < required {
            return Err(KernelError::InvalidArguments(format!(
                "{}: null mask covers {} slots but {} are required",
                label,
                m.len(),
                required
            )));
        }
    }
    Ok(())
}

/// Validates a lookup column view: its window and its null mask.
#[inline]
pub fn confirm_view<'a, C: LookupColumn<'a>>(label: &str, view: &C) -> Result<(), KernelError> {
    confirm_window(label, view.offset(), view.len(), view.array_len())?;
    confirm_mask_len(label, view.null_mask(), view.offset() + view.len())
}

/// Allocates a zero-filled `Vec64` of `len` elements, reporting allocation failure
/// as `KernelError::AllocationFailure` instead of aborting.
#[inline]
pub fn try_zeroed_vec64<T: Copy + Default>(label: &str, len: usize) -> Result<Vec64<T>, KernelError> {
    let mut v = Vec64::<T>::with_capacity(0);
    v.try_reserve_exact(len)
        .map_err(|e| allocation_failure(label, len, e))?;
    v.resize(len, T::default());
    Ok(v)
}

/// Sets bit `idx` in a packed LSB-first bitmap byte slice.
#[inline(always)]
pub fn set_bit(bits: &mut [u8], idx: usize) {
    bits[idx >> 3] |= 1u8 << (idx & 7);
}

/// Wraps packed LSB-first bytes as a Minarrow `Bitmask` of `len` bits.
#[inline(always)]
pub fn bitmask_from_bytes(bytes: Vec64<u8>, len: usize) -> Bitmask {
    Bitmask {
        bits: bytes.into(),
        len,
    }
}
