// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Probe Engine** - *Streaming lookups against a built table*
//!
//! One pass over the values view. Output buffers are allocated up front and each
//! chunk writes only its own slice of them, so the sequential path is simply the
//! whole range as a single chunk. With `parallel_probe`, chunks are a multiple of
//! 8 slots long and map onto whole bitmap bytes, so rayon workers share nothing
//! but the read-only table and values view.

use std::marker::PhantomData;

use log::trace;
use minarrow::{BooleanArray, IntegerArray};
#[cfg(feature = "parallel_probe")]
use rayon::prelude::*;

use crate::errors::KernelError;
use crate::kernels::set_lookup::SetLookupOptions;
use crate::kernels::set_lookup::table::{LookupTable, Outcome};
use crate::operators::NullMatchingBehavior;
use crate::traits::lookup_column::LookupColumn;
use crate::utils::{bitmask_from_bytes, set_bit, try_zeroed_vec64};

/// Key of slot `i`, or `None` for a null slot.
#[inline(always)]
fn slot_key<'a, C: LookupColumn<'a>>(values: &C, i: usize) -> Option<C::Key> {
    if values.is_valid(i) {
        Some(unsafe { values.key_unchecked(i) })
    } else {
        None
    }
}

/// Fills `n` slots starting at `start`. `data` and `valid` are the chunk's own bitmap bytes.
#[inline(always)]
fn is_in_chunk<'a, C>(
    table: &LookupTable<C::Key>,
    values: &C,
    null_matching: NullMatchingBehavior,
    start: usize,
    n: usize,
    data: &mut [u8],
    valid: &mut [u8],
) where
    C: LookupColumn<'a>,
{
    for j in 0..n {
        match table.outcome(slot_key(values, start + j), null_matching) {
            Outcome::Found(_) => {
                set_bit(data, j);
                set_bit(valid, j);
            }
            Outcome::Missing => set_bit(valid, j),
            Outcome::Null => {}
        }
    }
}

/// Fills `indices.len()` slots starting at `start`. Absent slots keep index 0 and a clear validity bit.
#[inline(always)]
fn index_in_chunk<'a, C>(
    table: &LookupTable<C::Key>,
    values: &C,
    null_matching: NullMatchingBehavior,
    start: usize,
    indices: &mut [i32],
    valid: &mut [u8],
) where
    C: LookupColumn<'a>,
{
    for (j, out) in indices.iter_mut().enumerate() {
        if let Outcome::Found(idx) = table.outcome(slot_key(values, start + j), null_matching) {
            *out = idx as i32;
            set_bit(valid, j);
        }
    }
}

/// True if the options and input size call for the chunked parallel path.
#[inline]
fn use_parallel(len: usize, options: &SetLookupOptions) -> bool {
    cfg!(feature = "parallel_probe") && options.parallel && len >= options.parallel_threshold
}

/// True if the `IsIn` output carries a validity mask under this policy.
#[inline]
fn is_in_emits_nulls(null_matching: NullMatchingBehavior) -> bool {
    matches!(
        null_matching,
        NullMatchingBehavior::EmitNull | NullMatchingBehavior::Inconclusive
    )
}

/// Builds the `IsIn` output for a validated values view.
pub(crate) fn probe_is_in<'a, C>(
    table: &LookupTable<C::Key>,
    values: &C,
    options: &SetLookupOptions,
) -> Result<BooleanArray<()>, KernelError>
where
    C: LookupColumn<'a>,
{
    let len = values.len();
    let n_bytes = (len + 7) / 8;
    let null_matching = options.null_matching;
    let mut data = try_zeroed_vec64::<u8>("is_in output", n_bytes)?;
    let mut valid = try_zeroed_vec64::<u8>("is_in validity", n_bytes)?;

    if use_parallel(len, options) {
        #[cfg(feature = "parallel_probe")]
        {
            let chunk = options.effective_chunk_size();
            trace!("is_in: parallel probe over {} values in chunks of {}", len, chunk);
            data.par_chunks_mut(chunk / 8)
                .zip(valid.par_chunks_mut(chunk / 8))
                .enumerate()
                .for_each(|(c, (d, v))| {
                    let start = c * chunk;
                    let n = chunk.min(len - start);
                    is_in_chunk(table, values, null_matching, start, n, d, v);
                });
        }
    } else {
        trace!("is_in: sequential probe over {} values", len);
        is_in_chunk(table, values, null_matching, 0, len, &mut data, &mut valid);
    }

    let null_mask = if is_in_emits_nulls(null_matching) {
        Some(bitmask_from_bytes(valid, len))
    } else {
        None
    };

    Ok(BooleanArray {
        data: bitmask_from_bytes(data, len),
        null_mask,
        len,
        _phantom: PhantomData,
    })
}

/// Builds the `IndexIn` output for a validated values view.
pub(crate) fn probe_index_in<'a, C>(
    table: &LookupTable<C::Key>,
    values: &C,
    options: &SetLookupOptions,
) -> Result<IntegerArray<i32>, KernelError>
where
    C: LookupColumn<'a>,
{
    let len = values.len();
    let null_matching = options.null_matching;
    let mut indices = try_zeroed_vec64::<i32>("index_in output", len)?;
    let mut valid = try_zeroed_vec64::<u8>("index_in validity", (len + 7) / 8)?;

    if use_parallel(len, options) {
        #[cfg(feature = "parallel_probe")]
        {
            let chunk = options.effective_chunk_size();
            trace!("index_in: parallel probe over {} values in chunks of {}", len, chunk);
            indices
                .par_chunks_mut(chunk)
                .zip(valid.par_chunks_mut(chunk / 8))
                .enumerate()
                .for_each(|(c, (out, v))| {
                    index_in_chunk(table, values, null_matching, c * chunk, out, v);
                });
        }
    } else {
        trace!("index_in: sequential probe over {} values", len);
        index_in_chunk(table, values, null_matching, 0, &mut indices, &mut valid);
    }

    Ok(IntegerArray {
        data: indices.into(),
        null_mask: Some(bitmask_from_bytes(valid, len)),
    })
}
