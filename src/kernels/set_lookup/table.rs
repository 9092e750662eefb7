// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Lookup Table** - *Value-set index built once per call*
//!
//! Maps every distinct non-null value of the value set to its canonical index, the
//! position of its first occurrence. Nulls never enter the map; the first null
//! position is kept separately. After `build` returns the table is never mutated,
//! so probe workers share it by plain reference.

use std::collections::HashMap;
use std::hash::Hash;

#[cfg(feature = "fast_hash")]
use ahash::RandomState;
#[cfg(not(feature = "fast_hash"))]
use std::collections::hash_map::RandomState;

use log::debug;
use minarrow::{BooleanArray, IntegerArray};

use crate::config::MAX_VALUE_SET_LEN;
use crate::errors::{KernelError, allocation_failure};
use crate::kernels::set_lookup::SetLookupOptions;
use crate::kernels::set_lookup::probe::{probe_index_in, probe_is_in};
use crate::operators::NullMatchingBehavior;
use crate::traits::lookup_column::LookupColumn;
use crate::utils::confirm_view;

/// Result of resolving one values slot against the table under a null policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Matched the value-set entry with this canonical index.
    Found(u32),
    /// Definitely absent.
    Missing,
    /// Unknown under the null policy; emitted as a null output slot.
    Null,
}

/// Read-only index over a value set.
#[derive(Debug, Clone)]
pub struct LookupTable<K> {
    map: HashMap<K, u32, RandomState>,
    null_index: Option<u32>,
    value_set_len: usize,
}

impl<K> LookupTable<K>
where
    K: Copy + Eq + Hash + Send + Sync,
{
    /// Builds the table in one pass over `value_set`.
    ///
    /// Duplicates keep the index of their first occurrence. Nulls are not inserted;
    /// the position of the first null is recorded instead.
    ///
    /// # Errors
    /// - `OutOfBounds` if the view window exceeds its array, or the value set has
    ///   more slots than an `i32` index can address
    /// - `InvalidArguments` if the null mask is shorter than the window
    /// - `AllocationFailure` if the map cannot be reserved
    pub fn build<'a, C>(value_set: &C) -> Result<Self, KernelError>
    where
        C: LookupColumn<'a, Key = K>,
    {
        confirm_view("set_lookup value set", value_set)?;
        let len = value_set.len();
        if len > MAX_VALUE_SET_LEN {
            return Err(KernelError::OutOfBounds(format!(
                "set_lookup value set: {} slots exceeds the maximum of {}",
                len, MAX_VALUE_SET_LEN
            )));
        }

        let mut map: HashMap<K, u32, RandomState> = HashMap::with_hasher(RandomState::default());
        map.try_reserve(len)
            .map_err(|e| allocation_failure("set_lookup value set", len, e))?;

        let mut null_index = None;
        for i in 0..len {
            if !value_set.is_valid(i) {
                null_index.get_or_insert(i as u32);
                continue;
            }
            let key = unsafe { value_set.key_unchecked(i) };
            map.entry(key).or_insert(i as u32);
        }

        debug!(
            "set_lookup: built table over {} slots ({} distinct, null index {:?})",
            len,
            map.len(),
            null_index
        );

        Ok(Self {
            map,
            null_index,
            value_set_len: len,
        })
    }

    /// Canonical index of `key`, if present.
    #[inline(always)]
    pub fn get(&self, key: &K) -> Option<u32> {
        self.map.get(key).copied()
    }

    /// True if `key` occurs in the value set.
    #[inline(always)]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Position of the first null in the value set.
    #[inline(always)]
    pub fn null_index(&self) -> Option<u32> {
        self.null_index
    }

    /// True if the value set contains at least one null.
    #[inline(always)]
    pub fn contains_null(&self) -> bool {
        self.null_index.is_some()
    }

    /// Number of distinct non-null values.
    #[inline]
    pub fn distinct_len(&self) -> usize {
        self.map.len()
    }

    /// Number of slots in the value set the table was built from, nulls and duplicates included.
    #[inline]
    pub fn value_set_len(&self) -> usize {
        self.value_set_len
    }

    /// True if the value set had no slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value_set_len == 0
    }

    /// Resolves one values slot. `None` is a null slot.
    #[inline(always)]
    pub(crate) fn outcome(&self, key: Option<K>, null_matching: NullMatchingBehavior) -> Outcome {
        match key {
            None => match null_matching {
                NullMatchingBehavior::Match => {
                    self.null_index.map_or(Outcome::Missing, Outcome::Found)
                }
                NullMatchingBehavior::Skip => Outcome::Missing,
                NullMatchingBehavior::EmitNull | NullMatchingBehavior::Inconclusive => {
                    Outcome::Null
                }
            },
            Some(k) => match self.map.get(&k) {
                Some(&idx) => Outcome::Found(idx),
                None if null_matching == NullMatchingBehavior::Inconclusive
                    && self.null_index.is_some() =>
                {
                    Outcome::Null
                }
                None => Outcome::Missing,
            },
        }
    }

    /// Membership test of every slot of `values` against this table.
    pub fn probe_is_in<'a, C>(
        &self,
        values: &C,
        options: &SetLookupOptions,
    ) -> Result<BooleanArray<()>, KernelError>
    where
        C: LookupColumn<'a, Key = K>,
    {
        confirm_view("is_in values", values)?;
        probe_is_in(self, values, options)
    }

    /// Canonical index of every slot of `values` in this table.
    pub fn probe_index_in<'a, C>(
        &self,
        values: &C,
        options: &SetLookupOptions,
    ) -> Result<IntegerArray<i32>, KernelError>
    where
        C: LookupColumn<'a, Key = K>,
    {
        confirm_view("index_in values", values)?;
        probe_index_in(self, values, options)
    }
}
