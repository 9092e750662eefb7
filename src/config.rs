// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Runtime Behaviour Parameters*
//!
//! Global configuration constants controlling set-lookup behaviour and performance thresholds.
//! Per-call overrides live on [`SetLookupOptions`](crate::kernels::set_lookup::SetLookupOptions).

/// Minimum number of values before the probe is split across worker threads.
///
/// Below this the rayon fork/join overhead outweighs the per-element work, which is a
/// single hash probe.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 16;

/// Number of values handled by one parallel probe task.
///
/// Must be a multiple of 8 so every task owns whole bytes of the output bitmaps.
pub const DEFAULT_PROBE_CHUNK: usize = 1 << 14;

/// Largest value set that can be indexed.
///
/// `IndexIn` emits `i32` positions, so canonical indices must fit in an `i32`.
pub const MAX_VALUE_SET_LEN: usize = i32::MAX as usize;
