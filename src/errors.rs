// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Set-Lookup Error Handling*
//!
//! Error types for set-lookup kernels with structured error reporting.
//!
//! ## Error Categories
//! - **Type Errors**: values and value set disagree, or the type has no lookup specialisation
//! - **Resource Errors**: the lookup table or output buffers could not be allocated
//! - **Boundary Errors**: view windows outside their array, or value sets too large to index
//! - **Argument Errors**: validity masks shorter than the data they describe
//!
//! Every kernel call either returns a complete output column or one of these errors.
//! There is no partial output.

use core::fmt;
use std::collections::TryReserveError;
use std::error::Error;

/// Error type for all set-lookup kernel operations.
///
/// Each variant carries a contextual message naming the kernel and the offending input.
#[derive(Debug, Clone)]
pub enum KernelError {
    /// Values and value set have different logical types.
    TypeMismatch(String),

    /// No lookup specialisation exists for the logical type.
    UnsupportedType(String),

    /// The lookup table or an output buffer could not be allocated.
    AllocationFailure(String),

    /// Invalid arguments provided to kernel function.
    InvalidArguments(String),

    /// Array window or index out of bounds.
    OutOfBounds(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::TypeMismatch(msg) => write!(f, "Type mismatch: {}", msg),
            KernelError::UnsupportedType(msg) => write!(f, "Unsupported type: {}", msg),
            KernelError::AllocationFailure(msg) => write!(f, "Allocation failure: {}", msg),
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            KernelError::OutOfBounds(msg) => write!(f, "Out of bounds: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Creates a formatted error message for a logical type mismatch between
/// the values column and the value set.
///
/// # Arguments
/// * `fname` - Function name where the mismatch occurred
/// * `values` - Logical type label of the values column
/// * `value_set` - Logical type label of the value set
pub fn log_type_mismatch(fname: &str, values: &str, value_set: &str) -> String {
    format!("{} => values are {} but value set is {}", fname, values, value_set)
}

/// Maps a failed `try_reserve` into `KernelError::AllocationFailure`.
#[inline]
pub fn allocation_failure(label: &str, requested: usize, err: TryReserveError) -> KernelError {
    KernelError::AllocationFailure(format!(
        "{}: could not reserve {} slots ({})",
        label, requested, err
    ))
}
