// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

//! Set-lookup kernels (`is_in`, `index_in`) over Minarrow columns.
//!
//! A value set is indexed once into a [`LookupTable`](kernels::set_lookup::LookupTable),
//! then every element of the values column is probed against it.

pub mod operators;

pub mod kernels {
    pub mod set_lookup;
}

pub mod traits {
    pub mod lookup_column;
    pub mod to_bits;
}

pub mod config;

pub mod errors;

pub mod utils;

pub use errors::KernelError;
pub use kernels::set_lookup::{
    LookupTable, SetLookupOptions, index_in, index_in_default, is_in, is_in_default, set_lookup,
};
pub use operators::{NullMatchingBehavior, SetLookupOperator};
