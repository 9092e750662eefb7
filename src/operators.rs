// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Contains the set-lookup operators and null matching rules for matching and routing purposes

/// Set-lookup operations over a values column and a value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetLookupOperator {
    /// Set membership test (`values IN value_set`)
    ///
    /// Emits one boolean per value.
    IsIn,
    /// Positional lookup (`index of values in value_set`)
    ///
    /// Emits the first-occurrence position in the value set as an `i32`,
    /// or null when the value is absent.
    IndexIn,
}

impl SetLookupOperator {
    /// Kernel name as registered by the host function registry.
    pub fn name(&self) -> &'static str {
        match self {
            SetLookupOperator::IsIn => "is_in",
            SetLookupOperator::IndexIn => "index_in",
        }
    }
}

/// How nulls in the values column and the value set interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullMatchingBehavior {
    /// A null value matches a null in the value set.
    ///
    /// `IsIn` is never null. `IndexIn` reports the first null position of the value set.
    #[default]
    Match,
    /// Nulls in the value set are ignored.
    ///
    /// A null value is `false` for `IsIn` and null for `IndexIn`.
    Skip,
    /// A null value always produces a null output.
    EmitNull,
    /// SQL three-valued logic.
    ///
    /// A null value produces null. A non-null value that is not found produces null
    /// if the value set contains a null, since the null could have been equal to it.
    Inconclusive,
}
