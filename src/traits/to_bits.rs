//! # **ToBits trait** - *IEEE 754 bit conversion for hashing*

// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

/// Generic trait for converting floating-point types to their IEEE 754 bit representation.
///
/// Floats are neither `Eq` nor `Hash`, so set-lookup keys for float columns are
/// their bit patterns. `to_key_bits` canonicalises the patterns that compare equal
/// by value but differ bitwise.
pub trait ToBits {
    /// The unsigned integer type representing the bit pattern.
    ///
    /// Same bit width as the floating-point type.
    type Bits: Eq + std::hash::Hash + Copy + Send + Sync;

    /// Converts the floating-point value to its raw IEEE 754 bit representation.
    fn to_bits(self) -> Self::Bits;

    /// Bit pattern used as a lookup key.
    ///
    /// Every NaN payload maps to the single quiet NaN, so NaN matches NaN.
    /// `-0.0` maps to `+0.0`.
    fn to_key_bits(self) -> Self::Bits;
}

impl ToBits for f32 {
    type Bits = u32;

    #[inline(always)]
    fn to_bits(self) -> u32 {
        f32::to_bits(self)
    }

    #[inline(always)]
    fn to_key_bits(self) -> u32 {
        let v = if self.is_nan() {
            f32::NAN
        } else if self == 0.0 {
            0.0
        } else {
            self
        };
        ToBits::to_bits(v)
    }
}

impl ToBits for f64 {
    type Bits = u64;

    #[inline(always)]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }

    #[inline(always)]
    fn to_key_bits(self) -> u64 {
        let v = if self.is_nan() {
            f64::NAN
        } else if self == 0.0 {
            0.0
        } else {
            self
        };
        ToBits::to_bits(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_payloads_share_a_key() {
        let quiet = f64::NAN;
        let payload = f64::from_bits(0x7ff8_0000_0000_0001);
        assert!(payload.is_nan());
        assert_ne!(ToBits::to_bits(quiet), ToBits::to_bits(payload));
        assert_eq!(quiet.to_key_bits(), payload.to_key_bits());
    }

    #[test]
    fn signed_zeros_share_a_key() {
        assert_ne!(ToBits::to_bits(-0.0f32), ToBits::to_bits(0.0f32));
        assert_eq!((-0.0f32).to_key_bits(), 0.0f32.to_key_bits());
        assert_eq!((-0.0f64).to_key_bits(), 0.0f64.to_key_bits());
    }

    #[test]
    fn ordinary_values_keep_their_bits() {
        assert_eq!(1.5f32.to_key_bits(), 1.5f32.to_bits());
        assert_eq!((-2.25f64).to_key_bits(), (-2.25f64).to_bits());
    }
}
