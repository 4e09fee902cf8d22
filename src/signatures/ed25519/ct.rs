//! Branch-free comparisons used by table lookups and signature checks.
//!
//! Results are returned as a `u8` that is either `0` or `1`, so they can be
//! fed straight into the `conditional_move` masks without a branch.

/// Constant-time equality.
pub(crate) trait ConstantTimeEq {
    /// Returns `1` if `self == other` and `0` otherwise, without early exits.
    fn ct_eq(&self, other: &Self) -> u8;
}

impl ConstantTimeEq for u8 {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> u8 {
        let diff = u32::from(*self ^ *other);
        (diff.wrapping_sub(1) >> 31) as u8
    }
}

impl ConstantTimeEq for [u8; 32] {
    /// All bytes are folded before the comparison, so the running time does
    /// not depend on where the first difference is.
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> u8 {
        let diff = self
            .iter()
            .zip(other)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));
        diff.ct_eq(&0)
    }
}

/// Returns `1` if `value` is negative and `0` otherwise.
#[inline(always)]
pub(crate) fn ct_is_negative(value: i8) -> u8 {
    ((value as i64 as u64) >> 63) as u8
}
