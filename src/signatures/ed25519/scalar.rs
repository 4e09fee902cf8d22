//! Ed25519 scalar arithmetic.
//!
//! Scalars are integers modulo the prime group order
//!
//! ```text
//! ℓ = 2^252 + 27742317777372353535851937790883648493
//! ```
//!
//! stored as 32 little-endian bytes. Arithmetic unpacks them into 21-bit
//! signed limbs held in `i64`, which leaves enough headroom to accumulate a
//! full 12 x 12 limb product before any carry.
//!
//! ## Reduction
//!
//! A limb at position `k >= 12` has weight `2^(21k) = 2^(21(k-12)) * 2^252`,
//! and `2^252 = -27742317777372353535851937790883648493 (mod ℓ)`. Written
//! in 21-bit limbs that constant is `FOLD`, so each high limb can be folded
//! six positions down by a multiply-accumulate. [`reduce_limbs`] applies
//! that fold twice, interleaved with carries, then finishes with two
//! single-limb folds to land in `[0, ℓ)`.

use std::array;

use super::field::load_4;

/// `-2^252 mod ℓ` in 21-bit signed limbs.
const FOLD: [i64; 6] = [666643, 470296, 654183, -997805, 136657, -683901];

const LIMB_MASK: i64 = (1 << 21) - 1;

/// ℓ as four little-endian 64-bit words.
const ORDER_WORDS: [u64; 4] = [
    0x5812_631a_5cf5_d3ed,
    0x14de_f9de_a2f7_9cd6,
    0x0000_0000_0000_0000,
    0x1000_0000_0000_0000,
];

/// A 32-byte little-endian scalar.
///
/// The wrapper enforces nothing by itself. Values coming out of
/// [`Scalar::reduce`] and [`Scalar::mul_add`] are in `[0, ℓ)`, values built
/// from signature bytes must be checked with [`Scalar::is_minimal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Scalar(pub(crate) [u8; 32]);

/// Signed sliding-window digits, least significant first.
pub(crate) type Slide = [i8; 256];

/// Splits `bytes` into `N` limbs of 21 bits. The last limb keeps all
/// remaining high bits.
fn load_limbs<const N: usize>(bytes: &[u8]) -> [i64; N] {
    array::from_fn(|i| {
        let bit = 21 * i;
        let raw = (load_4(&bytes[bit / 8..]) >> (bit % 8)) as i64;
        if i + 1 == N { raw } else { raw & LIMB_MASK }
    })
}

/// Carries limb `i` into `i + 1`, rounding to the nearest multiple so the
/// limb ends up centred on zero.
#[inline(always)]
fn carry_round(s: &mut [i64; 24], i: usize) {
    let carry = (s[i] + (1 << 20)) >> 21;
    s[i + 1] += carry;
    s[i] -= carry << 21;
}

/// Carries limb `i` into `i + 1`, leaving the limb in `[0, 2^21)`.
#[inline(always)]
fn carry_floor(s: &mut [i64; 24], i: usize) {
    let carry = s[i] >> 21;
    s[i + 1] += carry;
    s[i] -= carry << 21;
}

/// Replaces limb `i` (with `i >= 12`) by its contribution to limbs
/// `i - 12 ..= i - 7`.
#[inline(always)]
fn fold(s: &mut [i64; 24], i: usize) {
    let high = s[i];
    s[i] = 0;
    for (k, coefficient) in FOLD.iter().enumerate() {
        s[i - 12 + k] += high * coefficient;
    }
}

/// Reduces a 24-limb value modulo ℓ and packs the result.
///
/// Limbs must be small enough that `limb * 997805` does not overflow,
/// which holds for freshly loaded 64-byte input and for carried products.
fn reduce_limbs(mut s: [i64; 24]) -> [u8; 32] {
    for i in (18..24).rev() {
        fold(&mut s, i);
    }
    for i in [6, 8, 10, 12, 14, 16] {
        carry_round(&mut s, i);
    }
    for i in [7, 9, 11, 13, 15] {
        carry_round(&mut s, i);
    }

    for i in (12..18).rev() {
        fold(&mut s, i);
    }
    for i in [0, 2, 4, 6, 8, 10] {
        carry_round(&mut s, i);
    }
    for i in [1, 3, 5, 7, 9, 11] {
        carry_round(&mut s, i);
    }

    fold(&mut s, 12);
    for i in 0..12 {
        carry_floor(&mut s, i);
    }

    fold(&mut s, 12);
    for i in 0..11 {
        carry_floor(&mut s, i);
    }

    pack(&s[..12])
}

/// Packs twelve limbs in `[0, 2^21)` into 32 bytes.
fn pack(limbs: &[i64]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut acc = 0u64;
    let mut filled = 0u32;
    let mut pos = 0;
    for limb in limbs {
        acc |= (*limb as u64) << filled;
        filled += 21;
        while filled >= 8 {
            out[pos] = acc as u8;
            acc >>= 8;
            filled -= 8;
            pos += 1;
        }
    }
    out[pos] = acc as u8;
    out
}

impl Scalar {
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Reduces a 512-bit little-endian integer modulo ℓ.
    ///
    /// Used on SHA-512 digests to derive nonces and challenges.
    pub(crate) fn reduce(wide: &[u8; 64]) -> Self {
        Self(reduce_limbs(load_limbs::<24>(wide)))
    }

    /// Computes `(a * b + c) mod ℓ`.
    ///
    /// Inputs are 256-bit little-endian integers, not necessarily reduced.
    pub(crate) fn mul_add(a: &Self, b: &Self, c: &Self) -> Self {
        let a = load_limbs::<12>(&a.0);
        let b = load_limbs::<12>(&b.0);
        let c = load_limbs::<12>(&c.0);

        let mut s = [0i64; 24];
        s[..12].copy_from_slice(&c);
        for (i, ai) in a.iter().enumerate() {
            for (j, bj) in b.iter().enumerate() {
                s[i + j] += ai * bj;
            }
        }

        for i in (0..23).step_by(2) {
            carry_round(&mut s, i);
        }
        for i in (1..22).step_by(2) {
            carry_round(&mut s, i);
        }

        Self(reduce_limbs(s))
    }

    /// Returns `true` iff `bytes` encodes an integer strictly below ℓ.
    ///
    /// Signatures whose `s` fails this test are malleable and must be
    /// rejected.
    pub(crate) fn is_minimal(bytes: &[u8; 32]) -> bool {
        for i in (0..4).rev() {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
            let value = u64::from_le_bytes(word);

            if value > ORDER_WORDS[i] {
                return false;
            }
            if value < ORDER_WORDS[i] {
                return true;
            }
        }
        // equal to ℓ
        false
    }

    /// Recodes the scalar into signed odd digits in `[-15, 15]` with at
    /// most one non-zero digit in any window of seven.
    ///
    /// ## Variable-time
    ///
    /// The running time depends on the scalar. Only public scalars (the
    /// challenge and `s` during verification) may be recoded this way.
    pub(crate) fn slide(&self) -> Slide {
        let mut r: Slide = array::from_fn(|i| ((self.0[i >> 3] >> (i & 7)) & 1) as i8);

        for i in 0..256 {
            if r[i] == 0 {
                continue;
            }
            for b in 1..=6 {
                if i + b >= 256 {
                    break;
                }
                if r[i + b] == 0 {
                    continue;
                }

                let shifted = i32::from(r[i + b]) << b;
                let current = i32::from(r[i]);
                if current + shifted <= 15 {
                    r[i] = (current + shifted) as i8;
                    r[i + b] = 0;
                } else if current - shifted >= -15 {
                    r[i] = (current - shifted) as i8;
                    for digit in r.iter_mut().skip(i + b) {
                        if *digit == 0 {
                            *digit = 1;
                            break;
                        }
                        *digit = 0;
                    }
                } else {
                    break;
                }
            }
        }

        r
    }
}
