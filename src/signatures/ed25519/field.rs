//! Finite field arithmetic for Ed25519.
//!
//! This module implements arithmetic in the prime field
//!
//! ```text
//! 𝔽ₚ where p = 2²⁵⁵ − 19
//! ```
//!
//! ## Representation
//!
//! Field elements are represented using a 10-limb signed integer format,
//! with alternating limb sizes:
//!
//! ```text
//! [26, 25, 26, 25, 26, 25, 26, 25, 26, 25] bits
//! ```
//!
//! Limb `i` carries weight `2^ceil(25.5 * i)`. Products are accumulated in
//! `i64` and folded back by [`combine`], which propagates carries in the
//! interleaved order that keeps every intermediate inside 64 bits.
//!
//! Additions and subtractions do not carry. Their results are only ever
//! fed into a multiplication or squaring, which renormalizes them.
//!
//! ## Constant-time
//!
//! No operation here branches on or indexes memory with limb values. The
//! only branches are on loop indices, which are public.

use std::array;
use std::ops::{Add, Mul, Neg, Sub};

/// Bit width of each limb.
const LIMB_BITS: [u32; 10] = [26, 25, 26, 25, 26, 25, 26, 25, 26, 25];

/// `(byte offset, byte count, left shift)` of each limb inside a 32-byte
/// little-endian encoding.
const LIMB_LAYOUT: [(usize, usize, u32); 10] = [
    (0, 4, 0),
    (4, 3, 6),
    (7, 3, 5),
    (10, 3, 3),
    (13, 3, 2),
    (16, 4, 0),
    (20, 3, 7),
    (23, 3, 5),
    (26, 3, 4),
    (29, 3, 2),
];

/// Interprets `input[0..3]` as a little-endian 24-bit integer.
#[inline(always)]
pub(crate) fn load_3(input: &[u8]) -> u64 {
    u64::from(input[0]) | (u64::from(input[1]) << 8) | (u64::from(input[2]) << 16)
}

/// Interprets `input[0..4]` as a little-endian 32-bit integer.
#[inline(always)]
pub(crate) fn load_4(input: &[u8]) -> u64 {
    load_3(input) | (u64::from(input[3]) << 24)
}

/// An element of GF(2^255 - 19).
#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldElement(pub(crate) [i32; 10]);

/// Moves the rounded carry out of limb `i` into its neighbour.
///
/// The top limb wraps around into limb 0 multiplied by 19, since
/// `2^255 = 19 (mod p)`.
#[inline(always)]
fn carry_step(h: &mut [i64; 10], i: usize) {
    let bits = LIMB_BITS[i];
    let carry = (h[i] + (1 << (bits - 1))) >> bits;
    h[i] -= carry << bits;
    if i == 9 {
        h[0] += carry * 19;
    } else {
        h[i + 1] += carry;
    }
}

/// Folds a wide accumulator back into bounded limbs.
///
/// The carry order `0, 4, 1, 5, 2, 6, 3, 7, 4, 8, 9, 0` is the one the
/// reference bound analysis is done against. After it, every limb is
/// within `1.01 * 2^25` of zero.
#[inline(always)]
fn combine(mut h: [i64; 10]) -> FieldElement {
    for i in [0, 4, 1, 5, 2, 6, 3, 7, 4, 8, 9, 0] {
        carry_step(&mut h, i);
    }
    FieldElement(h.map(|limb| limb as i32))
}

impl FieldElement {
    pub(crate) const ZERO: Self = Self([0; 10]);
    pub(crate) const ONE: Self = Self([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Decodes 32 little-endian bytes, ignoring the top bit.
    ///
    /// Values in `[p, 2^255)` are accepted and silently reduced. Point
    /// decompression relies on that leniency for non-canonical `y`.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut h = [0i64; 10];
        for (limb, &(offset, width, shift)) in h.iter_mut().zip(LIMB_LAYOUT.iter()) {
            let raw = if width == 4 {
                load_4(&bytes[offset..])
            } else {
                load_3(&bytes[offset..])
            };
            *limb = (raw as i64) << shift;
        }
        h[9] = ((load_3(&bytes[29..]) & 0x7f_ffff) as i64) << 2;

        for i in [9, 1, 3, 5, 7, 0, 2, 4, 6, 8] {
            carry_step(&mut h, i);
        }
        Self(h.map(|limb| limb as i32))
    }

    /// Canonical 32-byte little-endian encoding.
    ///
    /// The quotient `q = floor(h / p)` is computed first so that `h - q*p`
    /// can be carried out in a single sequential pass and lands in `[0, p)`.
    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        let mut h = self.0.map(i64::from);

        let mut q = (19 * h[9] + (1 << 24)) >> 25;
        for (limb, bits) in h.iter().zip(LIMB_BITS) {
            q = (limb + q) >> bits;
        }
        h[0] += 19 * q;

        for i in 0..9 {
            let carry = h[i] >> LIMB_BITS[i];
            h[i + 1] += carry;
            h[i] -= carry << LIMB_BITS[i];
        }
        // bit 255 is q * 2^255 and is dropped
        h[9] &= (1 << 25) - 1;

        let mut out = [0u8; 32];
        let mut acc = 0u64;
        let mut filled = 0u32;
        let mut pos = 0;
        for (limb, bits) in h.iter().zip(LIMB_BITS) {
            acc |= (*limb as u64) << filled;
            filled += bits;
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

    /// Whether the canonical encoding is odd. This is the "sign" of `x` in
    /// a compressed point.
    pub(crate) fn is_negative(&self) -> bool {
        self.to_bytes()[0] & 1 == 1
    }

    pub(crate) fn is_non_zero(&self) -> bool {
        self.to_bytes().iter().fold(0u8, |acc, byte| acc | byte) != 0
    }

    /// Replaces `self` with `other` when `choice == 1`, leaves it untouched
    /// when `choice == 0`.
    ///
    /// ## Constant-time
    ///
    /// Uses a mask-and-xor, never a branch.
    #[inline(always)]
    pub(crate) fn conditional_move(&mut self, other: &Self, choice: u8) {
        let mask = -i32::from(choice);
        for (limb, alt) in self.0.iter_mut().zip(other.0.iter()) {
            *limb ^= mask & (*limb ^ alt);
        }
    }

    /// Raw products of `self * self` before carrying.
    ///
    /// Cross terms are doubled once for symmetry, and odd-by-odd limb
    /// products again for the half-bit offset of odd limbs.
    #[inline(always)]
    fn square_terms(&self) -> [i64; 10] {
        let f = self.0.map(i64::from);
        let mut h = [0i64; 10];
        for i in 0..10 {
            for j in i..10 {
                let mut term = f[i] * f[j];
                if i != j {
                    term *= 2;
                }
                if i & j & 1 == 1 {
                    term *= 2;
                }
                if i + j >= 10 {
                    h[i + j - 10] += 19 * term;
                } else {
                    h[i + j] += term;
                }
            }
        }
        h
    }

    pub(crate) fn square(&self) -> Self {
        combine(self.square_terms())
    }

    /// Computes `2 * self^2`.
    pub(crate) fn square2(&self) -> Self {
        combine(self.square_terms().map(|term| 2 * term))
    }

    /// Squares `n` times in a row. `n` must be at least 1.
    pub(crate) fn n_square(&self, n: usize) -> Self {
        let mut out = self.square();
        for _ in 1..n {
            out = out.square();
        }
        out
    }

    /// Shared prefix of the inversion and square-root chains.
    ///
    /// Returns `(z^(2^250 - 1), z^11)`.
    fn pow22501(&self) -> (Self, Self) {
        let z2 = self.square();
        let z9 = *self * z2.n_square(2);
        let z11 = z2 * z9;
        let z_5_0 = z9 * z11.square(); // 2^5 - 1
        let z_10_0 = z_5_0.n_square(5) * z_5_0; // 2^10 - 1
        let z_20_0 = z_10_0.n_square(10) * z_10_0; // 2^20 - 1
        let z_40_0 = z_20_0.n_square(20) * z_20_0; // 2^40 - 1
        let z_50_0 = z_40_0.n_square(10) * z_10_0; // 2^50 - 1
        let z_100_0 = z_50_0.n_square(50) * z_50_0; // 2^100 - 1
        let z_200_0 = z_100_0.n_square(100) * z_100_0; // 2^200 - 1
        let z_250_0 = z_200_0.n_square(50) * z_50_0; // 2^250 - 1
        (z_250_0, z11)
    }

    /// Computes `z^(p - 2) = z^(2^255 - 21)`, the inverse of a non-zero `z`.
    ///
    /// Zero maps to zero.
    pub(crate) fn invert(&self) -> Self {
        let (z_250_0, z11) = self.pow22501();
        z_250_0.n_square(5) * z11
    }

    /// Computes `z^((p - 5) / 8) = z^(2^252 - 3)`, the exponent used by
    /// point decompression to take square roots.
    pub(crate) fn pow22523(&self) -> Self {
        let (z_250_0, _) = self.pow22501();
        z_250_0.n_square(2) * *self
    }
}

impl Add for FieldElement {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl Sub for FieldElement {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl Neg for FieldElement {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self(self.0.map(|limb| -limb))
    }
}

impl Mul for FieldElement {
    type Output = Self;

    /// Schoolbook product over the 10 limbs, wrapping the high half with
    /// the factor 19.
    fn mul(self, rhs: Self) -> Self {
        let f = self.0.map(i64::from);
        let g = rhs.0.map(i64::from);
        let mut h = [0i64; 10];
        for i in 0..10 {
            for j in 0..10 {
                let mut term = f[i] * g[j];
                if i & j & 1 == 1 {
                    term *= 2;
                }
                if i + j >= 10 {
                    h[i + j - 10] += 19 * term;
                } else {
                    h[i + j] += term;
                }
            }
        }
        combine(h)
    }
}
