//! Edwards25519 group operations.
//!
//! The curve is the twisted Edwards curve
//!
//! ```text
//! −x² + y² = 1 + d·x²·y²
//! ```
//!
//! over GF(2^255 - 19). A point is kept in whichever coordinate system
//! makes the next operation cheapest:
//!
//! - [`ExtendedPoint`] `(X : Y : Z : T)` with `XY = ZT`, the working form
//!   and the one produced by decompression
//! - [`ProjectivePoint`] `(X : Y : Z)`, enough for doubling and encoding
//! - [`CompletedPoint`] `((X : Z), (Y : T))`, the transient result of every
//!   addition and doubling
//! - [`CachedPoint`] `(Y + X, Y − X, Z, 2dT)`, the right operand of a
//!   general addition
//! - [`PrecomputedPoint`] `(y + x, y − x, 2dxy)`, an affine table entry
//!
//! Every conversion maps a point to the same affine point. The only lossy
//! step is compression, which keeps `y` and the sign of `x`.
//!
//! ## Two scalar multiplications
//!
//! [`ExtendedPoint::scalar_mult_base`] walks all 64 windows and selects
//! table entries with masks. It is the only multiplication that may see a
//! secret scalar.
//!
//! [`ProjectivePoint::double_scalar_mult_vartime`] skips zero digits and
//! indexes tables by digit value. It exists for verification, where every
//! input is public.

use super::ct::{ConstantTimeEq, ct_is_negative};
use super::field::FieldElement;
use super::scalar::Scalar;
use super::table::{BASE, BI, D, D2, SQRTM1};

#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjectivePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ExtendedPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct CompletedPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct CachedPoint {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t2d: FieldElement,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PrecomputedPoint {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) xy2d: FieldElement,
}

/// Compresses `(x, y)` given in projective form: `y` with the low bit of
/// `x` in bit 255.
fn encode(x: &FieldElement, y: &FieldElement, z: &FieldElement) -> [u8; 32] {
    let recip = z.invert();
    let x = *x * recip;
    let y = *y * recip;

    let mut out = y.to_bytes();
    out[31] ^= u8::from(x.is_negative()) << 7;
    out
}

impl ProjectivePoint {
    pub(crate) const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
    };

    /// Doubles the point.
    pub(crate) fn double(&self) -> CompletedPoint {
        let xx = self.x.square();
        let yy = self.y.square();
        let zz2 = self.z.square2();
        let x_plus_y_sq = (self.x + self.y).square();

        let y = yy + xx;
        let z = yy - xx;
        CompletedPoint {
            x: x_plus_y_sq - y,
            y,
            z,
            t: zz2 - z,
        }
    }

    /// `(X : Y : Z) -> (XZ : YZ : Z² : XY)`.
    pub(crate) fn to_extended(&self) -> ExtendedPoint {
        ExtendedPoint {
            x: self.x * self.z,
            y: self.y * self.z,
            z: self.z.square(),
            t: self.x * self.y,
        }
    }

    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        encode(&self.x, &self.y, &self.z)
    }

    /// Computes `a * A + b * B` where `B` is the base point.
    ///
    /// ## Variable-time
    ///
    /// Zero digits are skipped and table entries are indexed by digit. The
    /// scalars and the point must be public. Signing never reaches this.
    pub(crate) fn double_scalar_mult_vartime(
        a: &Scalar,
        point: &ExtendedPoint,
        b: &Scalar,
    ) -> Self {
        let a_digits = a.slide();
        let b_digits = b.slide();

        // odd multiples A, 3A, 5A, ..., 15A
        let mut multiples = [point.to_cached(); 8];
        let doubled = point.double().to_extended();
        for i in 1..8 {
            multiples[i] = CompletedPoint::add(&doubled, &multiples[i - 1])
                .to_extended()
                .to_cached();
        }

        let mut r = Self::IDENTITY;
        let Some(top) = (0..256).rev().find(|&i| a_digits[i] != 0 || b_digits[i] != 0) else {
            return r;
        };

        for i in (0..=top).rev() {
            let mut t = r.double();

            let digit = a_digits[i];
            if digit > 0 {
                t = CompletedPoint::add(&t.to_extended(), &multiples[(digit / 2) as usize]);
            } else if digit < 0 {
                t = CompletedPoint::sub(&t.to_extended(), &multiples[(-digit / 2) as usize]);
            }

            let digit = b_digits[i];
            if digit > 0 {
                t = CompletedPoint::mixed_add(&t.to_extended(), &BI[(digit / 2) as usize]);
            } else if digit < 0 {
                t = CompletedPoint::mixed_sub(&t.to_extended(), &BI[(-digit / 2) as usize]);
            }

            r = t.to_projective();
        }

        r
    }
}

impl ExtendedPoint {
    pub(crate) const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
        t: FieldElement::ZERO,
    };

    /// Decompresses a 32-byte encoding.
    ///
    /// Solves `x² = (y² − 1) / (d·y² + 1)` with the candidate root
    /// `x = u·v³·(u·v⁷)^((p−5)/8)`. If `v·x²` equals `−u` instead of `u` the
    /// root is corrected by `sqrt(−1)`; if it equals neither, `y` is not on
    /// the curve and `None` is returned.
    ///
    /// `y` is not required to be canonical: encodings of `y + p` decode to
    /// the same point as `y`.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let y = FieldElement::from_bytes(bytes);
        let z = FieldElement::ONE;

        let y2 = y.square();
        let u = y2 - z;
        let v = y2 * D + z;

        let v3 = v.square() * v;
        let uv7 = v3.square() * v * u;
        let mut x = uv7.pow22523() * v3 * u;

        let vxx = x.square() * v;
        if (vxx - u).is_non_zero() {
            if (vxx + u).is_non_zero() {
                return None;
            }
            x = x * SQRTM1;
        }

        let sign = bytes[31] >> 7 == 1;
        if x.is_negative() != sign {
            x = -x;
        }

        Some(Self { x, y, z, t: x * y })
    }

    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        encode(&self.x, &self.y, &self.z)
    }

    pub(crate) fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    pub(crate) fn to_cached(&self) -> CachedPoint {
        CachedPoint {
            y_plus_x: self.y + self.x,
            y_minus_x: self.y - self.x,
            z: self.z,
            t2d: self.t * D2,
        }
    }

    pub(crate) fn double(&self) -> CompletedPoint {
        self.to_projective().double()
    }

    /// `(x, y) -> (−x, y)`.
    pub(crate) fn negate(&self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }

    /// Computes `a * B` for the base point `B`.
    ///
    /// The scalar is recoded into 64 signed radix-16 digits in `[-8, 8]`.
    /// Odd windows are accumulated first, the sum is multiplied by 16, and
    /// the even windows are added on top. Every window costs one masked
    /// table scan and one mixed addition, whatever its value.
    ///
    /// `a[31]` must be at most 127, which holds for clamped and reduced
    /// scalars.
    pub(crate) fn scalar_mult_base(a: &Scalar) -> Self {
        let mut digits = [0i8; 64];
        for (i, byte) in a.0.iter().enumerate() {
            digits[2 * i] = (byte & 0x0f) as i8;
            digits[2 * i + 1] = (byte >> 4) as i8;
        }

        let mut carry = 0i8;
        for digit in digits.iter_mut().take(63) {
            *digit += carry;
            carry = (*digit + 8) >> 4;
            *digit -= carry << 4;
        }
        digits[63] += carry;

        let mut h = Self::IDENTITY;
        for i in (1..64).step_by(2) {
            let entry = PrecomputedPoint::select(i / 2, digits[i]);
            h = CompletedPoint::mixed_add(&h, &entry).to_extended();
        }

        let mut r = h.double().to_projective();
        r = r.double().to_projective();
        r = r.double().to_projective();
        h = r.double().to_extended();

        for i in (0..64).step_by(2) {
            let entry = PrecomputedPoint::select(i / 2, digits[i]);
            h = CompletedPoint::mixed_add(&h, &entry).to_extended();
        }

        h
    }

    /// Equality up to the cofactor: `[8](P − Q)` is the identity.
    ///
    /// In projective coordinates the identity is any `(0 : Z : Z)`.
    pub(crate) fn cofactor_equal(&self, other: &Self) -> bool {
        let mut r = CompletedPoint::sub(self, &other.to_cached()).to_projective();
        for _ in 0..3 {
            r = r.double().to_projective();
        }

        !r.x.is_non_zero() && !(r.y - r.z).is_non_zero()
    }
}

impl CompletedPoint {
    /// `p + q`.
    pub(crate) fn add(p: &ExtendedPoint, q: &CachedPoint) -> Self {
        let pp = (p.y + p.x) * q.y_plus_x;
        let mm = (p.y - p.x) * q.y_minus_x;
        let tt2d = p.t * q.t2d;
        let zz = p.z * q.z;
        let zz2 = zz + zz;

        Self {
            x: pp - mm,
            y: pp + mm,
            z: zz2 + tt2d,
            t: zz2 - tt2d,
        }
    }

    /// `p − q`.
    pub(crate) fn sub(p: &ExtendedPoint, q: &CachedPoint) -> Self {
        let pm = (p.y + p.x) * q.y_minus_x;
        let mp = (p.y - p.x) * q.y_plus_x;
        let tt2d = p.t * q.t2d;
        let zz = p.z * q.z;
        let zz2 = zz + zz;

        Self {
            x: pm - mp,
            y: pm + mp,
            z: zz2 - tt2d,
            t: zz2 + tt2d,
        }
    }

    /// `p + q` for an affine table entry `q`.
    pub(crate) fn mixed_add(p: &ExtendedPoint, q: &PrecomputedPoint) -> Self {
        let pp = (p.y + p.x) * q.y_plus_x;
        let mm = (p.y - p.x) * q.y_minus_x;
        let txy2d = p.t * q.xy2d;
        let z2 = p.z + p.z;

        Self {
            x: pp - mm,
            y: pp + mm,
            z: z2 + txy2d,
            t: z2 - txy2d,
        }
    }

    /// `p − q` for an affine table entry `q`.
    pub(crate) fn mixed_sub(p: &ExtendedPoint, q: &PrecomputedPoint) -> Self {
        let pm = (p.y + p.x) * q.y_minus_x;
        let mp = (p.y - p.x) * q.y_plus_x;
        let txy2d = p.t * q.xy2d;
        let z2 = p.z + p.z;

        Self {
            x: pm - mp,
            y: pm + mp,
            z: z2 - txy2d,
            t: z2 + txy2d,
        }
    }

    pub(crate) fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.x * self.t,
            y: self.y * self.z,
            z: self.z * self.t,
        }
    }

    pub(crate) fn to_extended(&self) -> ExtendedPoint {
        ExtendedPoint {
            x: self.x * self.t,
            y: self.y * self.z,
            z: self.z * self.t,
            t: self.x * self.y,
        }
    }
}

impl PrecomputedPoint {
    pub(crate) const IDENTITY: Self = Self {
        y_plus_x: FieldElement::ONE,
        y_minus_x: FieldElement::ONE,
        xy2d: FieldElement::ZERO,
    };

    /// Replaces `self` with `other` when `choice == 1`.
    #[inline(always)]
    pub(crate) fn conditional_move(&mut self, other: &Self, choice: u8) {
        self.y_plus_x.conditional_move(&other.y_plus_x, choice);
        self.y_minus_x.conditional_move(&other.y_minus_x, choice);
        self.xy2d.conditional_move(&other.xy2d, choice);
    }

    /// Returns `b * 256^pos * B` for a digit `b` in `[-8, 8]`.
    ///
    /// ## Constant-time
    ///
    /// All eight entries of row `pos` are touched and the sign is applied
    /// with a conditional move, so neither the memory access pattern nor the
    /// control flow depends on `b`.
    pub(crate) fn select(pos: usize, b: i8) -> Self {
        let negative = ct_is_negative(b);
        let b_abs = (b - ((-(negative as i8) & b) << 1)) as u8;

        let mut t = Self::IDENTITY;
        for (i, entry) in BASE[pos].iter().enumerate() {
            t.conditional_move(entry, b_abs.ct_eq(&(i as u8 + 1)));
        }

        let minus_t = Self {
            y_plus_x: t.y_minus_x,
            y_minus_x: t.y_plus_x,
            xy2d: -t.xy2d,
        };
        t.conditional_move(&minus_t, negative);
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_POINT: [u8; 32] = [
        0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66,
    ];

    /// Encoding of `(0, −1)`, the point of order two.
    const ORDER_TWO: [u8; 32] = [
        0xec, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x7f,
    ];

    fn scalar(value: u8) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[0] = value;
        Scalar(bytes)
    }

    #[test]
    fn base_point_encoding() {
        let b = ExtendedPoint::scalar_mult_base(&scalar(1));
        assert_eq!(b.to_bytes(), BASE_POINT);
    }

    #[test]
    fn zero_scalar_gives_identity() {
        let mut identity = [0u8; 32];
        identity[0] = 1;
        assert_eq!(ExtendedPoint::scalar_mult_base(&scalar(0)).to_bytes(), identity);
    }

    #[test]
    fn decompress_round_trip() {
        let p = ExtendedPoint::scalar_mult_base(&scalar(77));
        let decoded = ExtendedPoint::from_bytes(&p.to_bytes()).expect("valid point");
        assert_eq!(decoded.to_bytes(), p.to_bytes());
    }

    #[test]
    fn decompress_rejects_off_curve_y() {
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        assert!(ExtendedPoint::from_bytes(&bytes).is_none(), "y = 2 is not on the curve");
    }

    #[test]
    fn double_scalar_mult_matches_fixed_base() {
        let b = ExtendedPoint::from_bytes(&BASE_POINT).expect("base point");
        let r = ProjectivePoint::double_scalar_mult_vartime(&scalar(2), &b, &scalar(3));
        let expected = ExtendedPoint::scalar_mult_base(&scalar(5));
        assert_eq!(r.to_bytes(), expected.to_bytes());
    }

    #[test]
    fn double_scalar_mult_with_negated_point() {
        let a = ExtendedPoint::scalar_mult_base(&scalar(9));
        let r = ProjectivePoint::double_scalar_mult_vartime(&scalar(1), &a.negate(), &scalar(20));
        let expected = ExtendedPoint::scalar_mult_base(&scalar(11));
        assert_eq!(r.to_bytes(), expected.to_bytes());
    }

    #[test]
    fn double_scalar_mult_of_zero_is_identity() {
        let a = ExtendedPoint::scalar_mult_base(&scalar(9));
        let r = ProjectivePoint::double_scalar_mult_vartime(&scalar(0), &a, &scalar(0));
        assert_eq!(r.to_bytes(), ProjectivePoint::IDENTITY.to_bytes());
    }

    #[test]
    fn cofactor_equal_ignores_small_order_difference() {
        let p = ExtendedPoint::scalar_mult_base(&scalar(42));
        let t = ExtendedPoint::from_bytes(&ORDER_TWO).expect("order two point");
        let shifted = CompletedPoint::add(&p, &t.to_cached()).to_extended();

        assert_ne!(shifted.to_bytes(), p.to_bytes());
        assert!(p.cofactor_equal(&shifted));
        assert!(p.cofactor_equal(&p));
    }

    #[test]
    fn cofactor_equal_rejects_distinct_points() {
        let p = ExtendedPoint::scalar_mult_base(&scalar(42));
        let q = ExtendedPoint::scalar_mult_base(&scalar(43));
        assert!(!p.cofactor_equal(&q));
    }

    #[test]
    fn select_negates_for_negative_digits() {
        let plus = PrecomputedPoint::select(0, 3);
        let minus = PrecomputedPoint::select(0, -3);
        assert_eq!(plus.y_plus_x.to_bytes(), minus.y_minus_x.to_bytes());
        assert_eq!(plus.xy2d.to_bytes(), (-minus.xy2d).to_bytes());

        let zero = PrecomputedPoint::select(5, 0);
        assert_eq!(zero.y_plus_x.to_bytes(), FieldElement::ONE.to_bytes());
        assert!(!zero.xy2d.is_non_zero());
    }
}
