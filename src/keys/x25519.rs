//! X25519 Diffie-Hellman (RFC 7748) and conversion of Ed25519 keys.
//!
//! Keys are 32-byte strings: a private key is a scalar, clamped on use,
//! and a public key is the Montgomery `u` coordinate of a point. The
//! scalar multiplication is a Montgomery ladder over the same field
//! arithmetic as Ed25519, with constant-time swaps at every bit.
//!
//! Ed25519 and X25519 share the underlying curve, so an Ed25519 key pair
//! can also be used for key exchange:
//!
//! ```text
//! private: clamp(SHA-512(seed)[0..32])
//! public:  u = (1 + y) / (1 − y)
//! ```

use log::debug;

use crate::hash::sha512;
use crate::signatures::ed25519::PRIVATE_KEY_SIZE;
use crate::signatures::ed25519::field::FieldElement;
use crate::signatures::ed25519::group::ExtendedPoint;
use crate::{Error, Result};

pub const KEY_SIZE: usize = 32;

/// `u = 9`.
pub const BASE_POINT: [u8; KEY_SIZE] = {
    let mut point = [0u8; KEY_SIZE];
    point[0] = 9;
    point
};

/// `(A − 2) / 4` for `A = 486662`.
const A24: FieldElement = FieldElement([121_665, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

fn clamp(scalar: &[u8; KEY_SIZE]) -> [u8; KEY_SIZE] {
    let mut clamped = *scalar;
    clamped[0] &= 248;
    clamped[31] &= 127;
    clamped[31] |= 64;
    clamped
}

#[inline(always)]
fn conditional_swap(a: &mut FieldElement, b: &mut FieldElement, choice: u8) {
    let (old_a, old_b) = (*a, *b);
    a.conditional_move(&old_b, choice);
    b.conditional_move(&old_a, choice);
}

/// Multiplies the point with coordinate `u` by the clamped `scalar`.
///
/// The top bit of `u` is ignored. Low-order inputs give the all-zero
/// output, which is returned as is.
pub fn scalar_mult(scalar: &[u8; KEY_SIZE], u: &[u8; KEY_SIZE]) -> [u8; KEY_SIZE] {
    let k = clamp(scalar);
    let x1 = FieldElement::from_bytes(u);

    let mut x2 = FieldElement::ONE;
    let mut z2 = FieldElement::ZERO;
    let mut x3 = x1;
    let mut z3 = FieldElement::ONE;
    let mut swap = 0u8;

    for t in (0..255).rev() {
        let bit = (k[t >> 3] >> (t & 7)) & 1;
        swap ^= bit;
        conditional_swap(&mut x2, &mut x3, swap);
        conditional_swap(&mut z2, &mut z3, swap);
        swap = bit;

        let a = x2 + z2;
        let aa = a.square();
        let b = x2 - z2;
        let bb = b.square();
        let e = aa - bb;
        let c = x3 + z3;
        let d = x3 - z3;
        let da = d * a;
        let cb = c * b;

        x3 = (da + cb).square();
        z3 = x1 * (da - cb).square();
        x2 = aa * bb;
        z2 = e * (aa + A24 * e);
    }

    conditional_swap(&mut x2, &mut x3, swap);
    conditional_swap(&mut z2, &mut z3, swap);

    (x2 * z2.invert()).to_bytes()
}

/// The public key of `private_key`, i.e. its multiple of [`BASE_POINT`].
pub fn public_key(private_key: &[u8; KEY_SIZE]) -> [u8; KEY_SIZE] {
    scalar_mult(private_key, &BASE_POINT)
}

/// The shared secret between our `private_key` and a peer's `public_key`.
pub fn exchange(private_key: &[u8; KEY_SIZE], public_key: &[u8; KEY_SIZE]) -> [u8; KEY_SIZE] {
    scalar_mult(private_key, public_key)
}

/// The X25519 private key matching an Ed25519 private key (`seed ‖
/// public key`). Only the seed half is used.
pub fn private_key_from_ed25519(private_key: &[u8; PRIVATE_KEY_SIZE]) -> [u8; KEY_SIZE] {
    let digest = sha512(&private_key[..32]);
    let mut scalar = [0u8; KEY_SIZE];
    scalar.copy_from_slice(&digest[..KEY_SIZE]);
    clamp(&scalar)
}

/// The X25519 public key matching an Ed25519 public key.
///
/// Fails with [`Error::InvalidPublicKey`] when `public_key` is not a
/// point on the curve.
pub fn public_key_from_ed25519(public_key: &[u8; KEY_SIZE]) -> Result<[u8; KEY_SIZE]> {
    let Some(point) = ExtendedPoint::from_bytes(public_key) else {
        debug!("Ed25519 public key does not decompress");
        return Err(Error::InvalidPublicKey);
    };

    // Decompression leaves z = 1, so y is affine.
    let one = FieldElement::ONE;
    let u = (one + point.y) * (one - point.y).invert();
    Ok(u.to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamping_ignores_the_fixed_bits() {
        let mut scalar = [0x55u8; KEY_SIZE];
        let expected = public_key(&scalar);

        scalar[0] |= 0b111;
        scalar[31] |= 0b1100_0000;
        assert_eq!(public_key(&scalar), expected);
    }

    #[test]
    fn low_order_point_gives_zero() {
        assert_eq!(exchange(&[0x42; KEY_SIZE], &[0; KEY_SIZE]), [0; KEY_SIZE]);
    }

    #[test]
    fn top_bit_of_u_is_ignored() {
        let scalar = [0x21u8; KEY_SIZE];
        let mut u = BASE_POINT;
        let expected = scalar_mult(&scalar, &u);
        u[31] |= 0x80;
        assert_eq!(scalar_mult(&scalar, &u), expected);
    }
}
