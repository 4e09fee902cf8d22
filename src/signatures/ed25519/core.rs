//! Ed25519 signatures (RFC 8032) with strict verification.
//!
//! Key material travels as plain byte arrays:
//!
//! - seed: 32 bytes
//! - private key: 64 bytes, `seed ‖ public key`
//! - public key: 32 bytes, a compressed point
//! - signature: 64 bytes, `R ‖ s`
//!
//! ## Error model
//!
//! Key derivation and signing reject wrongly sized keys with
//! [`Error::InvalidKeyLength`]. Verification never fails: a public key or
//! signature of the wrong size, an undecodable point, a malleable `s` and a
//! mismatching `R` all come back as `false`.

use std::fmt;

use log::debug;

use super::ct::ConstantTimeEq;
use super::group::{ExtendedPoint, ProjectivePoint};
use super::scalar::Scalar;
use crate::hash::{Sha512, sha512};
use crate::{Error, Result};

pub const PUBLIC_KEY_SIZE: usize = 32;
pub const PRIVATE_KEY_SIZE: usize = 64;
pub const SIGNATURE_SIZE: usize = 64;
pub const SEED_SIZE: usize = 32;

/// A public key together with the private key it belongs to.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: [u8; PUBLIC_KEY_SIZE],
    pub private_key: [u8; PRIVATE_KEY_SIZE],
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Hashes the seed and clamps the lower half into the secret scalar.
///
/// Returns `(scalar, prefix)`, the prefix being the upper half of the
/// digest, used to derive nonces.
fn expand_seed(seed: &[u8]) -> (Scalar, [u8; 32]) {
    let digest = sha512(seed);

    let mut scalar = [0u8; 32];
    scalar.copy_from_slice(&digest[..32]);
    scalar[0] &= 248;
    scalar[31] &= 127;
    scalar[31] |= 64;

    let mut prefix = [0u8; 32];
    prefix.copy_from_slice(&digest[32..]);

    (Scalar(scalar), prefix)
}

/// Reduces `SHA-512(parts[0] ‖ parts[1] ‖ ...)` modulo ℓ.
fn hash_to_scalar(parts: &[&[u8]]) -> Scalar {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    Scalar::reduce(&hasher.finalize())
}

/// Derives the 64-byte private key `seed ‖ A` from a 32-byte seed.
pub fn private_key_from_seed(seed: &[u8]) -> Result<[u8; PRIVATE_KEY_SIZE]> {
    if seed.len() != SEED_SIZE {
        debug!("rejecting seed of {} bytes", seed.len());
        return Err(Error::InvalidKeyLength {
            name: "seed",
            expected: SEED_SIZE,
            actual: seed.len(),
        });
    }

    let (a, _) = expand_seed(seed);
    let public_key = ExtendedPoint::scalar_mult_base(&a).to_bytes();

    let mut private_key = [0u8; PRIVATE_KEY_SIZE];
    private_key[..32].copy_from_slice(seed);
    private_key[32..].copy_from_slice(&public_key);
    Ok(private_key)
}

/// Derives a key pair from the first 32 bytes of `seed`.
///
/// Longer seeds are accepted and truncated.
pub fn key_pair_from_seed(seed: &[u8]) -> Result<KeyPair> {
    if seed.len() < SEED_SIZE {
        debug!("rejecting seed of {} bytes", seed.len());
        return Err(Error::InvalidKeyLength {
            name: "seed",
            expected: SEED_SIZE,
            actual: seed.len(),
        });
    }

    let private_key = private_key_from_seed(&seed[..SEED_SIZE])?;
    Ok(KeyPair {
        public_key: public_key_from_private_key(&private_key),
        private_key,
    })
}

/// Extracts the public half of a private key.
pub fn public_key_from_private_key(private_key: &[u8; PRIVATE_KEY_SIZE]) -> [u8; PUBLIC_KEY_SIZE] {
    let mut public_key = [0u8; PUBLIC_KEY_SIZE];
    public_key.copy_from_slice(&private_key[32..]);
    public_key
}

/// Signs `message` with a 64-byte private key.
///
/// ```text
/// a, prefix = clamp(SHA-512(seed))
/// r = SHA-512(prefix ‖ M) mod ℓ
/// R = rB
/// k = SHA-512(R ‖ A ‖ M) mod ℓ
/// s = k·a + r mod ℓ
/// ```
///
/// Deterministic: the same key and message always give the same signature.
pub fn sign(private_key: &[u8], message: &[u8]) -> Result<[u8; SIGNATURE_SIZE]> {
    if private_key.len() != PRIVATE_KEY_SIZE {
        debug!("rejecting private key of {} bytes", private_key.len());
        return Err(Error::InvalidKeyLength {
            name: "private key",
            expected: PRIVATE_KEY_SIZE,
            actual: private_key.len(),
        });
    }

    let (a, prefix) = expand_seed(&private_key[..32]);
    let public_key = &private_key[32..];

    let r = hash_to_scalar(&[&prefix[..], message]);
    let big_r = ExtendedPoint::scalar_mult_base(&r).to_bytes();

    let k = hash_to_scalar(&[&big_r[..], public_key, message]);
    let s = Scalar::mul_add(&k, &a, &r);

    let mut signature = [0u8; SIGNATURE_SIZE];
    signature[..32].copy_from_slice(&big_r);
    signature[32..].copy_from_slice(&s.to_bytes());
    Ok(signature)
}

/// The part of verification shared by the strict and the ZIP-215 rules.
pub(crate) struct Prepared {
    /// `[s]B − [k]A`, the point `R` should be.
    pub(crate) expected_r: ProjectivePoint,
    /// `R` as it appears in the signature.
    pub(crate) r_bytes: [u8; 32],
}

/// Runs the checks both verification rules agree on and computes
/// `[s]B − [k]A`.
///
/// Returns `None` when the lengths are wrong, a reserved bit of `s` is set,
/// `A` does not decompress or `s` is not below ℓ.
pub(crate) fn prepare(public_key: &[u8], message: &[u8], signature: &[u8]) -> Option<Prepared> {
    if public_key.len() != PUBLIC_KEY_SIZE || signature.len() != SIGNATURE_SIZE {
        debug!(
            "verification rejected: key of {} bytes, signature of {} bytes",
            public_key.len(),
            signature.len()
        );
        return None;
    }
    if signature[63] & 224 != 0 {
        debug!("verification rejected: reserved bits of s are set");
        return None;
    }

    let mut key_bytes = [0u8; 32];
    key_bytes.copy_from_slice(public_key);
    let Some(a) = ExtendedPoint::from_bytes(&key_bytes) else {
        debug!("verification rejected: public key is not a curve point");
        return None;
    };
    let minus_a = a.negate();

    let mut r_bytes = [0u8; 32];
    r_bytes.copy_from_slice(&signature[..32]);
    let k = hash_to_scalar(&[&r_bytes[..], public_key, message]);

    let mut s_bytes = [0u8; 32];
    s_bytes.copy_from_slice(&signature[32..]);
    if !Scalar::is_minimal(&s_bytes) {
        debug!("verification rejected: s is not reduced");
        return None;
    }

    Some(Prepared {
        expected_r: ProjectivePoint::double_scalar_mult_vartime(&k, &minus_a, &Scalar(s_bytes)),
        r_bytes,
    })
}

/// Verifies `signature` over `message` under RFC 8032 rules.
///
/// `R` must match the canonical encoding of `[s]B − [k]A` byte for byte,
/// so a non-canonically encoded `R` is rejected even if it names the right
/// point.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Some(prepared) = prepare(public_key, message, signature) else {
        return false;
    };

    prepared.expected_r.to_bytes().ct_eq(&prepared.r_bytes) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_pair_matches_private_key() {
        let seed = [7u8; 32];
        let pair = key_pair_from_seed(&seed).expect("32-byte seed");
        let private_key = private_key_from_seed(&seed).expect("32-byte seed");

        assert_eq!(pair.private_key, private_key);
        assert_eq!(&pair.private_key[..32], &seed);
        assert_eq!(&pair.private_key[32..], &pair.public_key);
    }

    #[test]
    fn debug_output_hides_private_key() {
        let pair = key_pair_from_seed(&[1u8; 32]).expect("32-byte seed");
        let rendered = format!("{pair:?}");
        assert!(!rendered.contains("private_key"));
    }

    #[test]
    fn prepare_rejects_reserved_bits() {
        let pair = key_pair_from_seed(&[3u8; 32]).expect("32-byte seed");
        let mut signature = sign(&pair.private_key, b"m").expect("64-byte key");
        assert!(prepare(&pair.public_key, b"m", &signature).is_some());

        signature[63] |= 0x20;
        assert!(prepare(&pair.public_key, b"m", &signature).is_none());
    }
}
