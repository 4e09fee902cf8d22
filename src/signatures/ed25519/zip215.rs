//! ZIP-215 signature verification.
//!
//! Same inputs and the same gates as [`super::verify`] (sizes,
//! reserved bits, `A` decodes, `s < ℓ`), with two relaxations:
//!
//! - `R` is decompressed instead of compared as bytes, so non-canonical
//!   encodings of `y` are accepted
//! - `[s]B − [k]A` and `R` only need to agree up to the cofactor, so they may
//!   differ by a point of small order
//!
//! Consensus code that must agree with other implementations on every
//! borderline signature uses this rule. Everything else should use strict
//! verification.

use log::debug;

use super::core::prepare;
use super::group::ExtendedPoint;

pub use super::core::{PUBLIC_KEY_SIZE, SIGNATURE_SIZE};

/// Verifies `signature` over `message` under the ZIP-215 rules.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Some(prepared) = prepare(public_key, message, signature) else {
        return false;
    };

    let Some(r) = ExtendedPoint::from_bytes(&prepared.r_bytes) else {
        debug!("verification rejected: R is not a curve point");
        return false;
    };

    prepared.expected_r.to_extended().cofactor_equal(&r)
}
