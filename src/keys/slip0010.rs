//! SLIP-0010 key derivation for Ed25519.
//!
//! ```text
//! I          = HMAC-SHA512("ed25519 seed", seed)
//! key, chain = I[..32], I[32..]
//!
//! for each segment i:
//!     I          = HMAC-SHA512(chain, 0x00 ‖ key ‖ be32(i + 2^31))
//!     key, chain = I[..32], I[32..]
//! ```
//!
//! Only hardened derivation exists for Ed25519, so every segment is
//! hardened regardless of how the path was written.

use super::bip32::{Bip32Path, HARDENED_OFFSET};
use crate::macs::HmacSha512;
use crate::signatures::ed25519;
use crate::{Error, Result};

const CURVE_KEY: &[u8] = b"ed25519 seed";

/// Split HMAC output: the private key and the chain code.
fn split(digest: [u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&digest[..32]);
    chain_code.copy_from_slice(&digest[32..]);
    (key, chain_code)
}

pub struct Slip0010;

impl Slip0010 {
    /// Derives the master `(private_key, chain_code)` pair of a seed.
    pub fn master_key_from_seed(seed: &[u8]) -> ([u8; 32], [u8; 32]) {
        split(HmacSha512::mac(CURVE_KEY, seed))
    }

    /// Walks `path` from the master key of `seed`.
    ///
    /// Returns the `(private_key, chain_code)` of the last segment.
    pub fn derive_path(seed: &[u8], path: &Bip32Path) -> ([u8; 32], [u8; 32]) {
        let (mut key, mut chain_code) = Self::master_key_from_seed(seed);

        for segment in path.segments() {
            let mut data = [0u8; 37];
            data[1..33].copy_from_slice(&key);
            data[33..].copy_from_slice(&(segment.index + HARDENED_OFFSET).to_be_bytes());

            (key, chain_code) = split(HmacSha512::mac(&chain_code, &data));
        }

        (key, chain_code)
    }

    /// The Ed25519 public key of a derived private key.
    ///
    /// With `with_zero_byte` the key is prefixed by `0x00`, the form
    /// SLIP-0010 test vectors list.
    pub fn public_key(private_key: &[u8], with_zero_byte: bool) -> Result<Vec<u8>> {
        if private_key.len() != ed25519::SEED_SIZE {
            return Err(Error::InvalidKeyLength {
                name: "private key",
                expected: ed25519::SEED_SIZE,
                actual: private_key.len(),
            });
        }

        let pair = ed25519::key_pair_from_seed(private_key)?;
        let mut out = Vec::with_capacity(ed25519::PUBLIC_KEY_SIZE + 1);
        if with_zero_byte {
            out.push(0);
        }
        out.extend_from_slice(&pair.public_key);
        Ok(out)
    }
}
