//! Ed25519 wallet seeds.

use std::fmt;

use super::bip32::Bip32Path;
use super::slip0010::Slip0010;
use crate::signatures::ed25519::{self, KeyPair};
use crate::{Error, Result};

/// Seed material for a wallet: at least 32 bytes.
///
/// The key pair of a seed is derived from its first 32 bytes. Longer
/// seeds, e.g. BIP-39 output, still feed their full length into
/// [`Ed25519Seed::generate_seed_from_path`].
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519Seed {
    bytes: Vec<u8>,
}

impl fmt::Debug for Ed25519Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519Seed")
            .field("length", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl Ed25519Seed {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < ed25519::SEED_SIZE {
            return Err(Error::InvalidKeyLength {
                name: "seed",
                expected: ed25519::SEED_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn key_pair(&self) -> Result<KeyPair> {
        ed25519::key_pair_from_seed(&self.bytes)
    }

    /// The SLIP-0010 child at `path`, as a seed of its own.
    pub fn generate_seed_from_path(&self, path: &Bip32Path) -> Self {
        let (key, _) = Slip0010::derive_path(&self.bytes, path);
        Self { bytes: key.to_vec() }
    }
}
