//! Ed25519 addresses.
//!
//! An address commits to a public key without revealing it:
//!
//! ```text
//! address = Blake2b-256(public key)
//! ```
//!
//! The key itself only appears on the ledger once funds are spent, inside
//! the signature unlock block.

use crate::hash::blake2b_256;
use crate::models::Address;
use crate::signatures::ed25519::PUBLIC_KEY_SIZE;

pub const ADDRESS_LENGTH: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ed25519Address {
    public_key: [u8; PUBLIC_KEY_SIZE],
}

impl Ed25519Address {
    pub fn from_public_key(public_key: &[u8; PUBLIC_KEY_SIZE]) -> Self {
        Self {
            public_key: *public_key,
        }
    }

    /// The address bytes, i.e. the Blake2b-256 digest of the public key.
    pub fn to_address(&self) -> [u8; ADDRESS_LENGTH] {
        blake2b_256(&self.public_key)
    }

    /// Whether `address` was derived from this public key.
    pub fn verify(&self, address: &[u8; ADDRESS_LENGTH]) -> bool {
        self.to_address() == *address
    }
}

impl From<Ed25519Address> for Address {
    fn from(address: Ed25519Address) -> Self {
        Address::Ed25519(address.to_address())
    }
}
