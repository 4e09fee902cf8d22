//! Ed25519 over Edwards25519.
//!
//! Layers, leaves first: field arithmetic, group operations, scalar
//! arithmetic, then the signing engine and the ZIP-215 rule on top.

mod core;
pub mod zip215;

mod ct;
pub(crate) mod field;
pub(crate) mod group;
mod scalar;
mod table;

pub use self::core::{
    KeyPair, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SEED_SIZE, SIGNATURE_SIZE, key_pair_from_seed,
    private_key_from_seed, public_key_from_private_key, sign, verify,
};
