//! Addresses derived from public keys.

pub mod ed25519;

pub use ed25519::Ed25519Address;
