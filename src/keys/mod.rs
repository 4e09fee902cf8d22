//! Seeds, key pairs and hierarchical derivation.
//!
//! Wallets do not store one key per address. They store a single seed and
//! walk a BIP-32 path from it to reach each account and address:
//!
//! ```text
//! seed ──SLIP-0010──▶ child key ──Ed25519──▶ key pair ──Blake2b──▶ address
//! ```
//!
//! ## SLIP-0010
//!
//! Ed25519 has no public-key derivation, so SLIP-0010 only defines the
//! hardened branch: every segment of a path is derived as if it carried the
//! `'` marker, whether or not it was written with one.
//!
//! ## Key exchange
//!
//! [`x25519`] derives shared secrets, either from its own keys or from
//! Ed25519 key pairs converted to the Montgomery form.
//!
//! ## Paths
//!
//! [`Bip32Path`] is the textual form, e.g. `m/44'/4218'/0'/0'/0'`. It is
//! only a list of indices; the hardened markers are kept for display.

pub mod bip32;
pub mod seed;
pub mod slip0010;
pub mod x25519;

pub use bip32::Bip32Path;
pub use seed::Ed25519Seed;
pub use slip0010::Slip0010;

pub use crate::signatures::ed25519::KeyPair;
