//! Core building blocks for an IOTA ledger client.
//!
//! This crate contains the parts of a client library that have to be
//! exactly right: the Ed25519 signature engine the ledger uses to authorise
//! spending, the symmetric and key-exchange primitives next to it, and the
//! binary codec that turns messages, payloads and transactions into the
//! byte layouts a node accepts.
//!
//! Nothing in here performs I/O. Every function is pure and deterministic,
//! so the same inputs always produce the same bytes, signatures and
//! verdicts.
//!
//! # Module overview
//!
//! - `hash`
//!   SHA-256, SHA-512 and Blake2b. SHA-512 drives Ed25519, Blake2b-256
//!   derives addresses, message ids and transaction ids.
//!
//! - `macs`
//!   HMAC over SHA-256 and SHA-512, used by SLIP-0010 key derivation, and
//!   the Poly1305 one-time authenticator.
//!
//! - `encryption`
//!   The ChaCha20 stream cipher and the ChaCha20-Poly1305 AEAD.
//!
//! - `signatures`
//!   The Ed25519 engine (field arithmetic, group operations, scalar
//!   arithmetic, sign and strict verify) and the ZIP-215 verification rule.
//!
//! - `keys`
//!   Seeds, key pairs, BIP-32 paths, hardened SLIP-0010 derivation and
//!   X25519 key exchange.
//!
//! - `address`
//!   Ed25519 addresses, i.e. the Blake2b-256 digest of a public key.
//!
//! - `models`
//!   Plain value types for the ledger object model: messages, payloads,
//!   inputs, outputs and unlock blocks.
//!
//! - `binary`
//!   Read and write cursors plus one serializer/deserializer pair per wire
//!   type, enforcing minimum lengths, tags, counts and nesting rules.
//!
//! - `utils`
//!   Identifiers (message, transaction, network) and unlock-block building
//!   on top of the codec and the signature engine.
//!
//! # Error model
//!
//! Structural problems (short buffers, unknown tags, bad counts, wrong key
//! lengths) are reported as [`Error`]. Signature verdicts are plain
//! `bool`s: a signature that does not verify is `false`, never an error.
//! A ChaCha20-Poly1305 tag that does not match is
//! [`Error::AuthenticationFailed`].

mod error;

pub mod address;
pub mod binary;
pub mod encryption;
pub mod hash;
pub mod keys;
pub mod macs;
pub mod models;
pub mod signatures;
pub mod utils;

pub use error::{Error, Result};
