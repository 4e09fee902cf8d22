//! Digital signature schemes.
//!
//! Ed25519 is exposed as two modules of free functions:
//!
//! - [`ed25519`] derives keys, signs, and verifies under RFC 8032 rules
//! - [`zip215`] verifies under the ZIP-215 rules, which tolerate
//!   non-canonical encodings and small-order differences
//!
//! Both verifiers return `bool` and never error.

pub mod ed25519;

pub use ed25519::zip215;
