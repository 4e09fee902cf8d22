//! Hash functions exposed by the crate.
//!
//! SHA-256 and SHA-512 follow FIPS 180-4, BLAKE2b follows RFC 7693. Each
//! offers an incremental hasher and a one-shot function.

pub mod blake2b;
pub mod sha256;
pub mod sha512;

pub use blake2b::{Blake2b, blake2b_256, blake2b_512};
pub use sha256::{Sha256, sha256};
pub use sha512::{Sha512, sha512};
