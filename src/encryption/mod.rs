//! Symmetric encryption.
//!
//! - [`chacha20`]: the raw ChaCha20 stream cipher
//! - [`chacha20poly1305`]: ChaCha20 with a Poly1305 tag (RFC 8439 AEAD)
//!
//! [`chacha20poly1305::decrypt`] fails with
//! [`crate::Error::AuthenticationFailed`] when the tag does not match and
//! never returns unauthenticated plaintext.

pub mod chacha20;
pub mod chacha20poly1305;

pub use chacha20::ChaCha20;
pub use chacha20poly1305::ChaCha20Poly1305;
