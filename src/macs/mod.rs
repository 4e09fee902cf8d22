//! Message authentication codes.
//!
//! HMAC (RFC 2104) over the crate's SHA-2 implementations. SLIP-0010 key
//! derivation is built on [`HmacSha512`].
//!
//! [`Poly1305`] is a one-time authenticator and the MAC half of
//! ChaCha20-Poly1305.

pub mod hmac;
pub mod poly1305;

pub use hmac::{HmacSha256, HmacSha512};
pub use poly1305::Poly1305;
