//! HMAC over SHA-256 and SHA-512.
//!
//! ```text
//! HMAC(K, m) = H((K' ⊕ opad) ‖ H((K' ⊕ ipad) ‖ m))
//! ```
//!
//! where `K'` is the key zero-padded to the block size, or its digest when
//! it is longer than a block.

use crate::hash::sha256::{self, Sha256};
use crate::hash::sha512::{self, Sha512};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Defines an HMAC type over one of the SHA-2 hashers. Both variants only
/// differ in block size, digest size and the underlying hasher.
macro_rules! hmac_impl {
    ($name:ident, $hasher:ident, $module:ident) => {
        #[derive(Clone)]
        pub struct $name {
            inner: $hasher,
            outer: $hasher,
        }

        impl $name {
            pub fn new(key: &[u8]) -> Self {
                let mut block_key = [0u8; $module::core::BLOCK_SIZE];
                if key.len() > $module::core::BLOCK_SIZE {
                    let digest = $module::core::$module(key);
                    block_key[..digest.len()].copy_from_slice(&digest);
                } else {
                    block_key[..key.len()].copy_from_slice(key);
                }

                let mut inner = $hasher::new();
                let mut outer = $hasher::new();
                inner.update(&block_key.map(|byte| byte ^ IPAD));
                outer.update(&block_key.map(|byte| byte ^ OPAD));

                Self { inner, outer }
            }

            pub fn update(&mut self, data: &[u8]) {
                self.inner.update(data);
            }

            pub fn finalize(self) -> [u8; $module::core::DIGEST_SIZE] {
                let mut outer = self.outer;
                outer.update(&self.inner.finalize());
                outer.finalize()
            }

            /// One-shot MAC of `data` under `key`.
            pub fn mac(key: &[u8], data: &[u8]) -> [u8; $module::core::DIGEST_SIZE] {
                let mut hmac = Self::new(key);
                hmac.update(data);
                hmac.finalize()
            }
        }
    };
}

hmac_impl!(HmacSha256, Sha256, sha256);
hmac_impl!(HmacSha512, Sha512, sha512);
