//! ChaCha20-Poly1305 authenticated encryption (RFC 8439).
//!
//! Block 0 of the ChaCha20 keystream supplies the one-time Poly1305 key
//! (its first 32 bytes). Data is encrypted from block 1 on. The tag
//! covers
//!
//! ```text
//! aad ‖ pad16 ‖ ciphertext ‖ pad16 ‖ len(aad):u64le ‖ len(ciphertext):u64le
//! ```
//!
//! [`encrypt`] and [`decrypt`] handle a whole message at once. The
//! [`ChaCha20Poly1305`] state does the same incrementally.
//!
//! A `(key, nonce)` pair must never encrypt two messages.

use log::debug;

use super::chacha20::{BLOCK_SIZE, ChaCha20};
use crate::macs::poly1305::{self, Poly1305};
use crate::{Error, Result};

pub use super::chacha20::{KEY_SIZE, NONCE_SIZE};
pub use crate::macs::poly1305::TAG_SIZE;

const PADDING: [u8; 16] = [0; 16];

fn pad16(mac: &mut Poly1305, length: u64) {
    let remainder = (length % 16) as usize;
    if remainder != 0 {
        mac.update(&PADDING[remainder..]);
    }
}

/// Incremental encryption or decryption of one message.
///
/// The associated data is fixed when the state is created. Call
/// [`update`](Self::update) for each piece of the message, then
/// [`finalize`](Self::finalize) for the tag when encrypting or
/// [`verify`](Self::verify) when decrypting.
///
/// A decryptor hands out plaintext before the tag is checked. Callers
/// must discard it if [`verify`](Self::verify) fails.
pub struct ChaCha20Poly1305 {
    cipher: ChaCha20,
    mac: Poly1305,
    aad_length: u64,
    data_length: u64,
    decrypting: bool,
}

impl ChaCha20Poly1305 {
    fn new(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], aad: &[u8], decrypting: bool) -> Self {
        let mut cipher = ChaCha20::new(key, nonce, 0);

        let mut block = [0u8; BLOCK_SIZE];
        cipher.apply_keystream(&mut block);
        let mut one_time_key = [0u8; poly1305::KEY_SIZE];
        one_time_key.copy_from_slice(&block[..poly1305::KEY_SIZE]);

        let mut mac = Poly1305::new(&one_time_key);
        let aad_length = aad.len() as u64;
        mac.update(aad);
        pad16(&mut mac, aad_length);

        Self {
            cipher,
            mac,
            aad_length,
            data_length: 0,
            decrypting,
        }
    }

    pub fn encryptor(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], aad: &[u8]) -> Self {
        Self::new(key, nonce, aad, false)
    }

    pub fn decryptor(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], aad: &[u8]) -> Self {
        Self::new(key, nonce, aad, true)
    }

    /// Encrypts or decrypts `data` in place and feeds the ciphertext to
    /// the authenticator.
    pub fn update(&mut self, data: &mut [u8]) {
        if self.decrypting {
            self.mac.update(data);
            self.cipher.apply_keystream(data);
        } else {
            self.cipher.apply_keystream(data);
            self.mac.update(data);
        }
        self.data_length += data.len() as u64;
    }

    /// The tag over the associated data and all ciphertext seen so far.
    pub fn finalize(mut self) -> [u8; TAG_SIZE] {
        pad16(&mut self.mac, self.data_length);
        self.mac.update(&self.aad_length.to_le_bytes());
        self.mac.update(&self.data_length.to_le_bytes());
        self.mac.finalize()
    }

    /// Compares the computed tag with `tag` in constant time.
    pub fn verify(self, tag: &[u8; TAG_SIZE]) -> Result<()> {
        let expected = self.finalize();
        let difference = expected
            .iter()
            .zip(tag)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));

        if difference != 0 {
            debug!("ChaCha20-Poly1305 tag mismatch");
            return Err(Error::AuthenticationFailed);
        }
        Ok(())
    }
}

/// Encrypts `plaintext` and returns the ciphertext with its tag.
pub fn encrypt(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    aad: &[u8],
    plaintext: &[u8],
) -> (Vec<u8>, [u8; TAG_SIZE]) {
    let mut aead = ChaCha20Poly1305::encryptor(key, nonce, aad);
    let mut ciphertext = plaintext.to_vec();
    aead.update(&mut ciphertext);
    (ciphertext, aead.finalize())
}

/// Decrypts `ciphertext`, failing with [`Error::AuthenticationFailed`]
/// unless `tag` matches the key, nonce, associated data and ciphertext.
pub fn decrypt(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8; TAG_SIZE],
) -> Result<Vec<u8>> {
    let mut aead = ChaCha20Poly1305::decryptor(key, nonce, aad);
    let mut plaintext = ciphertext.to_vec();
    aead.update(&mut plaintext);

    match aead.verify(tag) {
        Ok(()) => Ok(plaintext),
        Err(error) => {
            plaintext.fill(0);
            Err(error)
        }
    }
}
