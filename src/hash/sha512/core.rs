//! SHA-512 compression and hashing.
//!
//! [`Sha512`] buffers input until a full 1024-bit block is available and
//! compresses it. [`sha512`] is the one-shot form used by the Ed25519
//! engine.

use super::H512_INIT;
use super::computations::all_rounds;

/// Size of a SHA-512 block in bytes.
pub const BLOCK_SIZE: usize = 128;

/// Size of a SHA-512 digest in bytes.
pub const DIGEST_SIZE: usize = 64;

/// Compresses a single 1024-bit message block into `state`.
///
/// Input words are read big-endian, as FIPS 180-4 requires.
fn compress(block: &[u8; BLOCK_SIZE], state: &mut [u64; 8]) {
    let mut w = [0u64; 16];
    for (slot, chunk) in w.iter_mut().zip(block.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *slot = u64::from_be_bytes(word);
    }

    all_rounds(state, w);
}

/// Incremental SHA-512.
#[derive(Clone)]
pub struct Sha512 {
    state: [u64; 8],
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,
    length: u128,
}

impl Default for Sha512 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha512 {
    pub fn new() -> Self {
        Self {
            state: H512_INIT,
            buffer: [0; BLOCK_SIZE],
            buffered: 0,
            length: 0,
        }
    }

    /// Absorbs `data`. May be called any number of times.
    pub fn update(&mut self, mut data: &[u8]) {
        self.length += data.len() as u128;

        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK_SIZE {
                return;
            }
            compress(&self.buffer, &mut self.state);
            self.buffered = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_SIZE);
        for chunk in &mut blocks {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            compress(&block, &mut self.state);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Applies the padding and returns the digest.
    ///
    /// The message length is appended as a 128-bit big-endian bit count.
    pub fn finalize(mut self) -> [u8; DIGEST_SIZE] {
        let bit_length = self.length << 3;

        let mut block = [0u8; BLOCK_SIZE];
        block[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        block[self.buffered] = 0x80;

        // no room left for the 16-byte length field
        if self.buffered > BLOCK_SIZE - 17 {
            compress(&block, &mut self.state);
            block = [0; BLOCK_SIZE];
        }

        block[BLOCK_SIZE - 16..].copy_from_slice(&bit_length.to_be_bytes());
        compress(&block, &mut self.state);

        let mut out = [0u8; DIGEST_SIZE];
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }
}

/// Computes the SHA-512 digest of `input`.
pub fn sha512(input: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha512::new();
    hasher.update(input);
    hasher.finalize()
}
