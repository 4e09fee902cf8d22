//! SHA-256 compression and hashing.

use super::H256_INIT;
use super::computations::all_rounds;

/// Size of a SHA-256 block in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Size of a SHA-256 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

fn compress(block: &[u8; BLOCK_SIZE], state: &mut [u32; 8]) {
    let mut w = [0u32; 16];
    for (slot, chunk) in w.iter_mut().zip(block.chunks_exact(4)) {
        let mut word = [0u8; 4];
        word.copy_from_slice(chunk);
        *slot = u32::from_be_bytes(word);
    }

    all_rounds(state, w);
}

/// Incremental SHA-256.
#[derive(Clone)]
pub struct Sha256 {
    state: [u32; 8],
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,
    length: u64,
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha256 {
    pub fn new() -> Self {
        Self {
            state: H256_INIT,
            buffer: [0; BLOCK_SIZE],
            buffered: 0,
            length: 0,
        }
    }

    pub fn update(&mut self, mut data: &[u8]) {
        self.length += data.len() as u64;

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

    /// Pads with `0x80`, zeros and the 64-bit big-endian bit count.
    pub fn finalize(mut self) -> [u8; DIGEST_SIZE] {
        let bit_length = self.length << 3;

        let mut block = [0u8; BLOCK_SIZE];
        block[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        block[self.buffered] = 0x80;

        if self.buffered > BLOCK_SIZE - 9 {
            compress(&block, &mut self.state);
            block = [0; BLOCK_SIZE];
        }

        block[BLOCK_SIZE - 8..].copy_from_slice(&bit_length.to_be_bytes());
        compress(&block, &mut self.state);

        let mut out = [0u8; DIGEST_SIZE];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }
}

/// Computes the SHA-256 digest of `input`.
pub fn sha256(input: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hasher.finalize()
}
