//! BLAKE2b hashing with a variable digest length.

use super::{IV, SIGMA};
use crate::{Error, Result};

/// Size of a BLAKE2b block in bytes.
pub const BLOCK_SIZE: usize = 128;

/// Largest digest BLAKE2b can produce.
pub const MAX_DIGEST_SIZE: usize = 64;

/// The mixing function `G`.
#[inline(always)]
fn mix(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

/// Compresses one block. `counter` is the number of message bytes fed in
/// so far, including this block.
fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_SIZE], counter: u128, last: bool) {
    let mut m = [0u64; 16];
    for (word, chunk) in m.iter_mut().zip(block.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *word = u64::from_le_bytes(bytes);
    }

    let mut v = [0u64; 16];
    v[..8].copy_from_slice(h);
    v[8..].copy_from_slice(&IV);
    v[12] ^= counter as u64;
    v[13] ^= (counter >> 64) as u64;
    if last {
        v[14] = !v[14];
    }

    for round in 0..12 {
        let s = &SIGMA[round % 10];
        mix(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
        mix(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
        mix(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
        mix(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
        mix(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
        mix(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
        mix(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
        mix(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
    }

    for (i, word) in h.iter_mut().enumerate() {
        *word ^= v[i] ^ v[i + 8];
    }
}

/// Incremental, unkeyed BLAKE2b.
#[derive(Clone)]
pub struct Blake2b {
    h: [u64; 8],
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,
    counter: u128,
    out_len: usize,
}

impl Blake2b {
    /// Creates a hasher producing `out_len` bytes, `1..=64`.
    pub fn new(out_len: usize) -> Result<Self> {
        if out_len == 0 || out_len > MAX_DIGEST_SIZE {
            return Err(Error::InvalidDigestLength {
                length: out_len,
                max: MAX_DIGEST_SIZE,
            });
        }
        Ok(Self::with_length(out_len))
    }

    fn with_length(out_len: usize) -> Self {
        let mut h = IV;
        // parameter block: digest length, no key, fanout 1, depth 1
        h[0] ^= 0x0101_0000 ^ out_len as u64;

        Self {
            h,
            buffer: [0; BLOCK_SIZE],
            buffered: 0,
            counter: 0,
            out_len,
        }
    }

    pub fn update(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            // the final block has to go through `finalize` with the last
            // flag set, so a full buffer is only flushed once more data
            // is known to follow
            if self.buffered == BLOCK_SIZE {
                self.counter += BLOCK_SIZE as u128;
                compress(&mut self.h, &self.buffer, self.counter, false);
                self.buffered = 0;
            }

            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
        }
    }

    /// Returns the digest, `out_len` bytes long.
    pub fn finalize(mut self) -> Vec<u8> {
        self.counter += self.buffered as u128;
        self.buffer[self.buffered..].fill(0);
        compress(&mut self.h, &self.buffer, self.counter, true);

        let mut out = Vec::with_capacity(MAX_DIGEST_SIZE);
        for word in self.h {
            out.extend_from_slice(&word.to_le_bytes());
        }
        out.truncate(self.out_len);
        out
    }

    /// Like [`Blake2b::finalize`], copying into a fixed-size array.
    ///
    /// `N` must equal the length passed to [`Blake2b::new`].
    pub fn finalize_into<const N: usize>(self) -> [u8; N] {
        let digest = self.finalize();
        let mut out = [0u8; N];
        let n = N.min(digest.len());
        out[..n].copy_from_slice(&digest[..n]);
        out
    }
}

/// BLAKE2b with a 32-byte digest.
pub fn blake2b_256(input: &[u8]) -> [u8; 32] {
    digest::<32>(input)
}

/// BLAKE2b with a 64-byte digest.
pub fn blake2b_512(input: &[u8]) -> [u8; 64] {
    digest::<64>(input)
}

fn digest<const N: usize>(input: &[u8]) -> [u8; N] {
    let mut hasher = Blake2b::with_length(N);
    hasher.update(input);
    hasher.finalize_into()
}
