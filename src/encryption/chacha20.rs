//! ChaCha20 stream cipher (RFC 8439, IETF variant).
//!
//! The 16-word state is
//!
//! ```text
//! constants[0..4] | key[4..12] | counter[12] | nonce[13..16]
//! ```
//!
//! Each block runs the 20-round permutation over a copy of the state, adds
//! the original back in and serializes the words little-endian. The
//! counter then moves on by one.
//!
//! This is a bare stream cipher without authentication. Use
//! [`super::chacha20poly1305`] unless a protocol calls for the raw cipher.

/// `"expand 32-byte k"` as little-endian words.
const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

pub const KEY_SIZE: usize = 32;
pub const NONCE_SIZE: usize = 12;
pub const BLOCK_SIZE: usize = 64;

#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(7);
}

/// Ten double rounds: columns, then diagonals.
fn rounds(state: &mut [u32; 16]) {
    for _ in 0..10 {
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);

        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    }
}

fn load_words(words: &mut [u32], bytes: &[u8]) {
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
}

/// A keystream positioned at some byte offset.
///
/// Successive [`apply_keystream`](Self::apply_keystream) calls continue
/// where the previous one stopped, so data may be fed in pieces of any
/// size.
#[derive(Clone)]
pub struct ChaCha20 {
    state: [u32; 16],
    keystream: [u8; BLOCK_SIZE],
    /// Next unused byte of `keystream`. `BLOCK_SIZE` when it is spent.
    offset: usize,
}

impl ChaCha20 {
    /// Starts the keystream at block `counter`.
    pub fn new(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], counter: u32) -> Self {
        let mut state = [0u32; 16];
        state[..4].copy_from_slice(&CONSTANTS);
        load_words(&mut state[4..12], key);
        state[12] = counter;
        load_words(&mut state[13..16], nonce);

        Self {
            state,
            keystream: [0; BLOCK_SIZE],
            offset: BLOCK_SIZE,
        }
    }

    fn next_block(&mut self) {
        let mut working = self.state;
        rounds(&mut working);

        for ((out, word), original) in self
            .keystream
            .chunks_exact_mut(4)
            .zip(working)
            .zip(self.state)
        {
            out.copy_from_slice(&word.wrapping_add(original).to_le_bytes());
        }

        // The counter wraps after 2^32 blocks; a nonce must not be used
        // for that much data.
        self.state[12] = self.state[12].wrapping_add(1);
        self.offset = 0;
    }

    /// XORs the keystream into `data`. Encryption and decryption are the
    /// same operation.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data {
            if self.offset == BLOCK_SIZE {
                self.next_block();
            }
            *byte ^= self.keystream[self.offset];
            self.offset += 1;
        }
    }
}

/// One-shot encryption or decryption of `data`, starting at block
/// `counter`.
pub fn chacha20(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], counter: u32, data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    ChaCha20::new(key, nonce, counter).apply_keystream(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> [u8; KEY_SIZE] {
        std::array::from_fn(|i| i as u8)
    }

    #[test]
    fn quarter_round_vector() {
        let mut state = [0u32; 16];
        state[..4].copy_from_slice(&[0x1111_1111, 0x0102_0304, 0x9b8d_6f43, 0x0123_4567]);
        quarter_round(&mut state, 0, 1, 2, 3);
        assert_eq!(
            state[..4],
            [0xea2a_92f4, 0xcb1c_f8ce, 0x4581_472e, 0x5881_c4bb]
        );
    }

    #[test]
    fn block_function_vector() {
        let nonce = [0, 0, 0, 0x09, 0, 0, 0, 0x4a, 0, 0, 0, 0];
        let mut block = [0u8; BLOCK_SIZE];
        ChaCha20::new(&key(), &nonce, 1).apply_keystream(&mut block);

        assert_eq!(
            block[..16],
            [
                0x10, 0xf1, 0xe7, 0xe4, 0xd1, 0x3b, 0x59, 0x15, 0x50, 0x0f, 0xdd, 0x1f, 0xa3, 0x20,
                0x71, 0xc4
            ]
        );
        assert_eq!(block[60..], [0xa2, 0x50, 0x3c, 0x4e]);
    }

    #[test]
    fn split_input_matches_one_shot() {
        let nonce = [7u8; NONCE_SIZE];
        let data: Vec<u8> = (0..300u16).map(|i| i as u8).collect();
        let expected = chacha20(&key(), &nonce, 0, &data);

        let mut cipher = ChaCha20::new(&key(), &nonce, 0);
        let mut pieces = data.clone();
        let (head, tail) = pieces.split_at_mut(63);
        let (middle, tail) = tail.split_at_mut(65);
        cipher.apply_keystream(head);
        cipher.apply_keystream(middle);
        cipher.apply_keystream(tail);

        assert_eq!(pieces, expected);
        assert_eq!(chacha20(&key(), &nonce, 0, &expected), data);
    }
}
