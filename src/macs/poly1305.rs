//! Poly1305 one-time authenticator (RFC 8439).
//!
//! The key splits into `r` (clamped) and `s`. Each 16-byte block `m`, with
//! a `1` byte appended, updates the accumulator as
//!
//! ```text
//! h = (h + m) · r  mod 2^130 − 5
//! ```
//!
//! and the tag is `(h + s) mod 2^128`. Arithmetic uses five 26-bit limbs so
//! every product fits in a `u64`.
//!
//! A key must authenticate a single message only. ChaCha20-Poly1305
//! derives a fresh one per nonce.

pub const KEY_SIZE: usize = 32;
pub const TAG_SIZE: usize = 16;
const BLOCK_SIZE: usize = 16;

const MASK_26: u32 = 0x3ff_ffff;

#[inline(always)]
fn le32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[derive(Clone)]
pub struct Poly1305 {
    r: [u32; 5],
    h: [u32; 5],
    s: [u8; 16],
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,
}

impl Poly1305 {
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let r0 = le32(&key[0..]) & 0x0fff_ffff;
        let r1 = le32(&key[4..]) & 0x0fff_fffc;
        let r2 = le32(&key[8..]) & 0x0fff_fffc;
        let r3 = le32(&key[12..]) & 0x0fff_fffc;

        let r = [
            r0 & MASK_26,
            ((r0 >> 26) | (r1 << 6)) & MASK_26,
            ((r1 >> 20) | (r2 << 12)) & MASK_26,
            ((r2 >> 14) | (r3 << 18)) & MASK_26,
            (r3 >> 8) & MASK_26,
        ];

        let mut s = [0u8; 16];
        s.copy_from_slice(&key[16..]);

        Self {
            r,
            h: [0; 5],
            s,
            buffer: [0; BLOCK_SIZE],
            buffered: 0,
        }
    }

    pub fn update(&mut self, mut data: &[u8]) {
        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK_SIZE {
                return;
            }
            let block = self.buffer;
            self.absorb(&block);
            self.buffered = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            self.absorb(block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Absorbs a block of at most 16 bytes, padded with a `1` byte.
    fn absorb(&mut self, block: &[u8]) {
        let mut padded = [0u8; BLOCK_SIZE + 1];
        padded[..block.len()].copy_from_slice(block);
        padded[block.len()] = 1;

        let t0 = le32(&padded[0..]);
        let t1 = le32(&padded[4..]);
        let t2 = le32(&padded[8..]);
        let t3 = le32(&padded[12..]);
        let t4 = u32::from(padded[16]);

        let m = [
            t0 & MASK_26,
            ((t0 >> 26) | (t1 << 6)) & MASK_26,
            ((t1 >> 20) | (t2 << 12)) & MASK_26,
            ((t2 >> 14) | (t3 << 18)) & MASK_26,
            ((t3 >> 8) | (t4 << 24)) & MASK_26,
        ];
        for (h, m) in self.h.iter_mut().zip(m) {
            *h = h.wrapping_add(m);
        }

        let [h0, h1, h2, h3, h4] = self.h.map(u64::from);
        let [r0, r1, r2, r3, r4] = self.r.map(u64::from);
        let (s1, s2, s3, s4) = (r1 * 5, r2 * 5, r3 * 5, r4 * 5);

        let d0 = h0 * r0 + h1 * s4 + h2 * s3 + h3 * s2 + h4 * s1;
        let mut d1 = h0 * r1 + h1 * r0 + h2 * s4 + h3 * s3 + h4 * s2;
        let mut d2 = h0 * r2 + h1 * r1 + h2 * r0 + h3 * s4 + h4 * s3;
        let mut d3 = h0 * r3 + h1 * r2 + h2 * r1 + h3 * r0 + h4 * s4;
        let mut d4 = h0 * r4 + h1 * r3 + h2 * r2 + h3 * r1 + h4 * r0;

        self.h[0] = (d0 as u32) & MASK_26;
        d1 += d0 >> 26;
        self.h[1] = (d1 as u32) & MASK_26;
        d2 += d1 >> 26;
        self.h[2] = (d2 as u32) & MASK_26;
        d3 += d2 >> 26;
        self.h[3] = (d3 as u32) & MASK_26;
        d4 += d3 >> 26;
        self.h[4] = (d4 as u32) & MASK_26;

        // 2^130 = 5 (mod p)
        self.h[0] += ((d4 >> 26) * 5) as u32;
        self.h[1] += self.h[0] >> 26;
        self.h[0] &= MASK_26;
    }

    pub fn finalize(mut self) -> [u8; TAG_SIZE] {
        if self.buffered > 0 {
            let block = self.buffer;
            let length = self.buffered;
            self.absorb(&block[..length]);
        }

        let h = &mut self.h;
        let mut carry;
        for i in 1..5 {
            carry = h[i] >> 26;
            h[i] &= MASK_26;
            if i < 4 {
                h[i + 1] += carry;
            } else {
                h[0] += carry * 5;
            }
        }
        carry = h[0] >> 26;
        h[0] &= MASK_26;
        h[1] += carry;

        // g = h + 5 - 2^130, kept when h >= p.
        let mut g = [0u32; 5];
        carry = 5;
        for (g, h) in g.iter_mut().zip(h.iter()) {
            *g = h.wrapping_add(carry);
            carry = *g >> 26;
            *g &= MASK_26;
        }
        let mask = 0u32.wrapping_sub(carry);
        for (h, g) in h.iter_mut().zip(g) {
            *h = (*h & !mask) | (g & mask);
        }

        let words = [
            h[0] | (h[1] << 26),
            (h[1] >> 6) | (h[2] << 20),
            (h[2] >> 12) | (h[3] << 14),
            (h[3] >> 18) | (h[4] << 8),
        ];

        let mut tag = [0u8; TAG_SIZE];
        let mut sum = 0u64;
        for (i, word) in words.into_iter().enumerate() {
            sum += u64::from(word) + u64::from(le32(&self.s[4 * i..]));
            tag[4 * i..4 * i + 4].copy_from_slice(&(sum as u32).to_le_bytes());
            sum >>= 32;
        }
        tag
    }

    /// One-shot tag of `data` under `key`.
    pub fn mac(key: &[u8; KEY_SIZE], data: &[u8]) -> [u8; TAG_SIZE] {
        let mut poly = Self::new(key);
        poly.update(data);
        poly.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_independent_of_update_split() {
        let key: [u8; KEY_SIZE] = std::array::from_fn(|i| (i * 7 + 1) as u8);
        let data: Vec<u8> = (0..100u8).collect();
        let expected = Poly1305::mac(&key, &data);

        for split in [0, 1, 15, 16, 17, 50, 99, 100] {
            let mut poly = Poly1305::new(&key);
            poly.update(&data[..split]);
            poly.update(&data[split..]);
            assert_eq!(poly.finalize(), expected, "split at {split}");
        }
    }

    #[test]
    fn zero_r_leaves_only_s() {
        let mut key = [0u8; KEY_SIZE];
        key[16..].copy_from_slice(&[0xab; 16]);
        assert_eq!(Poly1305::mac(&key, b"anything at all"), [0xab; 16]);
    }
}
