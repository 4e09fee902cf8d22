//! A growable write cursor.

use log::trace;

use crate::{Error, Result};

/// Writes little-endian values into an owned, growing buffer.
///
/// The cursor can be moved back over bytes already written. Payload
/// framing relies on that: it writes a zero length, the body, then seeks
/// back to fill in the real length.
#[derive(Clone, Debug)]
pub struct WriteStream {
    storage: Vec<u8>,
    write_index: usize,
    /// High-water mark of the cursor.
    written: usize,
}

impl Default for WriteStream {
    fn default() -> Self {
        Self::new()
    }
}

impl WriteStream {
    /// Growth granularity of the buffer.
    pub const CHUNK_SIZE: usize = 4096;

    pub fn new() -> Self {
        Self {
            storage: vec![0; Self::CHUNK_SIZE],
            write_index: 0,
            written: 0,
        }
    }

    /// Capacity of the buffer, written or not.
    pub fn length(&self) -> usize {
        self.storage.len()
    }

    /// Capacity left after the cursor.
    pub fn unused(&self) -> usize {
        self.storage.len() - self.write_index
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Moves the cursor. It may not pass the furthest byte written so far.
    pub fn set_write_index(&mut self, write_index: usize) -> Result<()> {
        if write_index > self.written {
            return Err(Error::WriteIndexOutOfRange {
                index: write_index,
                length: self.written,
            });
        }
        trace!("write index {} -> {}", self.write_index, write_index);
        self.write_index = write_index;
        Ok(())
    }

    /// The bytes before the cursor.
    pub fn finish(mut self) -> Vec<u8> {
        self.storage.truncate(self.write_index);
        self.storage
    }

    /// Doubles the buffer until `additional` more bytes fit after the
    /// cursor. The size stays a multiple of [`Self::CHUNK_SIZE`].
    fn expand(&mut self, additional: usize) {
        let needed = self.write_index + additional;
        if needed <= self.storage.len() {
            return;
        }

        let mut length = self.storage.len().max(Self::CHUNK_SIZE);
        while length < needed {
            length *= 2;
        }
        self.storage.resize(length, 0);
    }

    pub fn write_fixed(&mut self, bytes: &[u8]) {
        self.expand(bytes.len());
        self.storage[self.write_index..self.write_index + bytes.len()].copy_from_slice(bytes);
        self.write_index += bytes.len();
        self.written = self.written.max(self.write_index);
    }

    pub fn write_byte(&mut self, value: u8) {
        self.write_fixed(&[value]);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_fixed(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_fixed(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.write_fixed(&value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_byte(u8::from(value));
    }
}
