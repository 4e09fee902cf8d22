//! A bounds-checked read cursor.

use log::debug;

use crate::{Error, Result};

/// Reads little-endian values from a borrowed buffer.
///
/// Every read names the field it is reading so an overrun can say what was
/// being decoded. Nothing is consumed when a read fails.
#[derive(Clone, Debug)]
pub struct ReadStream<'a> {
    storage: &'a [u8],
    read_index: usize,
}

impl<'a> ReadStream<'a> {
    pub fn new(storage: &'a [u8]) -> Self {
        Self {
            storage,
            read_index: 0,
        }
    }

    /// Total length of the underlying buffer.
    pub fn length(&self) -> usize {
        self.storage.len()
    }

    /// Whether at least `remaining` bytes are left to read.
    pub fn has_remaining(&self, remaining: usize) -> bool {
        remaining <= self.unused()
    }

    /// Bytes left to read.
    pub fn unused(&self) -> usize {
        self.storage.len() - self.read_index
    }

    pub fn read_index(&self) -> usize {
        self.read_index
    }

    pub fn set_read_index(&mut self, read_index: usize) -> Result<()> {
        if read_index > self.storage.len() {
            return Err(Error::Overflow {
                name: "read index",
                needed: read_index,
                remaining: self.storage.len(),
            });
        }
        self.read_index = read_index;
        Ok(())
    }

    /// Reads `length` bytes. With `peek` the cursor stays where it is.
    pub fn read_fixed(&mut self, name: &'static str, length: usize, peek: bool) -> Result<&'a [u8]> {
        if !self.has_remaining(length) {
            debug!(
                "{name}: {length} bytes requested at offset {}, {} left",
                self.read_index,
                self.unused()
            );
            return Err(Error::Overflow {
                name,
                needed: length,
                remaining: self.unused(),
            });
        }

        let bytes = &self.storage[self.read_index..self.read_index + length];
        if !peek {
            self.read_index += length;
        }
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self, name: &'static str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_fixed(name, N, false)?);
        Ok(out)
    }

    fn peek_array<const N: usize>(&mut self, name: &'static str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_fixed(name, N, true)?);
        Ok(out)
    }

    pub fn read_byte(&mut self, name: &'static str) -> Result<u8> {
        Ok(self.read_array::<1>(name)?[0])
    }

    /// Reads a byte without consuming it, used to dispatch on type tags.
    pub fn peek_byte(&mut self, name: &'static str) -> Result<u8> {
        Ok(self.peek_array::<1>(name)?[0])
    }

    pub fn read_u16(&mut self, name: &'static str) -> Result<u16> {
        self.read_array(name).map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self, name: &'static str) -> Result<u32> {
        self.read_array(name).map(u32::from_le_bytes)
    }

    pub fn peek_u32(&mut self, name: &'static str) -> Result<u32> {
        self.peek_array(name).map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self, name: &'static str) -> Result<u64> {
        self.read_array(name).map(u64::from_le_bytes)
    }

    /// Any non-zero byte reads as `true`.
    pub fn read_bool(&mut self, name: &'static str) -> Result<bool> {
        Ok(self.read_byte(name)? != 0)
    }
}
