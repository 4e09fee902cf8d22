//! BIP-32 derivation paths.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::{Error, Result};

/// Offset added to an index to mark it hardened.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// One step of a path: an index below 2^31 and whether it was written
/// hardened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub index: u32,
    pub hardened: bool,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

/// A BIP-32 path such as `m/44'/4218'/0'/0'/0'`.
///
/// The empty path is the master key and displays as `m`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bip32Path {
    segments: Vec<Segment>,
}

fn check_index(index: u32) -> Result<u32> {
    if index >= HARDENED_OFFSET {
        return Err(Error::InvalidPath(format!(
            "index {index} is not below {HARDENED_OFFSET}"
        )));
    }
    Ok(index)
}

impl Bip32Path {
    /// The empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a path. A leading `m` is optional and every segment is a
    /// decimal index, optionally followed by `'`.
    pub fn parse(path: &str) -> Result<Self> {
        let mut parts = path.split('/').peekable();
        if parts.peek() == Some(&"m") {
            parts.next();
        }

        let mut segments = Vec::new();
        for part in parts {
            let (digits, hardened) = match part.strip_suffix('\'') {
                Some(digits) => (digits, true),
                None => (part, false),
            };

            let index = digits
                .parse::<u32>()
                .ok()
                .filter(|_| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                .ok_or_else(|| {
                    debug!("rejecting path segment {part:?}");
                    Error::InvalidPath(format!("segment {part:?} of {path:?} is not an index"))
                })?;

            segments.push(Segment {
                index: check_index(index)?,
                hardened,
            });
        }

        Ok(Self { segments })
    }

    /// Appends a normal segment.
    pub fn push(&mut self, index: u32) -> Result<()> {
        self.segments.push(Segment {
            index: check_index(index)?,
            hardened: false,
        });
        Ok(())
    }

    /// Appends a hardened segment.
    pub fn push_hardened(&mut self, index: u32) -> Result<()> {
        self.segments.push(Segment {
            index: check_index(index)?,
            hardened: true,
        });
        Ok(())
    }

    /// Removes and returns the last segment.
    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The bare indices, hardened markers dropped.
    pub fn numbers(&self) -> Vec<u32> {
        self.segments.iter().map(|segment| segment.index).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for Bip32Path {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        Self::parse(path)
    }
}

impl fmt::Display for Bip32Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
