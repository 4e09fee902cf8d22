//! Error type shared by every fallible operation in the crate.
//!
//! Mostly structural problems end up here, plus a ChaCha20-Poly1305 tag
//! mismatch. A signature that fails to verify or a point that does not
//! decompress is reported as `false` by the signature engine and never
//! becomes an `Error`.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A read or peek would run past the end of the buffer.
    #[error("{name} length {needed} exceeds the remaining data {remaining}")]
    Overflow {
        name: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// Not enough data left to even start decoding a value.
    #[error("{kind} data is {length} in length which is less than the minimum size required of {min}")]
    TooShort {
        kind: &'static str,
        length: usize,
        min: usize,
    },

    #[error("Type mismatch in {kind} {tag}")]
    TypeMismatch { kind: &'static str, tag: u32 },

    #[error("Unrecognized {kind} type {tag}")]
    UnrecognizedType { kind: &'static str, tag: u32 },

    /// A variant that decodes fine but is not allowed in this position,
    /// e.g. a Receipt directly inside a Message.
    #[error("{container} cannot contain a {kind} of type {tag}")]
    NotPermitted {
        container: &'static str,
        kind: &'static str,
        tag: u32,
    },

    #[error("The minimum number of {item} is {min}, you have provided {actual}")]
    TooFew {
        item: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("The maximum number of {item} is {max}, you have provided {actual}")]
    TooMany {
        item: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("The {kind} parents must be unique")]
    ParentsNotUnique { kind: &'static str },

    #[error("The {kind} parents must be lexicographically sorted")]
    ParentsNotSorted { kind: &'static str },

    #[error("The indexation key length is {length}, which is not within the allowed range of {min} and {max}")]
    IndexationKeyLength {
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("The index can only contain UTF-8 characters, byte {valid_up_to} is not")]
    IndexationKeyNotUtf8 { valid_up_to: usize },

    #[error("Payload length {length} exceeds the remaining data {remaining}")]
    PayloadOverflow { length: usize, remaining: usize },

    #[error("Payload length {declared} does not match the {consumed} bytes it contains")]
    PayloadLengthMismatch { declared: usize, consumed: usize },

    #[error("A {container} must contain a {kind} payload")]
    MissingPayload {
        container: &'static str,
        kind: &'static str,
    },

    #[error("Message data length {length} has unused data {unused}")]
    UnusedData { length: usize, unused: usize },

    #[error("The message length is {length}, which exceeds the maximum size of {max}")]
    MessageTooLong { length: usize, max: usize },

    #[error("{name} length {length} does not fit into a {width}-bit count")]
    CountOverflow {
        name: &'static str,
        length: usize,
        width: u32,
    },

    #[error("You cannot set the writeIndex to {index} as the stream is only {length} in length")]
    WriteIndexOutOfRange { index: usize, length: usize },

    #[error("Invalid {name} length {actual}, expected {expected}")]
    InvalidKeyLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Digest length {length} is not between 1 and {max}")]
    InvalidDigestLength { length: usize, max: usize },

    #[error("Invalid BIP-32 path: {0}")]
    InvalidPath(String),

    #[error("There are {blocks} unlock blocks for {inputs} inputs")]
    UnlockBlockCount { inputs: usize, blocks: usize },

    #[error("Unlock block {index} references {reference}, which is not an earlier signature block")]
    InvalidReference { index: usize, reference: u16 },

    #[error("Invalid Ed25519 public key")]
    InvalidPublicKey,

    /// The ChaCha20-Poly1305 tag does not match the data.
    #[error("The data could not be authenticated")]
    AuthenticationFailed,
}
