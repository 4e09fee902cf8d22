//! Field widths, protocol limits and checks shared by the serializers.

use log::debug;

use super::read_stream::ReadStream;
use crate::models::MessageId;
use crate::{Error, Result};

pub const BYTE_SIZE: usize = 1;
pub const UINT16_SIZE: usize = 2;
pub const UINT32_SIZE: usize = 4;
pub const UINT64_SIZE: usize = 8;

/// One-byte tag of addresses, inputs, outputs, signatures and unlock
/// blocks.
pub const SMALL_TYPE_LENGTH: usize = BYTE_SIZE;
/// Four-byte tag of payloads.
pub const TYPE_LENGTH: usize = UINT32_SIZE;
/// Length prefix of the indexation key.
pub const STRING_LENGTH: usize = UINT16_SIZE;

pub const MESSAGE_ID_LENGTH: usize = 32;
pub const TRANSACTION_ID_LENGTH: usize = 32;
pub const MILESTONE_ID_LENGTH: usize = 32;
pub const MERKLE_PROOF_LENGTH: usize = 32;

pub const MAX_MESSAGE_LENGTH: usize = 32768;
pub const MIN_NUMBER_PARENTS: usize = 1;
pub const MAX_NUMBER_PARENTS: usize = 8;

/// Fails with [`Error::TooShort`] unless `min` bytes are left.
pub(crate) fn ensure_remaining(stream: &ReadStream<'_>, kind: &'static str, min: usize) -> Result<()> {
    if stream.has_remaining(min) {
        return Ok(());
    }
    debug!("{kind}: {} bytes left, {min} required", stream.unused());
    Err(Error::TooShort {
        kind,
        length: stream.unused(),
        min,
    })
}

/// Fails with [`Error::TooFew`] or [`Error::TooMany`] unless
/// `min <= actual <= max`.
pub(crate) fn ensure_count(item: &'static str, actual: usize, min: usize, max: usize) -> Result<()> {
    if actual < min {
        debug!("{actual} {item}, at least {min} required");
        return Err(Error::TooFew { item, min, actual });
    }
    if actual > max {
        debug!("{actual} {item}, at most {max} allowed");
        return Err(Error::TooMany { item, max, actual });
    }
    Ok(())
}

/// Consumes a one-byte tag, failing with [`Error::TypeMismatch`] unless
/// it is `expected`.
pub(crate) fn expect_small_type(stream: &mut ReadStream<'_>, kind: &'static str, expected: u8) -> Result<()> {
    let tag = stream.read_byte(kind)?;
    if tag != expected {
        debug!("{kind}: tag {tag}, expected {expected}");
        return Err(Error::TypeMismatch {
            kind,
            tag: tag.into(),
        });
    }
    Ok(())
}

/// Consumes a four-byte payload tag, failing with [`Error::TypeMismatch`]
/// unless it is `expected`.
pub(crate) fn expect_type(stream: &mut ReadStream<'_>, kind: &'static str, expected: u32) -> Result<()> {
    let tag = stream.read_u32(kind)?;
    if tag != expected {
        debug!("{kind}: tag {tag}, expected {expected}");
        return Err(Error::TypeMismatch { kind, tag });
    }
    Ok(())
}

/// Converts a length into a count prefix of the given integer type.
pub(crate) fn count<T: TryFrom<usize>>(name: &'static str, length: usize) -> Result<T> {
    T::try_from(length).map_err(|_| Error::CountOverflow {
        name,
        length,
        width: 8 * size_of::<T>() as u32,
    })
}

/// Parents of messages and milestones: 1 to 8 ids, unique and ascending.
///
/// Byte order is the order of the lowercase hex strings, so sorting
/// either way gives the same sequence.
pub(crate) fn check_parents(kind: &'static str, parents: &[MessageId]) -> Result<()> {
    ensure_count("parents", parents.len(), MIN_NUMBER_PARENTS, MAX_NUMBER_PARENTS)?;

    for pair in parents.windows(2) {
        if pair[0] == pair[1] {
            debug!("{kind} repeats a parent");
            return Err(Error::ParentsNotUnique { kind });
        }
    }
    if !parents.is_sorted() {
        debug!("{kind} parents are out of order");
        return Err(Error::ParentsNotSorted { kind });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_must_be_sorted_and_unique() {
        assert!(check_parents("message", &[[1; 32], [2; 32]]).is_ok());
        assert_eq!(
            check_parents("message", &[[2; 32], [1; 32]]),
            Err(Error::ParentsNotSorted { kind: "message" })
        );
        assert_eq!(
            check_parents("milestone", &[[1; 32], [3; 32], [3; 32]]),
            Err(Error::ParentsNotUnique { kind: "milestone" })
        );
    }

    #[test]
    fn unsorted_duplicates_report_order() {
        assert_eq!(
            check_parents("message", &[[3; 32], [1; 32], [3; 32]]),
            Err(Error::ParentsNotSorted { kind: "message" })
        );
    }

    #[test]
    fn parent_count_bounds() {
        assert!(matches!(check_parents("message", &[]), Err(Error::TooFew { .. })));

        let nine: Vec<MessageId> = (0..9u8).map(|i| [i; 32]).collect();
        assert_eq!(
            check_parents("message", &nine),
            Err(Error::TooMany {
                item: "parents",
                max: 8,
                actual: 9
            })
        );
    }

    #[test]
    fn count_overflow() {
        assert_eq!(count::<u8>("keys", 255), Ok(255u8));
        assert_eq!(
            count::<u8>("keys", 256),
            Err(Error::CountOverflow {
                name: "keys",
                length: 256,
                width: 8
            })
        );
    }
}
