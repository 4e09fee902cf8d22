use super::common::{
    SMALL_TYPE_LENGTH, UINT16_SIZE, count, ensure_count, ensure_remaining, expect_small_type,
};
use super::read_stream::ReadStream;
use super::signature::{MIN_ED25519_SIGNATURE_LENGTH, deserialize_signature, serialize_signature};
use super::write_stream::WriteStream;
use crate::models::{Signature, UnlockBlock};
use crate::{Error, Result};

pub const SIGNATURE_UNLOCK_BLOCK_TYPE: u8 = 0;
pub const REFERENCE_UNLOCK_BLOCK_TYPE: u8 = 1;

pub const MIN_UNLOCK_BLOCK_LENGTH: usize = SMALL_TYPE_LENGTH;
pub const MIN_SIGNATURE_UNLOCK_BLOCK_LENGTH: usize =
    MIN_UNLOCK_BLOCK_LENGTH + MIN_ED25519_SIGNATURE_LENGTH;
pub const MIN_REFERENCE_UNLOCK_BLOCK_LENGTH: usize = MIN_UNLOCK_BLOCK_LENGTH + UINT16_SIZE;

pub const MIN_UNLOCK_BLOCK_COUNT: usize = 1;
pub const MAX_UNLOCK_BLOCK_COUNT: usize = 127;

/// Reads a `u16` count followed by that many unlock blocks.
///
/// The count must be within `1..=127`. It is not checked against the inputs here; that needs the
/// essence and happens in [`crate::utils::verify_unlock_blocks`].
pub fn deserialize_unlock_blocks(stream: &mut ReadStream<'_>) -> Result<Vec<UnlockBlock>> {
    let number = stream.read_u16("transaction.numUnlockBlocks")?;
    ensure_count(
        "unlock blocks",
        number.into(),
        MIN_UNLOCK_BLOCK_COUNT,
        MAX_UNLOCK_BLOCK_COUNT,
    )?;
    (0..number).map(|_| deserialize_unlock_block(stream)).collect()
}

pub fn serialize_unlock_blocks(stream: &mut WriteStream, blocks: &[UnlockBlock]) -> Result<()> {
    ensure_count(
        "unlock blocks",
        blocks.len(),
        MIN_UNLOCK_BLOCK_COUNT,
        MAX_UNLOCK_BLOCK_COUNT,
    )?;
    stream.write_u16(count("unlock blocks", blocks.len())?);
    for block in blocks {
        serialize_unlock_block(stream, block)?;
    }
    Ok(())
}

pub fn deserialize_unlock_block(stream: &mut ReadStream<'_>) -> Result<UnlockBlock> {
    ensure_remaining(stream, "Unlock Block", MIN_UNLOCK_BLOCK_LENGTH)?;

    match stream.peek_byte("unlockBlock.type")? {
        SIGNATURE_UNLOCK_BLOCK_TYPE => {
            deserialize_signature_unlock_block(stream).map(UnlockBlock::Signature)
        }
        REFERENCE_UNLOCK_BLOCK_TYPE => {
            deserialize_reference_unlock_block(stream).map(UnlockBlock::Reference)
        }
        tag => Err(Error::UnrecognizedType {
            kind: "unlock block",
            tag: tag.into(),
        }),
    }
}

pub fn serialize_unlock_block(stream: &mut WriteStream, block: &UnlockBlock) -> Result<()> {
    match block {
        UnlockBlock::Signature(signature) => {
            stream.write_byte(SIGNATURE_UNLOCK_BLOCK_TYPE);
            serialize_signature(stream, signature)
        }
        UnlockBlock::Reference(reference) => {
            stream.write_byte(REFERENCE_UNLOCK_BLOCK_TYPE);
            stream.write_u16(*reference);
            Ok(())
        }
    }
}

pub fn deserialize_signature_unlock_block(stream: &mut ReadStream<'_>) -> Result<Signature> {
    ensure_remaining(
        stream,
        "Signature Unlock Block",
        MIN_SIGNATURE_UNLOCK_BLOCK_LENGTH,
    )?;
    expect_small_type(stream, "signatureUnlockBlock", SIGNATURE_UNLOCK_BLOCK_TYPE)?;
    deserialize_signature(stream)
}

pub fn deserialize_reference_unlock_block(stream: &mut ReadStream<'_>) -> Result<u16> {
    ensure_remaining(
        stream,
        "Reference Unlock Block",
        MIN_REFERENCE_UNLOCK_BLOCK_LENGTH,
    )?;
    expect_small_type(stream, "referenceUnlockBlock", REFERENCE_UNLOCK_BLOCK_TYPE)?;
    stream.read_u16("referenceUnlockBlock.reference")
}
