//! Payloads and their length framing.
//!
//! Every payload, top-level or embedded, sits behind a `u32` length:
//!
//! ```text
//! length:u32 | type:u32 | body      (length > 0)
//! length:u32                        (length = 0, no payload)
//! ```
//!
//! The writer does not know the length up front. It reserves four bytes,
//! writes the body, then moves the cursor back to fill in the length. The
//! reader checks the length twice: against the data left before decoding
//! and against the bytes the body actually took afterwards.

use log::{debug, trace};

use super::common::{
    BYTE_SIZE, MERKLE_PROOF_LENGTH, MESSAGE_ID_LENGTH, STRING_LENGTH, TYPE_LENGTH, UINT16_SIZE,
    UINT32_SIZE, UINT64_SIZE, check_parents, count, ensure_count, ensure_remaining, expect_type,
};
use super::funds::{deserialize_funds, serialize_funds};
use super::input::{MIN_TREASURY_INPUT_LENGTH, deserialize_treasury_input, serialize_treasury_input};
use super::output::{
    MIN_TREASURY_OUTPUT_LENGTH, deserialize_treasury_output, serialize_treasury_output,
};
use super::read_stream::ReadStream;
use super::transaction::{
    MIN_TRANSACTION_ESSENCE_LENGTH, TRANSACTION_ESSENCE_TYPE, deserialize_transaction_essence,
    serialize_transaction_essence,
};
use super::unlock_block::{
    MIN_REFERENCE_UNLOCK_BLOCK_LENGTH, deserialize_unlock_blocks, serialize_unlock_blocks,
};
use super::write_stream::WriteStream;
use crate::models::{
    IndexationPayload, MilestonePayload, Payload, ReceiptPayload, TransactionPayload,
    TreasuryTransactionPayload,
};
use crate::signatures::ed25519::{PUBLIC_KEY_SIZE, SIGNATURE_SIZE};
use crate::{Error, Result};

pub const TRANSACTION_PAYLOAD_TYPE: u32 = 0;
pub const MILESTONE_PAYLOAD_TYPE: u32 = 1;
pub const INDEXATION_PAYLOAD_TYPE: u32 = 2;
pub const RECEIPT_PAYLOAD_TYPE: u32 = 3;
pub const TREASURY_TRANSACTION_PAYLOAD_TYPE: u32 = 4;

/// The length prefix alone, i.e. no payload.
pub const MIN_PAYLOAD_LENGTH: usize = UINT32_SIZE;

/// The smallest essence followed by a single reference unlock block.
pub const MIN_TRANSACTION_PAYLOAD_LENGTH: usize =
    TYPE_LENGTH + MIN_TRANSACTION_ESSENCE_LENGTH + UINT16_SIZE + MIN_REFERENCE_UNLOCK_BLOCK_LENGTH;

pub const MIN_MILESTONE_KEY_COUNT: usize = 1;
pub const MIN_MILESTONE_SIGNATURE_COUNT: usize = 1;

/// One parent, one key, one signature and no receipt.
pub const MIN_MILESTONE_PAYLOAD_LENGTH: usize = TYPE_LENGTH
    + UINT32_SIZE
    + UINT64_SIZE
    + BYTE_SIZE
    + MESSAGE_ID_LENGTH
    + MERKLE_PROOF_LENGTH
    + UINT32_SIZE
    + UINT32_SIZE
    + BYTE_SIZE
    + PUBLIC_KEY_SIZE
    + MIN_PAYLOAD_LENGTH
    + BYTE_SIZE
    + SIGNATURE_SIZE;

pub const MIN_INDEXATION_KEY_LENGTH: usize = 1;
pub const MAX_INDEXATION_KEY_LENGTH: usize = 64;

pub const MIN_INDEXATION_PAYLOAD_LENGTH: usize =
    TYPE_LENGTH + STRING_LENGTH + MIN_INDEXATION_KEY_LENGTH + UINT32_SIZE;

pub const MIN_TREASURY_TRANSACTION_PAYLOAD_LENGTH: usize =
    TYPE_LENGTH + MIN_TREASURY_INPUT_LENGTH + MIN_TREASURY_OUTPUT_LENGTH;

/// No funds, followed by the framed treasury transaction.
pub const MIN_RECEIPT_PAYLOAD_LENGTH: usize = TYPE_LENGTH
    + UINT32_SIZE
    + BYTE_SIZE
    + UINT16_SIZE
    + MIN_PAYLOAD_LENGTH
    + MIN_TREASURY_TRANSACTION_PAYLOAD_LENGTH;

/// The wire tag of a payload.
pub fn payload_type(payload: &Payload) -> u32 {
    match payload {
        Payload::Transaction(_) => TRANSACTION_PAYLOAD_TYPE,
        Payload::Milestone(_) => MILESTONE_PAYLOAD_TYPE,
        Payload::Indexation(_) => INDEXATION_PAYLOAD_TYPE,
        Payload::Receipt(_) => RECEIPT_PAYLOAD_TYPE,
        Payload::TreasuryTransaction(_) => TREASURY_TRANSACTION_PAYLOAD_TYPE,
    }
}

/// Reads a framed payload. A zero length is no payload.
pub fn deserialize_payload(stream: &mut ReadStream<'_>) -> Result<Option<Payload>> {
    ensure_remaining(stream, "Payload", MIN_PAYLOAD_LENGTH)?;

    let length = stream.read_u32("payload.length")? as usize;
    if !stream.has_remaining(length) {
        debug!("payload of {length} bytes, {} left", stream.unused());
        return Err(Error::PayloadOverflow {
            length,
            remaining: stream.unused(),
        });
    }
    if length == 0 {
        return Ok(None);
    }

    let start = stream.read_index();
    let payload = match stream.peek_u32("payload.type")? {
        TRANSACTION_PAYLOAD_TYPE => {
            Payload::Transaction(Box::new(deserialize_transaction_payload(stream)?))
        }
        MILESTONE_PAYLOAD_TYPE => Payload::Milestone(Box::new(deserialize_milestone_payload(stream)?)),
        INDEXATION_PAYLOAD_TYPE => Payload::Indexation(deserialize_indexation_payload(stream)?),
        RECEIPT_PAYLOAD_TYPE => Payload::Receipt(Box::new(deserialize_receipt_payload(stream)?)),
        TREASURY_TRANSACTION_PAYLOAD_TYPE => {
            Payload::TreasuryTransaction(deserialize_treasury_transaction_payload(stream)?)
        }
        tag => {
            return Err(Error::UnrecognizedType {
                kind: "payload",
                tag,
            });
        }
    };

    let consumed = stream.read_index() - start;
    if consumed != length {
        debug!("payload declared {length} bytes but used {consumed}");
        return Err(Error::PayloadLengthMismatch {
            declared: length,
            consumed,
        });
    }

    Ok(Some(payload))
}

/// Writes a framed payload, or a zero length for `None`.
pub fn serialize_payload(stream: &mut WriteStream, payload: Option<&Payload>) -> Result<()> {
    serialize_framed(stream, |stream| match payload {
        None => Ok(()),
        Some(Payload::Transaction(transaction)) => serialize_transaction_payload(stream, transaction),
        Some(Payload::Milestone(milestone)) => serialize_milestone_payload(stream, milestone),
        Some(Payload::Indexation(indexation)) => serialize_indexation_payload(stream, indexation),
        Some(Payload::Receipt(receipt)) => serialize_receipt_payload(stream, receipt),
        Some(Payload::TreasuryTransaction(treasury)) => {
            serialize_treasury_transaction_payload(stream, treasury)
        }
    })
}

/// Reserves the length prefix, runs `body` and backpatches the length.
pub(crate) fn serialize_framed<F>(stream: &mut WriteStream, body: F) -> Result<()>
where
    F: FnOnce(&mut WriteStream) -> Result<()>,
{
    let length_index = stream.write_index();
    stream.write_u32(0);

    body(stream)?;

    let end_index = stream.write_index();
    let length = end_index - length_index - UINT32_SIZE;
    if length == 0 {
        return Ok(());
    }

    let length = count("payload", length)?;
    trace!("backpatching payload length {length} at {length_index}");
    stream.set_write_index(length_index)?;
    stream.write_u32(length);
    stream.set_write_index(end_index)
}

pub fn deserialize_transaction_payload(stream: &mut ReadStream<'_>) -> Result<TransactionPayload> {
    ensure_remaining(stream, "Transaction Payload", MIN_TRANSACTION_PAYLOAD_LENGTH)?;
    expect_type(stream, "payloadTransaction", TRANSACTION_PAYLOAD_TYPE)?;

    let essence_type = stream.peek_byte("payloadTransaction.essenceType")?;
    if essence_type != TRANSACTION_ESSENCE_TYPE {
        return Err(Error::UnrecognizedType {
            kind: "transaction essence",
            tag: essence_type.into(),
        });
    }

    Ok(TransactionPayload {
        essence: deserialize_transaction_essence(stream)?,
        unlock_blocks: deserialize_unlock_blocks(stream)?,
    })
}

pub fn serialize_transaction_payload(
    stream: &mut WriteStream,
    transaction: &TransactionPayload,
) -> Result<()> {
    stream.write_u32(TRANSACTION_PAYLOAD_TYPE);
    serialize_transaction_essence(stream, &transaction.essence)?;
    serialize_unlock_blocks(stream, &transaction.unlock_blocks)
}

pub fn deserialize_milestone_payload(stream: &mut ReadStream<'_>) -> Result<MilestonePayload> {
    ensure_remaining(stream, "Milestone Payload", MIN_MILESTONE_PAYLOAD_LENGTH)?;
    expect_type(stream, "payloadMilestone", MILESTONE_PAYLOAD_TYPE)?;

    let index = stream.read_u32("payloadMilestone.index")?;
    let timestamp = stream.read_u64("payloadMilestone.timestamp")?;

    let number_parents = stream.read_byte("payloadMilestone.numParents")?;
    let parents = (0..number_parents)
        .map(|_| stream.read_array("payloadMilestone.parentMessageId"))
        .collect::<Result<Vec<_>>>()?;
    check_parents("milestone", &parents)?;

    let inclusion_merkle_proof = stream.read_array("payloadMilestone.inclusionMerkleProof")?;
    let next_pow_score = stream.read_u32("payloadMilestone.nextPoWScore")?;
    let next_pow_score_milestone_index =
        stream.read_u32("payloadMilestone.nextPoWScoreMilestoneIndex")?;

    let number_keys = stream.read_byte("payloadMilestone.publicKeysCount")?;
    ensure_count(
        "public keys",
        number_keys.into(),
        MIN_MILESTONE_KEY_COUNT,
        u8::MAX.into(),
    )?;
    let public_keys = (0..number_keys)
        .map(|_| stream.read_array("payloadMilestone.publicKey"))
        .collect::<Result<Vec<_>>>()?;

    let receipt = match deserialize_payload(stream)? {
        None => None,
        Some(Payload::Receipt(receipt)) => Some(*receipt),
        Some(other) => {
            return Err(Error::NotPermitted {
                container: "milestone",
                kind: "payload",
                tag: payload_type(&other),
            });
        }
    };

    let number_signatures = stream.read_byte("payloadMilestone.signaturesCount")?;
    ensure_count(
        "signatures",
        number_signatures.into(),
        MIN_MILESTONE_SIGNATURE_COUNT,
        u8::MAX.into(),
    )?;
    let signatures = (0..number_signatures)
        .map(|_| stream.read_array("payloadMilestone.signature"))
        .collect::<Result<Vec<_>>>()?;

    Ok(MilestonePayload {
        index,
        timestamp,
        parents,
        inclusion_merkle_proof,
        next_pow_score,
        next_pow_score_milestone_index,
        public_keys,
        receipt,
        signatures,
    })
}

pub fn serialize_milestone_payload(
    stream: &mut WriteStream,
    milestone: &MilestonePayload,
) -> Result<()> {
    check_parents("milestone", &milestone.parents)?;
    ensure_count(
        "public keys",
        milestone.public_keys.len(),
        MIN_MILESTONE_KEY_COUNT,
        u8::MAX.into(),
    )?;
    ensure_count(
        "signatures",
        milestone.signatures.len(),
        MIN_MILESTONE_SIGNATURE_COUNT,
        u8::MAX.into(),
    )?;

    stream.write_u32(MILESTONE_PAYLOAD_TYPE);
    stream.write_u32(milestone.index);
    stream.write_u64(milestone.timestamp);

    stream.write_byte(count("parents", milestone.parents.len())?);
    for parent in &milestone.parents {
        stream.write_fixed(parent);
    }

    stream.write_fixed(&milestone.inclusion_merkle_proof);
    stream.write_u32(milestone.next_pow_score);
    stream.write_u32(milestone.next_pow_score_milestone_index);

    stream.write_byte(count("public keys", milestone.public_keys.len())?);
    for key in &milestone.public_keys {
        stream.write_fixed(key);
    }

    serialize_framed(stream, |stream| match &milestone.receipt {
        Some(receipt) => serialize_receipt_payload(stream, receipt),
        None => Ok(()),
    })?;

    stream.write_byte(count("signatures", milestone.signatures.len())?);
    for signature in &milestone.signatures {
        stream.write_fixed(signature);
    }
    Ok(())
}

fn check_index_length(length: usize) -> Result<()> {
    if (MIN_INDEXATION_KEY_LENGTH..=MAX_INDEXATION_KEY_LENGTH).contains(&length) {
        return Ok(());
    }
    debug!("indexation key of {length} bytes");
    Err(Error::IndexationKeyLength {
        length,
        min: MIN_INDEXATION_KEY_LENGTH,
        max: MAX_INDEXATION_KEY_LENGTH,
    })
}

fn check_index_text(index: &[u8]) -> Result<()> {
    std::str::from_utf8(index).map(drop).map_err(|error| {
        debug!("indexation key is not UTF-8: {error}");
        Error::IndexationKeyNotUtf8 {
            valid_up_to: error.valid_up_to(),
        }
    })
}

pub fn deserialize_indexation_payload(stream: &mut ReadStream<'_>) -> Result<IndexationPayload> {
    ensure_remaining(stream, "Indexation Payload", MIN_INDEXATION_PAYLOAD_LENGTH)?;
    expect_type(stream, "payloadIndexation", INDEXATION_PAYLOAD_TYPE)?;

    let index_length = usize::from(stream.read_u16("payloadIndexation.indexLength")?);
    check_index_length(index_length)?;
    let index = stream
        .read_fixed("payloadIndexation.index", index_length, false)?
        .to_vec();
    check_index_text(&index)?;

    let data_length = stream.read_u32("payloadIndexation.dataLength")? as usize;
    let data = stream
        .read_fixed("payloadIndexation.data", data_length, false)?
        .to_vec();

    Ok(IndexationPayload { index, data })
}

pub fn serialize_indexation_payload(
    stream: &mut WriteStream,
    indexation: &IndexationPayload,
) -> Result<()> {
    check_index_length(indexation.index.len())?;
    check_index_text(&indexation.index)?;

    stream.write_u32(INDEXATION_PAYLOAD_TYPE);
    stream.write_u16(count("indexation key", indexation.index.len())?);
    stream.write_fixed(&indexation.index);
    stream.write_u32(count("indexation data", indexation.data.len())?);
    stream.write_fixed(&indexation.data);
    Ok(())
}

pub fn deserialize_receipt_payload(stream: &mut ReadStream<'_>) -> Result<ReceiptPayload> {
    ensure_remaining(stream, "Receipt Payload", MIN_RECEIPT_PAYLOAD_LENGTH)?;
    expect_type(stream, "payloadReceipt", RECEIPT_PAYLOAD_TYPE)?;

    let migrated_at = stream.read_u32("payloadReceipt.migratedAt")?;
    let last = stream.read_bool("payloadReceipt.final")?;
    let funds = deserialize_funds(stream)?;

    let transaction = match deserialize_payload(stream)? {
        Some(Payload::TreasuryTransaction(transaction)) => transaction,
        Some(other) => {
            return Err(Error::NotPermitted {
                container: "receipt",
                kind: "payload",
                tag: payload_type(&other),
            });
        }
        None => {
            return Err(Error::MissingPayload {
                container: "receipt",
                kind: "treasury transaction",
            });
        }
    };

    Ok(ReceiptPayload {
        migrated_at,
        last,
        funds,
        transaction,
    })
}

pub fn serialize_receipt_payload(stream: &mut WriteStream, receipt: &ReceiptPayload) -> Result<()> {
    stream.write_u32(RECEIPT_PAYLOAD_TYPE);
    stream.write_u32(receipt.migrated_at);
    stream.write_bool(receipt.last);
    serialize_funds(stream, &receipt.funds)?;
    serialize_framed(stream, |stream| {
        serialize_treasury_transaction_payload(stream, &receipt.transaction)
    })
}

pub fn deserialize_treasury_transaction_payload(
    stream: &mut ReadStream<'_>,
) -> Result<TreasuryTransactionPayload> {
    ensure_remaining(
        stream,
        "Treasury Transaction Payload",
        MIN_TREASURY_TRANSACTION_PAYLOAD_LENGTH,
    )?;
    expect_type(stream, "payloadTreasuryTransaction", TREASURY_TRANSACTION_PAYLOAD_TYPE)?;

    Ok(TreasuryTransactionPayload {
        input: deserialize_treasury_input(stream)?,
        output: deserialize_treasury_output(stream)?,
    })
}

pub fn serialize_treasury_transaction_payload(
    stream: &mut WriteStream,
    treasury: &TreasuryTransactionPayload,
) -> Result<()> {
    stream.write_u32(TREASURY_TRANSACTION_PAYLOAD_TYPE);
    serialize_treasury_input(stream, &treasury.input)?;
    serialize_treasury_output(stream, &treasury.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TreasuryInput, TreasuryOutput};

    fn indexation() -> Payload {
        Payload::Indexation(IndexationPayload {
            index: b"TEST".to_vec(),
            data: b"hello".to_vec(),
        })
    }

    fn serialize(payload: Option<&Payload>) -> Vec<u8> {
        let mut stream = WriteStream::new();
        serialize_payload(&mut stream, payload).unwrap();
        stream.finish()
    }

    #[test]
    fn empty_payload_is_a_zero_length() {
        let bytes = serialize(None);
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        assert_eq!(deserialize_payload(&mut ReadStream::new(&bytes)).unwrap(), None);
    }

    #[test]
    fn length_is_backpatched() {
        let bytes = serialize(Some(&indexation()));
        assert_eq!(&bytes[..4], &19u32.to_le_bytes());
        assert_eq!(bytes.len(), 4 + 19);
        assert_eq!(&bytes[4..8], &INDEXATION_PAYLOAD_TYPE.to_le_bytes());
    }

    #[test]
    fn declared_length_must_fit() {
        let mut bytes = serialize(Some(&indexation()));
        bytes[0] = 200;
        assert_eq!(
            deserialize_payload(&mut ReadStream::new(&bytes)),
            Err(Error::PayloadOverflow {
                length: 200,
                remaining: 19
            })
        );
    }

    #[test]
    fn declared_length_must_match_body() {
        let mut bytes = serialize(Some(&indexation()));
        bytes[0] = 18;
        assert_eq!(
            deserialize_payload(&mut ReadStream::new(&bytes)),
            Err(Error::PayloadLengthMismatch {
                declared: 18,
                consumed: 19
            })
        );
    }

    #[test]
    fn unknown_payload_type() {
        let bytes = [4, 0, 0, 0, 9, 0, 0, 0];
        assert_eq!(
            deserialize_payload(&mut ReadStream::new(&bytes)),
            Err(Error::UnrecognizedType {
                kind: "payload",
                tag: 9
            })
        );
    }

    #[test]
    fn indexation_key_bounds() {
        for index in [Vec::new(), vec![b'k'; 65]] {
            let payload = Payload::Indexation(IndexationPayload {
                index,
                data: Vec::new(),
            });
            let mut stream = WriteStream::new();
            assert!(matches!(
                serialize_payload(&mut stream, Some(&payload)),
                Err(Error::IndexationKeyLength { .. })
            ));
        }
    }

    #[test]
    fn indexation_key_must_be_utf8() {
        let payload = Payload::Indexation(IndexationPayload {
            index: vec![b'o', b'k', 0xff],
            data: Vec::new(),
        });
        let mut stream = WriteStream::new();
        assert_eq!(
            serialize_payload(&mut stream, Some(&payload)),
            Err(Error::IndexationKeyNotUtf8 { valid_up_to: 2 })
        );

        let mut bytes = serialize(Some(&Payload::Indexation(IndexationPayload {
            index: "naïve".as_bytes().to_vec(),
            data: Vec::new(),
        })));
        assert_eq!(&bytes[10..16], "naïve".as_bytes());
        // Replace the continuation byte of 'ï'.
        bytes[13] = b'i';
        assert_eq!(
            deserialize_payload(&mut ReadStream::new(&bytes)),
            Err(Error::IndexationKeyNotUtf8 { valid_up_to: 2 })
        );
    }

    #[test]
    fn receipt_requires_treasury_transaction() {
        let mut stream = WriteStream::new();
        stream.write_u32(RECEIPT_PAYLOAD_TYPE);
        stream.write_u32(5);
        stream.write_bool(true);
        stream.write_u16(0);
        serialize_payload(&mut stream, Some(&indexation())).unwrap();
        stream.write_fixed(&[0u8; 40]);
        let bytes = stream.finish();

        assert_eq!(
            deserialize_receipt_payload(&mut ReadStream::new(&bytes)),
            Err(Error::NotPermitted {
                container: "receipt",
                kind: "payload",
                tag: INDEXATION_PAYLOAD_TYPE
            })
        );
    }

    #[test]
    fn receipt_round_trip() {
        let receipt = Payload::Receipt(Box::new(ReceiptPayload {
            migrated_at: 1000,
            last: true,
            funds: Vec::new(),
            transaction: TreasuryTransactionPayload {
                input: TreasuryInput {
                    milestone_id: [4; 32],
                },
                output: TreasuryOutput { amount: 99 },
            },
        }));

        let bytes = serialize(Some(&receipt));
        assert_eq!(bytes.len(), MIN_PAYLOAD_LENGTH + MIN_RECEIPT_PAYLOAD_LENGTH);
        assert_eq!(
            deserialize_payload(&mut ReadStream::new(&bytes)).unwrap(),
            Some(receipt)
        );
    }
}
