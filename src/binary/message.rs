//! Messages, the outermost wire structure.

use log::debug;

use super::common::{
    BYTE_SIZE, MAX_MESSAGE_LENGTH, MESSAGE_ID_LENGTH, UINT64_SIZE, check_parents, count,
    ensure_remaining,
};
use super::payload::{
    MIN_PAYLOAD_LENGTH, RECEIPT_PAYLOAD_TYPE, TREASURY_TRANSACTION_PAYLOAD_TYPE,
    deserialize_payload, payload_type, serialize_payload,
};
use super::read_stream::ReadStream;
use super::write_stream::WriteStream;
use crate::models::{Message, Payload};
use crate::{Error, Result};

/// Network id, one parent, an empty payload and the nonce.
pub const MIN_MESSAGE_LENGTH: usize =
    UINT64_SIZE + BYTE_SIZE + MESSAGE_ID_LENGTH + MIN_PAYLOAD_LENGTH + UINT64_SIZE;

/// Receipts and treasury transactions only travel inside milestones.
fn check_payload(payload: Option<&Payload>) -> Result<()> {
    let Some(payload) = payload else {
        return Ok(());
    };

    let tag = payload_type(payload);
    if tag == RECEIPT_PAYLOAD_TYPE || tag == TREASURY_TRANSACTION_PAYLOAD_TYPE {
        debug!("message carries payload type {tag}");
        return Err(Error::NotPermitted {
            container: "message",
            kind: "payload",
            tag,
        });
    }
    Ok(())
}

/// Reads a message that must span the rest of the stream.
pub fn deserialize_message(stream: &mut ReadStream<'_>) -> Result<Message> {
    if stream.unused() > MAX_MESSAGE_LENGTH {
        return Err(Error::MessageTooLong {
            length: stream.unused(),
            max: MAX_MESSAGE_LENGTH,
        });
    }
    ensure_remaining(stream, "Message", MIN_MESSAGE_LENGTH)?;

    let network_id = stream.read_u64("message.networkId")?;

    let number_parents = stream.read_byte("message.numParents")?;
    let parents = (0..number_parents)
        .map(|_| stream.read_array("message.parentMessageId"))
        .collect::<Result<Vec<_>>>()?;
    check_parents("message", &parents)?;

    let payload = deserialize_payload(stream)?;
    check_payload(payload.as_ref())?;

    let nonce = stream.read_u64("message.nonce")?;

    let unused = stream.unused();
    if unused != 0 {
        debug!("{unused} bytes after the nonce");
        return Err(Error::UnusedData {
            length: stream.length(),
            unused,
        });
    }

    Ok(Message {
        network_id,
        parents,
        payload,
        nonce,
    })
}

pub fn serialize_message(stream: &mut WriteStream, message: &Message) -> Result<()> {
    check_parents("message", &message.parents)?;
    check_payload(message.payload.as_ref())?;

    let start = stream.write_index();

    stream.write_u64(message.network_id);
    stream.write_byte(count("parents", message.parents.len())?);
    for parent in &message.parents {
        stream.write_fixed(parent);
    }
    serialize_payload(stream, message.payload.as_ref())?;
    stream.write_u64(message.nonce);

    let length = stream.write_index() - start;
    if length > MAX_MESSAGE_LENGTH {
        debug!("message serialized to {length} bytes");
        return Err(Error::MessageTooLong {
            length,
            max: MAX_MESSAGE_LENGTH,
        });
    }
    Ok(())
}

/// Serializes a message into a fresh buffer, ready to hand to a node.
pub fn serialize_message_bytes(message: &Message) -> Result<Vec<u8>> {
    let mut stream = WriteStream::new();
    serialize_message(&mut stream, message)?;
    Ok(stream.finish())
}

/// Deserializes a message from the exact bytes a node returned.
pub fn deserialize_message_bytes(bytes: &[u8]) -> Result<Message> {
    deserialize_message(&mut ReadStream::new(bytes))
}
