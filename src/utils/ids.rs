use crate::binary::WriteStream;
use crate::binary::message::serialize_message_bytes;
use crate::binary::payload::serialize_transaction_payload;
use crate::binary::transaction::serialize_transaction_essence;
use crate::hash::blake2b_256;
use crate::models::{Message, MessageId, TransactionEssence, TransactionId, TransactionPayload};
use crate::Result;

/// Blake2b-256 of the serialized message, nonce included.
pub fn message_id(message: &Message) -> Result<MessageId> {
    Ok(blake2b_256(&serialize_message_bytes(message)?))
}

/// Blake2b-256 of the serialized payload, starting at its type tag.
pub fn transaction_id(transaction: &TransactionPayload) -> Result<TransactionId> {
    let mut stream = WriteStream::new();
    serialize_transaction_payload(&mut stream, transaction)?;
    Ok(blake2b_256(&stream.finish()))
}

/// The digest every input of a transaction signs.
pub fn essence_hash(essence: &TransactionEssence) -> Result<[u8; 32]> {
    let mut stream = WriteStream::new();
    serialize_transaction_essence(&mut stream, essence)?;
    Ok(blake2b_256(&stream.finish()))
}

/// The numeric id of a network, from its name, e.g. `"mainnet"`.
pub fn network_id(name: &str) -> u64 {
    let digest = blake2b_256(name.as_bytes());
    let mut low = [0u8; 8];
    low.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IndexationPayload, Payload};

    fn message(nonce: u64) -> Message {
        Message {
            network_id: network_id("testnet"),
            parents: vec![[1; 32]],
            payload: Some(Payload::Indexation(IndexationPayload {
                index: b"id".to_vec(),
                data: Vec::new(),
            })),
            nonce,
        }
    }

    #[test]
    fn network_id_is_digest_prefix() {
        let digest = blake2b_256(b"mainnet");
        assert_eq!(
            network_id("mainnet").to_le_bytes().as_slice(),
            &digest[..8]
        );
        assert_ne!(network_id("mainnet"), network_id("testnet"));
        assert_eq!(network_id("mainnet"), 11132824894578709914);
    }

    #[test]
    fn message_id_covers_the_nonce() {
        let first = message_id(&message(1)).unwrap();
        assert_eq!(first, message_id(&message(1)).unwrap());
        assert_ne!(first, message_id(&message(2)).unwrap());
    }

    #[test]
    fn message_id_rejects_invalid_messages() {
        let mut invalid = message(1);
        invalid.parents.clear();
        assert!(message_id(&invalid).is_err());
    }
}
