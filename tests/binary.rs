use iota_core::Error;
use iota_core::binary::payload::{
    MIN_MILESTONE_PAYLOAD_LENGTH, MIN_TRANSACTION_PAYLOAD_LENGTH, deserialize_milestone_payload,
    deserialize_receipt_payload, serialize_milestone_payload, serialize_receipt_payload,
};
use iota_core::binary::unlock_block::{deserialize_unlock_blocks, serialize_unlock_blocks};
use iota_core::binary::{
    ReadStream, WriteStream, deserialize_address, deserialize_message_bytes, deserialize_output,
    deserialize_payload, deserialize_transaction_essence, deserialize_unlock_block,
    serialize_message_bytes, serialize_output, serialize_payload, serialize_transaction_essence,
    serialize_unlock_block,
};
use iota_core::binary::address::deserialize_ed25519_address;
use iota_core::binary::input::serialize_inputs;
use iota_core::binary::output::serialize_outputs;
use iota_core::models::{
    Address, Ed25519Signature, IndexationPayload, Input, Message, MigratedFunds, MilestonePayload,
    Output, Payload, ReceiptPayload, SigLockedDustAllowanceOutput, SigLockedSingleOutput,
    Signature, TransactionEssence, TransactionPayload, TreasuryInput, TreasuryOutput,
    TreasuryTransactionPayload, UnlockBlock, UtxoInput,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn utxo(byte: u8, index: u16) -> Input {
    Input::Utxo(UtxoInput {
        transaction_id: [byte; 32],
        transaction_output_index: index,
    })
}

fn single(byte: u8, amount: u64) -> Output {
    Output::SigLockedSingle(SigLockedSingleOutput {
        address: Address::Ed25519([byte; 32]),
        amount,
    })
}

fn essence() -> TransactionEssence {
    TransactionEssence {
        inputs: vec![utxo(1, 0), utxo(2, 3)],
        outputs: vec![
            single(3, 1_000_000),
            Output::SigLockedDustAllowance(SigLockedDustAllowanceOutput {
                address: Address::Ed25519([4; 32]),
                amount: 1_000_000,
            }),
        ],
        payload: Some(IndexationPayload {
            index: b"spend".to_vec(),
            data: vec![1, 2, 3],
        }),
    }
}

fn signature_block(byte: u8) -> UnlockBlock {
    UnlockBlock::Signature(Signature::Ed25519(Ed25519Signature {
        public_key: [byte; 32],
        signature: [byte; 64],
    }))
}

fn treasury_transaction() -> TreasuryTransactionPayload {
    TreasuryTransactionPayload {
        input: TreasuryInput {
            milestone_id: [9; 32],
        },
        output: TreasuryOutput { amount: 2_779_530_283 },
    }
}

fn receipt() -> ReceiptPayload {
    ReceiptPayload {
        migrated_at: 1000,
        last: true,
        funds: vec![MigratedFunds {
            tail_transaction_hash: [7; 49],
            address: Address::Ed25519([8; 32]),
            deposit: 5_000_000,
        }],
        transaction: treasury_transaction(),
    }
}

fn milestone(receipt: Option<ReceiptPayload>) -> MilestonePayload {
    MilestonePayload {
        index: 42,
        timestamp: 1_620_000_000,
        parents: vec![[1; 32], [2; 32]],
        inclusion_merkle_proof: [3; 32],
        next_pow_score: 100,
        next_pow_score_milestone_index: 50,
        public_keys: vec![[4; 32], [5; 32]],
        receipt,
        signatures: vec![[6; 64], [7; 64]],
    }
}

fn message(payload: Option<Payload>) -> Message {
    Message {
        network_id: 6530425480034647824,
        parents: vec![[0x10; 32], [0x20; 32]],
        payload,
        nonce: 12345,
    }
}

fn round_trip(message: &Message) -> Message {
    let bytes = serialize_message_bytes(message).expect("message should serialize");
    deserialize_message_bytes(&bytes).expect("message should deserialize")
}

#[test]
fn test_transaction_message_round_trip() {
    let transaction = TransactionPayload {
        essence: essence(),
        unlock_blocks: vec![signature_block(1), UnlockBlock::Reference(0)],
    };
    let message = message(Some(Payload::Transaction(Box::new(transaction))));

    assert_eq!(round_trip(&message), message);
}

#[test]
fn test_milestone_message_round_trip() {
    let without = message(Some(Payload::Milestone(Box::new(milestone(None)))));
    assert_eq!(round_trip(&without), without);

    let with = message(Some(Payload::Milestone(Box::new(milestone(Some(receipt()))))));
    assert_eq!(round_trip(&with), with);
}

#[test]
fn test_indexation_message_layout() {
    let message = Message {
        network_id: 1,
        parents: vec![[0xaa; 32]],
        payload: Some(Payload::Indexation(IndexationPayload {
            index: b"TEST".to_vec(),
            data: b"hello".to_vec(),
        })),
        nonce: 2,
    };

    let bytes = serialize_message_bytes(&message).expect("message should serialize");
    assert_eq!(bytes.len(), 72);
    assert_eq!(&bytes[..8], &1u64.to_le_bytes());
    assert_eq!(bytes[8], 1, "parent count");
    assert_eq!(&bytes[41..45], &19u32.to_le_bytes(), "payload length");
    assert_eq!(&bytes[45..49], &2u32.to_le_bytes(), "payload type");
    assert_eq!(&bytes[49..51], &4u16.to_le_bytes(), "index length");
    assert_eq!(&bytes[51..55], b"TEST");
    assert_eq!(&bytes[55..59], &5u32.to_le_bytes(), "data length");
    assert_eq!(&bytes[59..64], b"hello");
    assert_eq!(&bytes[64..], &2u64.to_le_bytes());

    assert_eq!(deserialize_message_bytes(&bytes), Ok(message));
}

#[test]
fn test_message_without_payload() {
    let message = message(None);
    let bytes = serialize_message_bytes(&message).expect("message should serialize");

    assert_eq!(bytes.len(), 8 + 1 + 2 * 32 + 4 + 8);
    assert_eq!(deserialize_message_bytes(&bytes), Ok(message));
}

#[test]
fn test_truncated_message_is_rejected() {
    init_logging();

    let message = message(Some(Payload::Indexation(IndexationPayload {
        index: b"key".to_vec(),
        data: vec![0; 10],
    })));
    let bytes = serialize_message_bytes(&message).expect("message should serialize");

    for length in 0..bytes.len() {
        assert!(
            deserialize_message_bytes(&bytes[..length]).is_err(),
            "prefix of {length} bytes should not decode"
        );
    }
}

#[test]
fn test_unused_data_is_rejected() {
    let mut bytes = serialize_message_bytes(&message(None)).expect("message should serialize");
    bytes.push(0);

    assert_eq!(
        deserialize_message_bytes(&bytes),
        Err(Error::UnusedData {
            length: bytes.len(),
            unused: 1
        })
    );
}

#[test]
fn test_oversized_message_is_rejected() {
    let bytes = vec![0u8; 32769];
    assert_eq!(
        deserialize_message_bytes(&bytes),
        Err(Error::MessageTooLong {
            length: 32769,
            max: 32768
        })
    );

    let message = message(Some(Payload::Indexation(IndexationPayload {
        index: b"big".to_vec(),
        data: vec![0; 32768],
    })));
    assert!(matches!(
        serialize_message_bytes(&message),
        Err(Error::MessageTooLong { max: 32768, .. })
    ));
}

#[test]
fn test_parent_bounds() {
    let mut message = message(None);

    message.parents = Vec::new();
    assert_eq!(
        serialize_message_bytes(&message),
        Err(Error::TooFew {
            item: "parents",
            min: 1,
            actual: 0
        })
    );

    message.parents = (0..9u8).map(|i| [i; 32]).collect();
    assert_eq!(
        serialize_message_bytes(&message),
        Err(Error::TooMany {
            item: "parents",
            max: 8,
            actual: 9
        })
    );

    message.parents = vec![[2; 32], [1; 32]];
    assert_eq!(
        serialize_message_bytes(&message),
        Err(Error::ParentsNotSorted { kind: "message" })
    );
}

#[test]
fn test_duplicate_milestone_parents() {
    init_logging();

    let mut duplicate = milestone(None);
    duplicate.parents = vec![[1; 32], [1; 32]];

    let mut stream = WriteStream::new();
    assert_eq!(
        serialize_milestone_payload(&mut stream, &duplicate),
        Err(Error::ParentsNotUnique { kind: "milestone" })
    );

    // Bypass the writer's check by patching a valid encoding: the second
    // parent starts after type, index, timestamp, count and the first one.
    let mut stream = WriteStream::new();
    serialize_milestone_payload(&mut stream, &milestone(None)).expect("valid milestone");
    let mut bytes = stream.finish();
    let second = 4 + 4 + 8 + 1 + 32;
    bytes[second..second + 32].fill(1);

    assert_eq!(
        deserialize_milestone_payload(&mut ReadStream::new(&bytes)),
        Err(Error::ParentsNotUnique { kind: "milestone" })
    );
}

#[test]
fn test_input_count_bounds() {
    let mut essence = essence();
    essence.inputs.clear();

    let mut stream = WriteStream::new();
    assert_eq!(
        serialize_transaction_essence(&mut stream, &essence),
        Err(Error::TooFew {
            item: "inputs",
            min: 1,
            actual: 0
        })
    );

    essence.inputs = (0..128u16).map(|i| utxo(1, i)).collect();
    let mut stream = WriteStream::new();
    assert_eq!(
        serialize_transaction_essence(&mut stream, &essence),
        Err(Error::TooMany {
            item: "inputs",
            max: 127,
            actual: 128
        })
    );
}

#[test]
fn test_essence_nesting_rules() {
    let mut essence = essence();
    essence.inputs.push(Input::Treasury(TreasuryInput {
        milestone_id: [0; 32],
    }));

    let mut stream = WriteStream::new();
    assert_eq!(
        serialize_transaction_essence(&mut stream, &essence),
        Err(Error::NotPermitted {
            container: "transaction essence",
            kind: "input",
            tag: 1
        })
    );

    let mut essence = self::essence();
    essence.outputs.push(Output::Treasury(TreasuryOutput { amount: 1 }));
    let mut stream = WriteStream::new();
    assert_eq!(
        serialize_transaction_essence(&mut stream, &essence),
        Err(Error::NotPermitted {
            container: "transaction essence",
            kind: "output",
            tag: 2
        })
    );
}

#[test]
fn test_essence_rejects_foreign_payload() {
    let essence = essence();

    let mut stream = WriteStream::new();
    stream.write_byte(0);
    serialize_inputs(&mut stream, &essence.inputs).expect("valid inputs");
    serialize_outputs(&mut stream, &essence.outputs).expect("valid outputs");
    serialize_payload(
        &mut stream,
        Some(&Payload::TreasuryTransaction(treasury_transaction())),
    )
    .expect("valid payload");
    let bytes = stream.finish();

    assert_eq!(
        deserialize_transaction_essence(&mut ReadStream::new(&bytes)),
        Err(Error::NotPermitted {
            container: "transaction essence",
            kind: "payload",
            tag: 4
        })
    );
}

#[test]
fn test_receipt_round_trip() {
    let receipt = receipt();

    let mut stream = WriteStream::new();
    serialize_receipt_payload(&mut stream, &receipt).expect("valid receipt");
    let bytes = stream.finish();

    assert_eq!(
        deserialize_receipt_payload(&mut ReadStream::new(&bytes)),
        Ok(receipt)
    );
}

#[test]
fn test_message_rejects_milestone_only_payloads() {
    init_logging();

    for payload in [
        Payload::Receipt(Box::new(receipt())),
        Payload::TreasuryTransaction(treasury_transaction()),
    ] {
        let message = message(Some(payload.clone()));
        assert!(
            matches!(
                serialize_message_bytes(&message),
                Err(Error::NotPermitted {
                    container: "message",
                    ..
                })
            ),
            "serializing {payload:?}"
        );

        let mut stream = WriteStream::new();
        stream.write_u64(message.network_id);
        stream.write_byte(1);
        stream.write_fixed(&[0x10; 32]);
        serialize_payload(&mut stream, Some(&payload)).expect("valid payload");
        stream.write_u64(message.nonce);

        assert!(
            matches!(
                deserialize_message_bytes(&stream.finish()),
                Err(Error::NotPermitted {
                    container: "message",
                    ..
                })
            ),
            "deserializing {payload:?}"
        );
    }
}

#[test]
fn test_unknown_payload_type() {
    let mut stream = WriteStream::new();
    stream.write_u32(8);
    stream.write_u32(99);
    stream.write_u32(0);
    let bytes = stream.finish();

    assert_eq!(
        deserialize_payload(&mut ReadStream::new(&bytes)),
        Err(Error::UnrecognizedType {
            kind: "payload",
            tag: 99
        })
    );
}

#[test]
fn test_address_tags() {
    let mut bytes = vec![5u8];
    bytes.extend_from_slice(&[0; 32]);

    assert_eq!(
        deserialize_address(&mut ReadStream::new(&bytes)),
        Err(Error::UnrecognizedType {
            kind: "address",
            tag: 5
        })
    );
    assert_eq!(
        deserialize_ed25519_address(&mut ReadStream::new(&bytes)),
        Err(Error::TypeMismatch {
            kind: "ed25519Address",
            tag: 5
        })
    );
}

#[test]
fn test_output_and_unlock_block_round_trip() {
    let outputs = [
        single(1, 1),
        Output::SigLockedDustAllowance(SigLockedDustAllowanceOutput {
            address: Address::Ed25519([2; 32]),
            amount: u64::MAX,
        }),
        Output::Treasury(TreasuryOutput { amount: 3 }),
    ];
    for output in outputs {
        let mut stream = WriteStream::new();
        serialize_output(&mut stream, &output).expect("valid output");
        let bytes = stream.finish();
        assert_eq!(deserialize_output(&mut ReadStream::new(&bytes)), Ok(output));
    }

    for block in [signature_block(5), UnlockBlock::Reference(7)] {
        let mut stream = WriteStream::new();
        serialize_unlock_block(&mut stream, &block).expect("valid block");
        let bytes = stream.finish();
        assert_eq!(deserialize_unlock_block(&mut ReadStream::new(&bytes)), Ok(block));
    }
}

#[test]
fn test_short_data_names_the_structure() {
    let bytes = [0u8; 20];
    assert_eq!(
        deserialize_transaction_essence(&mut ReadStream::new(&bytes)),
        Err(Error::TooShort {
            kind: "Transaction essence",
            length: 20,
            min: 86
        })
    );
}

fn minimal_milestone() -> MilestonePayload {
    MilestonePayload {
        parents: vec![[1; 32]],
        public_keys: vec![[4; 32]],
        signatures: vec![[6; 64]],
        ..milestone(None)
    }
}

fn minimal_essence() -> TransactionEssence {
    TransactionEssence {
        inputs: vec![utxo(1, 0)],
        outputs: vec![single(3, 1)],
        payload: None,
    }
}

fn migrated_funds(count: usize) -> Vec<MigratedFunds> {
    (0..count)
        .map(|i| MigratedFunds {
            tail_transaction_hash: [i as u8; 49],
            address: Address::Ed25519([8; 32]),
            deposit: 1_000_000,
        })
        .collect()
}

#[test]
fn test_smallest_payloads_round_trip() {
    let framing = 8 + 1 + 2 * 32 + 4 + 8;

    let milestone = message(Some(Payload::Milestone(Box::new(minimal_milestone()))));
    let bytes = serialize_message_bytes(&milestone).expect("message should serialize");
    assert_eq!(bytes.len(), framing + MIN_MILESTONE_PAYLOAD_LENGTH);
    assert_eq!(deserialize_message_bytes(&bytes), Ok(milestone));

    let transaction = message(Some(Payload::Transaction(Box::new(TransactionPayload {
        essence: minimal_essence(),
        unlock_blocks: vec![UnlockBlock::Reference(0)],
    }))));
    let bytes = serialize_message_bytes(&transaction).expect("message should serialize");
    assert_eq!(bytes.len(), framing + MIN_TRANSACTION_PAYLOAD_LENGTH);
    assert_eq!(deserialize_message_bytes(&bytes), Ok(transaction));
}

#[test]
fn test_milestone_needs_keys_and_signatures() {
    init_logging();

    let mut milestone = minimal_milestone();
    milestone.public_keys.clear();
    assert_eq!(
        serialize_message_bytes(&message(Some(Payload::Milestone(Box::new(milestone))))),
        Err(Error::TooFew {
            item: "public keys",
            min: 1,
            actual: 0
        })
    );

    let mut milestone = minimal_milestone();
    milestone.signatures.clear();
    assert_eq!(
        serialize_message_bytes(&message(Some(Payload::Milestone(Box::new(milestone))))),
        Err(Error::TooFew {
            item: "signatures",
            min: 1,
            actual: 0
        })
    );

    // The key count follows type, index, timestamp, one parent, the
    // merkle proof and both PoW fields.
    let mut stream = WriteStream::new();
    serialize_milestone_payload(&mut stream, &minimal_milestone()).expect("valid milestone");
    let mut bytes = stream.finish();
    let key_count = 4 + 4 + 8 + 1 + 32 + 32 + 4 + 4;
    assert_eq!(bytes[key_count], 1);
    bytes[key_count] = 0;

    assert_eq!(
        deserialize_milestone_payload(&mut ReadStream::new(&bytes)),
        Err(Error::TooFew {
            item: "public keys",
            min: 1,
            actual: 0
        })
    );
}

#[test]
fn test_transaction_needs_unlock_blocks() {
    let transaction = TransactionPayload {
        essence: minimal_essence(),
        unlock_blocks: Vec::new(),
    };
    assert_eq!(
        serialize_message_bytes(&message(Some(Payload::Transaction(Box::new(transaction))))),
        Err(Error::TooFew {
            item: "unlock blocks",
            min: 1,
            actual: 0
        })
    );

    assert_eq!(
        deserialize_unlock_blocks(&mut ReadStream::new(&[0, 0])),
        Err(Error::TooFew {
            item: "unlock blocks",
            min: 1,
            actual: 0
        })
    );

    let blocks = vec![UnlockBlock::Reference(0); 128];
    let mut stream = WriteStream::new();
    assert_eq!(
        serialize_unlock_blocks(&mut stream, &blocks),
        Err(Error::TooMany {
            item: "unlock blocks",
            max: 127,
            actual: 128
        })
    );
}

#[test]
fn test_funds_count_bound() {
    init_logging();

    let mut receipt = receipt();
    receipt.funds = migrated_funds(128);
    let mut stream = WriteStream::new();
    assert_eq!(
        serialize_receipt_payload(&mut stream, &receipt),
        Err(Error::TooMany {
            item: "funds",
            max: 127,
            actual: 128
        })
    );

    receipt.funds = migrated_funds(127);
    let mut stream = WriteStream::new();
    serialize_receipt_payload(&mut stream, &receipt).expect("127 funds are allowed");
    let mut bytes = stream.finish();
    assert_eq!(
        deserialize_receipt_payload(&mut ReadStream::new(&bytes)),
        Ok(receipt)
    );

    // The count follows type, migratedAt and the final flag.
    assert_eq!(&bytes[9..11], &127u16.to_le_bytes());
    bytes[9..11].copy_from_slice(&128u16.to_le_bytes());
    assert_eq!(
        deserialize_receipt_payload(&mut ReadStream::new(&bytes)),
        Err(Error::TooMany {
            item: "funds",
            max: 127,
            actual: 128
        })
    );
}
