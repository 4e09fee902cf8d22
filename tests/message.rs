use iota_core::Error;
use iota_core::address::Ed25519Address;
use iota_core::binary::{deserialize_message_bytes, serialize_message_bytes};
use iota_core::hash::blake2b_256;
use iota_core::keys::{Bip32Path, Ed25519Seed};
use iota_core::models::{
    Address, IndexationPayload, Input, Message, Output, Payload, SigLockedSingleOutput, Signature,
    TransactionEssence, TransactionPayload, UnlockBlock, UtxoInput,
};
use iota_core::signatures::ed25519;
use iota_core::utils::{
    build_unlock_blocks, essence_hash, message_id, network_id, transaction_id, verify_unlock_blocks,
};

fn key_pair(account: u32) -> ed25519::KeyPair {
    let seed = Ed25519Seed::from_bytes(&[0x5e; 32]).expect("32-byte seed");
    let path = Bip32Path::parse(&format!("m/44'/4218'/{account}'/0'/0'")).expect("valid path");
    seed.generate_seed_from_path(&path)
        .key_pair()
        .expect("derived seeds are 32 bytes")
}

fn essence(inputs: usize, receiver: &ed25519::KeyPair) -> TransactionEssence {
    TransactionEssence {
        inputs: (0..inputs as u16)
            .map(|index| {
                Input::Utxo(UtxoInput {
                    transaction_id: [0xab; 32],
                    transaction_output_index: index,
                })
            })
            .collect(),
        outputs: vec![Output::SigLockedSingle(SigLockedSingleOutput {
            address: Ed25519Address::from_public_key(&receiver.public_key).into(),
            amount: 10_000_000,
        })],
        payload: None,
    }
}

#[test]
fn test_sign_and_index_end_to_end() {
    let pair = ed25519::key_pair_from_seed(&[0u8; 32]).expect("32-byte seed");
    let signature = ed25519::sign(&pair.private_key, b"abc").expect("64-byte key");
    assert!(ed25519::verify(&pair.public_key, b"abc", &signature));

    let message = Message {
        network_id: network_id("testnet"),
        parents: vec![[0x11; 32]],
        payload: Some(Payload::Indexation(IndexationPayload {
            index: b"TEST".to_vec(),
            data: b"hello".to_vec(),
        })),
        nonce: 0,
    };

    let bytes = serialize_message_bytes(&message).expect("message should serialize");
    assert_eq!(bytes.len(), 72);
    assert_eq!(deserialize_message_bytes(&bytes), Ok(message.clone()));
    assert_eq!(message_id(&message), Ok(blake2b_256(&bytes)));

    let hex = hex::encode(&bytes);
    assert!(hex.starts_with(&hex::encode(network_id("testnet").to_le_bytes())));
    assert!(hex.ends_with("0000000000000000"), "zero nonce");
}

#[test]
fn test_address_from_derived_key() {
    let pair = key_pair(0);
    let address = Ed25519Address::from_public_key(&pair.public_key);

    assert_eq!(address.to_address(), blake2b_256(&pair.public_key));
    assert!(address.verify(&blake2b_256(&pair.public_key)));
    assert!(!address.verify(&[0; 32]));
    assert_eq!(
        Address::from(address),
        Address::Ed25519(blake2b_256(&pair.public_key))
    );
}

#[test]
fn test_unlock_blocks_share_signatures() {
    let owner = key_pair(0);
    let other = key_pair(1);
    let essence = essence(3, &other);

    let blocks = build_unlock_blocks(&essence, &[owner.clone(), other.clone(), owner.clone()])
        .expect("one key pair per input");

    assert_eq!(blocks.len(), 3);
    let UnlockBlock::Signature(Signature::Ed25519(first)) = blocks[0] else {
        panic!("the first input needs a signature block, got {:?}", blocks[0]);
    };
    assert_eq!(first.public_key, owner.public_key);
    assert!(matches!(blocks[1], UnlockBlock::Signature(_)));
    assert_eq!(blocks[2], UnlockBlock::Reference(0));

    let hash = essence_hash(&essence).expect("valid essence");
    assert!(ed25519::verify(&owner.public_key, &hash, &first.signature));
    assert_eq!(verify_unlock_blocks(&essence, &blocks), Ok(true));
}

#[test]
fn test_tampered_unlock_block_fails_verification() {
    let owner = key_pair(2);
    let essence = essence(2, &owner);
    let mut blocks = build_unlock_blocks(&essence, &[owner.clone(), owner.clone()])
        .expect("one key pair per input");

    if let UnlockBlock::Signature(Signature::Ed25519(signature)) = &mut blocks[0] {
        signature.signature[0] ^= 1;
    }
    assert_eq!(verify_unlock_blocks(&essence, &blocks), Ok(false));
}

#[test]
fn test_unlock_block_structure_errors() {
    let owner = key_pair(3);
    let essence = essence(2, &owner);

    assert_eq!(
        build_unlock_blocks(&essence, &[owner.clone()]),
        Err(Error::UnlockBlockCount {
            inputs: 2,
            blocks: 1
        })
    );

    let blocks = build_unlock_blocks(&essence, &[owner.clone(), owner.clone()])
        .expect("one key pair per input");
    assert_eq!(
        verify_unlock_blocks(&essence, &blocks[..1]),
        Err(Error::UnlockBlockCount {
            inputs: 2,
            blocks: 1
        })
    );

    let forward = [UnlockBlock::Reference(1), blocks[0]];
    assert_eq!(
        verify_unlock_blocks(&essence, &forward),
        Err(Error::InvalidReference {
            index: 0,
            reference: 1
        })
    );

    let chained = [blocks[0], UnlockBlock::Reference(1)];
    assert_eq!(
        verify_unlock_blocks(&essence, &chained),
        Err(Error::InvalidReference {
            index: 1,
            reference: 1
        })
    );
}

#[test]
fn test_signed_transaction_message() {
    let owner = key_pair(4);
    let essence = essence(1, &owner);
    let unlock_blocks = build_unlock_blocks(&essence, &[owner]).expect("one key pair per input");
    let transaction = TransactionPayload {
        essence,
        unlock_blocks,
    };

    let message = Message {
        network_id: network_id("mainnet"),
        parents: vec![[1; 32], [2; 32]],
        payload: Some(Payload::Transaction(Box::new(transaction.clone()))),
        nonce: 99,
    };

    let bytes = serialize_message_bytes(&message).expect("message should serialize");
    let decoded = deserialize_message_bytes(&bytes).expect("message should deserialize");
    assert_eq!(decoded, message);

    let Some(Payload::Transaction(decoded)) = decoded.payload else {
        panic!("expected a transaction payload");
    };
    assert_eq!(verify_unlock_blocks(&decoded.essence, &decoded.unlock_blocks), Ok(true));

    let id = transaction_id(&transaction).expect("valid transaction");
    assert_eq!(id, transaction_id(&decoded).expect("valid transaction"));
    assert_ne!(id, message_id(&message).expect("valid message"));
}
