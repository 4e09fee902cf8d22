//! Unlock blocks for transaction inputs.
//!
//! Every input needs an unlock block at the same position. Inputs owned by
//! the same key share one signature: the first of them carries a
//! signature block, the others a reference to it.

use std::collections::HashMap;

use log::debug;

use super::ids::essence_hash;
use crate::models::{Ed25519Signature, Signature, TransactionEssence, UnlockBlock};
use crate::signatures::ed25519::{self, KeyPair};
use crate::{Error, Result};

/// Signs an essence hash with one key pair.
pub fn sign_essence(hash: &[u8; 32], key_pair: &KeyPair) -> Result<Ed25519Signature> {
    Ok(Ed25519Signature {
        public_key: key_pair.public_key,
        signature: ed25519::sign(&key_pair.private_key, hash)?,
    })
}

/// Builds the unlock blocks of `essence`, given the key pair owning each
/// input in input order.
pub fn build_unlock_blocks(
    essence: &TransactionEssence,
    key_pairs: &[KeyPair],
) -> Result<Vec<UnlockBlock>> {
    if key_pairs.len() != essence.inputs.len() {
        return Err(Error::UnlockBlockCount {
            inputs: essence.inputs.len(),
            blocks: key_pairs.len(),
        });
    }

    let hash = essence_hash(essence)?;
    let mut signed: HashMap<[u8; 32], u16> = HashMap::new();
    let mut blocks = Vec::with_capacity(key_pairs.len());

    for (index, key_pair) in key_pairs.iter().enumerate() {
        if let Some(&reference) = signed.get(&key_pair.public_key) {
            blocks.push(UnlockBlock::Reference(reference));
            continue;
        }

        let position = u16::try_from(index).map_err(|_| Error::CountOverflow {
            name: "unlock blocks",
            length: index,
            width: 16,
        })?;
        signed.insert(key_pair.public_key, position);
        blocks.push(UnlockBlock::Signature(Signature::Ed25519(sign_essence(
            &hash, key_pair,
        )?)));
    }

    Ok(blocks)
}

/// Checks the unlock blocks of `essence`.
///
/// Malformed block lists (wrong count, references that do not point back
/// at a signature block) are errors. A signature that does not verify is
/// `Ok(false)`.
pub fn verify_unlock_blocks(essence: &TransactionEssence, blocks: &[UnlockBlock]) -> Result<bool> {
    if blocks.len() != essence.inputs.len() {
        return Err(Error::UnlockBlockCount {
            inputs: essence.inputs.len(),
            blocks: blocks.len(),
        });
    }

    for (index, block) in blocks.iter().enumerate() {
        if let UnlockBlock::Reference(reference) = *block {
            let target = usize::from(reference);
            if target >= index || !matches!(blocks[target], UnlockBlock::Signature(_)) {
                debug!("unlock block {index} references block {reference}");
                return Err(Error::InvalidReference { index, reference });
            }
        }
    }

    let hash = essence_hash(essence)?;
    for block in blocks {
        let UnlockBlock::Signature(Signature::Ed25519(signature)) = block else {
            continue;
        };
        if !ed25519::verify(&signature.public_key, &hash, &signature.signature) {
            debug!("unlock signature rejected");
            return Ok(false);
        }
    }
    Ok(true)
}
