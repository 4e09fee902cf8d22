//! The transaction essence, the part of a transaction that gets signed.

use super::common::{SMALL_TYPE_LENGTH, UINT16_SIZE, UINT32_SIZE, ensure_remaining, expect_small_type};
use super::input::{MIN_UTXO_INPUT_LENGTH, TREASURY_INPUT_TYPE, deserialize_inputs, serialize_inputs};
use super::output::{
    MIN_SIG_LOCKED_SINGLE_OUTPUT_LENGTH, TREASURY_OUTPUT_TYPE, deserialize_outputs,
    serialize_outputs,
};
use super::payload::{
    deserialize_payload, payload_type, serialize_framed, serialize_indexation_payload,
};
use super::read_stream::ReadStream;
use super::write_stream::WriteStream;
use crate::models::{Input, Output, Payload, TransactionEssence};
use crate::{Error, Result};

pub const TRANSACTION_ESSENCE_TYPE: u8 = 0;

/// Tag, one UTXO input, one output and an empty payload.
pub const MIN_TRANSACTION_ESSENCE_LENGTH: usize = SMALL_TYPE_LENGTH
    + UINT16_SIZE
    + MIN_UTXO_INPUT_LENGTH
    + UINT16_SIZE
    + MIN_SIG_LOCKED_SINGLE_OUTPUT_LENGTH
    + UINT32_SIZE;

const CONTAINER: &str = "transaction essence";

fn check_inputs(inputs: &[Input]) -> Result<()> {
    match inputs.iter().find(|input| !matches!(input, Input::Utxo(_))) {
        Some(_) => Err(Error::NotPermitted {
            container: CONTAINER,
            kind: "input",
            tag: TREASURY_INPUT_TYPE.into(),
        }),
        None => Ok(()),
    }
}

fn check_outputs(outputs: &[Output]) -> Result<()> {
    match outputs.iter().find(|output| matches!(output, Output::Treasury(_))) {
        Some(_) => Err(Error::NotPermitted {
            container: CONTAINER,
            kind: "output",
            tag: TREASURY_OUTPUT_TYPE.into(),
        }),
        None => Ok(()),
    }
}

pub fn deserialize_transaction_essence(stream: &mut ReadStream<'_>) -> Result<TransactionEssence> {
    ensure_remaining(stream, "Transaction essence", MIN_TRANSACTION_ESSENCE_LENGTH)?;
    expect_small_type(stream, "transactionEssence", TRANSACTION_ESSENCE_TYPE)?;

    let inputs = deserialize_inputs(stream)?;
    check_inputs(&inputs)?;

    let outputs = deserialize_outputs(stream)?;
    check_outputs(&outputs)?;

    let payload = match deserialize_payload(stream)? {
        None => None,
        Some(Payload::Indexation(indexation)) => Some(indexation),
        Some(other) => {
            return Err(Error::NotPermitted {
                container: CONTAINER,
                kind: "payload",
                tag: payload_type(&other),
            });
        }
    };

    Ok(TransactionEssence {
        inputs,
        outputs,
        payload,
    })
}

pub fn serialize_transaction_essence(
    stream: &mut WriteStream,
    essence: &TransactionEssence,
) -> Result<()> {
    check_inputs(&essence.inputs)?;
    check_outputs(&essence.outputs)?;

    stream.write_byte(TRANSACTION_ESSENCE_TYPE);
    serialize_inputs(stream, &essence.inputs)?;
    serialize_outputs(stream, &essence.outputs)?;
    serialize_framed(stream, |stream| match &essence.payload {
        Some(indexation) => serialize_indexation_payload(stream, indexation),
        None => Ok(()),
    })
}
