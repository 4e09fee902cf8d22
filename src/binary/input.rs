use super::common::{
    MILESTONE_ID_LENGTH, SMALL_TYPE_LENGTH, TRANSACTION_ID_LENGTH, UINT16_SIZE, count,
    ensure_count, ensure_remaining, expect_small_type,
};
use super::read_stream::ReadStream;
use super::write_stream::WriteStream;
use crate::models::{Input, TreasuryInput, UtxoInput};
use crate::{Error, Result};

pub const UTXO_INPUT_TYPE: u8 = 0;
pub const TREASURY_INPUT_TYPE: u8 = 1;

pub const MIN_INPUT_LENGTH: usize = SMALL_TYPE_LENGTH;
pub const MIN_UTXO_INPUT_LENGTH: usize = MIN_INPUT_LENGTH + TRANSACTION_ID_LENGTH + UINT16_SIZE;
pub const MIN_TREASURY_INPUT_LENGTH: usize = MIN_INPUT_LENGTH + MILESTONE_ID_LENGTH;

pub const MIN_INPUT_COUNT: usize = 1;
pub const MAX_INPUT_COUNT: usize = 127;

/// Reads a `u16` count followed by that many inputs.
pub fn deserialize_inputs(stream: &mut ReadStream<'_>) -> Result<Vec<Input>> {
    let number = usize::from(stream.read_u16("inputs.numInputs")?);
    ensure_count("inputs", number, MIN_INPUT_COUNT, MAX_INPUT_COUNT)?;

    (0..number).map(|_| deserialize_input(stream)).collect()
}

pub fn serialize_inputs(stream: &mut WriteStream, inputs: &[Input]) -> Result<()> {
    ensure_count("inputs", inputs.len(), MIN_INPUT_COUNT, MAX_INPUT_COUNT)?;

    stream.write_u16(count("inputs", inputs.len())?);
    for input in inputs {
        serialize_input(stream, input)?;
    }
    Ok(())
}

pub fn deserialize_input(stream: &mut ReadStream<'_>) -> Result<Input> {
    ensure_remaining(stream, "Input", MIN_INPUT_LENGTH)?;

    match stream.peek_byte("input.type")? {
        UTXO_INPUT_TYPE => deserialize_utxo_input(stream).map(Input::Utxo),
        TREASURY_INPUT_TYPE => deserialize_treasury_input(stream).map(Input::Treasury),
        tag => Err(Error::UnrecognizedType {
            kind: "input",
            tag: tag.into(),
        }),
    }
}

pub fn serialize_input(stream: &mut WriteStream, input: &Input) -> Result<()> {
    match input {
        Input::Utxo(utxo) => serialize_utxo_input(stream, utxo),
        Input::Treasury(treasury) => serialize_treasury_input(stream, treasury),
    }
}

pub fn deserialize_utxo_input(stream: &mut ReadStream<'_>) -> Result<UtxoInput> {
    ensure_remaining(stream, "UTXO Input", MIN_UTXO_INPUT_LENGTH)?;

    expect_small_type(stream, "utxoInput", UTXO_INPUT_TYPE)?;

    Ok(UtxoInput {
        transaction_id: stream.read_array("utxoInput.transactionId")?,
        transaction_output_index: stream.read_u16("utxoInput.transactionOutputIndex")?,
    })
}

pub fn serialize_utxo_input(stream: &mut WriteStream, input: &UtxoInput) -> Result<()> {
    stream.write_byte(UTXO_INPUT_TYPE);
    stream.write_fixed(&input.transaction_id);
    stream.write_u16(input.transaction_output_index);
    Ok(())
}

pub fn deserialize_treasury_input(stream: &mut ReadStream<'_>) -> Result<TreasuryInput> {
    ensure_remaining(stream, "Treasury Input", MIN_TREASURY_INPUT_LENGTH)?;

    expect_small_type(stream, "treasuryInput", TREASURY_INPUT_TYPE)?;

    Ok(TreasuryInput {
        milestone_id: stream.read_array("treasuryInput.milestoneId")?,
    })
}

pub fn serialize_treasury_input(stream: &mut WriteStream, input: &TreasuryInput) -> Result<()> {
    stream.write_byte(TREASURY_INPUT_TYPE);
    stream.write_fixed(&input.milestone_id);
    Ok(())
}
