use super::address::{MIN_ED25519_ADDRESS_LENGTH, deserialize_address, serialize_address};
use super::common::{
    SMALL_TYPE_LENGTH, UINT64_SIZE, count, ensure_count, ensure_remaining, expect_small_type,
};
use super::read_stream::ReadStream;
use super::write_stream::WriteStream;
use crate::models::{
    Output, SigLockedDustAllowanceOutput, SigLockedSingleOutput, TreasuryOutput,
};
use crate::{Error, Result};

pub const SIG_LOCKED_SINGLE_OUTPUT_TYPE: u8 = 0;
pub const SIG_LOCKED_DUST_ALLOWANCE_OUTPUT_TYPE: u8 = 1;
pub const TREASURY_OUTPUT_TYPE: u8 = 2;

pub const MIN_OUTPUT_LENGTH: usize = SMALL_TYPE_LENGTH;
pub const MIN_SIG_LOCKED_SINGLE_OUTPUT_LENGTH: usize =
    MIN_OUTPUT_LENGTH + MIN_ED25519_ADDRESS_LENGTH + UINT64_SIZE;
pub const MIN_SIG_LOCKED_DUST_ALLOWANCE_OUTPUT_LENGTH: usize =
    MIN_OUTPUT_LENGTH + MIN_ED25519_ADDRESS_LENGTH + UINT64_SIZE;
pub const MIN_TREASURY_OUTPUT_LENGTH: usize = MIN_OUTPUT_LENGTH + UINT64_SIZE;

pub const MIN_OUTPUT_COUNT: usize = 1;
pub const MAX_OUTPUT_COUNT: usize = 127;

/// Reads a `u16` count followed by that many outputs.
pub fn deserialize_outputs(stream: &mut ReadStream<'_>) -> Result<Vec<Output>> {
    let number = usize::from(stream.read_u16("outputs.numOutputs")?);
    ensure_count("outputs", number, MIN_OUTPUT_COUNT, MAX_OUTPUT_COUNT)?;

    (0..number).map(|_| deserialize_output(stream)).collect()
}

pub fn serialize_outputs(stream: &mut WriteStream, outputs: &[Output]) -> Result<()> {
    ensure_count("outputs", outputs.len(), MIN_OUTPUT_COUNT, MAX_OUTPUT_COUNT)?;

    stream.write_u16(count("outputs", outputs.len())?);
    for output in outputs {
        serialize_output(stream, output)?;
    }
    Ok(())
}

pub fn deserialize_output(stream: &mut ReadStream<'_>) -> Result<Output> {
    ensure_remaining(stream, "Output", MIN_OUTPUT_LENGTH)?;

    match stream.peek_byte("output.type")? {
        SIG_LOCKED_SINGLE_OUTPUT_TYPE => {
            deserialize_sig_locked_single_output(stream).map(Output::SigLockedSingle)
        }
        SIG_LOCKED_DUST_ALLOWANCE_OUTPUT_TYPE => {
            deserialize_sig_locked_dust_allowance_output(stream).map(Output::SigLockedDustAllowance)
        }
        TREASURY_OUTPUT_TYPE => deserialize_treasury_output(stream).map(Output::Treasury),
        tag => Err(Error::UnrecognizedType {
            kind: "output",
            tag: tag.into(),
        }),
    }
}

pub fn serialize_output(stream: &mut WriteStream, output: &Output) -> Result<()> {
    match output {
        Output::SigLockedSingle(single) => serialize_sig_locked_single_output(stream, single),
        Output::SigLockedDustAllowance(dust) => {
            serialize_sig_locked_dust_allowance_output(stream, dust)
        }
        Output::Treasury(treasury) => serialize_treasury_output(stream, treasury),
    }
}

pub fn deserialize_sig_locked_single_output(
    stream: &mut ReadStream<'_>,
) -> Result<SigLockedSingleOutput> {
    ensure_remaining(
        stream,
        "Signature Locked Single Output",
        MIN_SIG_LOCKED_SINGLE_OUTPUT_LENGTH,
    )?;
    expect_small_type(stream, "sigLockedSingleOutput", SIG_LOCKED_SINGLE_OUTPUT_TYPE)?;

    Ok(SigLockedSingleOutput {
        address: deserialize_address(stream)?,
        amount: stream.read_u64("sigLockedSingleOutput.amount")?,
    })
}

pub fn serialize_sig_locked_single_output(
    stream: &mut WriteStream,
    output: &SigLockedSingleOutput,
) -> Result<()> {
    stream.write_byte(SIG_LOCKED_SINGLE_OUTPUT_TYPE);
    serialize_address(stream, &output.address)?;
    stream.write_u64(output.amount);
    Ok(())
}

pub fn deserialize_sig_locked_dust_allowance_output(
    stream: &mut ReadStream<'_>,
) -> Result<SigLockedDustAllowanceOutput> {
    ensure_remaining(
        stream,
        "Signature Locked Dust Allowance Output",
        MIN_SIG_LOCKED_DUST_ALLOWANCE_OUTPUT_LENGTH,
    )?;
    expect_small_type(
        stream,
        "sigLockedDustAllowanceOutput",
        SIG_LOCKED_DUST_ALLOWANCE_OUTPUT_TYPE,
    )?;

    Ok(SigLockedDustAllowanceOutput {
        address: deserialize_address(stream)?,
        amount: stream.read_u64("sigLockedDustAllowanceOutput.amount")?,
    })
}

pub fn serialize_sig_locked_dust_allowance_output(
    stream: &mut WriteStream,
    output: &SigLockedDustAllowanceOutput,
) -> Result<()> {
    stream.write_byte(SIG_LOCKED_DUST_ALLOWANCE_OUTPUT_TYPE);
    serialize_address(stream, &output.address)?;
    stream.write_u64(output.amount);
    Ok(())
}

pub fn deserialize_treasury_output(stream: &mut ReadStream<'_>) -> Result<TreasuryOutput> {
    ensure_remaining(stream, "Treasury Output", MIN_TREASURY_OUTPUT_LENGTH)?;
    expect_small_type(stream, "treasuryOutput", TREASURY_OUTPUT_TYPE)?;

    Ok(TreasuryOutput {
        amount: stream.read_u64("treasuryOutput.amount")?,
    })
}

pub fn serialize_treasury_output(stream: &mut WriteStream, output: &TreasuryOutput) -> Result<()> {
    stream.write_byte(TREASURY_OUTPUT_TYPE);
    stream.write_u64(output.amount);
    Ok(())
}
