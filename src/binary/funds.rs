use super::address::{MIN_ED25519_ADDRESS_LENGTH, deserialize_address, serialize_address};
use super::common::{UINT64_SIZE, count, ensure_count, ensure_remaining};
use super::read_stream::ReadStream;
use super::write_stream::WriteStream;
use crate::models::MigratedFunds;
use crate::Result;

/// Length of a legacy tail transaction hash.
pub const TAIL_HASH_LENGTH: usize = 49;

pub const MIN_MIGRATED_FUNDS_LENGTH: usize =
    TAIL_HASH_LENGTH + MIN_ED25519_ADDRESS_LENGTH + UINT64_SIZE;

pub const MAX_FUNDS_COUNT: usize = 127;

pub fn deserialize_funds(stream: &mut ReadStream<'_>) -> Result<Vec<MigratedFunds>> {
    let number = usize::from(stream.read_u16("funds.numFunds")?);
    ensure_count("funds", number, 0, MAX_FUNDS_COUNT)?;

    (0..number).map(|_| deserialize_migrated_funds(stream)).collect()
}

pub fn serialize_funds(stream: &mut WriteStream, funds: &[MigratedFunds]) -> Result<()> {
    ensure_count("funds", funds.len(), 0, MAX_FUNDS_COUNT)?;

    stream.write_u16(count("funds", funds.len())?);
    for entry in funds {
        serialize_migrated_funds(stream, entry)?;
    }
    Ok(())
}

pub fn deserialize_migrated_funds(stream: &mut ReadStream<'_>) -> Result<MigratedFunds> {
    ensure_remaining(stream, "Migrated funds", MIN_MIGRATED_FUNDS_LENGTH)?;

    Ok(MigratedFunds {
        tail_transaction_hash: stream.read_array("migratedFunds.tailTransactionHash")?,
        address: deserialize_address(stream)?,
        deposit: stream.read_u64("migratedFunds.deposit")?,
    })
}

pub fn serialize_migrated_funds(stream: &mut WriteStream, funds: &MigratedFunds) -> Result<()> {
    stream.write_fixed(&funds.tail_transaction_hash);
    serialize_address(stream, &funds.address)?;
    stream.write_u64(funds.deposit);
    Ok(())
}
