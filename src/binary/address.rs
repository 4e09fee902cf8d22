use super::common::{SMALL_TYPE_LENGTH, ensure_remaining, expect_small_type};
use super::read_stream::ReadStream;
use super::write_stream::WriteStream;
use crate::models::Address;
use crate::{Error, Result};

pub const ED25519_ADDRESS_TYPE: u8 = 0;

pub const ED25519_ADDRESS_LENGTH: usize = 32;

pub const MIN_ADDRESS_LENGTH: usize = SMALL_TYPE_LENGTH;
pub const MIN_ED25519_ADDRESS_LENGTH: usize = MIN_ADDRESS_LENGTH + ED25519_ADDRESS_LENGTH;

pub fn deserialize_address(stream: &mut ReadStream<'_>) -> Result<Address> {
    ensure_remaining(stream, "Address", MIN_ADDRESS_LENGTH)?;

    match stream.peek_byte("address.type")? {
        ED25519_ADDRESS_TYPE => deserialize_ed25519_address(stream),
        tag => Err(Error::UnrecognizedType {
            kind: "address",
            tag: tag.into(),
        }),
    }
}

pub fn serialize_address(stream: &mut WriteStream, address: &Address) -> Result<()> {
    match address {
        Address::Ed25519(_) => serialize_ed25519_address(stream, address),
    }
}

pub fn deserialize_ed25519_address(stream: &mut ReadStream<'_>) -> Result<Address> {
    ensure_remaining(stream, "Ed25519 address", MIN_ED25519_ADDRESS_LENGTH)?;

    expect_small_type(stream, "ed25519Address", ED25519_ADDRESS_TYPE)?;

    Ok(Address::Ed25519(stream.read_array("ed25519Address.address")?))
}

pub fn serialize_ed25519_address(stream: &mut WriteStream, address: &Address) -> Result<()> {
    let Address::Ed25519(bytes) = address;
    stream.write_byte(ED25519_ADDRESS_TYPE);
    stream.write_fixed(bytes);
    Ok(())
}
