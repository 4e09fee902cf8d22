use super::common::{SMALL_TYPE_LENGTH, ensure_remaining, expect_small_type};
use super::read_stream::ReadStream;
use super::write_stream::WriteStream;
use crate::models::{Ed25519Signature, Signature};
use crate::signatures::ed25519::{PUBLIC_KEY_SIZE, SIGNATURE_SIZE};
use crate::{Error, Result};

pub const ED25519_SIGNATURE_TYPE: u8 = 0;

pub const MIN_SIGNATURE_LENGTH: usize = SMALL_TYPE_LENGTH;
pub const MIN_ED25519_SIGNATURE_LENGTH: usize =
    MIN_SIGNATURE_LENGTH + PUBLIC_KEY_SIZE + SIGNATURE_SIZE;

pub fn deserialize_signature(stream: &mut ReadStream<'_>) -> Result<Signature> {
    ensure_remaining(stream, "Signature", MIN_SIGNATURE_LENGTH)?;

    match stream.peek_byte("signature.type")? {
        ED25519_SIGNATURE_TYPE => deserialize_ed25519_signature(stream).map(Signature::Ed25519),
        tag => Err(Error::UnrecognizedType {
            kind: "signature",
            tag: tag.into(),
        }),
    }
}

pub fn serialize_signature(stream: &mut WriteStream, signature: &Signature) -> Result<()> {
    match signature {
        Signature::Ed25519(ed25519) => serialize_ed25519_signature(stream, ed25519),
    }
}

pub fn deserialize_ed25519_signature(stream: &mut ReadStream<'_>) -> Result<Ed25519Signature> {
    ensure_remaining(stream, "Ed25519 signature", MIN_ED25519_SIGNATURE_LENGTH)?;
    expect_small_type(stream, "ed25519Signature", ED25519_SIGNATURE_TYPE)?;

    Ok(Ed25519Signature {
        public_key: stream.read_array("ed25519Signature.publicKey")?,
        signature: stream.read_array("ed25519Signature.signature")?,
    })
}

pub fn serialize_ed25519_signature(
    stream: &mut WriteStream,
    signature: &Ed25519Signature,
) -> Result<()> {
    stream.write_byte(ED25519_SIGNATURE_TYPE);
    stream.write_fixed(&signature.public_key);
    stream.write_fixed(&signature.signature);
    Ok(())
}
