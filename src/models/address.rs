/// An address outputs can be locked to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Address {
    /// Blake2b-256 of an Ed25519 public key.
    Ed25519([u8; 32]),
}
