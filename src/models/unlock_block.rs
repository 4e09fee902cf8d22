#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signature {
    Ed25519(Ed25519Signature),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519Signature {
    pub public_key: [u8; 32],
    pub signature: [u8; 64],
}

/// Proof that the sender may spend the input at the same position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockBlock {
    Signature(Signature),
    /// Reuses the signature block at this earlier position.
    Reference(u16),
}
