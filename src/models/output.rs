use super::Address;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    SigLockedSingle(SigLockedSingleOutput),
    SigLockedDustAllowance(SigLockedDustAllowanceOutput),
    Treasury(TreasuryOutput),
}

/// Transfers `amount` to `address`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SigLockedSingleOutput {
    pub address: Address,
    pub amount: u64,
}

/// Like [`SigLockedSingleOutput`], but also allows the address to receive
/// dust outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SigLockedDustAllowanceOutput {
    pub address: Address,
    pub amount: u64,
}

/// The new treasury balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreasuryOutput {
    pub amount: u64,
}
