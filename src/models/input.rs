use super::{MilestoneId, TransactionId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Utxo(UtxoInput),
    Treasury(TreasuryInput),
}

/// Spends output `transaction_output_index` of a previous transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UtxoInput {
    pub transaction_id: TransactionId,
    pub transaction_output_index: u16,
}

/// Spends the treasury as left by a milestone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreasuryInput {
    pub milestone_id: MilestoneId,
}
