use super::{Address, Input, MessageId, Output, TreasuryInput, TreasuryOutput, UnlockBlock};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Transaction(Box<TransactionPayload>),
    Milestone(Box<MilestonePayload>),
    Indexation(IndexationPayload),
    Receipt(Box<ReceiptPayload>),
    TreasuryTransaction(TreasuryTransactionPayload),
}

/// The signed part of a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionEssence {
    /// 1 to 127 UTXO inputs.
    pub inputs: Vec<Input>,
    /// 1 to 127 signature locked outputs.
    pub outputs: Vec<Output>,
    pub payload: Option<IndexationPayload>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionPayload {
    pub essence: TransactionEssence,
    /// One block per input, in input order.
    pub unlock_blocks: Vec<UnlockBlock>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MilestonePayload {
    pub index: u32,
    pub timestamp: u64,
    pub parents: Vec<MessageId>,
    pub inclusion_merkle_proof: [u8; 32],
    pub next_pow_score: u32,
    pub next_pow_score_milestone_index: u32,
    pub public_keys: Vec<[u8; 32]>,
    pub receipt: Option<ReceiptPayload>,
    pub signatures: Vec<[u8; 64]>,
}

/// Arbitrary data, findable by its index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexationPayload {
    /// 1 to 64 bytes of UTF-8 text.
    pub index: Vec<u8>,
    pub data: Vec<u8>,
}

/// Funds migrated from the legacy network at one milestone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceiptPayload {
    pub migrated_at: u32,
    /// Whether this is the last receipt for `migrated_at`.
    pub last: bool,
    pub funds: Vec<MigratedFunds>,
    pub transaction: TreasuryTransactionPayload,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MigratedFunds {
    pub tail_transaction_hash: [u8; 49],
    pub address: Address,
    pub deposit: u64,
}

/// Moves the treasury from one milestone to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreasuryTransactionPayload {
    pub input: TreasuryInput,
    pub output: TreasuryOutput,
}
