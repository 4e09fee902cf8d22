//! The ledger object model.
//!
//! Plain values, one type per wire structure. Variants that share a tag
//! space are enums; the tags themselves live next to the codec in
//! [`crate::binary`].
//!
//! Nesting restrictions that the types can express are expressed by them:
//! a transaction essence can only hold an [`IndexationPayload`], a
//! milestone only a [`ReceiptPayload`], a receipt only a
//! [`TreasuryTransactionPayload`]. The one restriction left to the codec is
//! that a [`Message`] may not carry a receipt or a treasury transaction
//! directly.

mod address;
mod input;
mod message;
mod output;
mod payload;
mod unlock_block;

pub use address::Address;
pub use input::{Input, TreasuryInput, UtxoInput};
pub use message::Message;
pub use output::{Output, SigLockedDustAllowanceOutput, SigLockedSingleOutput, TreasuryOutput};
pub use payload::{
    IndexationPayload, MigratedFunds, MilestonePayload, Payload, ReceiptPayload,
    TransactionEssence, TransactionPayload, TreasuryTransactionPayload,
};
pub use unlock_block::{Ed25519Signature, Signature, UnlockBlock};

/// Blake2b-256 digest identifying a message.
pub type MessageId = [u8; 32];

/// Blake2b-256 digest identifying a transaction payload.
pub type TransactionId = [u8; 32];

/// Identifier of a milestone payload.
pub type MilestoneId = [u8; 32];
