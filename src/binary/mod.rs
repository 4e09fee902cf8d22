//! The binary wire format.
//!
//! [`ReadStream`] and [`WriteStream`] are the cursors; everything else is
//! one `deserialize_*` / `serialize_*` pair per wire structure. All
//! integers are little-endian.
//!
//! ## Tags
//!
//! | Type         | Width   | Variants                                                   |
//! |--------------|---------|------------------------------------------------------------|
//! | Address      | 1 byte  | 0 Ed25519                                                  |
//! | Input        | 1 byte  | 0 UTXO, 1 Treasury                                         |
//! | Output       | 1 byte  | 0 SigLockedSingle, 1 SigLockedDustAllowance, 2 Treasury    |
//! | Signature    | 1 byte  | 0 Ed25519                                                  |
//! | Unlock block | 1 byte  | 0 Signature, 1 Reference                                   |
//! | Payload      | 4 bytes | 0 Transaction, 1 Milestone, 2 Indexation, 3 Receipt, 4 Treasury transaction |
//!
//! Dispatching readers peek at the tag and hand over to the variant
//! reader, which consumes and checks the tag again.
//!
//! ## Validation
//!
//! Each reader first checks that the minimum encoded size of its type is
//! still available (`MIN_*_LENGTH`) so short input fails with a message
//! naming the structure rather than the field. Counts, parent ordering,
//! key lengths and nesting rules are enforced in both directions: a value
//! that would not deserialize does not serialize either.

pub mod address;
pub mod common;
pub mod funds;
pub mod input;
pub mod message;
pub mod output;
pub mod payload;
pub mod signature;
pub mod transaction;
pub mod unlock_block;

mod read_stream;
mod write_stream;

pub use address::{deserialize_address, serialize_address};
pub use funds::{deserialize_migrated_funds, serialize_migrated_funds};
pub use input::{deserialize_input, serialize_input};
pub use message::{
    deserialize_message, deserialize_message_bytes, serialize_message, serialize_message_bytes,
};
pub use output::{deserialize_output, serialize_output};
pub use payload::{deserialize_payload, serialize_payload};
pub use read_stream::ReadStream;
pub use signature::{deserialize_signature, serialize_signature};
pub use transaction::{deserialize_transaction_essence, serialize_transaction_essence};
pub use unlock_block::{deserialize_unlock_block, serialize_unlock_block};
pub use write_stream::WriteStream;
