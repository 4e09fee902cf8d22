//! Identifiers and transaction signing built on the codec.
//!
//! Ids are Blake2b-256 digests of serialized structures, so they are only
//! as stable as the serializer: any change to the wire format changes
//! every id.

mod ids;
mod unlock;

pub use ids::{essence_hash, message_id, network_id, transaction_id};
pub use unlock::{build_unlock_blocks, sign_essence, verify_unlock_blocks};
