use super::{MessageId, Payload};

/// The unit of data a node gossips.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub network_id: u64,
    /// 1 to 8 distinct ids, in ascending byte order.
    pub parents: Vec<MessageId>,
    pub payload: Option<Payload>,
    pub nonce: u64,
}
