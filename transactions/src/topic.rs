//! Consensus service bodies.

use ledgerkit_types::{PublicKey, TopicId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCreateBody {
    pub memo: String,
    pub admin_key: Option<PublicKey>,
    /// When absent anyone may submit messages.
    pub submit_key: Option<PublicKey>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDeleteBody {
    pub topic_id: TopicId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMessageSubmitBody {
    pub topic_id: TopicId,
    pub message: Vec<u8>,
}
