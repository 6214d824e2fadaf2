//! The network collaborator: submission and receipt lookup.
//!
//! Implementations wrap a real network client; the executor only drives
//! the calls, in order, and never retries them.

use async_trait::async_trait;
use ledgerkit_types::{AccountId, Status, TokenId, TopicId, TransactionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transaction::FrozenTransaction;

/// Acknowledgement that a node accepted a transaction for consensus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub transaction_id: TransactionId,
    pub node_id: AccountId,
}

/// Post-consensus outcome of a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_id: TransactionId,
    pub status: Status,
    pub token_id: Option<TokenId>,
    pub topic_id: Option<TopicId>,
    pub serials: Vec<i64>,
    pub total_supply: Option<u64>,
    pub topic_sequence_number: Option<u64>,
}

impl TransactionReceipt {
    pub fn new(transaction_id: TransactionId, status: Status) -> Self {
        Self {
            transaction_id,
            status,
            token_id: None,
            topic_id: None,
            serials: Vec::new(),
            total_supply: None,
            topic_sequence_number: None,
        }
    }

    pub fn with_token_id(mut self, token_id: TokenId) -> Self {
        self.token_id = Some(token_id);
        self
    }

    pub fn with_topic_id(mut self, topic_id: TopicId) -> Self {
        self.topic_id = Some(topic_id);
        self
    }

    pub fn with_serials(mut self, serials: Vec<i64>) -> Self {
        self.serials = serials;
        self
    }

    pub fn with_total_supply(mut self, total_supply: u64) -> Self {
        self.total_supply = Some(total_supply);
        self
    }

    pub fn with_topic_sequence_number(mut self, sequence_number: u64) -> Self {
        self.topic_sequence_number = Some(sequence_number);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The node refused the transaction before consensus.
    #[error("pre-check failed with status {0}")]
    PreCheck(Status),

    #[error("timed out waiting for the network")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn submit(&self, transaction: &FrozenTransaction) -> Result<TransactionResponse, SubmitError>;

    /// Wait for and return the consensus receipt of `transaction_id`.
    async fn receipt(&self, transaction_id: &TransactionId) -> Result<TransactionReceipt, SubmitError>;
}
