//! Mirror node reader.
//!
//! The mirror node exposes the ledger's state over a public REST API. This
//! crate reads account keys, balances, token details and holders, topics
//! and their messages, and pending airdrops from it. It also provides the
//! [`AccountKeyDirectory`] lookup the executor uses to resolve an executor
//! account's signing key.

pub mod client;
pub mod directory;
pub mod error;
pub mod models;

pub use client::MirrorNodeClient;
pub use directory::AccountKeyDirectory;
pub use error::MirrorError;
pub use models::{
    AccountInfo, AccountKey, PendingAirdrop, TokenBalance, TokenDetails, TokenHolder, TopicInfo,
    TopicMessage,
};
