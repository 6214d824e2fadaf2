//! Fundamental types for LedgerKit.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! entity ids, public/private keys, transaction ids, timestamps, receipt status
//! codes, network identifiers, and base-unit amounts.

pub mod amount;
pub mod error;
pub mod ids;
pub mod keys;
pub mod network;
pub mod status;
pub mod time;
pub mod transaction_id;

pub use amount::{to_base_units, Hbar};
pub use error::{AmountError, IdParseError, KeyParseError};
pub use ids::{AccountId, PendingAirdropId, TokenId, TopicId};
pub use keys::{KeyAlgorithm, PrivateKey, PublicKey, Signature};
pub use network::NetworkId;
pub use status::Status;
pub use time::Timestamp;
pub use transaction_id::TransactionId;
