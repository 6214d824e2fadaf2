use ledgerkit_types::{AccountId, KeyParseError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MirrorError {
    #[error("mirror request failed: {0}")]
    Http(String),

    #[error("mirror node returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("not found on mirror node: {0}")]
    NotFound(String),

    #[error("invalid mirror response: {0}")]
    Decode(String),

    #[error("account {0} has no key")]
    NoKey(AccountId),

    #[error("unsupported account key type `{0}`")]
    UnsupportedKeyType(String),

    #[error("invalid account key: {0}")]
    InvalidKey(#[from] KeyParseError),
}
