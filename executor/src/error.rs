//! Error taxonomy for execution.
//!
//! Ledger rejections (pre-check or consensus) are not errors: they come back
//! as an `ExecutedResult` carrying the failing status.

use ledgerkit_crypto::KeyError;
use ledgerkit_mirror::MirrorError;
use ledgerkit_transactions::{FreezeError, TransactionError};
use ledgerkit_types::{IdParseError, TransactionId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutionError {
    /// An account, token or topic reference is malformed or not a valid
    /// ledger entity. Never reaches the network.
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// Amounts or recipients that cannot form a valid transaction.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No signing identity: no operator for custodial execution, or no
    /// resolvable executor for non-custodial.
    #[error("missing authorization: {0}")]
    MissingAuthorization(String),

    /// A lookup or submission did not complete. Nothing reached consensus.
    #[error("network error: {0}")]
    Network(String),

    /// Submitted, but the outcome is unknown. Check the id before retrying.
    #[error("outcome of {transaction_id} is unknown: {reason}")]
    AmbiguousOutcome {
        transaction_id: TransactionId,
        reason: String,
    },

    #[error("freeze failed: {0}")]
    Freeze(#[from] FreezeError),

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ExecutionError {
    /// Stable machine-readable code for the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedIdentifier(_) => "MALFORMED_IDENTIFIER",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::MissingAuthorization(_) => "MISSING_AUTHORIZATION",
            Self::Network(_) => "NETWORK_ERROR",
            Self::AmbiguousOutcome { .. } => "AMBIGUOUS_OUTCOME",
            Self::Freeze(_) => "FREEZE_ERROR",
            Self::Encoding(_) => "ENCODING_ERROR",
            Self::Signing(_) => "SIGNING_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<IdParseError> for ExecutionError {
    fn from(e: IdParseError) -> Self {
        Self::MalformedIdentifier(e.to_string())
    }
}

impl From<TransactionError> for ExecutionError {
    fn from(e: TransactionError) -> Self {
        match e {
            TransactionError::InvalidReference { .. } | TransactionError::EmptyTokenList => {
                Self::MalformedIdentifier(e.to_string())
            }
            TransactionError::NoRecipients
            | TransactionError::Unbalanced { .. }
            | TransactionError::AmountOverflow => Self::InvalidRequest(e.to_string()),
            TransactionError::Encoding(msg) => Self::Encoding(msg),
            TransactionError::Signing(key) => Self::Signing(key.to_string()),
        }
    }
}

impl From<KeyError> for ExecutionError {
    fn from(e: KeyError) -> Self {
        Self::Signing(e.to_string())
    }
}

/// Failure to obtain an executor identity for non-custodial execution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("executor account id or public key is required")]
    MissingAuthorization,

    #[error("executor key lookup failed: {0}")]
    Lookup(#[from] MirrorError),
}

impl From<ResolveError> for ExecutionError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::MissingAuthorization => Self::MissingAuthorization(e.to_string()),
            ResolveError::Lookup(_) => Self::Network(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(String),

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("operator_account_id and operator_private_key must be set together")]
    IncompleteOperator,

    #[error("invalid operator: {0}")]
    InvalidOperator(String),

    #[error("transaction_valid_duration_secs must be in 1..={max}, got {got}")]
    ValidDuration { got: u64, max: u64 },
}
