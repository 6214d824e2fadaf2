use ledgerkit_crypto::KeyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("{kind} id {id} is not a valid ledger reference")]
    InvalidReference { kind: &'static str, id: String },

    #[error("at least one token id is required")]
    EmptyTokenList,

    #[error("at least one recipient is required")]
    NoRecipients,

    #[error("transfers for {asset} do not net to zero (net {net})")]
    Unbalanced { asset: String, net: i128 },

    #[error("amount overflows the ledger's signed 64-bit range")]
    AmountOverflow,

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("signing error: {0}")]
    Signing(#[from] KeyError),
}

/// Failure of the unfrozen → frozen transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FreezeError {
    #[error("no transaction id set and no default payer to generate one")]
    MissingTransactionId,

    #[error("no node accounts to assign")]
    NoNodeAccounts,

    #[error("valid duration must be between 1 and {max} seconds, got {got}")]
    InvalidValidDuration { got: u64, max: u64 },

    #[error("memo is {len} bytes, limit is {max}")]
    MemoTooLong { len: usize, max: usize },
}
