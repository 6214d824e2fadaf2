//! Parse errors for the fundamental types.

use thiserror::Error;

/// Failure to parse an entity id (`shard.realm.num`) or transaction id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("malformed {kind} id `{input}`: expected shard.realm.num")]
    Malformed { kind: &'static str, input: String },

    #[error("malformed transaction id `{0}`: expected account@seconds.nanos")]
    MalformedTransactionId(String),
}

/// Failure to parse key material from its string or byte form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("key is not valid hex")]
    InvalidHex,

    #[error("unrecognised key length: {0} bytes")]
    InvalidLength(usize),

    #[error("unsupported key type: {0}")]
    UnsupportedType(String),

    #[error("compressed secp256k1 key must start with 0x02 or 0x03")]
    InvalidEcdsaPrefix,
}

/// Failure to convert a display amount into base units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("invalid amount `{0}`")]
    Invalid(String),

    #[error("amount `{amount}` has more than {decimals} decimal places")]
    TooPrecise { amount: String, decimals: u32 },

    #[error("amount overflows base units")]
    Overflow,
}
