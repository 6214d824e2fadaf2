//! Receipt and pre-check status codes.
//!
//! The ledger reports every outcome as a SCREAMING_SNAKE code name. The
//! codes this workspace reacts to are named variants; anything else is
//! carried verbatim in [`Status::Other`] so no outcome is ever lost.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! status_codes {
    ($($variant:ident => $code:literal),* $(,)?) => {
        /// A ledger response code.
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub enum Status {
            $($variant,)*
            /// A code not in the catalogue above.
            Other(String),
        }

        impl Status {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $code,)*
                    Self::Other(code) => code,
                }
            }
        }

        impl FromStr for Status {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $($code => Self::$variant,)*
                    other => Self::Other(other.to_string()),
                })
            }
        }
    };
}

status_codes! {
    Ok => "OK",
    Success => "SUCCESS",
    Busy => "BUSY",
    Unknown => "UNKNOWN",
    InvalidTransaction => "INVALID_TRANSACTION",
    InvalidSignature => "INVALID_SIGNATURE",
    InvalidAccountId => "INVALID_ACCOUNT_ID",
    InvalidTokenId => "INVALID_TOKEN_ID",
    InvalidTopicId => "INVALID_TOPIC_ID",
    InvalidPendingAirdropId => "INVALID_PENDING_AIRDROP_ID",
    InvalidTransactionStart => "INVALID_TRANSACTION_START",
    InvalidNodeAccount => "INVALID_NODE_ACCOUNT",
    TransactionExpired => "TRANSACTION_EXPIRED",
    DuplicateTransaction => "DUPLICATE_TRANSACTION",
    InsufficientTxFee => "INSUFFICIENT_TX_FEE",
    InsufficientPayerBalance => "INSUFFICIENT_PAYER_BALANCE",
    InsufficientAccountBalance => "INSUFFICIENT_ACCOUNT_BALANCE",
    InsufficientTokenBalance => "INSUFFICIENT_TOKEN_BALANCE",
    PayerAccountNotFound => "PAYER_ACCOUNT_NOT_FOUND",
    Unauthorized => "UNAUTHORIZED",
    TokenHasNoSupplyKey => "TOKEN_HAS_NO_SUPPLY_KEY",
    TokenAlreadyAssociatedToAccount => "TOKEN_ALREADY_ASSOCIATED_TO_ACCOUNT",
    TokenNotAssociatedToAccount => "TOKEN_NOT_ASSOCIATED_TO_ACCOUNT",
    AccountFrozenForToken => "ACCOUNT_FROZEN_FOR_TOKEN",
    TokenMaxSupplyReached => "TOKEN_MAX_SUPPLY_REACHED",
    TokenIsImmutable => "TOKEN_IS_IMMUTABLE",
    TransactionRequiresZeroTokenBalances => "TRANSACTION_REQUIRES_ZERO_TOKEN_BALANCES",
    AccountAmountTransfersOnlyAllowedForFungibleCommon => "ACCOUNT_AMOUNT_TRANSFERS_ONLY_ALLOWED_FOR_FUNGIBLE_COMMON",
    TransfersNotZeroSumForToken => "TRANSFERS_NOT_ZERO_SUM_FOR_TOKEN",
    InvalidAccountAmounts => "INVALID_ACCOUNT_AMOUNTS",
    InvalidTokenInitialSupply => "INVALID_TOKEN_INITIAL_SUPPLY",
    InvalidTokenDecimals => "INVALID_TOKEN_DECIMALS",
    InvalidTokenMaxSupply => "INVALID_TOKEN_MAX_SUPPLY",
    MissingTokenSymbol => "MISSING_TOKEN_SYMBOL",
    MissingTokenName => "MISSING_TOKEN_NAME",
    InvalidTokenNftSerialNumber => "INVALID_TOKEN_NFT_SERIAL_NUMBER",
    InvalidTopicMessage => "INVALID_TOPIC_MESSAGE",
    MessageSizeTooLarge => "MESSAGE_SIZE_TOO_LARGE",
    TopicExpired => "TOPIC_EXPIRED",
    EmptyTokenReferenceList => "EMPTY_TOKEN_REFERENCE_LIST",
    TokenReferenceRepeated => "TOKEN_REFERENCE_REPEATED",
    InvalidOwnerId => "INVALID_OWNER_ID",
    AmountExceedsAllowance => "AMOUNT_EXCEEDS_ALLOWANCE",
    SpenderAccountSameAsOwner => "SPENDER_ACCOUNT_SAME_AS_OWNER",
    NegativeAllowanceAmount => "NEGATIVE_ALLOWANCE_AMOUNT",
    ReceiptNotFound => "RECEIPT_NOT_FOUND",
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_parse_to_variants() {
        assert_eq!("SUCCESS".parse::<Status>().unwrap(), Status::Success);
        assert_eq!(
            "TOKEN_HAS_NO_SUPPLY_KEY".parse::<Status>().unwrap(),
            Status::TokenHasNoSupplyKey
        );
    }

    #[test]
    fn unknown_codes_are_kept() {
        let status: Status = "SOME_FUTURE_CODE".parse().unwrap();
        assert_eq!(status, Status::Other("SOME_FUTURE_CODE".into()));
        assert_eq!(status.as_str(), "SOME_FUTURE_CODE");
    }

    #[test]
    fn only_success_is_success() {
        assert!(Status::Success.is_success());
        assert!(!Status::Ok.is_success());
        assert!(!Status::InsufficientPayerBalance.is_success());
    }

    #[test]
    fn serializes_as_code_name() {
        let json = serde_json::to_string(&Status::TokenAlreadyAssociatedToAccount).unwrap();
        assert_eq!(json, "\"TOKEN_ALREADY_ASSOCIATED_TO_ACCOUNT\"");
    }
}
