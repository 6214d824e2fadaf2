//! Ledger entity ids in `shard.realm.num` form.
//!
//! Accounts, tokens and topics share one numbering scheme. Ids serialize as
//! their canonical string so request JSON and encoded transactions read the
//! same way.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::IdParseError;

fn parse_entity(kind: &'static str, s: &str) -> Result<(u64, u64, u64), IdParseError> {
    let malformed = || IdParseError::Malformed {
        kind,
        input: s.to_string(),
    };
    let mut parts = s.trim().split('.');
    let shard = parts.next().ok_or_else(malformed)?;
    let realm = parts.next().ok_or_else(malformed)?;
    let num = parts.next().ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }
    let parse = |p: &str| -> Result<u64, IdParseError> {
        if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        p.parse::<u64>().map_err(|_| malformed())
    };
    Ok((parse(shard)?, parse(realm)?, parse(num)?))
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            pub shard: u64,
            pub realm: u64,
            pub num: u64,
        }

        impl $name {
            pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
                Self { shard, realm, num }
            }

            /// Shorthand for an id in shard 0, realm 0.
            pub const fn from_num(num: u64) -> Self {
                Self::new(0, 0, num)
            }

            /// Entity number 0 is never assigned by the ledger.
            pub fn is_valid_reference(&self) -> bool {
                self.num != 0
            }

            /// Long-zero EVM address: 4 bytes shard, 8 bytes realm, 8 bytes num.
            ///
            /// `None` when the shard does not fit in 4 bytes.
            pub fn to_solidity_address(&self) -> Option<String> {
                let shard = u32::try_from(self.shard).ok()?;
                let mut bytes = [0u8; 20];
                bytes[..4].copy_from_slice(&shard.to_be_bytes());
                bytes[4..12].copy_from_slice(&self.realm.to_be_bytes());
                bytes[12..].copy_from_slice(&self.num.to_be_bytes());
                Some(format!("0x{}", hex::encode(bytes)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let (shard, realm, num) = parse_entity($kind, s)?;
                Ok(Self { shard, realm, num })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

entity_id!(
    /// A ledger account.
    AccountId,
    "account"
);

entity_id!(
    /// A fungible or non-fungible token type.
    TokenId,
    "token"
);

entity_id!(
    /// A consensus topic.
    TopicId,
    "topic"
);

/// Reference to a token transfer offered to a receiver but not yet accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAirdropId {
    pub token_id: TokenId,
    pub sender_id: AccountId,
    pub receiver_id: AccountId,
}

impl PendingAirdropId {
    pub fn new(token_id: TokenId, sender_id: AccountId, receiver_id: AccountId) -> Self {
        Self {
            token_id,
            sender_id,
            receiver_id,
        }
    }

    pub fn is_valid_reference(&self) -> bool {
        self.token_id.is_valid_reference()
            && self.sender_id.is_valid_reference()
            && self.receiver_id.is_valid_reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let id: AccountId = "0.0.1234".parse().unwrap();
        assert_eq!(id, AccountId::from_num(1234));
        assert_eq!(id.to_string(), "0.0.1234");
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "0.0", "0.0.1.2", "a.b.c", "0.0.-1", "0..5", "0.0. 5"] {
            assert!(bad.parse::<TokenId>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn error_names_the_kind() {
        let err = "nope".parse::<TopicId>().unwrap_err();
        assert!(err.to_string().contains("topic"));
    }

    #[test]
    fn zero_entity_is_not_a_reference() {
        assert!(!AccountId::from_num(0).is_valid_reference());
        assert!(AccountId::from_num(2).is_valid_reference());
    }

    #[test]
    fn solidity_address_is_long_zero_form() {
        let token = TokenId::from_num(5005);
        assert_eq!(
            token.to_solidity_address().as_deref(),
            Some("0x000000000000000000000000000000000000138d")
        );
    }

    #[test]
    fn solidity_address_needs_a_four_byte_shard() {
        let edge = TokenId::new(u64::from(u32::MAX), 0, 7);
        assert_eq!(
            edge.to_solidity_address().as_deref(),
            Some("0xffffffff00000000000000000000000000000007")
        );
        assert_eq!(TokenId::new(u64::from(u32::MAX) + 1, 0, 7).to_solidity_address(), None);
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&TokenId::from_num(42)).unwrap();
        assert_eq!(json, "\"0.0.42\"");
        let back: TokenId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TokenId::from_num(42));
    }

    #[test]
    fn pending_airdrop_json_is_camel_case() {
        let id = PendingAirdropId::new(
            TokenId::from_num(1),
            AccountId::from_num(2),
            AccountId::from_num(3),
        );
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json["senderId"], "0.0.2");
        assert_eq!(json["receiverId"], "0.0.3");
    }
}
