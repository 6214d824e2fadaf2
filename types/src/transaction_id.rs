//! Transaction ids: the paying account plus a valid-start timestamp.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::IdParseError;
use crate::ids::AccountId;
use crate::time::Timestamp;

/// Uniquely identifies a transaction. The account named here pays the fee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransactionId {
    pub account_id: AccountId,
    pub valid_start: Timestamp,
}

impl TransactionId {
    pub fn new(account_id: AccountId, valid_start: Timestamp) -> Self {
        Self {
            account_id,
            valid_start,
        }
    }

    /// A fresh id for `account_id` starting now.
    pub fn generate(account_id: AccountId) -> Self {
        Self::new(account_id, Timestamp::now())
    }

    pub fn payer(&self) -> AccountId {
        self.account_id
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.account_id, self.valid_start)
    }
}

impl FromStr for TransactionId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || IdParseError::MalformedTransactionId(s.to_string());
        let (account, start) = s.split_once('@').ok_or_else(malformed)?;
        let account_id: AccountId = account.parse()?;
        let (secs, nanos) = start.split_once('.').ok_or_else(malformed)?;
        let secs: u64 = secs.parse().map_err(|_| malformed())?;
        let nanos: u32 = nanos.parse().map_err(|_| malformed())?;
        if nanos >= 1_000_000_000 {
            return Err(malformed());
        }
        Ok(Self::new(account_id, Timestamp::new(secs, nanos)))
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse() {
        let id = TransactionId::new(AccountId::from_num(1001), Timestamp::new(1700000000, 5));
        let s = id.to_string();
        assert_eq!(s, "0.0.1001@1700000000.000000005");
        assert_eq!(s.parse::<TransactionId>().unwrap(), id);
    }

    #[test]
    fn generate_scopes_to_account() {
        let account = AccountId::from_num(77);
        assert_eq!(TransactionId::generate(account).payer(), account);
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["0.0.1", "0.0.1@", "0.0.1@12", "x@1.2", "0.0.1@1.1000000000"] {
            assert!(bad.parse::<TransactionId>().is_err(), "{bad:?} should fail");
        }
    }
}
