//! Mirror node response shapes.
//!
//! Only the fields this workspace reads are modelled; unknown fields are
//! ignored. The mirror node renders some integers as JSON strings, so those
//! fields accept either form.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use ledgerkit_types::{AccountId, KeyAlgorithm, PublicKey, TokenId, TopicId};
use serde::{Deserialize, Deserializer};

use crate::error::MirrorError;

fn u64_from_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn optional_u64_from_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }
    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// `key` object on an account: algorithm tag plus hex-encoded key.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AccountKey {
    #[serde(rename = "_type")]
    pub key_type: String,
    pub key: String,
}

impl AccountKey {
    /// Decode into a typed public key. Threshold and key-list keys
    /// (`ProtobufEncoded`) are not single signing keys and are rejected.
    pub fn to_public_key(&self) -> Result<PublicKey, MirrorError> {
        let algorithm: KeyAlgorithm = self
            .key_type
            .parse()
            .map_err(|_| MirrorError::UnsupportedKeyType(self.key_type.clone()))?;
        let parsed: PublicKey = self.key.parse()?;
        if parsed.algorithm() != algorithm {
            return Err(MirrorError::UnsupportedKeyType(format!(
                "{} key tagged as {}",
                parsed.algorithm().as_str(),
                self.key_type
            )));
        }
        Ok(parsed)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AccountBalance {
    pub balance: i64,
    #[serde(default)]
    pub tokens: Vec<TokenBalance>,
}

/// `GET /api/v1/accounts/{id}`
#[derive(Clone, Debug, Deserialize)]
pub struct AccountInfo {
    pub account: AccountId,
    pub key: Option<AccountKey>,
    pub balance: Option<AccountBalance>,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenBalance {
    pub token_id: TokenId,
    pub balance: u64,
    #[serde(default)]
    pub decimals: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Links {
    pub next: Option<String>,
}

/// `GET /api/v1/accounts/{id}/tokens`
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TokenBalancesPage {
    pub tokens: Vec<TokenBalance>,
    pub links: Option<Links>,
}

/// `GET /api/v1/tokens/{id}`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenDetails {
    pub token_id: TokenId,
    pub name: String,
    pub symbol: String,
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub decimals: u64,
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub total_supply: u64,
    #[serde(default, deserialize_with = "optional_u64_from_string_or_number")]
    pub max_supply: Option<u64>,
    #[serde(rename = "type")]
    pub token_type: String,
    pub supply_type: Option<String>,
    pub treasury_account_id: Option<AccountId>,
    #[serde(default)]
    pub memo: String,
}

/// One entry of `GET /api/v1/accounts/{id}/airdrops/pending`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PendingAirdrop {
    pub amount: u64,
    pub receiver_id: AccountId,
    pub sender_id: AccountId,
    pub serial_number: Option<u64>,
    pub token_id: TokenId,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct PendingAirdropsPage {
    pub airdrops: Vec<PendingAirdrop>,
    pub links: Option<Links>,
}

/// One entry of `GET /api/v1/tokens/{id}/balances`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenHolder {
    pub account: AccountId,
    pub balance: u64,
    #[serde(default)]
    pub decimals: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TokenHoldersPage {
    pub balances: Vec<TokenHolder>,
    pub links: Option<Links>,
}

/// `GET /api/v1/topics/{id}`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TopicInfo {
    pub topic_id: TopicId,
    #[serde(default)]
    pub memo: String,
    pub admin_key: Option<AccountKey>,
    pub submit_key: Option<AccountKey>,
    pub auto_renew_account: Option<AccountId>,
    pub auto_renew_period: Option<u64>,
    pub created_timestamp: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

/// One entry of `GET /api/v1/topics/{id}/messages`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TopicMessage {
    pub topic_id: TopicId,
    pub sequence_number: u64,
    /// `seconds.nanos`, as the mirror node renders it.
    pub consensus_timestamp: String,
    pub payer_account_id: Option<AccountId>,
    /// Base64 of the submitted bytes.
    pub message: String,
}

impl TopicMessage {
    pub fn contents(&self) -> Result<Vec<u8>, MirrorError> {
        BASE64_STANDARD
            .decode(&self.message)
            .map_err(|e| MirrorError::Decode(format!("topic message {}: {e}", self.sequence_number)))
    }

    /// The message as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Result<String, MirrorError> {
        Ok(String::from_utf8_lossy(&self.contents()?).into_owned())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TopicMessagesPage {
    pub messages: Vec<TopicMessage>,
    pub links: Option<Links>,
}
