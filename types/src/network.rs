//! Network identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::AccountId;

/// Identifies which public ledger network a session talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production network.
    Mainnet,
    /// The public test network.
    #[default]
    Testnet,
    /// The preview network, ahead of testnet.
    Previewnet,
}

impl NetworkId {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Previewnet => "previewnet",
        }
    }

    /// Base URL of the public mirror node for this network.
    pub fn mirror_node_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://mainnet-public.mirrornode.hedera.com",
            Self::Testnet => "https://testnet.mirrornode.hedera.com",
            Self::Previewnet => "https://previewnet.mirrornode.hedera.com",
        }
    }

    /// Consensus node accounts a transaction may be addressed to.
    pub fn node_account_ids(&self) -> Vec<AccountId> {
        let last = match self {
            Self::Mainnet => 34,
            Self::Testnet => 9,
            Self::Previewnet => 6,
        };
        (3..=last).map(AccountId::from_num).collect()
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "previewnet" => Ok(Self::Previewnet),
            other => Err(format!("unknown network `{other}`")),
        }
    }
}
