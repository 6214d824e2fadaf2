//! Session configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use ledgerkit_crypto::{parse_private_key, public_from_private};
use ledgerkit_transactions::{FreezeContext, MAX_VALID_DURATION_SECS};
use ledgerkit_types::{AccountId, Hbar, KeyAlgorithm, NetworkId, PrivateKey, PublicKey};
use ledgerkit_utils::LogFormat;

use crate::error::ConfigError;

/// Configuration for one LedgerKit session.
///
/// Can be loaded from a TOML file via [`KitConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Constructed once and handed to
/// the executor; nothing is read from the environment per call.
#[derive(Clone, Serialize, Deserialize)]
pub struct KitConfig {
    /// Which network to talk to.
    #[serde(default)]
    pub network: NetworkId,

    /// Operator account for custodial execution.
    #[serde(default)]
    pub operator_account_id: Option<AccountId>,

    /// Operator private key, DER or raw hex.
    #[serde(default)]
    pub operator_private_key: Option<String>,

    /// `ed25519` or `ecdsa`; needed only for raw ECDSA keys.
    #[serde(default)]
    pub operator_key_type: Option<String>,

    /// Mirror node base URL. Defaults to the network's public mirror.
    #[serde(default)]
    pub mirror_node_url: Option<String>,

    #[serde(default = "default_valid_duration")]
    pub transaction_valid_duration_secs: u64,

    /// Session-wide fee ceiling. Unset means the per-kind default.
    #[serde(default)]
    pub max_transaction_fee_tinybars: Option<i64>,

    #[serde(default = "default_receipt_timeout")]
    pub receipt_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter (e.g. "info", "debug,ledgerkit_executor=trace").
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Defaults ───────────────────────────────────────────────────────────

fn default_valid_duration() -> u64 {
    180
}

fn default_receipt_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl KitConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the ledger would otherwise reject on every freeze.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let got = self.transaction_valid_duration_secs;
        if got == 0 || got > MAX_VALID_DURATION_SECS {
            return Err(ConfigError::ValidDuration {
                got,
                max: MAX_VALID_DURATION_SECS,
            });
        }
        Ok(())
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn mirror_node_url(&self) -> &str {
        self.mirror_node_url
            .as_deref()
            .unwrap_or_else(|| self.network.mirror_node_url())
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }

    /// Parse the operator credentials, if configured.
    pub fn operator(&self) -> Result<Option<Operator>, ConfigError> {
        let (account_id, key) = match (&self.operator_account_id, &self.operator_private_key) {
            (None, None) => return Ok(None),
            (Some(account), Some(key)) => (*account, key),
            _ => return Err(ConfigError::IncompleteOperator),
        };
        let algorithm = self
            .operator_key_type
            .as_deref()
            .map(str::parse::<KeyAlgorithm>)
            .transpose()
            .map_err(|e| ConfigError::InvalidOperator(e.to_string()))?;
        let private_key = parse_private_key(key, algorithm)
            .map_err(|e| ConfigError::InvalidOperator(e.to_string()))?;
        Operator::new(account_id, private_key).map(Some)
    }

    /// Freeze settings applied identically to every operation kind.
    pub fn freeze_context(&self, default_payer: Option<AccountId>) -> FreezeContext {
        FreezeContext {
            default_payer,
            node_account_ids: self.network.node_account_ids(),
            max_transaction_fee: self.max_transaction_fee_tinybars.map(Hbar::from_tinybars),
            valid_duration_secs: self.transaction_valid_duration_secs,
        }
    }

    /// Install the global tracing subscriber from `log_format` / `log_level`.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        ledgerkit_utils::init_logging(self.log_format, &self.log_level)
            .map_err(|e| ConfigError::Parse(format!("logging: {e}")))
    }
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            network: NetworkId::default(),
            operator_account_id: None,
            operator_private_key: None,
            operator_key_type: None,
            mirror_node_url: None,
            transaction_valid_duration_secs: default_valid_duration(),
            max_transaction_fee_tinybars: None,
            receipt_timeout_secs: default_receipt_timeout(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl fmt::Debug for KitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KitConfig")
            .field("network", &self.network)
            .field("operator_account_id", &self.operator_account_id)
            .field(
                "operator_private_key",
                &self.operator_private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("operator_key_type", &self.operator_key_type)
            .field("mirror_node_url", &self.mirror_node_url)
            .field("transaction_valid_duration_secs", &self.transaction_valid_duration_secs)
            .field("max_transaction_fee_tinybars", &self.max_transaction_fee_tinybars)
            .field("receipt_timeout_secs", &self.receipt_timeout_secs)
            .field("log_format", &self.log_format)
            .field("log_level", &self.log_level)
            .finish()
    }
}

// ── Operator ───────────────────────────────────────────────────────────

/// The held signing identity for custodial execution.
pub struct Operator {
    pub account_id: AccountId,
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl Operator {
    pub fn new(account_id: AccountId, private_key: PrivateKey) -> Result<Self, ConfigError> {
        let public_key = public_from_private(&private_key)
            .map_err(|e| ConfigError::InvalidOperator(e.to_string()))?;
        Ok(Self {
            account_id,
            private_key,
            public_key,
        })
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("account_id", &self.account_id)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
