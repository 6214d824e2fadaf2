//! HTTP client for the mirror node REST API.

use std::time::Duration;

use ledgerkit_types::{AccountId, Hbar, NetworkId, PublicKey, Timestamp, TokenId, TopicId};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::MirrorError;
use crate::models::{
    AccountInfo, PendingAirdrop, PendingAirdropsPage, TokenBalance, TokenBalancesPage,
    TokenDetails, TokenHolder, TokenHoldersPage, TopicInfo, TopicMessage, TopicMessagesPage,
};

/// Pages followed for list endpoints before giving up.
const MAX_PAGES: usize = 20;

// ── MirrorNodeClient ─────────────────────────────────────────────────────

/// Read-only client for one network's mirror node.
///
/// One request per call; failures are returned to the caller as-is.
#[derive(Clone, Debug)]
pub struct MirrorNodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl MirrorNodeClient {
    /// Create a client targeting the given base URL
    /// (e.g. `https://testnet.mirrornode.hedera.com`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, MirrorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| MirrorError::Http(format!("failed to create HTTP client: {e}")))?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client for the public mirror node of `network`.
    pub fn for_network(network: NetworkId) -> Result<Self, MirrorError> {
        Self::new(network.mirror_node_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, MirrorError> {
        let url = self.url(path);
        debug!(%url, "mirror request");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| MirrorError::Http(format!("request failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MirrorError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(MirrorError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json()
            .await
            .map_err(|e| MirrorError::Decode(format!("{path}: {e}")))
    }

    /// Fetch the account record, including its key and balances.
    pub async fn account_info(&self, account_id: &AccountId) -> Result<AccountInfo, MirrorError> {
        self.get_json(&format!("/api/v1/accounts/{account_id}")).await
    }

    /// The account's current single signing key.
    pub async fn account_public_key(&self, account_id: &AccountId) -> Result<PublicKey, MirrorError> {
        let info = self.account_info(account_id).await?;
        let key = info.key.ok_or(MirrorError::NoKey(*account_id))?;
        key.to_public_key()
    }

    pub async fn hbar_balance(&self, account_id: &AccountId) -> Result<Hbar, MirrorError> {
        let info = self.account_info(account_id).await?;
        let balance = info
            .balance
            .ok_or_else(|| MirrorError::Decode(format!("account {account_id} has no balance")))?;
        Ok(Hbar::from_tinybars(balance.balance))
    }

    /// Balance of one token in base units; zero when the account does not
    /// hold or is not associated with the token.
    pub async fn token_balance(
        &self,
        account_id: &AccountId,
        token_id: &TokenId,
    ) -> Result<u64, MirrorError> {
        let page: TokenBalancesPage = self
            .get_json(&format!("/api/v1/accounts/{account_id}/tokens?token.id={token_id}"))
            .await?;
        Ok(page
            .tokens
            .iter()
            .find(|t| t.token_id == *token_id)
            .map_or(0, |t| t.balance))
    }

    /// Every token balance held by the account.
    pub async fn token_balances(&self, account_id: &AccountId) -> Result<Vec<TokenBalance>, MirrorError> {
        let mut path = format!("/api/v1/accounts/{account_id}/tokens?limit=100");
        let mut out = Vec::new();
        for _ in 0..MAX_PAGES {
            let page: TokenBalancesPage = self.get_json(&path).await?;
            out.extend(page.tokens);
            match page.links.and_then(|l| l.next) {
                Some(next) => path = next,
                None => break,
            }
        }
        Ok(out)
    }

    pub async fn token_details(&self, token_id: &TokenId) -> Result<TokenDetails, MirrorError> {
        self.get_json(&format!("/api/v1/tokens/{token_id}")).await
    }

    /// Accounts holding `token_id`, optionally only those with at least
    /// `min_balance` base units.
    pub async fn token_holders(
        &self,
        token_id: &TokenId,
        min_balance: Option<u64>,
    ) -> Result<Vec<TokenHolder>, MirrorError> {
        let mut path = format!("/api/v1/tokens/{token_id}/balances?limit=100");
        if let Some(min) = min_balance {
            path.push_str(&format!("&account.balance=gte:{min}"));
        }
        let mut out = Vec::new();
        for _ in 0..MAX_PAGES {
            let page: TokenHoldersPage = self.get_json(&path).await?;
            out.extend(page.balances);
            match page.links.and_then(|l| l.next) {
                Some(next) => path = next,
                None => break,
            }
        }
        Ok(out)
    }

    pub async fn topic_info(&self, topic_id: &TopicId) -> Result<TopicInfo, MirrorError> {
        self.get_json(&format!("/api/v1/topics/{topic_id}")).await
    }

    /// Messages on `topic_id` in sequence order, optionally bounded by
    /// consensus time (both bounds inclusive).
    pub async fn topic_messages(
        &self,
        topic_id: &TopicId,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<TopicMessage>, MirrorError> {
        let mut path = format!("/api/v1/topics/{topic_id}/messages?limit=100&order=asc");
        if let Some(from) = from {
            path.push_str(&format!("&timestamp=gte:{from}"));
        }
        if let Some(to) = to {
            path.push_str(&format!("&timestamp=lte:{to}"));
        }
        let mut out = Vec::new();
        for _ in 0..MAX_PAGES {
            let page: TopicMessagesPage = self.get_json(&path).await?;
            out.extend(page.messages);
            match page.links.and_then(|l| l.next) {
                Some(next) => path = next,
                None => break,
            }
        }
        Ok(out)
    }

    /// Airdrops offered to `account_id` that it has not yet claimed.
    pub async fn pending_airdrops(&self, account_id: &AccountId) -> Result<Vec<PendingAirdrop>, MirrorError> {
        let mut path = format!("/api/v1/accounts/{account_id}/airdrops/pending?limit=100");
        let mut out = Vec::new();
        for _ in 0..MAX_PAGES {
            let page: PendingAirdropsPage = self.get_json(&path).await?;
            out.extend(page.airdrops);
            match page.links.and_then(|l| l.next) {
                Some(next) => path = next,
                None => break,
            }
        }
        Ok(out)
    }
}
