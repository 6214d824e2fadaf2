//! Account key lookup used to resolve an executor's signing key.

use async_trait::async_trait;
use ledgerkit_types::{AccountId, PublicKey};

use crate::client::MirrorNodeClient;
use crate::error::MirrorError;

/// Read-only lookup of an account's current signing key.
#[async_trait]
pub trait AccountKeyDirectory: Send + Sync {
    async fn account_public_key(&self, account_id: &AccountId) -> Result<PublicKey, MirrorError>;
}

#[async_trait]
impl AccountKeyDirectory for MirrorNodeClient {
    async fn account_public_key(&self, account_id: &AccountId) -> Result<PublicKey, MirrorError> {
        MirrorNodeClient::account_public_key(self, account_id).await
    }
}
