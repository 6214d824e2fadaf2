//! Nullable account key directory.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ledgerkit_mirror::{AccountKeyDirectory, MirrorError};
use ledgerkit_types::{AccountId, PublicKey};

/// A key directory backed by a fixed map. Counts lookups.
#[derive(Debug, Default)]
pub struct NullDirectory {
    keys: HashMap<AccountId, PublicKey>,
    failure: Option<MirrorError>,
    lookups: AtomicUsize,
}

impl NullDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, account_id: AccountId, key: PublicKey) -> Self {
        self.keys.insert(account_id, key);
        self
    }

    /// Every lookup fails with `error`.
    pub fn failing(mut self, error: MirrorError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Number of lookups performed so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountKeyDirectory for NullDirectory {
    async fn account_public_key(&self, account_id: &AccountId) -> Result<PublicKey, MirrorError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.keys
            .get(account_id)
            .copied()
            .ok_or_else(|| MirrorError::NotFound(format!("/api/v1/accounts/{account_id}")))
    }
}
