//! Executor identity resolution for non-custodial execution.

use ledgerkit_mirror::AccountKeyDirectory;
use tracing::debug;

use crate::error::ResolveError;
use crate::request::ExecutorAccountDetails;

/// Completes an executor's public key from the account directory.
///
/// Performs at most one lookup per call and caches nothing; callers issuing
/// several operations for the same executor should keep the resolved value.
pub struct ExecutorAccountResolver<'a, D: ?Sized> {
    directory: &'a D,
}

impl<'a, D: AccountKeyDirectory + ?Sized> ExecutorAccountResolver<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self { directory }
    }

    pub async fn resolve(&self, details: &ExecutorAccountDetails) -> Result<ExecutorAccountDetails, ResolveError> {
        if details.public_key.is_some() {
            return Ok(*details);
        }
        let account_id = details.account_id.ok_or(ResolveError::MissingAuthorization)?;
        let key = self.directory.account_public_key(&account_id).await?;
        debug!(account = %account_id, algorithm = key.algorithm().as_str(), "resolved executor key");
        Ok(details.with_public_key(key))
    }
}
