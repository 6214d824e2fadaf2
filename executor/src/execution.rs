//! The executor: drives one request through the custodial or the
//! non-custodial path.
//!
//! ```text
//! custodial:      build → freeze(operator) → sign → submit → receipt → format
//! non-custodial:  resolve → build → bind id(executor) → freeze → bytes → base64
//! ```

use ledgerkit_mirror::AccountKeyDirectory;
use ledgerkit_transactions::{LedgerClient, SubmitError, TransactionReceipt, TransactionResponse};
use ledgerkit_types::TransactionId;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{KitConfig, Operator};
use crate::error::ExecutionError;
use crate::request::{ExecutionMode, ExecutorAccountDetails, OperationRequest};
use crate::resolver::ExecutorAccountResolver;
use crate::result::{error_envelope, ExecutedResult, OperationResult, UnsignedResult};
use crate::strategy::{self, format_result, BuildContext};

/// Runs operation requests against a ledger.
///
/// Holds no per-call state; share it behind an `Arc` for concurrent use.
/// Concurrent custodial calls paying from the same account must be
/// serialized by the caller.
pub struct TransactionExecutor<L, D> {
    config: KitConfig,
    operator: Option<Operator>,
    ledger: L,
    directory: D,
}

impl<L: LedgerClient, D: AccountKeyDirectory> TransactionExecutor<L, D> {
    /// Build an executor from a session config. The operator, if any, is
    /// parsed once here.
    pub fn new(config: KitConfig, ledger: L, directory: D) -> Result<Self, ExecutionError> {
        config.validate()?;
        let operator = config.operator()?;
        Ok(Self {
            config,
            operator,
            ledger,
            directory,
        })
    }

    /// Replace the configured operator.
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn config(&self) -> &KitConfig {
        &self.config
    }

    pub fn operator(&self) -> Option<&Operator> {
        self.operator.as_ref()
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub async fn execute(
        &self,
        request: &OperationRequest,
        mode: &ExecutionMode,
    ) -> Result<OperationResult, ExecutionError> {
        match mode {
            ExecutionMode::Custodial => self.execute_custodial(request).await.map(OperationResult::Executed),
            ExecutionMode::NonCustodial(details) => self
                .prepare_unsigned(request, details)
                .await
                .map(OperationResult::Unsigned),
        }
    }

    /// JSON in, JSON envelope out. Errors become the error envelope.
    pub async fn execute_json(&self, request_json: &str, mode: &ExecutionMode) -> Value {
        let outcome = match OperationRequest::from_json(request_json) {
            Ok(request) => self.execute(&request, mode).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(result) => result.to_envelope(),
            Err(e) => {
                warn!(code = e.code(), error = %e, "operation failed");
                error_envelope(&e)
            }
        }
    }

    // ── Custodial ──────────────────────────────────────────────────────

    /// Build, sign with the operator, submit, and wait for the receipt.
    ///
    /// Pre-check and consensus rejections are returned as results. A submit
    /// that never reached a node is a network error; once the transaction
    /// may have reached consensus, failures are ambiguous and not retried.
    pub async fn execute_custodial(&self, request: &OperationRequest) -> Result<ExecutedResult, ExecutionError> {
        let operator = self.operator.as_ref().ok_or_else(|| {
            ExecutionError::MissingAuthorization("no operator configured for custodial execution".into())
        })?;
        let ctx = BuildContext {
            issuer: operator.account_id,
            signer_key: operator.public_key,
        };

        let unsigned = strategy::build(request, &ctx)?;
        let mut frozen = unsigned.freeze(&self.config.freeze_context(Some(operator.account_id)))?;
        let transaction_id = *frozen.transaction_id();
        debug!(
            kind = frozen.body().kind(),
            tx = %transaction_id,
            node = %frozen.node_account_id(),
            max_fee = %frozen.max_transaction_fee(),
            "transaction frozen"
        );
        frozen.sign_with(&operator.private_key)?;

        let response = match self.ledger.submit(&frozen).await {
            Ok(response) => response,
            Err(SubmitError::PreCheck(status)) => {
                warn!(tx = %transaction_id, %status, "rejected at pre-check");
                let response = TransactionResponse {
                    transaction_id,
                    node_id: frozen.node_account_id(),
                };
                let receipt = TransactionReceipt::new(transaction_id, status);
                return Ok(format_result(request, &response, &receipt));
            }
            Err(SubmitError::Timeout) => {
                warn!(tx = %transaction_id, "submission timed out");
                return Err(ExecutionError::AmbiguousOutcome {
                    transaction_id,
                    reason: SubmitError::Timeout.to_string(),
                });
            }
            Err(SubmitError::Transport(message)) => {
                warn!(tx = %transaction_id, error = %message, "submission failed");
                return Err(ExecutionError::Network(message));
            }
        };
        info!(tx = %response.transaction_id, node = %response.node_id, "submitted");

        let receipt = self.await_receipt(&response.transaction_id).await?;
        if receipt.status.is_success() {
            info!(tx = %response.transaction_id, "receipt SUCCESS");
        } else {
            warn!(tx = %response.transaction_id, status = %receipt.status, "rejected at consensus");
        }
        Ok(format_result(request, &response, &receipt))
    }

    async fn await_receipt(&self, transaction_id: &TransactionId) -> Result<TransactionReceipt, ExecutionError> {
        let timeout = self.config.receipt_timeout();
        match tokio::time::timeout(timeout, self.ledger.receipt(transaction_id)).await {
            Ok(Ok(receipt)) => Ok(receipt),
            Ok(Err(e)) => {
                warn!(tx = %transaction_id, error = %e, "receipt lookup failed");
                Err(ExecutionError::AmbiguousOutcome {
                    transaction_id: *transaction_id,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                warn!(tx = %transaction_id, timeout_secs = timeout.as_secs(), "receipt wait timed out");
                Err(ExecutionError::AmbiguousOutcome {
                    transaction_id: *transaction_id,
                    reason: format!("no receipt within {}s", timeout.as_secs()),
                })
            }
        }
    }

    // ── Non-custodial ──────────────────────────────────────────────────

    /// Build and freeze for the executor account, then return the base64
    /// bytes. Nothing is signed or submitted.
    pub async fn prepare_unsigned(
        &self,
        request: &OperationRequest,
        details: &ExecutorAccountDetails,
    ) -> Result<UnsignedResult, ExecutionError> {
        let resolved = ExecutorAccountResolver::new(&self.directory).resolve(details).await?;
        let (Some(account_id), Some(signer_key)) = (resolved.account_id, resolved.public_key) else {
            return Err(ExecutionError::MissingAuthorization(
                "executor account id is required to bind the transaction id".into(),
            ));
        };
        let ctx = BuildContext {
            issuer: account_id,
            signer_key,
        };

        let mut unsigned = strategy::build(request, &ctx)?;
        unsigned.set_transaction_id(TransactionId::generate(account_id));
        let frozen = unsigned.freeze(&self.config.freeze_context(None))?;
        let transaction_bytes = frozen.to_base64()?;
        info!(
            kind = frozen.body().kind(),
            tx = %frozen.transaction_id(),
            bytes = transaction_bytes.len(),
            "unsigned transaction prepared"
        );

        Ok(UnsignedResult {
            operation: request.kind(),
            transaction_id: *frozen.transaction_id(),
            transaction_bytes,
        })
    }
}
