//! Nullable ledger: record submissions and answer with scripted receipts.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use ledgerkit_transactions::{
    FrozenTransaction, LedgerClient, SubmitError, TransactionReceipt, TransactionResponse,
};
use ledgerkit_types::{Status, TokenId, TopicId, TransactionId};

/// How the next receipt request is answered.
#[derive(Clone, Debug)]
enum ReceiptScript {
    Respond,
    Fail(SubmitError),
    /// Never resolves; lets callers exercise their own timeout.
    Hang,
}

#[derive(Debug)]
struct State {
    submitted: Vec<FrozenTransaction>,
    receipt_requests: Vec<TransactionId>,
    precheck: Option<Status>,
    submit_failure: Option<String>,
    receipt: ReceiptScript,
    status: Status,
    token_id: Option<TokenId>,
    topic_id: Option<TopicId>,
    serials: Vec<i64>,
    total_supply: Option<u64>,
    sequence_number: Option<u64>,
}

/// A test ledger that records transactions instead of sending them.
///
/// By default every submission is accepted and every receipt is `SUCCESS`.
#[derive(Debug)]
pub struct NullLedger {
    state: Mutex<State>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                submitted: Vec::new(),
                receipt_requests: Vec::new(),
                precheck: None,
                submit_failure: None,
                receipt: ReceiptScript::Respond,
                status: Status::Success,
                token_id: None,
                topic_id: None,
                serials: Vec::new(),
                total_supply: None,
                sequence_number: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Receipts report `status` instead of `SUCCESS`.
    pub fn with_receipt_status(self, status: Status) -> Self {
        self.state().status = status;
        self
    }

    pub fn with_created_token(self, token_id: TokenId) -> Self {
        self.state().token_id = Some(token_id);
        self
    }

    pub fn with_created_topic(self, topic_id: TopicId) -> Self {
        self.state().topic_id = Some(topic_id);
        self
    }

    pub fn with_serials(self, serials: Vec<i64>) -> Self {
        self.state().serials = serials;
        self
    }

    pub fn with_total_supply(self, total_supply: u64) -> Self {
        self.state().total_supply = Some(total_supply);
        self
    }

    pub fn with_sequence_number(self, sequence_number: u64) -> Self {
        self.state().sequence_number = Some(sequence_number);
        self
    }

    /// Submissions are refused before consensus with `status`.
    pub fn rejecting_at_precheck(self, status: Status) -> Self {
        self.state().precheck = Some(status);
        self
    }

    /// Submissions fail with a transport error.
    pub fn failing_submit(self, message: impl Into<String>) -> Self {
        self.state().submit_failure = Some(message.into());
        self
    }

    /// Receipt requests fail with `error`.
    pub fn failing_receipts(self, error: SubmitError) -> Self {
        self.state().receipt = ReceiptScript::Fail(error);
        self
    }

    /// Receipt requests never complete.
    pub fn hanging_receipts(self) -> Self {
        self.state().receipt = ReceiptScript::Hang;
        self
    }

    /// Every transaction handed to `submit` (for assertions).
    pub fn submitted(&self) -> Vec<FrozenTransaction> {
        self.state().submitted.clone()
    }

    pub fn submission_count(&self) -> usize {
        self.state().submitted.len()
    }

    pub fn receipt_requests(&self) -> Vec<TransactionId> {
        self.state().receipt_requests.clone()
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for NullLedger {
    async fn submit(&self, transaction: &FrozenTransaction) -> Result<TransactionResponse, SubmitError> {
        let mut state = self.state();
        state.submitted.push(transaction.clone());
        if let Some(message) = &state.submit_failure {
            return Err(SubmitError::Transport(message.clone()));
        }
        if let Some(status) = &state.precheck {
            return Err(SubmitError::PreCheck(status.clone()));
        }
        Ok(TransactionResponse {
            transaction_id: *transaction.transaction_id(),
            node_id: transaction.node_account_id(),
        })
    }

    async fn receipt(&self, transaction_id: &TransactionId) -> Result<TransactionReceipt, SubmitError> {
        let script = {
            let mut state = self.state();
            state.receipt_requests.push(*transaction_id);
            state.receipt.clone()
        };
        match script {
            ReceiptScript::Respond => {}
            ReceiptScript::Fail(error) => return Err(error),
            ReceiptScript::Hang => std::future::pending::<()>().await,
        }

        let state = self.state();
        let mut receipt = TransactionReceipt::new(*transaction_id, state.status.clone())
            .with_serials(state.serials.clone());
        // consensus assigns nothing to a rejected transaction
        if state.status.is_success() {
            receipt.token_id = state.token_id;
            receipt.topic_id = state.topic_id;
            receipt.total_supply = state.total_supply;
            receipt.topic_sequence_number = state.sequence_number;
        } else {
            receipt.serials.clear();
        }
        Ok(receipt)
    }
}
