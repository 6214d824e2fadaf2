//! Dual-mode transaction execution.
//!
//! A caller hands the [`TransactionExecutor`] an [`OperationRequest`] and an
//! [`ExecutionMode`]:
//!
//! - **Custodial**: the executor holds the operator key, signs, submits, and
//!   waits for the consensus receipt, returning an [`ExecutedResult`].
//! - **Non-custodial**: the executor holds no key. It resolves the executor
//!   account's public key, binds a transaction id to that account, freezes,
//!   and returns the base64 bytes as an [`UnsignedResult`] for the executor
//!   to sign and submit.
//!
//! Ledger rejections are results, not errors; see [`ExecutionError`] for
//! what is.

pub mod config;
pub mod error;
pub mod execution;
pub mod request;
pub mod resolver;
pub mod result;
pub mod strategy;

pub use config::{KitConfig, Operator};
pub use error::{ConfigError, ExecutionError, ResolveError};
pub use execution::TransactionExecutor;
pub use request::{AirdropRecipient, Asset, ExecutionMode, ExecutorAccountDetails, OperationRequest};
pub use resolver::ExecutorAccountResolver;
pub use result::{error_envelope, ExecutedResult, OperationResult, UnsignedResult};
pub use strategy::{build, format_result, BuildContext, OperationPayload};
