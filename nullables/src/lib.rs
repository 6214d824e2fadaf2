//! Nullable infrastructure for deterministic testing.
//!
//! The executor talks to the outside world through two traits:
//! [`LedgerClient`](ledgerkit_transactions::LedgerClient) and
//! [`AccountKeyDirectory`](ledgerkit_mirror::AccountKeyDirectory). This crate
//! provides test implementations that:
//! - Return scripted outcomes
//! - Record every call for assertions
//! - Never touch the network

pub mod directory;
pub mod ledger;

pub use directory::NullDirectory;
pub use ledger::NullLedger;
