//! Result envelopes.

use ledgerkit_types::{Status, TransactionId};
use serde_json::{json, Map, Value};

use crate::error::ExecutionError;
use crate::strategy::OperationPayload;

/// The outcome of a submitted transaction, success or ledger rejection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutedResult {
    pub operation: &'static str,
    pub status: Status,
    /// Transaction id string; meaningful for audit even on rejection.
    pub transaction_hash: String,
    pub message: String,
    pub payload: OperationPayload,
}

/// A frozen, unsigned transaction awaiting external authorization.
/// Not a completion signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsignedResult {
    pub operation: &'static str,
    pub transaction_id: TransactionId,
    /// Base64 of the frozen transaction bytes.
    pub transaction_bytes: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationResult {
    Executed(ExecutedResult),
    Unsigned(UnsignedResult),
}

impl OperationResult {
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed(_))
    }

    pub fn executed(&self) -> Option<&ExecutedResult> {
        match self {
            Self::Executed(r) => Some(r),
            Self::Unsigned(_) => None,
        }
    }

    pub fn unsigned(&self) -> Option<&UnsignedResult> {
        match self {
            Self::Unsigned(r) => Some(r),
            Self::Executed(_) => None,
        }
    }

    /// Render the JSON envelope returned to tool callers.
    pub fn to_envelope(&self) -> Value {
        match self {
            Self::Executed(r) => {
                let mut map = Map::new();
                let status = if r.status.is_success() {
                    "success".to_string()
                } else {
                    r.status.to_string()
                };
                map.insert("status".into(), Value::String(status));
                map.insert("receiptStatus".into(), Value::String(r.status.to_string()));
                map.insert("txHash".into(), Value::String(r.transaction_hash.clone()));
                map.insert("message".into(), Value::String(r.message.clone()));
                if let Ok(Value::Object(fields)) = serde_json::to_value(&r.payload) {
                    for (key, value) in fields {
                        map.entry(key).or_insert(value);
                    }
                }
                Value::Object(map)
            }
            Self::Unsigned(r) => json!({
                "status": "success",
                "txBytes": r.transaction_bytes,
                "transactionId": r.transaction_id.to_string(),
                "message": "Transaction bytes created; authorization still required",
            }),
        }
    }
}

/// Envelope for a call that produced no result.
pub fn error_envelope(error: &ExecutionError) -> Value {
    json!({
        "status": "error",
        "message": error.to_string(),
        "code": error.code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerkit_types::{AccountId, TokenId};

    fn executed(status: Status) -> OperationResult {
        OperationResult::Executed(ExecutedResult {
            operation: "mintToken",
            status,
            transaction_hash: "0.0.1001@1700000000.000000001".into(),
            message: "Token mint succeeded".into(),
            payload: OperationPayload::Minted {
                token_id: TokenId::from_num(6006),
                amount: 10,
                total_supply: None,
            },
        })
    }

    #[test]
    fn success_envelope_flattens_payload() {
        let env = executed(Status::Success).to_envelope();
        assert_eq!(env["status"], "success");
        assert_eq!(env["receiptStatus"], "SUCCESS");
        assert_eq!(env["tokenId"], "0.0.6006");
        assert_eq!(env["amount"], 10);
        assert!(env.get("totalSupply").is_none());
    }

    #[test]
    fn rejection_envelope_carries_status_code() {
        let env = executed(Status::TokenHasNoSupplyKey).to_envelope();
        assert_eq!(env["status"], "TOKEN_HAS_NO_SUPPLY_KEY");
        assert_eq!(env["txHash"], "0.0.1001@1700000000.000000001");
    }

    #[test]
    fn unsigned_envelope() {
        let tx_id: TransactionId = "0.0.5005@1700000000.5".parse().unwrap();
        let result = OperationResult::Unsigned(UnsignedResult {
            operation: "createTopic",
            transaction_id: tx_id,
            transaction_bytes: "AAEC".into(),
        });
        assert!(!result.is_executed());
        let env = result.to_envelope();
        assert_eq!(env["txBytes"], "AAEC");
        assert_eq!(env["transactionId"], tx_id.to_string());
        assert!(env["message"].as_str().unwrap().contains("authorization still required"));
        assert_eq!(tx_id.account_id, AccountId::from_num(5005));
    }

    #[test]
    fn error_envelope_has_code() {
        let env = error_envelope(&ExecutionError::MissingAuthorization("no operator".into()));
        assert_eq!(env["status"], "error");
        assert_eq!(env["code"], "MISSING_AUTHORIZATION");
    }
}
