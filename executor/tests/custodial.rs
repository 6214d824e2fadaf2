//! Custodial execution end to end against the nullable ledger:
//! build → freeze → sign → submit → receipt → formatted result.

use ledgerkit_crypto::keypair_from_seed;
use ledgerkit_executor::{
    ExecutionError, ExecutionMode, KitConfig, OperationPayload, OperationRequest, Operator,
    TransactionExecutor,
};
use ledgerkit_nullables::{NullDirectory, NullLedger};
use ledgerkit_transactions::{SubmitError, TransactionBody};
use ledgerkit_types::{AccountId, Hbar, Status, TokenId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const OPERATOR: AccountId = AccountId::from_num(1001);

fn operator() -> Operator {
    Operator::new(OPERATOR, keypair_from_seed(&[7u8; 32]).private).expect("valid operator")
}

fn executor_with(config: KitConfig, ledger: NullLedger) -> TransactionExecutor<NullLedger, NullDirectory> {
    TransactionExecutor::new(config, ledger, NullDirectory::new())
        .expect("executor")
        .with_operator(operator())
}

fn executor(ledger: NullLedger) -> TransactionExecutor<NullLedger, NullDirectory> {
    executor_with(KitConfig::default(), ledger)
}

fn game_gold() -> OperationRequest {
    OperationRequest::CreateFungibleToken {
        name: "GameGold".into(),
        symbol: "GG".into(),
        decimals: 2,
        initial_supply: 750_000,
        max_supply: None,
        is_supply_key: false,
        is_admin_key: true,
        is_metadata_key: false,
        token_metadata: None,
        memo: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn game_gold_is_created() {
    let ledger = NullLedger::new().with_created_token(TokenId::from_num(6006));
    let executor = executor(ledger);

    let result = executor
        .execute(&game_gold(), &ExecutionMode::Custodial)
        .await
        .expect("executed");
    let executed = result.executed().expect("custodial result");
    assert!(executed.status.is_success());
    assert_eq!(
        executed.payload,
        OperationPayload::TokenCreated {
            token_id: Some(TokenId::from_num(6006)),
            solidity_address: TokenId::from_num(6006).to_solidity_address(),
            token_type: "FUNGIBLE_COMMON",
            decimals: 2,
            initial_supply: 750_000,
        }
    );

    let envelope = result.to_envelope();
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["tokenId"], "0.0.6006");
    assert_eq!(envelope["decimals"], 2);
}

#[tokio::test]
async fn submitted_transaction_is_frozen_for_the_operator_and_signed() {
    let executor = executor(NullLedger::new());
    executor
        .execute(&game_gold(), &ExecutionMode::Custodial)
        .await
        .expect("executed");

    let submitted = executor.ledger().submitted();
    assert_eq!(submitted.len(), 1);
    let tx = &submitted[0];
    assert_eq!(tx.payer(), OPERATOR);
    assert_eq!(tx.valid_duration_secs(), 180);
    assert_eq!(tx.max_transaction_fee(), Hbar::from_hbars(40));
    assert_eq!(tx.signatures().len(), 1);
    assert_eq!(tx.signatures()[0].public_key, operator().public_key);
    assert!(tx.verify_signatures().expect("verify"));

    let TransactionBody::TokenCreate(body) = tx.body() else {
        panic!("expected a token create body");
    };
    assert_eq!(body.admin_key, Some(operator().public_key));
    assert_eq!(body.treasury_account_id, OPERATOR);
    assert_eq!(executor.ledger().receipt_requests(), vec![*tx.transaction_id()]);
}

#[tokio::test]
async fn session_fee_ceiling_applies_to_every_kind() {
    let config = KitConfig {
        max_transaction_fee_tinybars: Some(300_000_000),
        transaction_valid_duration_secs: 120,
        ..KitConfig::default()
    };
    let executor = executor_with(config, NullLedger::new());
    let requests = [
        game_gold(),
        OperationRequest::MintToken {
            token_id: TokenId::from_num(6006),
            amount: 5,
        },
    ];
    for request in &requests {
        executor.execute(request, &ExecutionMode::Custodial).await.expect("executed");
    }
    for tx in executor.ledger().submitted() {
        assert_eq!(tx.max_transaction_fee(), Hbar::from_hbars(3));
        assert_eq!(tx.valid_duration_secs(), 120);
    }
}

#[tokio::test]
async fn mint_without_supply_key_is_a_rejection_result() {
    let ledger = NullLedger::new()
        .with_receipt_status(Status::TokenHasNoSupplyKey)
        .with_total_supply(750_000);
    let executor = executor(ledger);
    let request = OperationRequest::MintToken {
        token_id: TokenId::from_num(6006),
        amount: 100,
    };

    let result = executor
        .execute(&request, &ExecutionMode::Custodial)
        .await
        .expect("a rejection is still a result");
    let executed = result.executed().expect("custodial result");
    assert_eq!(executed.status, Status::TokenHasNoSupplyKey);

    let submitted = executor.ledger().submitted();
    assert_eq!(executed.transaction_hash, submitted[0].transaction_id().to_string());
    assert!(matches!(
        executed.payload,
        OperationPayload::Minted { total_supply: None, .. }
    ));
    assert_eq!(result.to_envelope()["status"], "TOKEN_HAS_NO_SUPPLY_KEY");
}

#[tokio::test]
async fn precheck_rejection_is_a_result_without_receipt_wait() {
    let ledger = NullLedger::new().rejecting_at_precheck(Status::InsufficientPayerBalance);
    let executor = executor(ledger);

    let result = executor
        .execute(&game_gold(), &ExecutionMode::Custodial)
        .await
        .expect("pre-check rejection is a result");
    let executed = result.executed().expect("custodial result");
    assert_eq!(executed.status, Status::InsufficientPayerBalance);
    assert!(!executed.transaction_hash.is_empty());
    assert!(matches!(
        executed.payload,
        OperationPayload::TokenCreated { token_id: None, .. }
    ));
    assert!(executor.ledger().receipt_requests().is_empty());
}

#[tokio::test]
async fn transport_failure_on_submit_is_a_network_error() {
    let executor = executor(NullLedger::new().failing_submit("connection reset"));
    let err = executor
        .execute(&game_gold(), &ExecutionMode::Custodial)
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutionError::Network(_)));
    assert_eq!(err.code(), "NETWORK_ERROR");
}

#[tokio::test]
async fn receipt_timeout_is_ambiguous() {
    let config = KitConfig {
        receipt_timeout_secs: 1,
        ..KitConfig::default()
    };
    let executor = executor_with(config, NullLedger::new().hanging_receipts());

    let err = executor
        .execute(&game_gold(), &ExecutionMode::Custodial)
        .await
        .unwrap_err();
    let submitted = executor.ledger().submitted();
    match err {
        ExecutionError::AmbiguousOutcome { transaction_id, .. } => {
            assert_eq!(&transaction_id, submitted[0].transaction_id());
        }
        other => panic!("expected an ambiguous outcome, got {other:?}"),
    }
    // no resubmission under a fresh id
    assert_eq!(executor.ledger().submission_count(), 1);
}

#[tokio::test]
async fn receipt_failure_after_submit_is_ambiguous() {
    let ledger = NullLedger::new().failing_receipts(SubmitError::Transport("socket closed".into()));
    let executor = executor(ledger);
    let err = executor
        .execute(&game_gold(), &ExecutionMode::Custodial)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "AMBIGUOUS_OUTCOME");
}

#[tokio::test]
async fn custodial_without_operator_is_missing_authorization() {
    let executor =
        TransactionExecutor::new(KitConfig::default(), NullLedger::new(), NullDirectory::new()).expect("executor");
    let err = executor
        .execute(&game_gold(), &ExecutionMode::Custodial)
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutionError::MissingAuthorization(_)));
    assert_eq!(executor.ledger().submission_count(), 0);
}

#[tokio::test]
async fn malformed_reference_never_reaches_the_network() {
    let executor = executor(NullLedger::new());
    let request = OperationRequest::DeleteTopic {
        topic_id: "0.0.0".parse().expect("parses"),
    };
    let err = executor
        .execute(&request, &ExecutionMode::Custodial)
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutionError::MalformedIdentifier(_)));
    assert_eq!(executor.ledger().submission_count(), 0);
}

#[tokio::test]
async fn nft_mint_reports_serials() {
    let ledger = NullLedger::new().with_serials(vec![1]);
    let executor = executor(ledger);
    let request = OperationRequest::MintNft {
        token_id: TokenId::from_num(7007),
        metadata: "ipfs://relic/1".into(),
    };
    let result = executor
        .execute(&request, &ExecutionMode::Custodial)
        .await
        .expect("executed");
    let envelope = result.to_envelope();
    assert_eq!(envelope["serials"], serde_json::json!([1]));

    let TransactionBody::TokenMint(body) = executor.ledger().submitted()[0].body().clone() else {
        panic!("expected a mint body");
    };
    assert_eq!(body.metadata, vec![b"ipfs://relic/1".to_vec()]);
}
