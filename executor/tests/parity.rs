//! The same request under the same identity yields the same logical
//! transaction in both modes; only the transaction id and signatures differ.

use ledgerkit_crypto::keypair_from_seed;
use ledgerkit_executor::{
    AirdropRecipient, Asset, ExecutionMode, ExecutorAccountDetails, KitConfig, OperationRequest, Operator,
    TransactionExecutor,
};
use ledgerkit_nullables::{NullDirectory, NullLedger};
use ledgerkit_transactions::FrozenTransaction;
use ledgerkit_types::{AccountId, PendingAirdropId, TokenId, TopicId};

const ISSUER: AccountId = AccountId::from_num(1001);

fn requests() -> Vec<OperationRequest> {
    let token = TokenId::from_num(6006);
    vec![
        OperationRequest::CreateFungibleToken {
            name: "GameGold".into(),
            symbol: "GG".into(),
            decimals: 2,
            initial_supply: 750_000,
            max_supply: Some(1_000_000),
            is_supply_key: true,
            is_admin_key: true,
            is_metadata_key: true,
            token_metadata: Some("ipfs://gg".into()),
            memo: Some("arcade".into()),
        },
        OperationRequest::CreateNonFungibleToken {
            name: "Relics".into(),
            symbol: "RLC".into(),
            max_supply: None,
            is_supply_key: false,
            is_admin_key: true,
            is_metadata_key: false,
            token_metadata: None,
            memo: None,
        },
        OperationRequest::Transfer {
            asset: Asset::Hbar,
            to_account_id: AccountId::from_num(2002),
            amount: 1_000,
        },
        OperationRequest::Transfer {
            asset: Asset::Token(token),
            to_account_id: AccountId::from_num(2002),
            amount: 50,
        },
        OperationRequest::MintToken { token_id: token, amount: 10 },
        OperationRequest::MintNft {
            token_id: TokenId::from_num(7007),
            metadata: "ipfs://relic/1".into(),
        },
        OperationRequest::AssociateToken {
            token_ids: vec![token, TokenId::from_num(7007)],
        },
        OperationRequest::DissociateToken { token_ids: vec![token] },
        OperationRequest::Airdrop {
            token_id: token,
            recipients: vec![
                AirdropRecipient {
                    account_id: AccountId::from_num(3003),
                    amount: 5,
                },
                AirdropRecipient {
                    account_id: AccountId::from_num(3004),
                    amount: 7,
                },
            ],
        },
        OperationRequest::ClaimAirdrop {
            airdrop: PendingAirdropId::new(token, AccountId::from_num(3003), ISSUER),
        },
        OperationRequest::RejectToken { token_ids: vec![token] },
        OperationRequest::CreateTopic {
            memo: "scores".into(),
            is_submit_key: true,
        },
        OperationRequest::DeleteTopic {
            topic_id: TopicId::from_num(4004),
        },
        OperationRequest::SubmitTopicMessage {
            topic_id: TopicId::from_num(4004),
            message: "level 3 cleared".into(),
        },
        OperationRequest::ApproveAllowance {
            asset: Asset::Hbar,
            spender_account_id: AccountId::from_num(2002),
            amount: 99,
        },
        OperationRequest::ApproveAllowance {
            asset: Asset::Token(token),
            spender_account_id: AccountId::from_num(2002),
            amount: 99,
        },
    ]
}

#[tokio::test]
async fn custodial_and_non_custodial_build_the_same_transaction() {
    let keys = keypair_from_seed(&[7u8; 32]);
    let public_key = keys.public;
    let operator = Operator::new(ISSUER, keys.private).expect("operator");
    let executor = TransactionExecutor::new(KitConfig::default(), NullLedger::new(), NullDirectory::new())
        .expect("executor")
        .with_operator(operator);
    let mode = ExecutionMode::NonCustodial(ExecutorAccountDetails::account(ISSUER).with_public_key(public_key));

    for (i, request) in requests().iter().enumerate() {
        executor
            .execute(request, &ExecutionMode::Custodial)
            .await
            .unwrap_or_else(|e| panic!("custodial {}: {e}", request.kind()));
        let custodial = executor.ledger().submitted().remove(i);

        let result = executor
            .execute(request, &mode)
            .await
            .unwrap_or_else(|e| panic!("non-custodial {}: {e}", request.kind()));
        let unsigned = result.unsigned().expect("unsigned result");
        let non_custodial = FrozenTransaction::from_base64(&unsigned.transaction_bytes).expect("decodes");

        assert_eq!(custodial.body(), non_custodial.body(), "{}", request.kind());
        assert_eq!(custodial.memo(), non_custodial.memo());
        assert_eq!(custodial.payer(), non_custodial.payer());
        assert_eq!(custodial.max_transaction_fee(), non_custodial.max_transaction_fee());
        assert_eq!(custodial.valid_duration_secs(), non_custodial.valid_duration_secs());
        assert!(custodial.is_signed());
        assert!(!non_custodial.is_signed());
    }
    assert_eq!(executor.ledger().submission_count(), requests().len());
}
