//! Per-operation build and format rules.
//!
//! One table-driven pair of functions over [`OperationRequest`]: `build`
//! turns a request into an unfrozen transaction, `format_result` turns a
//! response/receipt pair into an [`ExecutedResult`]. Both are pure.

use ledgerkit_transactions::allowance::CryptoApproveAllowanceBody;
use ledgerkit_transactions::token::{
    TokenAirdropBody, TokenAssociateBody, TokenClaimAirdropBody, TokenCreateBody,
    TokenDissociateBody, TokenMintBody, TokenRejectBody, TokenType,
};
use ledgerkit_transactions::topic::{TopicCreateBody, TopicDeleteBody, TopicMessageSubmitBody};
use ledgerkit_transactions::transfer::CryptoTransferBody;
use ledgerkit_transactions::validation::validate_body;
use ledgerkit_transactions::{
    TransactionBody, TransactionError, TransactionReceipt, TransactionResponse, UnsignedTransaction,
};
use ledgerkit_types::{AccountId, Hbar, PendingAirdropId, PublicKey, TokenId, TopicId};
use serde::Serialize;

use crate::request::{AirdropRecipient, Asset, OperationRequest};
use crate::result::ExecutedResult;

/// The acting account and the key embedded wherever a request asks for one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildContext {
    pub issuer: AccountId,
    pub signer_key: PublicKey,
}

// ── Build ──────────────────────────────────────────────────────────────

/// Build the unfrozen transaction for `request`.
///
/// Fails only on references that are not valid ledger entities, empty
/// token or recipient lists, and amounts beyond the ledger's signed range.
/// Everything else (balances, associations, key presence) is judged at
/// consensus and reported through [`format_result`].
pub fn build(request: &OperationRequest, ctx: &BuildContext) -> Result<UnsignedTransaction, TransactionError> {
    let body = build_body(request, ctx)?;
    validate_body(&body)?;
    Ok(UnsignedTransaction::new(body))
}

fn build_body(request: &OperationRequest, ctx: &BuildContext) -> Result<TransactionBody, TransactionError> {
    let body = match request {
        OperationRequest::CreateFungibleToken {
            name,
            symbol,
            decimals,
            initial_supply,
            max_supply,
            is_supply_key,
            is_admin_key,
            is_metadata_key,
            token_metadata,
            memo,
        } => {
            let mut body = token_create(
                ctx,
                TokenType::FungibleCommon,
                name,
                symbol,
                TokenOptions {
                    max_supply: *max_supply,
                    supply_key: *is_supply_key,
                    admin_key: *is_admin_key,
                    metadata_key: *is_metadata_key,
                    metadata: token_metadata.as_deref(),
                    memo: memo.as_deref(),
                },
            );
            body.decimals = *decimals;
            body.initial_supply = *initial_supply;
            TransactionBody::TokenCreate(body)
        }
        OperationRequest::CreateNonFungibleToken {
            name,
            symbol,
            max_supply,
            is_admin_key,
            is_metadata_key,
            token_metadata,
            memo,
            ..
        } => TransactionBody::TokenCreate(token_create(
            ctx,
            TokenType::NonFungibleUnique,
            name,
            symbol,
            TokenOptions {
                max_supply: *max_supply,
                // minting serials needs a supply key
                supply_key: true,
                admin_key: *is_admin_key,
                metadata_key: *is_metadata_key,
                metadata: token_metadata.as_deref(),
                memo: memo.as_deref(),
            },
        )),
        OperationRequest::Transfer {
            asset,
            to_account_id,
            amount,
        } => {
            let amount = signed(*amount)?;
            let body = match asset {
                Asset::Hbar => CryptoTransferBody::new()
                    .add_hbar_transfer(ctx.issuer, Hbar::from_tinybars(-amount))
                    .add_hbar_transfer(*to_account_id, Hbar::from_tinybars(amount)),
                Asset::Token(token_id) => CryptoTransferBody::new()
                    .add_token_transfer(*token_id, ctx.issuer, -amount)
                    .add_token_transfer(*token_id, *to_account_id, amount),
            };
            TransactionBody::CryptoTransfer(body)
        }
        OperationRequest::MintToken { token_id, amount } => TransactionBody::TokenMint(TokenMintBody {
            token_id: *token_id,
            amount: *amount,
            metadata: Vec::new(),
        }),
        OperationRequest::MintNft { token_id, metadata } => TransactionBody::TokenMint(TokenMintBody {
            token_id: *token_id,
            amount: 0,
            metadata: vec![metadata.clone().into_bytes()],
        }),
        OperationRequest::AssociateToken { token_ids } => TransactionBody::TokenAssociate(TokenAssociateBody {
            account_id: ctx.issuer,
            token_ids: token_ids.clone(),
        }),
        OperationRequest::DissociateToken { token_ids } => {
            TransactionBody::TokenDissociate(TokenDissociateBody {
                account_id: ctx.issuer,
                token_ids: token_ids.clone(),
            })
        }
        OperationRequest::Airdrop { token_id, recipients } => {
            TransactionBody::TokenAirdrop(airdrop(ctx.issuer, *token_id, recipients)?)
        }
        OperationRequest::ClaimAirdrop { airdrop } => TransactionBody::TokenClaimAirdrop(TokenClaimAirdropBody {
            pending_airdrops: vec![*airdrop],
        }),
        OperationRequest::RejectToken { token_ids } => TransactionBody::TokenReject(TokenRejectBody {
            owner: ctx.issuer,
            token_ids: token_ids.clone(),
        }),
        OperationRequest::CreateTopic { memo, is_submit_key } => TransactionBody::TopicCreate(TopicCreateBody {
            memo: memo.clone(),
            admin_key: Some(ctx.signer_key),
            submit_key: is_submit_key.then_some(ctx.signer_key),
        }),
        OperationRequest::DeleteTopic { topic_id } => {
            TransactionBody::TopicDelete(TopicDeleteBody { topic_id: *topic_id })
        }
        OperationRequest::SubmitTopicMessage { topic_id, message } => {
            TransactionBody::ConsensusSubmitMessage(TopicMessageSubmitBody {
                topic_id: *topic_id,
                message: message.clone().into_bytes(),
            })
        }
        OperationRequest::ApproveAllowance {
            asset,
            spender_account_id,
            amount,
        } => {
            let body = match asset {
                Asset::Hbar => CryptoApproveAllowanceBody::default().approve_hbar(
                    ctx.issuer,
                    *spender_account_id,
                    Hbar::from_tinybars(signed(*amount)?),
                ),
                Asset::Token(token_id) => CryptoApproveAllowanceBody::default().approve_token(
                    *token_id,
                    ctx.issuer,
                    *spender_account_id,
                    *amount,
                ),
            };
            TransactionBody::CryptoApproveAllowance(body)
        }
    };
    Ok(body)
}

struct TokenOptions<'a> {
    max_supply: Option<u64>,
    supply_key: bool,
    admin_key: bool,
    metadata_key: bool,
    metadata: Option<&'a str>,
    memo: Option<&'a str>,
}

fn token_create(
    ctx: &BuildContext,
    token_type: TokenType,
    name: &str,
    symbol: &str,
    opts: TokenOptions<'_>,
) -> TokenCreateBody {
    let mut body = TokenCreateBody::new(name, symbol, token_type, ctx.issuer);
    if let Some(max_supply) = opts.max_supply.filter(|m| *m > 0) {
        body = body.with_max_supply(max_supply);
    }
    body.supply_key = opts.supply_key.then_some(ctx.signer_key);
    body.admin_key = opts.admin_key.then_some(ctx.signer_key);
    body.metadata_key = opts.metadata_key.then_some(ctx.signer_key);
    if let Some(metadata) = opts.metadata {
        body.metadata = metadata.as_bytes().to_vec();
    }
    if let Some(memo) = opts.memo {
        body.token_memo = memo.to_string();
    }
    body
}

/// One aggregated debit on the issuer, one credit per recipient.
fn airdrop(
    issuer: AccountId,
    token_id: TokenId,
    recipients: &[AirdropRecipient],
) -> Result<TokenAirdropBody, TransactionError> {
    if recipients.is_empty() {
        return Err(TransactionError::NoRecipients);
    }
    let total = recipients.iter().try_fold(0i64, |acc, r| {
        acc.checked_add(signed(r.amount)?)
            .ok_or(TransactionError::AmountOverflow)
    })?;
    let body = recipients.iter().fold(
        TokenAirdropBody::default().add_token_transfer(token_id, issuer, -total),
        |body, r| body.add_token_transfer(token_id, r.account_id, r.amount as i64),
    );
    Ok(body)
}

fn signed(amount: u64) -> Result<i64, TransactionError> {
    i64::try_from(amount).map_err(|_| TransactionError::AmountOverflow)
}

// ── Format ─────────────────────────────────────────────────────────────

/// Kind-specific result fields. Ids assigned at consensus are absent when
/// the receipt reports a rejection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum OperationPayload {
    TokenCreated {
        #[serde(skip_serializing_if = "Option::is_none")]
        token_id: Option<TokenId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        solidity_address: Option<String>,
        token_type: &'static str,
        decimals: u32,
        initial_supply: u64,
    },
    Transferred {
        asset: Asset,
        to_account_id: AccountId,
        amount: u64,
    },
    Minted {
        token_id: TokenId,
        amount: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        total_supply: Option<u64>,
    },
    NftMinted {
        token_id: TokenId,
        serials: Vec<i64>,
    },
    Associated {
        account_id: AccountId,
        token_ids: Vec<TokenId>,
    },
    Dissociated {
        account_id: AccountId,
        token_ids: Vec<TokenId>,
    },
    Airdropped {
        token_id: TokenId,
        recipient_count: usize,
        total_amount: u64,
    },
    AirdropClaimed {
        airdrop: PendingAirdropId,
    },
    Rejected {
        token_ids: Vec<TokenId>,
    },
    TopicCreated {
        #[serde(skip_serializing_if = "Option::is_none")]
        topic_id: Option<TopicId>,
    },
    TopicDeleted {
        topic_id: TopicId,
    },
    MessageSubmitted {
        topic_id: TopicId,
        #[serde(skip_serializing_if = "Option::is_none")]
        sequence_number: Option<u64>,
    },
    AllowanceApproved {
        asset: Asset,
        spender_account_id: AccountId,
        amount: u64,
    },
}

/// Map a response/receipt pair to an executed result. Total over every
/// receipt status.
pub fn format_result(
    request: &OperationRequest,
    response: &TransactionResponse,
    receipt: &TransactionReceipt,
) -> ExecutedResult {
    let status = receipt.status.clone();
    let message = if status.is_success() {
        format!("{} succeeded", request.label())
    } else {
        format!("{} failed with status {}", request.label(), status)
    };
    ExecutedResult {
        operation: request.kind(),
        status,
        transaction_hash: response.transaction_id.to_string(),
        message,
        payload: payload(request, response, receipt),
    }
}

fn payload(
    request: &OperationRequest,
    response: &TransactionResponse,
    receipt: &TransactionReceipt,
) -> OperationPayload {
    let succeeded = receipt.status.is_success();
    match request {
        OperationRequest::CreateFungibleToken {
            decimals,
            initial_supply,
            ..
        } => token_created(receipt, TokenType::FungibleCommon, *decimals, *initial_supply),
        OperationRequest::CreateNonFungibleToken { .. } => {
            token_created(receipt, TokenType::NonFungibleUnique, 0, 0)
        }
        OperationRequest::Transfer {
            asset,
            to_account_id,
            amount,
        } => OperationPayload::Transferred {
            asset: *asset,
            to_account_id: *to_account_id,
            amount: *amount,
        },
        OperationRequest::MintToken { token_id, amount } => OperationPayload::Minted {
            token_id: *token_id,
            amount: *amount,
            total_supply: receipt.total_supply.filter(|_| succeeded),
        },
        OperationRequest::MintNft { token_id, .. } => OperationPayload::NftMinted {
            token_id: *token_id,
            serials: if succeeded { receipt.serials.clone() } else { Vec::new() },
        },
        OperationRequest::AssociateToken { token_ids } => OperationPayload::Associated {
            account_id: response.transaction_id.account_id,
            token_ids: token_ids.clone(),
        },
        OperationRequest::DissociateToken { token_ids } => OperationPayload::Dissociated {
            account_id: response.transaction_id.account_id,
            token_ids: token_ids.clone(),
        },
        OperationRequest::Airdrop { token_id, recipients } => OperationPayload::Airdropped {
            token_id: *token_id,
            recipient_count: recipients.len(),
            total_amount: recipients.iter().fold(0u64, |acc, r| acc.saturating_add(r.amount)),
        },
        OperationRequest::ClaimAirdrop { airdrop } => OperationPayload::AirdropClaimed { airdrop: *airdrop },
        OperationRequest::RejectToken { token_ids } => OperationPayload::Rejected {
            token_ids: token_ids.clone(),
        },
        OperationRequest::CreateTopic { .. } => OperationPayload::TopicCreated {
            topic_id: receipt.topic_id.filter(|_| succeeded),
        },
        OperationRequest::DeleteTopic { topic_id } => OperationPayload::TopicDeleted { topic_id: *topic_id },
        OperationRequest::SubmitTopicMessage { topic_id, .. } => OperationPayload::MessageSubmitted {
            topic_id: *topic_id,
            sequence_number: receipt.topic_sequence_number.filter(|_| succeeded),
        },
        OperationRequest::ApproveAllowance {
            asset,
            spender_account_id,
            amount,
        } => OperationPayload::AllowanceApproved {
            asset: *asset,
            spender_account_id: *spender_account_id,
            amount: *amount,
        },
    }
}

fn token_created(
    receipt: &TransactionReceipt,
    token_type: TokenType,
    decimals: u32,
    initial_supply: u64,
) -> OperationPayload {
    let token_id = receipt.token_id.filter(|_| receipt.status.is_success());
    OperationPayload::TokenCreated {
        token_id,
        solidity_address: token_id.and_then(|t| t.to_solidity_address()),
        token_type: token_type.as_str(),
        decimals,
        initial_supply,
    }
}
