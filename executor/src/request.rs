//! Operation requests as callers submit them.
//!
//! Amounts are already in base units (tinybars, or the token's smallest
//! denomination); ids are typed. JSON requests carry a `kind` tag and
//! camelCase fields, with ids as `"shard.realm.num"` strings.

use ledgerkit_types::{AccountId, PendingAirdropId, PublicKey, TokenId, TopicId};
use serde::{Deserialize, Serialize};

use crate::error::ExecutionError;

/// What an amount is denominated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Hbar,
    Token(TokenId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropRecipient {
    pub account_id: AccountId,
    pub amount: u64,
}

/// One ledger operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum OperationRequest {
    CreateFungibleToken {
        name: String,
        symbol: String,
        #[serde(default)]
        decimals: u32,
        #[serde(default)]
        initial_supply: u64,
        #[serde(default)]
        max_supply: Option<u64>,
        #[serde(default)]
        is_supply_key: bool,
        #[serde(default)]
        is_admin_key: bool,
        #[serde(default)]
        is_metadata_key: bool,
        #[serde(default)]
        token_metadata: Option<String>,
        #[serde(default)]
        memo: Option<String>,
    },
    CreateNonFungibleToken {
        name: String,
        symbol: String,
        #[serde(default)]
        max_supply: Option<u64>,
        /// Accepted for symmetry; an NFT always gets a supply key.
        #[serde(default)]
        is_supply_key: bool,
        #[serde(default)]
        is_admin_key: bool,
        #[serde(default)]
        is_metadata_key: bool,
        #[serde(default)]
        token_metadata: Option<String>,
        #[serde(default)]
        memo: Option<String>,
    },
    Transfer {
        asset: Asset,
        to_account_id: AccountId,
        amount: u64,
    },
    MintToken {
        token_id: TokenId,
        amount: u64,
    },
    MintNft {
        token_id: TokenId,
        metadata: String,
    },
    AssociateToken {
        token_ids: Vec<TokenId>,
    },
    DissociateToken {
        token_ids: Vec<TokenId>,
    },
    Airdrop {
        token_id: TokenId,
        recipients: Vec<AirdropRecipient>,
    },
    ClaimAirdrop {
        airdrop: PendingAirdropId,
    },
    RejectToken {
        token_ids: Vec<TokenId>,
    },
    CreateTopic {
        #[serde(default)]
        memo: String,
        #[serde(default)]
        is_submit_key: bool,
    },
    DeleteTopic {
        topic_id: TopicId,
    },
    SubmitTopicMessage {
        topic_id: TopicId,
        message: String,
    },
    ApproveAllowance {
        asset: Asset,
        spender_account_id: AccountId,
        amount: u64,
    },
}

impl OperationRequest {
    /// Parse a JSON request. Malformed ids fail here, before any build step.
    ///
    /// An id that does not parse is `MalformedIdentifier`; every other
    /// decode failure (bad syntax, unknown kind, missing field, wrong type
    /// or range) is `InvalidRequest`.
    pub fn from_json(json: &str) -> Result<Self, ExecutionError> {
        serde_json::from_str(json).map_err(|e| {
            if is_id_parse_failure(&e) {
                ExecutionError::MalformedIdentifier(e.to_string())
            } else {
                ExecutionError::InvalidRequest(e.to_string())
            }
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateFungibleToken { .. } => "createFungibleToken",
            Self::CreateNonFungibleToken { .. } => "createNonFungibleToken",
            Self::Transfer { .. } => "transfer",
            Self::MintToken { .. } => "mintToken",
            Self::MintNft { .. } => "mintNft",
            Self::AssociateToken { .. } => "associateToken",
            Self::DissociateToken { .. } => "dissociateToken",
            Self::Airdrop { .. } => "airdrop",
            Self::ClaimAirdrop { .. } => "claimAirdrop",
            Self::RejectToken { .. } => "rejectToken",
            Self::CreateTopic { .. } => "createTopic",
            Self::DeleteTopic { .. } => "deleteTopic",
            Self::SubmitTopicMessage { .. } => "submitTopicMessage",
            Self::ApproveAllowance { .. } => "approveAllowance",
        }
    }

    /// Short human label used in result messages.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::CreateFungibleToken { .. } | Self::CreateNonFungibleToken { .. } => "Token creation",
            Self::Transfer { .. } => "Transfer",
            Self::MintToken { .. } => "Token mint",
            Self::MintNft { .. } => "NFT mint",
            Self::AssociateToken { .. } => "Token association",
            Self::DissociateToken { .. } => "Token dissociation",
            Self::Airdrop { .. } => "Airdrop",
            Self::ClaimAirdrop { .. } => "Airdrop claim",
            Self::RejectToken { .. } => "Token rejection",
            Self::CreateTopic { .. } => "Topic creation",
            Self::DeleteTopic { .. } => "Topic deletion",
            Self::SubmitTopicMessage { .. } => "Topic message submission",
            Self::ApproveAllowance { .. } => "Allowance approval",
        }
    }
}

/// The identity that will sign a non-custodial transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorAccountDetails {
    #[serde(rename = "executorAccountId", default)]
    pub account_id: Option<AccountId>,
    #[serde(rename = "executorPublicKey", default)]
    pub public_key: Option<PublicKey>,
}

impl ExecutorAccountDetails {
    pub fn account(account_id: AccountId) -> Self {
        Self {
            account_id: Some(account_id),
            public_key: None,
        }
    }

    pub fn with_public_key(mut self, public_key: PublicKey) -> Self {
        self.public_key = Some(public_key);
        self
    }
}

/// Ids deserialize through `FromStr`, so their failures surface as data
/// errors carrying the `IdParseError` message.
fn is_id_parse_failure(e: &serde_json::Error) -> bool {
    e.classify() == serde_json::error::Category::Data && e.to_string().starts_with("malformed ")
}

/// Whether the core signs and submits, or only serializes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ExecutionMode {
    Custodial,
    NonCustodial(ExecutorAccountDetails),
}
