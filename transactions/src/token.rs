//! Token service bodies: create, mint, associate, dissociate, airdrop,
//! claim and reject.

use ledgerkit_types::{AccountId, PendingAirdropId, PublicKey, TokenId};
use serde::{Deserialize, Serialize};

use crate::transfer::{push_token_transfer, TokenTransferList};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    FungibleCommon,
    NonFungibleUnique,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FungibleCommon => "FUNGIBLE_COMMON",
            Self::NonFungibleUnique => "NON_FUNGIBLE_UNIQUE",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenSupplyType {
    #[default]
    Infinite,
    Finite,
}

/// Creates a new token with the issuer as treasury.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCreateBody {
    pub name: String,
    pub symbol: String,
    pub token_type: TokenType,
    pub decimals: u32,
    pub initial_supply: u64,
    pub treasury_account_id: AccountId,
    pub supply_type: TokenSupplyType,
    /// Only meaningful with `TokenSupplyType::Finite`.
    pub max_supply: u64,
    pub admin_key: Option<PublicKey>,
    pub supply_key: Option<PublicKey>,
    pub metadata_key: Option<PublicKey>,
    pub metadata: Vec<u8>,
    pub token_memo: String,
}

impl TokenCreateBody {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        token_type: TokenType,
        treasury_account_id: AccountId,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            token_type,
            decimals: 0,
            initial_supply: 0,
            treasury_account_id,
            supply_type: TokenSupplyType::Infinite,
            max_supply: 0,
            admin_key: None,
            supply_key: None,
            metadata_key: None,
            metadata: Vec::new(),
            token_memo: String::new(),
        }
    }

    /// Caps supply at `max_supply` and switches to the finite supply type.
    pub fn with_max_supply(mut self, max_supply: u64) -> Self {
        self.max_supply = max_supply;
        self.supply_type = TokenSupplyType::Finite;
        self
    }
}

/// Mints fungible units or NFT serials. Exactly one of `amount` and
/// `metadata` is used, depending on the token's type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMintBody {
    pub token_id: TokenId,
    pub amount: u64,
    pub metadata: Vec<Vec<u8>>,
}

/// Associates (or, with the dissociate body, removes) tokens on an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAssociateBody {
    pub account_id: AccountId,
    pub token_ids: Vec<TokenId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDissociateBody {
    pub account_id: AccountId,
    pub token_ids: Vec<TokenId>,
}

/// Offers tokens to recipients; unassociated recipients get a pending airdrop.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAirdropBody {
    pub token_transfers: Vec<TokenTransferList>,
}

impl TokenAirdropBody {
    pub fn add_token_transfer(mut self, token_id: TokenId, account_id: AccountId, amount: i64) -> Self {
        push_token_transfer(&mut self.token_transfers, token_id, account_id, amount);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaimAirdropBody {
    pub pending_airdrops: Vec<PendingAirdropId>,
}

/// Returns held tokens to their treasury.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRejectBody {
    pub owner: AccountId,
    pub token_ids: Vec<TokenId>,
}
