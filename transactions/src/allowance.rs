//! Allowance approval: lets a spender move the owner's hbar or tokens.

use ledgerkit_types::{AccountId, Hbar, TokenId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HbarAllowance {
    pub owner_account_id: AccountId,
    pub spender_account_id: AccountId,
    pub amount: Hbar,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAllowance {
    pub token_id: TokenId,
    pub owner_account_id: AccountId,
    pub spender_account_id: AccountId,
    pub amount: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoApproveAllowanceBody {
    pub hbar_allowances: Vec<HbarAllowance>,
    pub token_allowances: Vec<TokenAllowance>,
}

impl CryptoApproveAllowanceBody {
    pub fn approve_hbar(mut self, owner: AccountId, spender: AccountId, amount: Hbar) -> Self {
        self.hbar_allowances.push(HbarAllowance {
            owner_account_id: owner,
            spender_account_id: spender,
            amount,
        });
        self
    }

    pub fn approve_token(mut self, token_id: TokenId, owner: AccountId, spender: AccountId, amount: u64) -> Self {
        self.token_allowances.push(TokenAllowance {
            token_id,
            owner_account_id: owner,
            spender_account_id: spender,
            amount,
        });
        self
    }
}
