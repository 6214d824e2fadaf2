//! Transfer bodies: hbar and fungible-token movements between accounts.

use ledgerkit_types::{AccountId, Hbar, TokenId};
use serde::{Deserialize, Serialize};

/// One signed balance change. Negative amounts are debits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAmount {
    pub account_id: AccountId,
    pub amount: i64,
}

/// All balance changes for one token within a transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransferList {
    pub token_id: TokenId,
    pub transfers: Vec<AccountAmount>,
}

impl TokenTransferList {
    pub fn net(&self) -> i128 {
        self.transfers.iter().map(|t| i128::from(t.amount)).sum()
    }
}

/// Appends `amount` for `account_id` under `token_id`, opening a new list
/// for the token on first use.
pub(crate) fn push_token_transfer(
    lists: &mut Vec<TokenTransferList>,
    token_id: TokenId,
    account_id: AccountId,
    amount: i64,
) {
    let entry = AccountAmount { account_id, amount };
    match lists.iter_mut().find(|l| l.token_id == token_id) {
        Some(list) => list.transfers.push(entry),
        None => lists.push(TokenTransferList {
            token_id,
            transfers: vec![entry],
        }),
    }
}

/// A crypto transfer: hbar and/or token balance changes that net to zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoTransferBody {
    pub hbar_transfers: Vec<AccountAmount>,
    pub token_transfers: Vec<TokenTransferList>,
}

impl CryptoTransferBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_hbar_transfer(mut self, account_id: AccountId, amount: Hbar) -> Self {
        self.hbar_transfers.push(AccountAmount {
            account_id,
            amount: amount.tinybars(),
        });
        self
    }

    pub fn add_token_transfer(mut self, token_id: TokenId, account_id: AccountId, amount: i64) -> Self {
        push_token_transfer(&mut self.token_transfers, token_id, account_id, amount);
        self
    }

    pub fn hbar_net(&self) -> i128 {
        self.hbar_transfers.iter().map(|t| i128::from(t.amount)).sum()
    }
}
