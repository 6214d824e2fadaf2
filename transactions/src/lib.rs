//! Ledger transaction bodies, the unfrozen → frozen transition, and the
//! network collaborator interface.
//!
//! Operation kinds:
//! - **TokenCreate / TokenMint / TokenAssociate / TokenDissociate**
//! - **TokenAirdrop / TokenClaimAirdrop / TokenReject**
//! - **CryptoTransfer / CryptoApproveAllowance**
//! - **TopicCreate / TopicDelete / ConsensusSubmitMessage**
//!
//! A transaction is assembled as an [`UnsignedTransaction`] and consumed by
//! [`UnsignedTransaction::freeze`] into a [`FrozenTransaction`], after which
//! only signatures may be attached.

pub mod allowance;
pub mod error;
pub mod ledger;
pub mod token;
pub mod topic;
pub mod transaction;
pub mod transfer;
pub mod validation;

pub use error::{FreezeError, TransactionError};
pub use ledger::{LedgerClient, SubmitError, TransactionReceipt, TransactionResponse};
pub use transaction::{
    FreezeContext, FrozenTransaction, SignaturePair, UnsignedTransaction, MAX_MEMO_BYTES,
    MAX_VALID_DURATION_SECS,
};

use ledgerkit_types::Hbar;
use serde::{Deserialize, Serialize};

/// Every operation body this workspace can build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionBody {
    TokenCreate(token::TokenCreateBody),
    TokenMint(token::TokenMintBody),
    TokenAssociate(token::TokenAssociateBody),
    TokenDissociate(token::TokenDissociateBody),
    TokenAirdrop(token::TokenAirdropBody),
    TokenClaimAirdrop(token::TokenClaimAirdropBody),
    TokenReject(token::TokenRejectBody),
    CryptoTransfer(transfer::CryptoTransferBody),
    CryptoApproveAllowance(allowance::CryptoApproveAllowanceBody),
    TopicCreate(topic::TopicCreateBody),
    TopicDelete(topic::TopicDeleteBody),
    ConsensusSubmitMessage(topic::TopicMessageSubmitBody),
}

impl TransactionBody {
    /// Name of the ledger operation.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TokenCreate(_) => "TokenCreate",
            Self::TokenMint(_) => "TokenMint",
            Self::TokenAssociate(_) => "TokenAssociate",
            Self::TokenDissociate(_) => "TokenDissociate",
            Self::TokenAirdrop(_) => "TokenAirdrop",
            Self::TokenClaimAirdrop(_) => "TokenClaimAirdrop",
            Self::TokenReject(_) => "TokenReject",
            Self::CryptoTransfer(_) => "CryptoTransfer",
            Self::CryptoApproveAllowance(_) => "CryptoApproveAllowance",
            Self::TopicCreate(_) => "TopicCreate",
            Self::TopicDelete(_) => "TopicDelete",
            Self::ConsensusSubmitMessage(_) => "ConsensusSubmitMessage",
        }
    }

    /// Fee ceiling used when neither the transaction nor the session sets one.
    pub fn default_max_fee(&self) -> Hbar {
        match self {
            Self::TokenCreate(_) => Hbar::from_hbars(40),
            Self::TopicCreate(_) => Hbar::from_hbars(25),
            _ => Hbar::from_hbars(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerkit_types::TopicId;

    #[test]
    fn create_kinds_carry_higher_fee_ceilings() {
        let create = TransactionBody::TopicCreate(topic::TopicCreateBody::default());
        let delete = TransactionBody::TopicDelete(topic::TopicDeleteBody {
            topic_id: TopicId::from_num(9),
        });
        assert_eq!(create.default_max_fee(), Hbar::from_hbars(25));
        assert_eq!(delete.default_max_fee(), Hbar::from_hbars(2));
        assert_eq!(delete.kind(), "TopicDelete");
    }
}
