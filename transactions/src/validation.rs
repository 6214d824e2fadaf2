//! Structural validation of transaction bodies.
//!
//! Stateless only: every referenced entity must be a real ledger reference,
//! token lists must be non-empty, and transfers must net to zero per asset.
//! Balance sufficiency, association state and key presence are checked by
//! the ledger at consensus.

use ledgerkit_types::{AccountId, TokenId, TopicId};

use crate::error::TransactionError;
use crate::transfer::{AccountAmount, TokenTransferList};
use crate::TransactionBody;

pub fn validate_body(body: &TransactionBody) -> Result<(), TransactionError> {
    match body {
        TransactionBody::TokenCreate(b) => account_ref(&b.treasury_account_id),
        TransactionBody::TokenMint(b) => token_ref(&b.token_id),
        TransactionBody::TokenAssociate(b) => {
            account_ref(&b.account_id)?;
            token_list(&b.token_ids)
        }
        TransactionBody::TokenDissociate(b) => {
            account_ref(&b.account_id)?;
            token_list(&b.token_ids)
        }
        TransactionBody::TokenAirdrop(b) => {
            if b.token_transfers.iter().all(|l| l.transfers.is_empty()) {
                return Err(TransactionError::NoRecipients);
            }
            token_transfers(&b.token_transfers)
        }
        TransactionBody::TokenClaimAirdrop(b) => {
            for pending in &b.pending_airdrops {
                token_ref(&pending.token_id)?;
                account_ref(&pending.sender_id)?;
                account_ref(&pending.receiver_id)?;
            }
            Ok(())
        }
        TransactionBody::TokenReject(b) => {
            account_ref(&b.owner)?;
            token_list(&b.token_ids)
        }
        TransactionBody::CryptoTransfer(b) => {
            accounts(&b.hbar_transfers)?;
            let net = b.hbar_net();
            if net != 0 {
                return Err(TransactionError::Unbalanced {
                    asset: "hbar".into(),
                    net,
                });
            }
            token_transfers(&b.token_transfers)
        }
        TransactionBody::CryptoApproveAllowance(b) => {
            for a in &b.hbar_allowances {
                account_ref(&a.owner_account_id)?;
                account_ref(&a.spender_account_id)?;
            }
            for a in &b.token_allowances {
                token_ref(&a.token_id)?;
                account_ref(&a.owner_account_id)?;
                account_ref(&a.spender_account_id)?;
            }
            Ok(())
        }
        TransactionBody::TopicCreate(_) => Ok(()),
        TransactionBody::TopicDelete(b) => topic_ref(&b.topic_id),
        TransactionBody::ConsensusSubmitMessage(b) => topic_ref(&b.topic_id),
    }
}

fn account_ref(id: &AccountId) -> Result<(), TransactionError> {
    if id.is_valid_reference() {
        Ok(())
    } else {
        Err(TransactionError::InvalidReference {
            kind: "account",
            id: id.to_string(),
        })
    }
}

fn token_ref(id: &TokenId) -> Result<(), TransactionError> {
    if id.is_valid_reference() {
        Ok(())
    } else {
        Err(TransactionError::InvalidReference {
            kind: "token",
            id: id.to_string(),
        })
    }
}

fn topic_ref(id: &TopicId) -> Result<(), TransactionError> {
    if id.is_valid_reference() {
        Ok(())
    } else {
        Err(TransactionError::InvalidReference {
            kind: "topic",
            id: id.to_string(),
        })
    }
}

fn token_list(ids: &[TokenId]) -> Result<(), TransactionError> {
    if ids.is_empty() {
        return Err(TransactionError::EmptyTokenList);
    }
    ids.iter().try_for_each(token_ref)
}

fn accounts(amounts: &[AccountAmount]) -> Result<(), TransactionError> {
    amounts.iter().try_for_each(|a| account_ref(&a.account_id))
}

fn token_transfers(lists: &[TokenTransferList]) -> Result<(), TransactionError> {
    for list in lists {
        token_ref(&list.token_id)?;
        accounts(&list.transfers)?;
        let net = list.net();
        if net != 0 {
            return Err(TransactionError::Unbalanced {
                asset: list.token_id.to_string(),
                net,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{TokenAirdropBody, TokenAssociateBody, TokenRejectBody};
    use crate::topic::TopicDeleteBody;
    use crate::transfer::CryptoTransferBody;
    use ledgerkit_types::Hbar;

    #[test]
    fn balanced_transfer_passes() {
        let body = CryptoTransferBody::new()
            .add_hbar_transfer(AccountId::from_num(2), Hbar::from_tinybars(-100))
            .add_hbar_transfer(AccountId::from_num(3), Hbar::from_tinybars(100));
        assert!(validate_body(&TransactionBody::CryptoTransfer(body)).is_ok());
    }

    #[test]
    fn unbalanced_transfer_fails() {
        let body = CryptoTransferBody::new()
            .add_token_transfer(TokenId::from_num(5), AccountId::from_num(2), -100)
            .add_token_transfer(TokenId::from_num(5), AccountId::from_num(3), 99);
        assert!(matches!(
            validate_body(&TransactionBody::CryptoTransfer(body)),
            Err(TransactionError::Unbalanced { net: -1, .. })
        ));
    }

    #[test]
    fn zero_entity_is_rejected() {
        let body = TransactionBody::TopicDelete(TopicDeleteBody {
            topic_id: TopicId::from_num(0),
        });
        assert!(matches!(
            validate_body(&body),
            Err(TransactionError::InvalidReference { kind: "topic", .. })
        ));
    }

    #[test]
    fn token_lists_must_be_non_empty() {
        let body = TransactionBody::TokenAssociate(TokenAssociateBody {
            account_id: AccountId::from_num(2),
            token_ids: Vec::new(),
        });
        assert!(matches!(validate_body(&body), Err(TransactionError::EmptyTokenList)));

        let body = TransactionBody::TokenReject(TokenRejectBody {
            owner: AccountId::from_num(2),
            token_ids: vec![TokenId::from_num(1), TokenId::from_num(0)],
        });
        assert!(matches!(validate_body(&body), Err(TransactionError::InvalidReference { .. })));
    }

    #[test]
    fn airdrop_nets_per_token() {
        let body = TokenAirdropBody::default()
            .add_token_transfer(TokenId::from_num(5), AccountId::from_num(2), -30)
            .add_token_transfer(TokenId::from_num(5), AccountId::from_num(3), 10)
            .add_token_transfer(TokenId::from_num(5), AccountId::from_num(4), 20);
        assert!(validate_body(&TransactionBody::TokenAirdrop(body)).is_ok());

        let empty = TransactionBody::TokenAirdrop(TokenAirdropBody::default());
        assert!(matches!(validate_body(&empty), Err(TransactionError::NoRecipients)));
    }
}
