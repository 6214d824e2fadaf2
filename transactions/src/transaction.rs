//! The two transaction states and the one-way transition between them.
//!
//! `UnsignedTransaction` is freely mutable. `freeze` consumes it and locks
//! the transaction id, node, fee ceiling and valid duration into a
//! `FrozenTransaction`, which offers getters and signature attachment only.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use ledgerkit_crypto::{public_from_private, sign_message, verify_signature};
use ledgerkit_types::{AccountId, Hbar, PrivateKey, PublicKey, Signature, TransactionId};
use serde::{Deserialize, Serialize};

use crate::error::{FreezeError, TransactionError};
use crate::TransactionBody;

/// Upper bound the ledger accepts for a transaction's valid duration.
pub const MAX_VALID_DURATION_SECS: u64 = 180;
/// Upper bound on the transaction memo, in UTF-8 bytes.
pub const MAX_MEMO_BYTES: usize = 100;

/// A transaction under construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsignedTransaction {
    body: TransactionBody,
    memo: String,
    transaction_id: Option<TransactionId>,
    max_transaction_fee: Option<Hbar>,
}

impl UnsignedTransaction {
    pub fn new(body: TransactionBody) -> Self {
        Self {
            body,
            memo: String::new(),
            transaction_id: None,
            max_transaction_fee: None,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn set_memo(&mut self, memo: impl Into<String>) -> &mut Self {
        self.memo = memo.into();
        self
    }

    /// Bind an explicit transaction id. Its account pays the fee.
    pub fn set_transaction_id(&mut self, transaction_id: TransactionId) -> &mut Self {
        self.transaction_id = Some(transaction_id);
        self
    }

    pub fn set_max_transaction_fee(&mut self, fee: Hbar) -> &mut Self {
        self.max_transaction_fee = Some(fee);
        self
    }

    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn transaction_id(&self) -> Option<&TransactionId> {
        self.transaction_id.as_ref()
    }

    /// Lock the transaction.
    ///
    /// The transaction id is the one bound earlier, or a fresh one for
    /// `ctx.default_payer`. The fee ceiling resolves as: explicit on the
    /// transaction, then the session's, then the body's default.
    pub fn freeze(self, ctx: &FreezeContext) -> Result<FrozenTransaction, FreezeError> {
        if ctx.valid_duration_secs == 0 || ctx.valid_duration_secs > MAX_VALID_DURATION_SECS {
            return Err(FreezeError::InvalidValidDuration {
                got: ctx.valid_duration_secs,
                max: MAX_VALID_DURATION_SECS,
            });
        }
        if self.memo.len() > MAX_MEMO_BYTES {
            return Err(FreezeError::MemoTooLong {
                len: self.memo.len(),
                max: MAX_MEMO_BYTES,
            });
        }

        let transaction_id = match (self.transaction_id, ctx.default_payer) {
            (Some(id), _) => id,
            (None, Some(payer)) => TransactionId::generate(payer),
            (None, None) => return Err(FreezeError::MissingTransactionId),
        };
        let node_account_id = select_node(&ctx.node_account_ids, &transaction_id)?;
        let max_transaction_fee = self
            .max_transaction_fee
            .or(ctx.max_transaction_fee)
            .unwrap_or_else(|| self.body.default_max_fee());

        Ok(FrozenTransaction {
            body: self.body,
            memo: self.memo,
            transaction_id,
            node_account_id,
            max_transaction_fee,
            valid_duration_secs: ctx.valid_duration_secs,
            signatures: Vec::new(),
        })
    }
}

/// Session-level settings applied identically to every transaction at freeze.
#[derive(Clone, Debug)]
pub struct FreezeContext {
    /// Payer used to generate a transaction id when none is bound.
    pub default_payer: Option<AccountId>,
    pub node_account_ids: Vec<AccountId>,
    pub max_transaction_fee: Option<Hbar>,
    pub valid_duration_secs: u64,
}

impl FreezeContext {
    pub fn new(node_account_ids: Vec<AccountId>) -> Self {
        Self {
            default_payer: None,
            node_account_ids,
            max_transaction_fee: None,
            valid_duration_secs: MAX_VALID_DURATION_SECS,
        }
    }

    pub fn with_default_payer(mut self, payer: AccountId) -> Self {
        self.default_payer = Some(payer);
        self
    }
}

/// Picks one node deterministically from the transaction id, so that the
/// same id always lands on the same node.
fn select_node(nodes: &[AccountId], id: &TransactionId) -> Result<AccountId, FreezeError> {
    if nodes.is_empty() {
        return Err(FreezeError::NoNodeAccounts);
    }
    let seed = id.valid_start.seconds() ^ id.account_id.num ^ u64::from(id.valid_start.nanos());
    Ok(nodes[(seed % nodes.len() as u64) as usize])
}

/// A public key and its signature over the frozen body bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePair {
    pub public_key: PublicKey,
    pub signature: Signature,
}

/// A locked transaction. Only signatures can be added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrozenTransaction {
    body: TransactionBody,
    memo: String,
    transaction_id: TransactionId,
    node_account_id: AccountId,
    max_transaction_fee: Hbar,
    valid_duration_secs: u64,
    signatures: Vec<SignaturePair>,
}

/// The signed portion of a frozen transaction.
#[derive(Serialize)]
struct SignedFields<'a> {
    body: &'a TransactionBody,
    memo: &'a str,
    transaction_id: &'a TransactionId,
    node_account_id: &'a AccountId,
    max_transaction_fee: &'a Hbar,
    valid_duration_secs: u64,
}

impl FrozenTransaction {
    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    /// The account paying the fee.
    pub fn payer(&self) -> AccountId {
        self.transaction_id.account_id
    }

    pub fn node_account_id(&self) -> AccountId {
        self.node_account_id
    }

    pub fn max_transaction_fee(&self) -> Hbar {
        self.max_transaction_fee
    }

    pub fn valid_duration_secs(&self) -> u64 {
        self.valid_duration_secs
    }

    pub fn signatures(&self) -> &[SignaturePair] {
        &self.signatures
    }

    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty()
    }

    /// The bytes every signer signs: everything except the signatures.
    pub fn body_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let fields = SignedFields {
            body: &self.body,
            memo: &self.memo,
            transaction_id: &self.transaction_id,
            node_account_id: &self.node_account_id,
            max_transaction_fee: &self.max_transaction_fee,
            valid_duration_secs: self.valid_duration_secs,
        };
        bincode::serialize(&fields).map_err(|e| TransactionError::Encoding(e.to_string()))
    }

    /// Attach an externally produced signature. A second signature from the
    /// same key replaces the first.
    pub fn add_signature(&mut self, public_key: PublicKey, signature: Signature) {
        self.signatures.retain(|pair| pair.public_key != public_key);
        self.signatures.push(SignaturePair {
            public_key,
            signature,
        });
    }

    /// Sign the body bytes with `private_key` and attach the result.
    pub fn sign_with(&mut self, private_key: &PrivateKey) -> Result<(), TransactionError> {
        let bytes = self.body_bytes()?;
        let signature = sign_message(&bytes, private_key)?;
        let public_key = public_from_private(private_key)?;
        self.add_signature(public_key, signature);
        Ok(())
    }

    /// Whether every attached signature verifies against the body bytes.
    pub fn verify_signatures(&self) -> Result<bool, TransactionError> {
        let bytes = self.body_bytes()?;
        Ok(self
            .signatures
            .iter()
            .all(|pair| verify_signature(&bytes, &pair.signature, &pair.public_key)))
    }

    /// Native byte encoding: body, metadata and signatures.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        bincode::serialize(self).map_err(|e| TransactionError::Encoding(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        bincode::deserialize(bytes).map_err(|e| TransactionError::Encoding(e.to_string()))
    }

    /// Native bytes as standard padded base64.
    pub fn to_base64(&self) -> Result<String, TransactionError> {
        Ok(BASE64_STANDARD.encode(self.to_bytes()?))
    }

    pub fn from_base64(encoded: &str) -> Result<Self, TransactionError> {
        let bytes = BASE64_STANDARD
            .decode(encoded.trim())
            .map_err(|e| TransactionError::Encoding(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::{TopicCreateBody, TopicMessageSubmitBody};
    use ledgerkit_crypto::{generate_keypair, keypair_from_seed};
    use ledgerkit_types::{KeyAlgorithm, Timestamp, TopicId};

    fn message_tx() -> UnsignedTransaction {
        UnsignedTransaction::new(TransactionBody::ConsensusSubmitMessage(TopicMessageSubmitBody {
            topic_id: TopicId::from_num(4242),
            message: b"hello".to_vec(),
        }))
    }

    fn nodes() -> Vec<AccountId> {
        (3..=9).map(AccountId::from_num).collect()
    }

    #[test]
    fn freeze_uses_default_payer() {
        let payer = AccountId::from_num(1001);
        let ctx = FreezeContext::new(nodes()).with_default_payer(payer);
        let frozen = message_tx().freeze(&ctx).unwrap();
        assert_eq!(frozen.payer(), payer);
        assert!(nodes().contains(&frozen.node_account_id()));
        assert_eq!(frozen.valid_duration_secs(), 180);
        assert!(!frozen.is_signed());
    }

    #[test]
    fn explicit_id_wins_over_default_payer() {
        let executor = AccountId::from_num(5005);
        let id = TransactionId::new(executor, Timestamp::new(1_700_000_000, 7));
        let mut tx = message_tx();
        tx.set_transaction_id(id);
        let ctx = FreezeContext::new(nodes()).with_default_payer(AccountId::from_num(2));
        let frozen = tx.freeze(&ctx).unwrap();
        assert_eq!(frozen.transaction_id(), &id);
        assert_eq!(frozen.payer(), executor);
    }

    #[test]
    fn freeze_without_any_payer_fails() {
        let err = message_tx().freeze(&FreezeContext::new(nodes())).unwrap_err();
        assert_eq!(err, FreezeError::MissingTransactionId);
    }

    #[test]
    fn freeze_rejects_bad_settings() {
        let payer = AccountId::from_num(2);
        let mut ctx = FreezeContext::new(nodes()).with_default_payer(payer);
        ctx.valid_duration_secs = 181;
        assert!(matches!(
            message_tx().freeze(&ctx),
            Err(FreezeError::InvalidValidDuration { got: 181, .. })
        ));

        let ctx = FreezeContext::new(Vec::new()).with_default_payer(payer);
        assert_eq!(message_tx().freeze(&ctx).unwrap_err(), FreezeError::NoNodeAccounts);

        let ctx = FreezeContext::new(nodes()).with_default_payer(payer);
        let long = message_tx().with_memo("m".repeat(101));
        assert!(matches!(long.freeze(&ctx), Err(FreezeError::MemoTooLong { len: 101, .. })));
    }

    #[test]
    fn fee_ceiling_precedence() {
        let ctx = FreezeContext::new(nodes()).with_default_payer(AccountId::from_num(2));
        let create = UnsignedTransaction::new(TransactionBody::TopicCreate(TopicCreateBody::default()));
        assert_eq!(create.clone().freeze(&ctx).unwrap().max_transaction_fee(), Hbar::from_hbars(25));

        let mut session = ctx.clone();
        session.max_transaction_fee = Some(Hbar::from_hbars(5));
        assert_eq!(create.clone().freeze(&session).unwrap().max_transaction_fee(), Hbar::from_hbars(5));

        let mut explicit = create;
        explicit.set_max_transaction_fee(Hbar::from_hbars(1));
        assert_eq!(explicit.freeze(&session).unwrap().max_transaction_fee(), Hbar::from_hbars(1));
    }

    #[test]
    fn node_selection_is_stable_per_id() {
        let id = TransactionId::new(AccountId::from_num(77), Timestamp::new(1_700_000_123, 456));
        let a = select_node(&nodes(), &id).unwrap();
        let b = select_node(&nodes(), &id).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn signatures_verify_for_both_algorithms() {
        let ctx = FreezeContext::new(nodes()).with_default_payer(AccountId::from_num(2));
        for algorithm in [KeyAlgorithm::Ed25519, KeyAlgorithm::EcdsaSecp256k1] {
            let kp = generate_keypair(algorithm);
            let mut frozen = message_tx().freeze(&ctx).unwrap();
            frozen.sign_with(&kp.private).unwrap();
            assert_eq!(frozen.signatures().len(), 1);
            assert_eq!(frozen.signatures()[0].public_key, kp.public);
            assert!(frozen.verify_signatures().unwrap());
        }
    }

    #[test]
    fn resigning_with_same_key_replaces() {
        let ctx = FreezeContext::new(nodes()).with_default_payer(AccountId::from_num(2));
        let kp = keypair_from_seed(&[3u8; 32]);
        let mut frozen = message_tx().freeze(&ctx).unwrap();
        frozen.sign_with(&kp.private).unwrap();
        frozen.sign_with(&kp.private).unwrap();
        assert_eq!(frozen.signatures().len(), 1);
    }

    #[test]
    fn tampered_signature_fails_verification() {
        let ctx = FreezeContext::new(nodes()).with_default_payer(AccountId::from_num(2));
        let kp = keypair_from_seed(&[3u8; 32]);
        let mut frozen = message_tx().freeze(&ctx).unwrap();
        frozen.add_signature(kp.public, Signature([1u8; 64]));
        assert!(!frozen.verify_signatures().unwrap());
    }

    #[test]
    fn base64_roundtrip_preserves_fields() {
        let ctx = FreezeContext::new(nodes()).with_default_payer(AccountId::from_num(2));
        let frozen = message_tx().with_memo("memo").freeze(&ctx).unwrap();
        let encoded = frozen.to_base64().unwrap();
        let decoded = FrozenTransaction::from_base64(&encoded).unwrap();
        assert_eq!(decoded, frozen);
        assert_eq!(decoded.memo(), "memo");
    }

    #[test]
    fn garbage_does_not_decode() {
        assert!(FrozenTransaction::from_base64("not base64!").is_err());
        assert!(FrozenTransaction::from_bytes(&[1, 2, 3]).is_err());
    }
}
