//! Message signing and verification for both key algorithms.
//!
//! ECDSA signs the Keccak-256 digest of the message and emits the 64-byte
//! `r || s` form, low-S normalised.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use ledgerkit_types::{KeyAlgorithm, PrivateKey, PublicKey, Signature};
use sha3::{Digest, Keccak256};

use crate::error::KeyError;
use crate::keys::ecdsa_signing_key;

/// Sign a message with a private key, returning the signature.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Result<Signature, KeyError> {
    match private_key.algorithm() {
        KeyAlgorithm::Ed25519 => {
            let signing_key = SigningKey::from_bytes(private_key.as_bytes());
            Ok(Signature(signing_key.sign(message).to_bytes()))
        }
        KeyAlgorithm::EcdsaSecp256k1 => {
            let signing_key = ecdsa_signing_key(private_key)?;
            let digest = Keccak256::digest(message);
            let sig: k256::ecdsa::Signature = signing_key
                .sign_prehash(&digest)
                .map_err(|e| KeyError::Signing(e.to_string()))?;
            let sig = sig.normalize_s().unwrap_or(sig);
            let mut bytes = [0u8; 64];
            bytes.copy_from_slice(&sig.to_bytes());
            Ok(Signature(bytes))
        }
    }
}

/// Verify a signature against a message and public key.
///
/// Returns `true` if the signature is valid, `false` otherwise.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    match public_key {
        PublicKey::Ed25519(bytes) => {
            let Ok(verifying_key) = VerifyingKey::from_bytes(bytes) else {
                return false;
            };
            let dalek_sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
            verifying_key.verify(message, &dalek_sig).is_ok()
        }
        PublicKey::EcdsaSecp256k1(bytes) => {
            let Ok(verifying_key) = k256::ecdsa::VerifyingKey::from_sec1_bytes(bytes) else {
                return false;
            };
            let Ok(sig) = k256::ecdsa::Signature::from_slice(signature.as_bytes()) else {
                return false;
            };
            let digest = Keccak256::digest(message);
            verifying_key.verify_prehash(&digest, &sig).is_ok()
        }
    }
}
