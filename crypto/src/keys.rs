//! Key generation, derivation and parsing.

use ed25519_dalek::SigningKey;
use ledgerkit_types::{KeyAlgorithm, KeyParseError, PrivateKey, PublicKey};
use rand::rngs::OsRng;

use crate::error::KeyError;

/// DER PKCS#8 prefix of a 32-byte Ed25519 private key.
pub const ED25519_PRIVATE_DER_PREFIX: &str = "302e020100300506032b657004220420";
/// DER prefix of a 32-byte secp256k1 private key.
pub const ECDSA_PRIVATE_DER_PREFIX: &str = "3030020100300706052b8104000a04220420";

/// A private key with its derived public half.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

/// Generate a new key pair from a secure random source.
pub fn generate_keypair(algorithm: KeyAlgorithm) -> KeyPair {
    match algorithm {
        KeyAlgorithm::Ed25519 => {
            let private = PrivateKey::new(algorithm, SigningKey::generate(&mut OsRng).to_bytes());
            KeyPair {
                public: ed25519_public(&private),
                private,
            }
        }
        KeyAlgorithm::EcdsaSecp256k1 => {
            let key = k256::ecdsa::SigningKey::random(&mut OsRng);
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(&key.to_bytes());
            KeyPair {
                public: ecdsa_public(&key),
                private: PrivateKey::new(algorithm, bytes),
            }
        }
    }
}

/// Derive the public key from a private key.
///
/// Fails only for secp256k1 scalars outside the curve order.
pub fn public_from_private(private: &PrivateKey) -> Result<PublicKey, KeyError> {
    match private.algorithm() {
        KeyAlgorithm::Ed25519 => Ok(ed25519_public(private)),
        KeyAlgorithm::EcdsaSecp256k1 => Ok(ecdsa_public(&ecdsa_signing_key(private)?)),
    }
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> Result<KeyPair, KeyError> {
    let public = public_from_private(&private)?;
    Ok(KeyPair { public, private })
}

/// Derive an Ed25519 key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let private = PrivateKey::new(KeyAlgorithm::Ed25519, *seed);
    KeyPair {
        public: ed25519_public(&private),
        private,
    }
}

/// Parse a private key string.
///
/// Accepts DER hex for either algorithm, or 64 raw hex characters. Raw keys
/// carry no algorithm marker, so they are read as `algorithm` when given and
/// as Ed25519 otherwise. A `0x` prefix is ignored.
pub fn parse_private_key(
    input: &str,
    algorithm: Option<KeyAlgorithm>,
) -> Result<PrivateKey, KeyError> {
    let trimmed = input.trim();
    let lower = trimmed
        .strip_prefix("0x")
        .unwrap_or(trimmed)
        .to_ascii_lowercase();

    let (detected, raw) = if let Some(raw) = lower.strip_prefix(ED25519_PRIVATE_DER_PREFIX) {
        (KeyAlgorithm::Ed25519, raw)
    } else if let Some(raw) = lower.strip_prefix(ECDSA_PRIVATE_DER_PREFIX) {
        (KeyAlgorithm::EcdsaSecp256k1, raw)
    } else {
        (algorithm.unwrap_or(KeyAlgorithm::Ed25519), lower.as_str())
    };

    if let Some(expected) = algorithm {
        if expected != detected {
            return Err(KeyParseError::UnsupportedType(format!(
                "{} key given where {} was expected",
                detected.as_str(),
                expected.as_str()
            ))
            .into());
        }
    }

    let bytes = hex::decode(raw).map_err(|_| KeyParseError::InvalidHex)?;
    let bytes: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| KeyParseError::InvalidLength(bytes.len()))?;
    let key = PrivateKey::new(detected, bytes);
    if detected == KeyAlgorithm::EcdsaSecp256k1 {
        ecdsa_signing_key(&key)?;
    }
    Ok(key)
}

fn ed25519_public(private: &PrivateKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(private.as_bytes());
    PublicKey::Ed25519(signing_key.verifying_key().to_bytes())
}

pub(crate) fn ecdsa_signing_key(private: &PrivateKey) -> Result<k256::ecdsa::SigningKey, KeyError> {
    k256::ecdsa::SigningKey::from_slice(private.as_bytes())
        .map_err(|_| KeyError::InvalidScalar("secp256k1"))
}

fn ecdsa_public(signing_key: &k256::ecdsa::SigningKey) -> PublicKey {
    let point = signing_key.verifying_key().to_encoded_point(true);
    let mut bytes = [0u8; 33];
    bytes.copy_from_slice(point.as_bytes());
    PublicKey::EcdsaSecp256k1(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_valid_keypairs() {
        for algorithm in [KeyAlgorithm::Ed25519, KeyAlgorithm::EcdsaSecp256k1] {
            let kp = generate_keypair(algorithm);
            assert_eq!(kp.public.algorithm(), algorithm);
            assert_eq!(public_from_private(&kp.private).unwrap(), kp.public);
        }
    }

    #[test]
    fn keypair_from_seed_deterministic() {
        let kp1 = keypair_from_seed(&[42u8; 32]);
        let kp2 = keypair_from_seed(&[42u8; 32]);
        assert_eq!(kp1.public, kp2.public);
        assert_ne!(keypair_from_seed(&[1u8; 32]).public, kp1.public);
    }

    #[test]
    fn ecdsa_public_is_compressed() {
        let kp = generate_keypair(KeyAlgorithm::EcdsaSecp256k1);
        let first = kp.public.as_bytes()[0];
        assert!(first == 0x02 || first == 0x03);
    }

    #[test]
    fn parse_der_ed25519() {
        let der = format!("{ED25519_PRIVATE_DER_PREFIX}{}", "11".repeat(32));
        let key = parse_private_key(&der, None).unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::Ed25519);
        assert_eq!(key.as_bytes(), &[0x11; 32]);
    }

    #[test]
    fn parse_der_ecdsa() {
        let der = format!("0x{ECDSA_PRIVATE_DER_PREFIX}{}", "11".repeat(32));
        let key = parse_private_key(&der, None).unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::EcdsaSecp256k1);
    }

    #[test]
    fn raw_hex_defaults_to_ed25519() {
        let key = parse_private_key(&"ab".repeat(32), None).unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::Ed25519);

        let key = parse_private_key(&"ab".repeat(32), Some(KeyAlgorithm::EcdsaSecp256k1)).unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::EcdsaSecp256k1);
    }

    #[test]
    fn der_type_must_match_requested_algorithm() {
        let der = format!("{ED25519_PRIVATE_DER_PREFIX}{}", "11".repeat(32));
        assert!(parse_private_key(&der, Some(KeyAlgorithm::EcdsaSecp256k1)).is_err());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            parse_private_key("xyz", None),
            Err(KeyError::Parse(KeyParseError::InvalidHex))
        ));
        assert!(matches!(
            parse_private_key("abcd", None),
            Err(KeyError::Parse(KeyParseError::InvalidLength(2)))
        ));
        // zero is not a valid secp256k1 scalar
        assert!(matches!(
            parse_private_key(&"00".repeat(32), Some(KeyAlgorithm::EcdsaSecp256k1)),
            Err(KeyError::InvalidScalar(_))
        ));
    }
}
