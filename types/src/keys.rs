//! Cryptographic key types for signing authority.
//!
//! The ledger accepts two key algorithms: Ed25519 and ECDSA over secp256k1.
//! Public keys render as DER-encoded hex (the form the ledger tooling prints)
//! and parse from either DER or raw hex.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::KeyParseError;

/// DER SubjectPublicKeyInfo prefix for a 32-byte Ed25519 key.
pub const ED25519_PUBLIC_DER_PREFIX: &str = "302a300506032b6570032100";
/// DER SubjectPublicKeyInfo prefix for a 33-byte compressed secp256k1 key.
pub const ECDSA_PUBLIC_DER_PREFIX: &str = "302d300706052a8648ce3d020106052b8104000a032200";

/// Signature algorithm of a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyAlgorithm {
    Ed25519,
    EcdsaSecp256k1,
}

impl KeyAlgorithm {
    /// The name the mirror node uses in `key._type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519 => "ED25519",
            Self::EcdsaSecp256k1 => "ECDSA_SECP256K1",
        }
    }
}

impl FromStr for KeyAlgorithm {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ED25519" => Ok(Self::Ed25519),
            "ECDSA" | "ECDSA_SECP256K1" | "SECP256K1" => Ok(Self::EcdsaSecp256k1),
            other => Err(KeyParseError::UnsupportedType(other.to_string())),
        }
    }
}

/// A public key that may be embedded in a transaction or verify a signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicKey {
    /// 32-byte Ed25519 verifying key.
    Ed25519([u8; 32]),
    /// 33-byte compressed secp256k1 point.
    EcdsaSecp256k1([u8; 33]),
}

impl PublicKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
            Self::EcdsaSecp256k1(_) => KeyAlgorithm::EcdsaSecp256k1,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Ed25519(b) => b,
            Self::EcdsaSecp256k1(b) => b,
        }
    }

    /// Build a key from raw bytes of a known algorithm.
    pub fn from_raw(algorithm: KeyAlgorithm, bytes: &[u8]) -> Result<Self, KeyParseError> {
        match algorithm {
            KeyAlgorithm::Ed25519 => {
                let arr: [u8; 32] = bytes
                    .try_into()
                    .map_err(|_| KeyParseError::InvalidLength(bytes.len()))?;
                Ok(Self::Ed25519(arr))
            }
            KeyAlgorithm::EcdsaSecp256k1 => {
                let arr: [u8; 33] = bytes
                    .try_into()
                    .map_err(|_| KeyParseError::InvalidLength(bytes.len()))?;
                if arr[0] != 0x02 && arr[0] != 0x03 {
                    return Err(KeyParseError::InvalidEcdsaPrefix);
                }
                Ok(Self::EcdsaSecp256k1(arr))
            }
        }
    }

    /// Raw key bytes as lowercase hex, without the DER prefix.
    pub fn to_string_raw(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// DER-encoded key as lowercase hex.
    pub fn to_string_der(&self) -> String {
        let prefix = match self {
            Self::Ed25519(_) => ED25519_PUBLIC_DER_PREFIX,
            Self::EcdsaSecp256k1(_) => ECDSA_PUBLIC_DER_PREFIX,
        };
        format!("{prefix}{}", self.to_string_raw())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_der())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}:{})", self.algorithm().as_str(), self.to_string_raw())
    }
}

impl FromStr for PublicKey {
    type Err = KeyParseError;

    /// Accepts DER hex for either algorithm, 64 hex chars (raw Ed25519) or
    /// 66 hex chars (raw compressed secp256k1). A `0x` prefix is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s).to_ascii_lowercase();
        if let Some(raw) = s.strip_prefix(ED25519_PUBLIC_DER_PREFIX) {
            let bytes = hex::decode(raw).map_err(|_| KeyParseError::InvalidHex)?;
            return Self::from_raw(KeyAlgorithm::Ed25519, &bytes);
        }
        if let Some(raw) = s.strip_prefix(ECDSA_PUBLIC_DER_PREFIX) {
            let bytes = hex::decode(raw).map_err(|_| KeyParseError::InvalidHex)?;
            return Self::from_raw(KeyAlgorithm::EcdsaSecp256k1, &bytes);
        }
        let bytes = hex::decode(&s).map_err(|_| KeyParseError::InvalidHex)?;
        match bytes.len() {
            32 => Self::from_raw(KeyAlgorithm::Ed25519, &bytes),
            33 => Self::from_raw(KeyAlgorithm::EcdsaSecp256k1, &bytes),
            n => Err(KeyParseError::InvalidLength(n)),
        }
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_der())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A 32-byte private key (Ed25519 seed or secp256k1 scalar).
///
/// This type intentionally does not implement `Debug`, `Serialize`, or `Clone`
/// to prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    #[zeroize(skip)]
    algorithm: KeyAlgorithm,
    bytes: [u8; 32],
}

impl PrivateKey {
    pub fn new(algorithm: KeyAlgorithm, bytes: [u8; 32]) -> Self {
        Self { algorithm, bytes }
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

/// A 64-byte signature (Ed25519, or ECDSA `r || s`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SigVisitor;

        impl<'de> serde::de::Visitor<'de> for SigVisitor {
            type Value = Signature;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "64 bytes")
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                let arr: [u8; 64] = v
                    .try_into()
                    .map_err(|_| E::invalid_length(v.len(), &self))?;
                Ok(Signature(arr))
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                let mut arr = [0u8; 64];
                for (i, byte) in arr.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(Signature(arr))
            }
        }

        deserializer.deserialize_bytes(SigVisitor)
    }
}
