//! Cryptographic primitives for LedgerKit.
//!
//! - **Ed25519** signing and verification
//! - **ECDSA secp256k1** over a Keccak-256 prehash, `r || s` signatures
//! - Private-key parsing from DER or raw hex, as printed by ledger tooling

pub mod error;
pub mod keys;
pub mod sign;

pub use error::KeyError;
pub use keys::{
    generate_keypair, keypair_from_private, keypair_from_seed, parse_private_key,
    public_from_private, KeyPair,
};
pub use sign::{sign_message, verify_signature};
