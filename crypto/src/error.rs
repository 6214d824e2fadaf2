use ledgerkit_types::KeyParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error(transparent)]
    Parse(#[from] KeyParseError),

    #[error("private key is not a valid {0} scalar")]
    InvalidScalar(&'static str),

    #[error("signing failed: {0}")]
    Signing(String),
}
