use std::path::PathBuf;

use claims::{MalformedToken, UnsupportedClaim};

/// Re-issuing a token failed. Group resolution failures never end up here.
#[derive(Debug, thiserror::Error)]
pub enum AugmentationError {
    #[error(transparent)]
    MalformedToken(#[from] MalformedToken),
    #[error(transparent)]
    Signing(#[from] SigningError),
}

#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("key '{0}' has no private key and cannot sign tokens")]
    MissingPrivateKey(String),
    #[error("signing key has an empty key id")]
    MissingKeyId,
    #[error("key '{key_id}' has {bits} bits; RS256 signing requires at least {min_bits}")]
    WeakKey { key_id: String, bits: usize, min_bits: usize },
    #[error(transparent)]
    UnsupportedClaim(#[from] UnsupportedClaim),
    #[error("failed to create token: {0}")]
    Creation(#[from] jwt_compact::CreationError),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error(transparent)]
    Malformed(#[from] MalformedToken),
    #[error("token is signed with {0}, expected RS256")]
    Algorithm(String),
    #[error("token key id {found:?} does not match key '{expected}'")]
    KeyMismatch { expected: String, found: Option<String> },
    #[error("token signature is invalid")]
    InvalidSignature,
}

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Failed to read key file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("key id must not be empty")]
    EmptyKeyId,
    #[error("Invalid RSA private key: {0}")]
    InvalidPrivateKey(String),
    #[error("Invalid RSA public key: {0}")]
    InvalidPublicKey(String),
    #[error("public key does not belong to the private key of key '{0}'")]
    Mismatch(String),
    #[error("no key material given for key '{0}'")]
    Missing(String),
}
