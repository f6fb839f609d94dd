use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jwt_compact::UntrustedToken;

use crate::ClaimSet;

/// The input could not be read as a compact JWT.
#[derive(Debug, thiserror::Error)]
pub enum MalformedToken {
    #[error("token is not a compact JWT: {0}")]
    Syntax(#[from] jwt_compact::ParseError),
    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token claims cannot be read: {0}")]
    Claims(#[from] serde_json::Error),
}

/// An identity token read without checking its signature.
///
/// Only the header fields needed to reason about re-signing and the claims
/// are kept. Tokens are values: augmenting one produces a new claim set and
/// a new token, never a modified copy of this one.
#[derive(Debug, Clone)]
pub struct IdentityToken {
    algorithm: String,
    key_id: Option<String>,
    token_type: Option<String>,
    claims: ClaimSet,
}

impl IdentityToken {
    /// Parses a compact token without verifying its signature.
    pub fn parse(raw: &str) -> Result<Self, MalformedToken> {
        let raw = raw.trim();
        let untrusted: UntrustedToken<'_> = UntrustedToken::new(raw)?;
        let header = untrusted.header();

        Ok(Self {
            algorithm: untrusted.algorithm().to_owned(),
            key_id: header.key_id.clone(),
            token_type: header.token_type.clone(),
            claims: decode_claims(raw)?,
        })
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    pub fn into_claims(self) -> ClaimSet {
        self.claims
    }
}

/// Decodes the payload segment as it was written. Registered claims such as
/// `exp` keep their exact JSON value and position.
fn decode_claims(raw: &str) -> Result<ClaimSet, MalformedToken> {
    let payload = raw.split('.').nth(1).unwrap_or_default();
    let payload = URL_SAFE_NO_PAD.decode(payload)?;

    Ok(serde_json::from_slice(&payload)?)
}
