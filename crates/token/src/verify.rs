use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use claims::{ClaimSet, IdentityToken, MalformedToken};
use jwt_compact::{
    Algorithm, AlgorithmSignature,
    alg::{Rsa, RsaSignature},
};

use crate::{error::VerificationError, keys::KeyMaterial, signer::ALGORITHM};

/// Verifies a token signed by [`sign`](crate::sign) and returns its claims.
///
/// The token must declare RS256 and carry the key id of `key`. Only the
/// signature is checked; expiry and audience are left to the consumer. The
/// claims come back exactly as signed.
pub fn verify(raw: &str, key: &KeyMaterial) -> Result<ClaimSet, VerificationError> {
    let raw = raw.trim();
    let token = IdentityToken::parse(raw)?;

    if token.algorithm() != ALGORITHM {
        return Err(VerificationError::Algorithm(token.algorithm().to_owned()));
    }

    if token.key_id() != Some(key.key_id()) {
        return Err(VerificationError::KeyMismatch {
            expected: key.key_id().to_owned(),
            found: token.key_id().map(str::to_owned),
        });
    }

    let Some((signing_input, signature)) = raw.rsplit_once('.') else {
        return Err(VerificationError::InvalidSignature);
    };

    let signature = URL_SAFE_NO_PAD.decode(signature).map_err(MalformedToken::from)?;
    let signature = RsaSignature::try_from_slice(&signature).map_err(|_| VerificationError::InvalidSignature)?;

    if !Rsa::rs256().verify_signature(&signature, key.public_key(), signing_input.as_bytes()) {
        return Err(VerificationError::InvalidSignature);
    }

    Ok(token.into_claims())
}
