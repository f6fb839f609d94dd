use claims::ClaimSet;
use jwt_compact::{AlgorithmExt, Claims, Header, alg::Rsa};

use crate::{error::SigningError, keys::KeyMaterial};

/// Value of the `alg` header of every token this crate signs.
pub const ALGORITHM: &str = "RS256";

/// Value of the `typ` header of every token this crate signs.
pub const TOKEN_TYPE: &str = "JWT";

/// Smallest RSA modulus accepted for signing.
pub const MIN_KEY_BITS: usize = 2048;

/// Signs `claims` with `key` and returns the compact serialization.
///
/// The header is always `{"alg":"RS256","kid":<key id>,"typ":"JWT"}`.
pub fn sign(claims: &ClaimSet, key: &KeyMaterial) -> Result<String, SigningError> {
    if key.key_id().trim().is_empty() {
        return Err(SigningError::MissingKeyId);
    }

    let Some(private_key) = key.private_key() else {
        return Err(SigningError::MissingPrivateKey(key.key_id().to_owned()));
    };

    if key.bits() < MIN_KEY_BITS {
        return Err(SigningError::WeakKey {
            key_id: key.key_id().to_owned(),
            bits: key.bits(),
            min_bits: MIN_KEY_BITS,
        });
    }

    claims.validate()?;

    let header = Header::empty().with_key_id(key.key_id()).with_token_type(TOKEN_TYPE);
    let token = Rsa::rs256().token(&header, &Claims::new(claims), private_key)?;

    Ok(token)
}
