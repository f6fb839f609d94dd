//! Signing key configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Where the active signing key lives and how it is advertised.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeysConfig {
    /// Identifier written as `kid` into every signed token header.
    pub key_id: String,
    /// PEM file with the RSA private key (PKCS#8 or PKCS#1).
    pub private_key: Option<PathBuf>,
    /// PEM file with the RSA public key. Derived from the private key when omitted.
    pub public_key: Option<PathBuf>,
}

impl KeysConfig {
    /// Whether tokens can be signed with this configuration.
    pub fn can_sign(&self) -> bool {
        self.private_key.is_some()
    }
}
