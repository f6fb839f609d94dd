//! Signing key material and the provider handing out the active key.

use std::{fmt, path::Path, sync::Arc};

use arc_swap::ArcSwap;
use config::KeysConfig;
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    traits::PublicKeyParts,
};
use secrecy::{ExposeSecret, SecretString};

use crate::error::KeyError;

/// An RSA key pair and the identifier advertised as `kid` for it.
///
/// The private half is optional so a deployment can verify tokens without
/// being able to sign them. When present, the public half is derived from it.
#[derive(Clone)]
pub struct KeyMaterial {
    key_id: String,
    private_key: Option<RsaPrivateKey>,
    public_key: RsaPublicKey,
}

impl KeyMaterial {
    pub fn new(key_id: impl Into<String>, private_key: RsaPrivateKey) -> Self {
        let public_key = RsaPublicKey::from(&private_key);

        Self {
            key_id: key_id.into(),
            private_key: Some(private_key),
            public_key,
        }
    }

    pub fn verification_only(key_id: impl Into<String>, public_key: RsaPublicKey) -> Self {
        Self {
            key_id: key_id.into(),
            private_key: None,
            public_key,
        }
    }

    /// Builds key material from PEM text.
    ///
    /// Private keys may be PKCS#8 or PKCS#1, public keys SPKI or PKCS#1. If
    /// both halves are given they must belong together.
    pub fn from_pem(
        key_id: impl Into<String>,
        private_pem: Option<&SecretString>,
        public_pem: Option<&str>,
    ) -> Result<Self, KeyError> {
        let key_id = key_id.into();

        if key_id.trim().is_empty() {
            return Err(KeyError::EmptyKeyId);
        }

        let public_key = public_pem.map(parse_public_key).transpose()?;

        let Some(private_pem) = private_pem else {
            return match public_key {
                Some(public_key) => Ok(Self::verification_only(key_id, public_key)),
                None => Err(KeyError::Missing(key_id)),
            };
        };

        let material = Self::new(key_id, parse_private_key(private_pem.expose_secret())?);

        match public_key {
            Some(public_key) if public_key != material.public_key => Err(KeyError::Mismatch(material.key_id)),
            _ => Ok(material),
        }
    }

    /// Reads the PEM files named in the configuration.
    pub fn load(config: &KeysConfig) -> Result<Self, KeyError> {
        let private_pem = config.private_key.as_deref().map(read_pem).transpose()?;
        let public_pem = config.public_key.as_deref().map(read_pem).transpose()?;

        Self::from_pem(
            config.key_id.clone(),
            private_pem.as_ref(),
            public_pem.as_ref().map(|pem| pem.expose_secret()),
        )
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn private_key(&self) -> Option<&RsaPrivateKey> {
        self.private_key.as_ref()
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Modulus length in bits.
    pub fn bits(&self) -> usize {
        self.public_key.size() * 8
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key_id", &self.key_id)
            .field("bits", &self.bits())
            .field("can_sign", &self.private_key.is_some())
            .finish_non_exhaustive()
    }
}

fn read_pem(path: &Path) -> Result<SecretString, KeyError> {
    std::fs::read_to_string(path)
        .map(SecretString::from)
        .map_err(|source| KeyError::Read {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_private_key(pem: &str) -> Result<RsaPrivateKey, KeyError> {
    let result = if pem.contains("BEGIN RSA PRIVATE KEY") {
        RsaPrivateKey::from_pkcs1_pem(pem).map_err(|error| error.to_string())
    } else {
        RsaPrivateKey::from_pkcs8_pem(pem).map_err(|error| error.to_string())
    };

    result.map_err(KeyError::InvalidPrivateKey)
}

fn parse_public_key(pem: &str) -> Result<RsaPublicKey, KeyError> {
    let result = if pem.contains("BEGIN RSA PUBLIC KEY") {
        RsaPublicKey::from_pkcs1_pem(pem).map_err(|error| error.to_string())
    } else {
        RsaPublicKey::from_public_key_pem(pem).map_err(|error| error.to_string())
    };

    result.map_err(KeyError::InvalidPublicKey)
}

/// Supplies the key new tokens are signed with.
pub trait KeyProvider: Send + Sync {
    /// A snapshot of the active key. The key id always belongs to the returned
    /// pair, even while the key is being rotated.
    fn current_key(&self) -> Arc<KeyMaterial>;
}

impl<T: KeyProvider> KeyProvider for Arc<T> {
    fn current_key(&self) -> Arc<KeyMaterial> {
        (**self).current_key()
    }
}

/// Holds the active key and swaps it atomically on rotation.
pub struct KeyStore {
    current: ArcSwap<KeyMaterial>,
}

impl KeyStore {
    pub fn new(key: KeyMaterial) -> Self {
        Self {
            current: ArcSwap::from_pointee(key),
        }
    }

    pub fn load(config: &KeysConfig) -> Result<Self, KeyError> {
        let key = KeyMaterial::load(config)?;
        log::info!("Loaded {} bit RSA key '{}'", key.bits(), key.key_id());

        Ok(Self::new(key))
    }

    /// Makes `key` the active key and returns the one it replaced.
    ///
    /// Signing operations that already took a snapshot finish with the old key.
    pub fn rotate(&self, key: KeyMaterial) -> Arc<KeyMaterial> {
        let previous = self.current.swap(Arc::new(key));

        log::info!(
            "Rotated signing key from '{}' to '{}'",
            previous.key_id(),
            self.current.load().key_id()
        );

        previous
    }
}

impl KeyProvider for KeyStore {
    fn current_key(&self) -> Arc<KeyMaterial> {
        self.current.load_full()
    }
}
