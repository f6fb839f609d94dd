#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use claims::ClaimSet;
use profile::{GroupResolutionError, GroupResolver, UserProfileRequest};
use rsa::{RsaPrivateKey, pkcs1::DecodeRsaPrivateKey, pkcs8::DecodePrivateKey};
use serde_json::Value;
use token::{KeyMaterial, KeyProvider, KeyStore};

pub const KEY_ID: &str = "key-2024-01";
pub const ROTATED_KEY_ID: &str = "key-2024-02";

const FIRST_PEM: &str = include_str!("../fixtures/signing_2024_01.pem");
const SECOND_PEM: &str = include_str!("../fixtures/signing_2024_02.pkcs1.pem");

pub fn signing_key() -> KeyMaterial {
    KeyMaterial::new(KEY_ID, RsaPrivateKey::from_pkcs8_pem(FIRST_PEM).unwrap())
}

pub fn rotated_key() -> KeyMaterial {
    KeyMaterial::new(ROTATED_KEY_ID, RsaPrivateKey::from_pkcs1_pem(SECOND_PEM).unwrap())
}

pub fn claim_set(value: Value) -> ClaimSet {
    serde_json::from_value(value).unwrap()
}

/// A token as an upstream identity provider would hand it over, signed with a
/// key this service does not manage.
pub fn upstream_token(claims: Value) -> String {
    let upstream = KeyMaterial::new("upstream", RsaPrivateKey::from_pkcs1_pem(SECOND_PEM).unwrap());
    token::sign(&claim_set(claims), &upstream).unwrap()
}

pub struct StaticGroups(pub Vec<&'static str>);

impl GroupResolver for StaticGroups {
    async fn group_ids(&self, _: &UserProfileRequest) -> Result<Vec<String>, GroupResolutionError> {
        Ok(self.0.iter().map(|group| group.to_string()).collect())
    }
}

pub struct FailingResolver;

impl GroupResolver for FailingResolver {
    async fn group_ids(&self, _: &UserProfileRequest) -> Result<Vec<String>, GroupResolutionError> {
        Err(GroupResolutionError::Unavailable("connection refused".to_string()))
    }
}

pub struct PanickingResolver;

impl GroupResolver for PanickingResolver {
    #[allow(clippy::panic)]
    async fn group_ids(&self, _: &UserProfileRequest) -> Result<Vec<String>, GroupResolutionError> {
        panic!("group store driver bug")
    }
}

pub struct SlowResolver(pub Duration);

impl GroupResolver for SlowResolver {
    async fn group_ids(&self, _: &UserProfileRequest) -> Result<Vec<String>, GroupResolutionError> {
        tokio::time::sleep(self.0).await;
        Ok(vec!["too-late".to_string()])
    }
}

/// Records every request before handing it to the wrapped resolver.
pub struct Recording<R> {
    inner: R,
    requests: Mutex<Vec<UserProfileRequest>>,
}

impl<R> Recording<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<UserProfileRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl<R: GroupResolver> GroupResolver for Recording<R> {
    async fn group_ids(&self, request: &UserProfileRequest) -> Result<Vec<String>, GroupResolutionError> {
        self.requests.lock().unwrap().push(request.clone());
        self.inner.group_ids(request).await
    }
}

/// Counts how often the active key is requested.
pub struct CountingKeys {
    inner: KeyStore,
    reads: AtomicUsize,
}

impl CountingKeys {
    pub fn new(key: KeyMaterial) -> Self {
        Self {
            inner: KeyStore::new(key),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl KeyProvider for CountingKeys {
    fn current_key(&self) -> Arc<KeyMaterial> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.current_key()
    }
}
