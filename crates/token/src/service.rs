use claims::IdentityToken;
use profile::GroupResolver;

use crate::{
    augment::{ClaimsAugmenter, GroupsOutcome},
    error::AugmentationError,
    keys::KeyProvider,
    signer,
};

/// Re-issues identity tokens with their group memberships, signed with the active key.
///
/// Each call is independent. The only state shared between calls is the key
/// provider, which hands out one consistent key snapshot per call.
pub struct TokenService<R, K> {
    augmenter: ClaimsAugmenter<R>,
    keys: K,
}

impl<R, K> TokenService<R, K>
where
    R: GroupResolver,
    K: KeyProvider,
{
    pub fn new(augmenter: ClaimsAugmenter<R>, keys: K) -> Self {
        Self { augmenter, keys }
    }

    pub fn augmenter(&self) -> &ClaimsAugmenter<R> {
        &self.augmenter
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    /// Parses `raw_token`, adds the `groups` claim for `tenant_id` and signs the result.
    ///
    /// Fails only when the input cannot be parsed or the result cannot be
    /// signed. A failed group resolution yields a token with the original claims.
    pub async fn reissue_with_claims(&self, raw_token: &str, tenant_id: i64) -> Result<String, AugmentationError> {
        let token = IdentityToken::parse(raw_token)?;
        let augmentation = self.augmenter.augment(&token, tenant_id).await;

        let key = self.keys.current_key();
        let signed = signer::sign(&augmentation.claims, &key)?;

        match augmentation.outcome {
            GroupsOutcome::Resolved(count) => {
                log::debug!("Re-issued token with {count} group(s) using key '{}'", key.key_id())
            }
            GroupsOutcome::NoSubject | GroupsOutcome::ResolverFailed => {
                log::debug!("Re-issued token with its original claims using key '{}'", key.key_id())
            }
        }

        Ok(signed)
    }
}
