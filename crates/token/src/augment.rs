use std::{panic::AssertUnwindSafe, time::Duration};

use claims::{ClaimSet, IdentityToken};
use futures::FutureExt;
use profile::{GroupResolutionError, GroupResolver, UserProfileRequest};

/// How the `groups` claim was handled for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupsOutcome {
    /// The resolver answered; the claim holds this many groups.
    Resolved(usize),
    /// The token has no usable `email` claim; the resolver was not called.
    NoSubject,
    /// The resolver failed; the original claims were kept.
    ResolverFailed,
}

/// Result of augmenting one token. Always carries a usable claim set.
#[derive(Debug, Clone)]
pub struct Augmentation {
    pub claims: ClaimSet,
    pub subject: Option<String>,
    pub outcome: GroupsOutcome,
}

/// Adds group memberships to the claims of a token.
pub struct ClaimsAugmenter<R> {
    resolver: R,
    timeout: Option<Duration>,
}

impl<R: GroupResolver> ClaimsAugmenter<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            timeout: None,
        }
    }

    /// Gives up on the resolver after `timeout`, keeping the original claims.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Builds the claim set for re-issuing `token` within `tenant_id`.
    ///
    /// Never fails: a token without a subject, or a subject whose groups
    /// cannot be resolved, keeps its claims as they are.
    pub async fn augment(&self, token: &IdentityToken, tenant_id: i64) -> Augmentation {
        let original = token.claims();

        let Some(subject) = original.email() else {
            log::debug!("Token carries no usable email claim, skipping group augmentation");

            return Augmentation {
                claims: original.clone(),
                subject: None,
                outcome: GroupsOutcome::NoSubject,
            };
        };

        let request = UserProfileRequest::new(tenant_id, subject);

        match self.resolve(&request).await {
            Ok(groups) => {
                log::debug!(tenant_id = tenant_id; "Resolved {} group(s) for {subject}", groups.len());

                Augmentation {
                    outcome: GroupsOutcome::Resolved(groups.len()),
                    claims: original.with_groups(groups),
                    subject: Some(request.username),
                }
            }
            Err(error) => {
                log::error!(tenant_id = tenant_id; "Error while adding custom claims to the token belonging to {subject}: {error}");

                Augmentation {
                    claims: original.clone(),
                    subject: Some(request.username),
                    outcome: GroupsOutcome::ResolverFailed,
                }
            }
        }
    }

    /// Runs the resolver under the optional timeout. A resolver that panics
    /// counts as unavailable.
    async fn resolve(&self, request: &UserProfileRequest) -> Result<Vec<String>, GroupResolutionError> {
        let lookup = AssertUnwindSafe(self.resolver.group_ids(request)).catch_unwind();

        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, lookup)
                .await
                .map_err(|_| GroupResolutionError::Timeout(timeout))?,
            None => lookup.await,
        };

        result.unwrap_or_else(|_| Err(GroupResolutionError::Unavailable("group resolver panicked".to_string())))
    }
}
