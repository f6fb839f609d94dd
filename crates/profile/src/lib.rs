//! User profiles and the lookups the token pipeline depends on.

mod error;
mod memory;
mod model;

use std::{future::Future, sync::Arc};

pub use error::{AttributeLookupError, GroupResolutionError, LoadError};
pub use memory::MemoryProfileStore;
pub use model::{UserAttribute, UserProfile, UserProfileRequest};

/// Resolves the groups a user belongs to within a tenant.
pub trait GroupResolver: Send + Sync {
    /// Group identifiers of the requested user, in membership order.
    ///
    /// An empty list means the user belongs to no groups, which is not an error.
    /// Failures are reported as `Err`; callers treat a panic as an unavailable store.
    fn group_ids(
        &self,
        request: &UserProfileRequest,
    ) -> impl Future<Output = Result<Vec<String>, GroupResolutionError>> + Send;
}

/// Exact-match profile queries by attribute.
pub trait AttributeLookup: Send + Sync {
    /// Profiles carrying an attribute with exactly this key and value.
    ///
    /// Matching is case-sensitive on both sides, with no wildcards and no
    /// pagination. Each profile appears once, in store order.
    fn find_profiles_by_attribute(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<Vec<UserProfile>, AttributeLookupError>> + Send;
}

impl<T: GroupResolver> GroupResolver for Arc<T> {
    fn group_ids(
        &self,
        request: &UserProfileRequest,
    ) -> impl Future<Output = Result<Vec<String>, GroupResolutionError>> + Send {
        (**self).group_ids(request)
    }
}

impl<T: AttributeLookup> AttributeLookup for Arc<T> {
    fn find_profiles_by_attribute(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<Vec<UserProfile>, AttributeLookupError>> + Send {
        (**self).find_profiles_by_attribute(key, value)
    }
}
