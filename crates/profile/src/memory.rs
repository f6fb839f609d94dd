use std::{collections::HashSet, path::Path};

use serde::Deserialize;

use crate::{
    AttributeLookup, AttributeLookupError, GroupResolutionError, GroupResolver, LoadError, UserProfile,
    UserProfileRequest,
};

/// Profile store held in memory, loaded from a TOML file of `[[profiles]]` tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: Vec<UserProfile>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
    #[serde(default)]
    profiles: Vec<UserProfile>,
}

impl MemoryProfileStore {
    /// Builds a store, rejecting two profiles for the same user in one tenant.
    pub fn new(profiles: Vec<UserProfile>) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();

        for profile in &profiles {
            if !seen.insert((profile.tenant_id, profile.username.as_str())) {
                return Err(LoadError::Duplicate {
                    tenant_id: profile.tenant_id,
                    username: profile.username.clone(),
                });
            }
        }

        Ok(Self { profiles })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, LoadError> {
        let file: ProfileFile = toml::from_str(content)?;
        Self::new(file.profiles)
    }

    pub fn profiles(&self) -> &[UserProfile] {
        &self.profiles
    }

    fn find(&self, tenant_id: i64, username: &str) -> Option<&UserProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.tenant_id == tenant_id && profile.username == username)
    }
}

impl GroupResolver for MemoryProfileStore {
    async fn group_ids(&self, request: &UserProfileRequest) -> Result<Vec<String>, GroupResolutionError> {
        let Some(profile) = self.find(request.tenant_id, &request.username) else {
            return Err(GroupResolutionError::UnknownUser {
                tenant_id: request.tenant_id,
                username: request.username.clone(),
            });
        };

        Ok(profile.groups.clone())
    }
}

impl AttributeLookup for MemoryProfileStore {
    async fn find_profiles_by_attribute(&self, key: &str, value: &str) -> Result<Vec<UserProfile>, AttributeLookupError> {
        let matches: Vec<_> = self
            .profiles
            .iter()
            .filter(|profile| profile.has_attribute(key, value))
            .cloned()
            .collect();

        log::debug!("Attribute lookup {key}={value} matched {} profile(s)", matches.len());

        Ok(matches)
    }
}
