use serde::{Deserialize, Serialize};

/// A user profile as kept by the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserProfile {
    pub username: String,
    pub tenant_id: i64,
    /// Attribute rows. The same key may appear several times.
    #[serde(default)]
    pub attributes: Vec<UserAttribute>,
    /// Group identifiers, in membership order.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl UserProfile {
    pub fn has_attribute(&self, key: &str, value: &str) -> bool {
        self.attributes
            .iter()
            .any(|attribute| attribute.key == key && attribute.value == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAttribute {
    pub key: String,
    pub value: String,
}

/// Identifies a user within a tenant for group resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfileRequest {
    pub tenant_id: i64,
    /// The user's email or username.
    pub username: String,
}

impl UserProfileRequest {
    pub fn new(tenant_id: i64, username: impl Into<String>) -> Self {
        Self {
            tenant_id,
            username: username.into(),
        }
    }
}
