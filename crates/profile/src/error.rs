use std::time::Duration;

/// Group resolution failed. The token pipeline absorbs these.
#[derive(Debug, thiserror::Error)]
pub enum GroupResolutionError {
    #[error("no profile for user '{username}' in tenant {tenant_id}")]
    UnknownUser { tenant_id: i64, username: String },
    #[error("group resolution timed out after {0:?}")]
    Timeout(Duration),
    #[error("group store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AttributeLookupError {
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read profile file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse profile file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Duplicate profile for user '{username}' in tenant {tenant_id}")]
    Duplicate { tenant_id: i64, username: String },
}
