use std::path::PathBuf;

use serde::Deserialize;

/// Source of the user profile store.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfilesConfig {
    /// TOML file with `[[profiles]]` tables. Without it the store is empty.
    pub path: Option<PathBuf>,
}
