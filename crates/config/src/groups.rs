use std::time::Duration;

use duration_str::deserialize_option_duration;
use serde::Deserialize;

/// Group resolution settings.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupsConfig {
    /// Upper bound for one group resolution. A resolution that takes longer is
    /// treated like any other resolver failure.
    #[serde(deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}
