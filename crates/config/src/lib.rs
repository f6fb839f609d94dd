mod error;
mod groups;
mod keys;
mod loader;
mod profiles;

use std::path::Path;

use serde::Deserialize;

pub use error::Error;
pub use groups::GroupsConfig;
pub use keys::KeysConfig;
pub use profiles::ProfilesConfig;

pub(crate) type Result<T> = std::result::Result<T, error::Error>;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub keys: KeysConfig,
    #[serde(default)]
    pub groups: GroupsConfig,
    #[serde(default)]
    pub profiles: ProfilesConfig,
}

impl Config {
    /// Reads and validates the configuration file.
    ///
    /// Relative file paths inside the configuration are resolved against the
    /// directory holding the configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Config> {
        loader::load(path)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::Config;

    #[test]
    fn all_values() {
        let config = indoc! {r#"
            [keys]
            key_id = "key-2024-01"
            private_key = "keys/signing.pem"
            public_key = "keys/signing.pub.pem"

            [groups]
            timeout = "2s"

            [profiles]
            path = "profiles.toml"
        "#};

        let config: Config = toml::from_str(config).unwrap();

        insta::assert_debug_snapshot!(&config, @r#"
        Config {
            keys: KeysConfig {
                key_id: "key-2024-01",
                private_key: Some(
                    "keys/signing.pem",
                ),
                public_key: Some(
                    "keys/signing.pub.pem",
                ),
            },
            groups: GroupsConfig {
                timeout: Some(
                    2s,
                ),
            },
            profiles: ProfilesConfig {
                path: Some(
                    "profiles.toml",
                ),
            },
        }
        "#);
    }

    #[test]
    fn defaults() {
        let config = indoc! {r#"
            [keys]
            key_id = "key-2024-01"
            private_key = "signing.pem"
        "#};

        let config: Config = toml::from_str(config).unwrap();

        insta::assert_debug_snapshot!(&config, @r#"
        Config {
            keys: KeysConfig {
                key_id: "key-2024-01",
                private_key: Some(
                    "signing.pem",
                ),
                public_key: None,
            },
            groups: GroupsConfig {
                timeout: None,
            },
            profiles: ProfilesConfig {
                path: None,
            },
        }
        "#);
    }

    #[test]
    fn keys_section_is_required() {
        let result = toml::from_str::<Config>("");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let config = indoc! {r#"
            [keys]
            key_id = "key-2024-01"
            private_key = "signing.pem"
            algorithm = "RS512"
        "#};

        let result = toml::from_str::<Config>(config);
        assert!(result.unwrap_err().to_string().contains("unknown field `algorithm`"));
    }

    #[test]
    fn human_readable_timeouts() {
        let config = indoc! {r#"
            [keys]
            key_id = "k"
            public_key = "signing.pub.pem"

            [groups]
            timeout = "250ms"
        "#};

        let config: Config = toml::from_str(config).unwrap();

        assert_eq!(config.groups.timeout, Some(std::time::Duration::from_millis(250)));
        assert!(!config.keys.can_sign());
    }
}
