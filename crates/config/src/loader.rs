use std::path::Path;

use indoc::indoc;

use crate::{Config, error::Error};

pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Config> {
    let path = path.as_ref().to_path_buf();
    let content = std::fs::read_to_string(&path)?;
    let mut config: Config = toml::from_str(&content)?;

    validate_keys(&config)?;
    validate_groups(&config)?;

    if let Some(base) = path.parent() {
        resolve_paths(&mut config, base);
    }

    if !config.keys.can_sign() {
        log::warn!(
            "No private key configured for key '{}': tokens can be verified but not signed",
            config.keys.key_id
        );
    }

    Ok(config)
}

pub(crate) fn validate_keys(config: &Config) -> crate::Result<()> {
    if config.keys.key_id.trim().is_empty() {
        return Err(Error::Invalid(
            "keys.key_id must not be empty: it is advertised as `kid` in every signed token".to_string(),
        ));
    }

    if config.keys.private_key.is_none() && config.keys.public_key.is_none() {
        return Err(Error::Invalid(
            indoc! {r#"
                No key configured. At least one of keys.private_key or keys.public_key is required.

                Example configuration:

                  [keys]
                  key_id = "key-2024-01"
                  private_key = "keys/signing.pem"
            "#}
            .to_string(),
        ));
    }

    Ok(())
}

pub(crate) fn validate_groups(config: &Config) -> crate::Result<()> {
    if config.groups.timeout.is_some_and(|timeout| timeout.is_zero()) {
        return Err(Error::Invalid(
            "groups.timeout must be greater than zero; omit it to wait for the resolver indefinitely".to_string(),
        ));
    }

    Ok(())
}

fn resolve_paths(config: &mut Config, base: &Path) {
    let paths = [
        &mut config.keys.private_key,
        &mut config.keys.public_key,
        &mut config.profiles.path,
    ];

    for path in paths.into_iter().flatten() {
        if path.is_relative() {
            *path = base.join(&*path);
        }
    }
}
