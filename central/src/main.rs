use std::io::Read;

use anyhow::Context;
use args::{Args, Command};
use clap::Parser;
use config::Config;
use profile::{AttributeLookup, MemoryProfileStore};
use token::{ClaimsAugmenter, KeyMaterial, KeyStore, TokenService};

mod args;
mod logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init(&args.log);

    let config = Config::load(&args.config)?;

    match args.command {
        Command::Reissue { tenant, token } => {
            let raw = read_token(token)?;

            let mut augmenter = ClaimsAugmenter::new(profile_store(&config)?);

            if let Some(timeout) = config.groups.timeout {
                augmenter = augmenter.with_timeout(timeout);
            }

            let service = TokenService::new(augmenter, KeyStore::load(&config.keys)?);
            let reissued = service.reissue_with_claims(&raw, tenant).await?;

            println!("{reissued}");
        }
        Command::Verify { token } => {
            let raw = read_token(token)?;
            let key = KeyMaterial::load(&config.keys)?;
            let claims = token::verify(&raw, &key)?;

            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
        Command::Lookup { key, value } => {
            let profiles = profile_store(&config)?
                .find_profiles_by_attribute(&key, &value)
                .await?;

            println!("{}", serde_json::to_string_pretty(&profiles)?);
        }
    }

    Ok(())
}

fn profile_store(config: &Config) -> anyhow::Result<MemoryProfileStore> {
    let Some(path) = &config.profiles.path else {
        log::warn!("No profile store configured, every user resolves to an unknown user");
        return Ok(MemoryProfileStore::default());
    };

    MemoryProfileStore::load(path).with_context(|| format!("Failed to load profiles from {}", path.display()))
}

fn read_token(token: Option<String>) -> anyhow::Result<String> {
    let token = match token {
        Some(token) => token,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read the token from stdin")?;
            input
        }
    };

    let token = token.trim();

    if token.is_empty() {
        anyhow::bail!("No token given");
    }

    Ok(token.to_owned())
}
