use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "central", version, about = "Re-issues identity tokens with group membership claims")]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "CENTRAL_CONFIG", default_value = "./central.toml")]
    pub config: PathBuf,

    /// Log filter, e.g. "info" or "token=debug,profile=debug"
    #[arg(long, env = "CENTRAL_LOG", default_value = "info")]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add the user's groups to a token and sign it with the active key
    Reissue {
        /// Tenant the user's groups are resolved in
        #[arg(long)]
        tenant: i64,

        /// The token to re-issue. Read from stdin when omitted.
        token: Option<String>,
    },

    /// Check a token against the configured key and print its claims
    Verify {
        /// The token to verify. Read from stdin when omitted.
        token: Option<String>,
    },

    /// Print the profiles carrying an attribute with exactly this key and value
    Lookup {
        #[arg(long)]
        key: String,

        #[arg(long)]
        value: String,
    },
}
