use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use judges_store::{StoreClient, StoreConfig, StoreResult};

#[derive(Parser)]
#[command(
    name = "judges",
    version,
    about = "Run judge packs against a factbase and sync it with a remote store"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run every judge pack against the factbase
    Update(UpdateArgs),
    /// Delete old facts from the factbase
    Trim(TrimArgs),
    /// Upload the factbase to the remote store
    Push(PushArgs),
    /// Download the most recent factbase from the remote store
    Pull(PullArgs),
    Version,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Directory with judge packs
    pub dir: PathBuf,

    /// Path of the factbase file
    pub file: PathBuf,

    /// Option passed to every pack, like k=v (repeatable)
    #[arg(long = "option", value_name = "k=v")]
    pub options: Vec<String>,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("selector")
        .required(true)
        .args(["days", "query"])
))]
pub struct TrimArgs {
    /// Path of the factbase file
    pub file: PathBuf,

    /// Delete facts older than this many days
    #[arg(long)]
    pub days: Option<u32>,

    /// Delete facts matching this query, like "(lt time 2024-01-01T00:00:00Z)"
    #[arg(long)]
    pub query: Option<String>,
}

/// Remote store connection, shared by push and pull.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Remote store host name
    #[arg(long)]
    pub host: String,

    /// Remote store TCP port
    #[arg(long, default_value_t = 443)]
    pub port: u16,

    /// Authentication token for the remote store
    #[arg(long, env = "JUDGES_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Use plain HTTP instead of HTTPS
    #[arg(long)]
    pub insecure: bool,

    /// Upload payloads without gzip compression
    #[arg(long)]
    pub no_compress: bool,
}

impl ConnectionArgs {
    /// Build a store client from these flags.
    pub fn client(&self) -> StoreResult<StoreClient> {
        StoreClient::new(
            StoreConfig::new(&self.host, self.port, &self.token)
                .with_secure(!self.insecure)
                .with_timeout(self.timeout)
                .with_compress(!self.no_compress),
        )
    }
}

#[derive(Args, Debug)]
pub struct PushArgs {
    /// Name to upload the factbase under
    pub name: String,

    /// Path of the factbase file
    pub file: PathBuf,

    #[command(flatten)]
    pub conn: ConnectionArgs,

    /// Metadata entry attached to the upload (repeatable)
    #[arg(long = "meta", value_name = "TEXT")]
    pub meta: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PullArgs {
    /// Name of the factbase to download
    pub name: String,

    /// Path to write the factbase to
    pub file: PathBuf,

    #[command(flatten)]
    pub conn: ConnectionArgs,
}
