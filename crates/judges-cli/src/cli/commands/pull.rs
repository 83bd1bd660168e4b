//! `judges pull` - Download the most recent factbase from the remote store.
//!
//! Resolution order: `exists` first (an unknown name is not an error),
//! then `recent` for the id, then the recorded job outcome — a remote job
//! that failed surfaces its captured output instead of a stale artifact —
//! and only then the artifact bytes.

use anyhow::{Context, Result};
use judges_store::{StoreClient, StoreResult};
use tracing::info;

use super::EXIT_SUCCESS;
use crate::cli::args::PullArgs;

enum PullOutcome {
    /// No artifact has ever been uploaded under the name.
    Missing,

    /// The remote job failed; its exit code and captured output.
    Failed { id: u64, code: i32, log: String },

    /// The artifact to write out.
    Artifact { id: u64, payload: Vec<u8> },
}

pub async fn run(args: PullArgs) -> Result<i32> {
    let client = match args.conn.client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("pull failed: {}", e);
            return Ok(e.exit_code());
        }
    };

    match pull_inner(&client, &args.name).await {
        Ok(PullOutcome::Missing) => {
            eprintln!("nothing to pull: no factbase named '{}'", args.name);
            Ok(EXIT_SUCCESS)
        }
        Ok(PullOutcome::Failed { id, code, log }) => {
            eprintln!("remote job #{} failed with exit code {}:", id, code);
            eprint!("{}", log);
            Ok(code)
        }
        Ok(PullOutcome::Artifact { id, payload }) => {
            std::fs::write(&args.file, &payload)
                .with_context(|| format!("failed to write {}", args.file.display()))?;
            info!(id, size = payload.len(), path = %args.file.display(), "factbase pulled");
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("pull failed: {}", e);
            Ok(e.exit_code())
        }
    }
}

async fn pull_inner(client: &StoreClient, name: &str) -> StoreResult<PullOutcome> {
    if !client.exists(name).await? {
        return Ok(PullOutcome::Missing);
    }
    let id = client.recent(name).await?;
    let code = client.exit_code(id).await?;
    if code != 0 {
        let log = client.stdout(id).await?;
        return Ok(PullOutcome::Failed { id, code, log });
    }
    let payload = client.pull(id).await?;
    Ok(PullOutcome::Artifact { id, payload })
}
