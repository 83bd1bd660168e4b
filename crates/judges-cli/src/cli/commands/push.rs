//! `judges push` - Upload the factbase to the remote store.

use anyhow::{Context, Result};
use judges_store::StoreResult;
use tracing::info;

use super::EXIT_SUCCESS;
use crate::cli::args::PushArgs;

pub async fn run(args: PushArgs) -> Result<i32> {
    let payload = std::fs::read(&args.file)
        .with_context(|| format!("failed to read factbase: {}", args.file.display()))?;

    match push_inner(&args, &payload).await {
        Ok(id) => {
            info!(id, size = payload.len(), name = %args.name, "factbase pushed");
            println!("{}", id);
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("push failed: {}", e);
            Ok(e.exit_code())
        }
    }
}

async fn push_inner(args: &PushArgs, payload: &[u8]) -> StoreResult<u64> {
    let client = args.conn.client()?;
    client.push(&args.name, payload, &args.meta).await
}
