//! `judges update` - Run every judge pack against the factbase.

use anyhow::Result;
use judges_core::{Impex, Options, Packs};
use tracing::{debug, info, warn};

use super::EXIT_SUCCESS;
use crate::cli::args::UpdateArgs;

pub fn run(args: UpdateArgs) -> Result<i32> {
    let options = Options::new(&args.options);
    if !options.is_empty() {
        debug!("options:\n{}", options);
    }

    let impex = Impex::new(&args.file);
    let mut fb = impex.import_or_empty()?;

    let packs = Packs::new(&args.dir).discover()?;
    let mut done = 0;
    for (index, pack) in packs.iter().enumerate() {
        info!(pack = pack.name(), index, dir = %pack.dir().display(), "running judge pack");
        match pack.run(&mut fb, &options) {
            Ok(()) => done += 1,
            Err(e) => warn!(pack = pack.name(), error = %e, "judge pack failed"),
        }
    }
    info!("{} judges processed", done);

    impex.export(&fb)?;
    Ok(EXIT_SUCCESS)
}
