//! Discovery and execution of judge packs.
//!
//! A pack is a subdirectory of the packs directory containing an executable
//! entry file named after the directory. Running a pack hands it the
//! factbase through a scratch file: the runner exports, spawns the entry
//! with the file path and the options as `k=v` arguments, and re-imports
//! the (possibly mutated) factbase when the pack exits cleanly.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::factbase::Factbase;
use crate::options::Options;

/// One runnable judge pack.
#[derive(Debug, Clone)]
pub struct Pack {
    name: String,
    dir: PathBuf,
    entry: PathBuf,
}

impl Pack {
    /// Pack name (the directory name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pack directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Run the pack against the factbase.
    pub fn run(&self, fb: &mut Factbase, options: &Options) -> CoreResult<()> {
        let scratch = tempfile::Builder::new()
            .prefix("judges-")
            .suffix(".fb")
            .tempfile()?;
        std::fs::write(scratch.path(), fb.export()?)?;

        let mut command = Command::new(&self.entry);
        command.arg(scratch.path()).current_dir(&self.dir);
        for (key, value) in options.iter() {
            command.arg(format!("{}={}", key, value));
        }
        debug!(pack = %self.name, entry = %self.entry.display(), "running judge pack");

        let status = command.status()?;
        if !status.success() {
            return Err(CoreError::Pack {
                name: self.name.clone(),
                code: status.code().unwrap_or(-1),
            });
        }

        let bytes = std::fs::read(scratch.path())?;
        *fb = Factbase::import(&bytes)?;
        Ok(())
    }
}

/// Pack discovery over one directory.
#[derive(Debug, Clone)]
pub struct Packs {
    dir: PathBuf,
}

impl Packs {
    /// Bind to a packs directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Find all packs, sorted by name. Subdirectories without an entry file
    /// named after them are skipped.
    pub fn discover(&self) -> CoreResult<Vec<Pack>> {
        let mut packs = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(String::from) else {
                continue;
            };
            let script = path.join(&name);
            if script.is_file() {
                packs.push(Pack {
                    name,
                    entry: script,
                    dir: path,
                });
            }
        }
        packs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(packs)
    }
}
