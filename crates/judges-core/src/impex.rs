//! Factbase import/export bound to a file path.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::factbase::Factbase;

/// Imports and exports a factbase from/to one file.
#[derive(Debug, Clone)]
pub struct Impex {
    path: PathBuf,
}

impl Impex {
    /// Bind to a file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The bound path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Import the factbase; the file must exist.
    pub fn import(&self) -> CoreResult<Factbase> {
        let bytes = std::fs::read(&self.path).map_err(|e| CoreError::Import {
            message: format!("cannot read {}: {}", self.path.display(), e),
        })?;
        let fb = Factbase::import(&bytes)?;
        info!(
            path = %self.path.display(),
            size = bytes.len(),
            facts = fb.len(),
            "factbase imported"
        );
        Ok(fb)
    }

    /// Import the factbase, or start an empty one when the file is absent.
    pub fn import_or_empty(&self) -> CoreResult<Factbase> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no factbase to import, starting empty");
            return Ok(Factbase::new());
        }
        self.import()
    }

    /// Export the factbase to the bound path.
    pub fn export(&self, fb: &Factbase) -> CoreResult<()> {
        let bytes = fb.export()?;
        std::fs::write(&self.path, &bytes).map_err(|e| CoreError::Export {
            message: format!("cannot write {}: {}", self.path.display(), e),
        })?;
        info!(
            path = %self.path.display(),
            size = bytes.len(),
            facts = fb.len(),
            "factbase exported"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.fb");
        let impex = Impex::new(&path);

        let mut fb = Factbase::new();
        fb.insert().set("kind", "release");
        impex.export(&fb).unwrap();

        let copy = impex.import().unwrap();
        assert_eq!(copy.len(), 1);
    }

    #[test]
    fn import_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let impex = Impex::new(dir.path().join("absent.fb"));
        assert!(matches!(impex.import(), Err(CoreError::Import { .. })));
    }

    #[test]
    fn import_or_empty_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let impex = Impex::new(dir.path().join("absent.fb"));
        let fb = impex.import_or_empty().unwrap();
        assert!(fb.is_empty());
    }
}
