use crate::core::errors::{Error, Result};
use std::path::Path;

/// Hands a file over to whatever the host uses to open it.
pub trait FileOpener: Send + Sync {
    fn open(&self, full_path: &Path) -> Result<()>;
}

/// Opens files with the host's default application.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl FileOpener for SystemOpener {
    fn open(&self, full_path: &Path) -> Result<()> {
        if !full_path.exists() {
            return Err(Error::OpenFailed(format!(
                "File not found: {}",
                full_path.display()
            )));
        }
        tracing::info!(path = %full_path.display(), "opening with default application");
        open::that(full_path).map_err(|e| Error::OpenFailed(e.to_string()))
    }
}
