use crate::core::errors::Result;
use crate::models::FileEntry;
use crate::services::fs::listing::DirectoryLister;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task;

/// A reload that has been started but not yet applied.
///
/// Only the ticket from the most recent `begin_reload` is accepted by
/// `complete_reload`; older ones are dropped on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadTicket {
    pub(super) generation: u64,
    pub path: PathBuf,
    pub filter: Option<String>,
}

impl ReloadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run the listing on the current thread.
    pub fn run_blocking(&self, lister: &dyn DirectoryLister) -> Result<Vec<FileEntry>> {
        lister.list(&self.path, self.filter.as_deref())
    }

    /// Run the listing on tokio's blocking pool and hand the ticket back with the result.
    pub async fn run(
        self,
        lister: Arc<dyn DirectoryLister>,
    ) -> (ReloadTicket, Result<Vec<FileEntry>>) {
        let ticket = self.clone();
        let joined = task::spawn_blocking(move || ticket.run_blocking(lister.as_ref())).await;
        let result = joined.unwrap_or_else(|e| Err(e.into()));
        (self, result)
    }
}
