use crate::core::config;
use crate::core::errors::Result;
use crate::models::FileEntry;
use crate::services::alerts::Alerts;
use crate::services::fs::listing::{normalize_filter, DirectoryLister};
use crate::services::fs::opener::FileOpener;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod reload;
mod types;
pub use reload::ReloadTicket;
pub use types::{ExplorerEvent, LoadState, SubscriptionId};
use types::Listener;

/// Session state of the file browser: where we are, what is shown, what is selected.
pub struct ExplorerPage {
    cwd: PathBuf,
    filter_text: Option<String>,
    entries: Arc<Vec<FileEntry>>,
    selected_index: Option<usize>,
    load_state: LoadState,
    generation: u64,
    history: Vec<PathBuf>,
    history_index: usize,
    lister: Arc<dyn DirectoryLister>,
    opener: Arc<dyn FileOpener>,
    alerts: Arc<dyn Alerts>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_listener: u64,
}

impl ExplorerPage {
    /// Opens the user's home directory and lists it straight away.
    pub fn new(
        lister: Arc<dyn DirectoryLister>,
        opener: Arc<dyn FileOpener>,
        alerts: Arc<dyn Alerts>,
    ) -> Self {
        let home = config::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::with_start_path(home, lister, opener, alerts)
    }

    pub fn with_start_path(
        start: impl Into<PathBuf>,
        lister: Arc<dyn DirectoryLister>,
        opener: Arc<dyn FileOpener>,
        alerts: Arc<dyn Alerts>,
    ) -> Self {
        Self::with_start_and_filter(start, None, lister, opener, alerts)
    }

    /// Like [`ExplorerPage::with_start_path`], with the filter already in place
    /// for the first listing.
    pub fn with_start_and_filter(
        start: impl Into<PathBuf>,
        filter_text: Option<String>,
        lister: Arc<dyn DirectoryLister>,
        opener: Arc<dyn FileOpener>,
        alerts: Arc<dyn Alerts>,
    ) -> Self {
        let cwd = start.into();
        let mut page = Self {
            history: vec![cwd.clone()],
            history_index: 0,
            cwd,
            filter_text,
            entries: Arc::new(Vec::new()),
            selected_index: None,
            load_state: LoadState::Idle,
            generation: 0,
            lister,
            opener,
            alerts,
            listeners: Vec::new(),
            next_listener: 0,
        };
        page.reload();
        page
    }

    pub fn current_path(&self) -> &Path {
        &self.cwd
    }

    pub fn filter_text(&self) -> Option<&str> {
        self.filter_text.as_deref()
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// The current result set; stays valid after the page moves on.
    pub fn entries_snapshot(&self) -> Arc<Vec<FileEntry>> {
        Arc::clone(&self.entries)
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn lister(&self) -> Arc<dyn DirectoryLister> {
        Arc::clone(&self.lister)
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(ExplorerEvent) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: ExplorerEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    /// Returns whether the path changed (and a reload happened).
    pub fn set_current_path(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if path == self.cwd {
            return false;
        }
        if self.history_index + 1 < self.history.len() {
            self.history.truncate(self.history_index + 1);
        }
        self.history.push(path.clone());
        self.history_index += 1;
        self.move_to(path);
        true
    }

    pub fn set_filter_text(&mut self, text: Option<String>) -> bool {
        if text == self.filter_text {
            return false;
        }
        self.filter_text = text;
        self.notify(ExplorerEvent::FilterTextChanged);
        self.reload();
        true
    }

    fn move_to(&mut self, path: PathBuf) {
        tracing::info!(path = %path.display(), "changing directory");
        self.cwd = path;
        self.notify(ExplorerEvent::CurrentPathChanged);
        self.reload();
    }

    pub fn can_go_back(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.history_index -= 1;
        let path = self.history[self.history_index].clone();
        self.move_to(path);
        true
    }

    pub fn go_forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.history_index += 1;
        let path = self.history[self.history_index].clone();
        self.move_to(path);
        true
    }

    /// Navigate to the parent directory, if there is one.
    pub fn go_up(&mut self) -> bool {
        let parent = self
            .cwd
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
        match parent {
            Some(parent) => self.set_current_path(parent),
            None => false,
        }
    }

    /// List the current path and replace the entries, reporting failures as alerts.
    pub fn reload(&mut self) {
        let Some(ticket) = self.begin_reload() else {
            return;
        };
        let result = ticket.run_blocking(self.lister.as_ref());
        self.complete_reload(ticket, result);
    }

    /// Start a reload whose listing the caller runs, e.g. with [`ReloadTicket::run`].
    ///
    /// Returns `None` when there is no path to list.
    pub fn begin_reload(&mut self) -> Option<ReloadTicket> {
        if self.cwd.to_string_lossy().trim().is_empty() {
            return None;
        }
        self.generation += 1;
        if self.load_state != LoadState::Loading {
            self.load_state = LoadState::Loading;
            self.notify(ExplorerEvent::LoadStateChanged);
        }
        Some(ReloadTicket {
            generation: self.generation,
            path: self.cwd.clone(),
            filter: normalize_filter(self.filter_text.as_deref()).map(str::to_string),
        })
    }

    /// Apply the outcome of a reload. Results of superseded tickets are discarded
    /// and `false` is returned.
    pub fn complete_reload(
        &mut self,
        ticket: ReloadTicket,
        result: Result<Vec<FileEntry>>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded listing"
            );
            return false;
        }

        match result {
            Ok(entries) => self.replace_entries(entries),
            Err(e) => {
                let failure = e.failure();
                let message = failure.user_message();
                if failure.is_warning() {
                    self.alerts.show_warning(&message);
                } else {
                    self.alerts.show_error(&message);
                }
                self.replace_entries(Vec::new());
            }
        }

        self.load_state = LoadState::Idle;
        self.notify(ExplorerEvent::LoadStateChanged);
        true
    }

    fn replace_entries(&mut self, entries: Vec<FileEntry>) {
        self.entries = Arc::new(entries);
        self.notify(ExplorerEvent::EntriesChanged);
        if self.selected_index.take().is_some() {
            self.notify(ExplorerEvent::SelectionChanged);
        }
    }

    /// Select the entry at `index`, or clear the selection with `None`.
    /// Out-of-range indices are rejected.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        if matches!(index, Some(ix) if ix >= self.entries.len()) {
            return false;
        }
        if self.selected_index != index {
            self.selected_index = index;
            self.notify(ExplorerEvent::SelectionChanged);
        }
        true
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected_index.and_then(|ix| self.entries.get(ix))
    }

    pub fn can_activate(&self, entry: Option<&FileEntry>) -> bool {
        entry.is_some() || self.selected_entry().is_some()
    }

    /// Enter a directory or open a file. Uses the selection when no entry is given;
    /// returns `false` if there is nothing to activate.
    pub fn activate(&mut self, entry: Option<&FileEntry>) -> bool {
        let Some(item) = entry.or_else(|| self.selected_entry()).cloned() else {
            return false;
        };

        if item.is_directory {
            self.set_current_path(item.full_path);
        } else if let Err(e) = self.opener.open(&item.full_path) {
            self.alerts.show_error(&format!("Unable to open: {e}"));
        }
        true
    }
}
