use crate::core::errors::{Error, Result};
use crate::models::FileEntry;
use std::ffi::OsStr;
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use time::OffsetDateTime;
use tokio::task;

pub struct ListParams<'a> {
    pub path: &'a Path,
    /// Case-insensitive substring; `None` and `Some("")` both list everything.
    pub filter: Option<&'a str>,
}

/// Produces the entries of one directory. The explorer page only talks to this.
pub trait DirectoryLister: Send + Sync {
    fn list(&self, path: &Path, filter: Option<&str>) -> Result<Vec<FileEntry>>;
}

/// Lists the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, path: &Path, filter: Option<&str>) -> Result<Vec<FileEntry>> {
        list_dir_sync(ListParams { path, filter })
    }
}

pub async fn list_dir(params: ListParams<'_>) -> Result<Vec<FileEntry>> {
    // Use a blocking task for filesystem IO to avoid blocking async executors.
    let path = params.path.to_path_buf();
    let filter = params.filter.map(|s| s.to_string());

    task::spawn_blocking(move || list_dir_impl(&path, filter.as_deref())).await?
}

/// Synchronous variant for contexts where an async runtime is not available.
pub fn list_dir_sync(params: ListParams<'_>) -> Result<Vec<FileEntry>> {
    list_dir_impl(params.path, params.filter)
}

fn list_dir_impl(dir: &Path, filter: Option<&str>) -> Result<Vec<FileEntry>> {
    match fs::metadata(dir) {
        Ok(md) if md.is_dir() => {}
        Ok(_) => return Err(Error::DirectoryNotFound(dir.to_path_buf())),
        Err(e) => return Err(Error::from_io(dir, e)),
    }
    let base = std::path::absolute(dir).map_err(|e| Error::from_io(dir, e))?;
    let needle = normalize_filter(filter).map(str::to_lowercase);

    // Single pass, split by kind; enumeration order is kept within each group.
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::from_io(dir, e))? {
        let entry = entry.map_err(|e| Error::from_io(dir, e))?;
        let name = os_str_to_string(entry.file_name());
        if !name_matches(&name, needle.as_deref()) {
            continue;
        }

        let full_path = base.join(entry.file_name());
        let md = child_metadata(&full_path)?;
        let modified = modified_at(&md);
        if md.is_dir() {
            dirs.push(FileEntry::directory(name, full_path, modified));
        } else {
            files.push(FileEntry::file(name, full_path, md.len(), modified));
        }
    }

    tracing::debug!(
        path = %base.display(),
        filter = ?needle,
        dirs = dirs.len(),
        files = files.len(),
        "listed directory"
    );

    dirs.extend(files);
    Ok(dirs)
}

/// Empty filter text means no filter.
pub fn normalize_filter(filter: Option<&str>) -> Option<&str> {
    filter.filter(|f| !f.is_empty())
}

/// `needle` must already be lowercased.
fn name_matches(name: &str, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => name.to_lowercase().contains(needle),
    }
}

// Follows symlinks; a dangling link falls back to the link itself and lists as a file.
fn child_metadata(path: &Path) -> Result<Metadata> {
    fs::metadata(path)
        .or_else(|_| fs::symlink_metadata(path))
        .map_err(|e| match e.kind() {
            io::ErrorKind::PermissionDenied => Error::AccessDenied(path.to_path_buf()),
            _ => Error::Unknown(format!("{}: {e}", path.display())),
        })
}

fn modified_at(md: &Metadata) -> OffsetDateTime {
    md.modified()
        .map(OffsetDateTime::from)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

fn os_str_to_string(s: impl AsRef<OsStr>) -> String {
    s.as_ref().to_string_lossy().into_owned()
}
