use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("access denied: {}", .0.display())]
    AccessDenied(PathBuf),
    #[error("{0}")]
    OpenFailed(String),
    #[error("{0}")]
    Unknown(String),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// What went wrong while loading a folder, reduced to the cases a user is told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListFailure {
    NotFound,
    AccessDenied,
    Other(String),
}

impl ListFailure {
    pub fn user_message(&self) -> String {
        match self {
            ListFailure::NotFound => "Folder not found".to_string(),
            ListFailure::AccessDenied => "Access denied to this folder".to_string(),
            ListFailure::Other(message) => format!("Error loading folder: {message}"),
        }
    }

    pub fn is_warning(&self) -> bool {
        !matches!(self, ListFailure::Other(_))
    }
}

impl Error {
    /// Classify an io error raised while reading `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Error {
        match err.kind() {
            io::ErrorKind::NotFound => Error::DirectoryNotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Error::AccessDenied(path.to_path_buf()),
            _ => Error::Unknown(err.to_string()),
        }
    }

    pub fn failure(&self) -> ListFailure {
        match self {
            Error::DirectoryNotFound(_) => ListFailure::NotFound,
            Error::AccessDenied(_) => ListFailure::AccessDenied,
            Error::OpenFailed(message) | Error::Unknown(message) => {
                ListFailure::Other(message.clone())
            }
            Error::Join(err) => ListFailure::Other(err.to_string()),
        }
    }
}
