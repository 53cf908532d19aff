use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// One file or directory as seen at listing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "FileEntryDto")]
pub struct FileEntry {
    pub name: String,
    /// Exact on-disk path; names that are not valid UTF-8 survive untouched.
    pub full_path: PathBuf,
    pub is_directory: bool,
    /// Only set for files.
    pub size_display: Option<String>,
    pub modified_at: OffsetDateTime,
}

/// Serialized form of [`FileEntry`], with the derived kind spelled out.
#[derive(Debug, Serialize)]
pub struct FileEntryDto {
    pub name: String,
    pub full_path: String,
    pub kind: FileKind,
    pub is_directory: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_display: Option<String>,
    pub modified_at: String,
}

impl From<FileEntry> for FileEntryDto {
    fn from(entry: FileEntry) -> Self {
        let kind = entry.kind();
        let modified_at = entry
            .modified_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| entry.modified_at.unix_timestamp().to_string());
        Self {
            name: entry.name,
            full_path: entry.full_path.to_string_lossy().into_owned(),
            kind,
            is_directory: entry.is_directory,
            size_display: entry.size_display,
            modified_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileKind {
    Folder,
    File,
}

impl FileKind {
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Folder => "Folder",
            FileKind::File => "File",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FileEntry {
    pub fn directory(name: String, full_path: PathBuf, modified_at: OffsetDateTime) -> Self {
        Self {
            name,
            full_path,
            is_directory: true,
            size_display: None,
            modified_at,
        }
    }

    pub fn file(
        name: String,
        full_path: PathBuf,
        bytes: u64,
        modified_at: OffsetDateTime,
    ) -> Self {
        Self {
            name,
            full_path,
            is_directory: false,
            size_display: Some(format_size(bytes)),
            modified_at,
        }
    }

    pub fn kind(&self) -> FileKind {
        if self.is_directory {
            FileKind::Folder
        } else {
            FileKind::File
        }
    }
}

/// `"<n> B"` below one kibibyte, whole kibibytes (truncated) above.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{} KB", bytes / 1024)
    }
}
