use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The one fatal condition: the report text could not be obtained.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot read sizing report '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Report text plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReport {
    pub content: String,
    pub source_path: Option<PathBuf>,
}

impl RawReport {
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source_path: None,
        }
    }

    /// Reads the whole file up front; the handle is dropped before returning.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            content,
            source_path: Some(path.to_path_buf()),
        })
    }
}
