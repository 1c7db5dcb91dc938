use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One selectable entry of a portal dropdown (state, district, complex or court).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub code: String,
    pub name: String,
}

impl SelectOption {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Full selection that determines a cause-list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPath {
    pub state_code: String,
    pub district_code: String,
    pub complex_code: String,
    pub court_code: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    NotFound(NotFoundReason),
}

impl DownloadOutcome {
    pub fn saved_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Saved(path) => Some(path),
            Self::NotFound(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// Cause-list query page answered with a non-success status.
    QueryStatus(u16),
    /// Query page had no anchor pointing at a cause-list PDF.
    NoPdfLink,
    /// The PDF link itself answered with a non-success status.
    PdfStatus(u16),
}

impl std::fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueryStatus(status) => write!(f, "cause list query returned status {status}"),
            Self::NoPdfLink => f.write_str("no cause list pdf link on query page"),
            Self::PdfStatus(status) => write!(f, "cause list pdf returned status {status}"),
        }
    }
}
