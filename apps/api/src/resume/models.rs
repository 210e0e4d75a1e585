use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::ResumeError;

/// Document format, decided purely by file-extension suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    /// Case-insensitive suffix dispatch. `.doc` is routed to the DOCX reader;
    /// unrecognized or missing suffixes are treated as plain text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => DocumentFormat::Pdf,
            Some("docx") | Some("doc") => DocumentFormat::Docx,
            _ => DocumentFormat::Text,
        }
    }
}

/// An uploaded resume read into memory, discarded after extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub content: Vec<u8>,
}

impl RawDocument {
    /// Reads the document at `path`.
    ///
    /// A missing path is the only error. Any other I/O failure is logged and
    /// yields an empty document.
    pub fn read(path: &Path) -> Result<Self, ResumeError> {
        if !path.exists() {
            return Err(ResumeError::NotFound(path.to_path_buf()));
        }

        let content = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ResumeError::NotFound(path.to_path_buf()));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Resume file unreadable, treating as empty");
                Vec::new()
            }
        };

        Ok(RawDocument {
            path: path.to_path_buf(),
            format: DocumentFormat::from_path(path),
            content,
        })
    }
}

/// Structured profile extracted from a resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub raw_text: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub experience_years: Option<u32>,
    /// Unique, ordered by first occurrence in the text.
    pub skills: Vec<String>,
    pub education: Vec<String>,
}
