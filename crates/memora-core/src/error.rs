//! Presentation error handling
//!
//! Provides typed errors for loading document assets and annotation sources
//! with descriptive messages and recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::ReadingMode;

/// Errors that prevent a document payload from being produced
///
/// Fatal to the current render attempt, never to the session.
#[derive(Error, Debug)]
pub enum AssetLoadError {
    /// No document was supplied and the mode has no canned fallback
    #[error("No document supplied and {mode} mode has no reference document")]
    NoDocument { mode: ReadingMode },

    /// Asset file does not exist
    #[error("Document not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Asset file could not be read
    #[error("Failed to read document '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Upload was refused by the extension filter
    #[error("Rejected '{filename}': {reason}")]
    Rejected { filename: String, reason: String },
}

impl AssetLoadError {
    /// Create an error from an I/O error with path context
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => AssetLoadError::NotFound { path },
            _ => AssetLoadError::Read {
                path,
                source: error,
            },
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AssetLoadError::NoDocument { .. } => {
                "Upload a PDF or choose a reading mode that has a reference document."
            }
            AssetLoadError::NotFound { .. } | AssetLoadError::Read { .. } => {
                "Check the document path and permissions, then select the mode again."
            }
            AssetLoadError::Rejected { .. } => "Only PDF files can be opened.",
        }
    }
}

/// Errors loading an annotation source
///
/// Always recoverable: the document renders without overlays.
#[derive(Error, Debug)]
pub enum AnnotationLoadError {
    /// No records are stored under the key
    #[error("Annotation source '{key}' not found")]
    NotFound { key: String },

    /// Source exists but cannot be parsed
    #[error("Annotation source '{key}' is malformed: {details}")]
    Malformed { key: String, details: String },

    /// Source parsed but a record failed validation
    #[error("Annotation {index} in source '{key}' is invalid: {details}")]
    Invalid {
        key: String,
        index: usize,
        details: String,
    },

    /// Source file could not be read
    #[error("Failed to read annotation source '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AnnotationLoadError {
    /// Annotation failures never block rendering
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

/// A mode value outside the closed enumeration reached the selector boundary
///
/// Only text input can produce this; inside the crate modes are typed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid reading mode '{0}'. Valid modes: exploratory, understanding, revisiting")]
pub struct InvalidModeSelection(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = AssetLoadError::from_io(io_err, PathBuf::from("/missing/paper.pdf"));

        assert!(matches!(err, AssetLoadError::NotFound { .. }));
        assert!(err.to_string().contains("/missing/paper.pdf"));
    }

    #[test]
    fn test_read_error_classification() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = AssetLoadError::from_io(io_err, PathBuf::from("/locked/paper.pdf"));

        assert!(matches!(err, AssetLoadError::Read { .. }));
        assert!(!err.recovery_suggestion().is_empty());
    }

    #[test]
    fn test_no_document_display() {
        let err = AssetLoadError::NoDocument {
            mode: ReadingMode::Exploratory,
        };
        let msg = err.to_string();
        assert!(msg.contains("Exploratory"));
        assert!(err.recovery_suggestion().contains("Upload"));
    }

    #[test]
    fn test_annotation_errors_recoverable() {
        let err = AnnotationLoadError::Malformed {
            key: "anno1".to_string(),
            details: "expected array".to_string(),
        };
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("anno1"));
    }

    #[test]
    fn test_invalid_mode_display() {
        let err = InvalidModeSelection("Novice".to_string());
        assert!(err.to_string().contains("Novice"));
    }
}
