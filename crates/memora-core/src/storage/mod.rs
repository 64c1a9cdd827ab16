//! Storage layer
//!
//! Collaborator seams the presentation selector calls into:
//!
//! - **DocumentStore**: accepts an uploaded file, returns its bytes
//! - **AnnotationStore**: returns the ordered overlay records for a source key
//! - **AssetCatalog**: the small fixed set of reference documents
//!
//! Filesystem and in-memory implementations are provided for each.

pub mod annotations;
pub mod documents;

pub use annotations::{parse_annotation_source, InMemoryAnnotationStore, JsonAnnotationStore};
pub use documents::{FsAssetCatalog, FsDocumentStore, InMemoryAssetCatalog};

use std::path::Path;

use crate::error::{AnnotationLoadError, AssetLoadError};
use crate::models::{Annotation, DocumentAsset};

/// Accepts user uploads
pub trait DocumentStore {
    /// Read an uploaded file into a document asset
    fn upload(&self, path: &Path) -> Result<DocumentAsset, AssetLoadError>;
}

/// Keyed source of annotation records
pub trait AnnotationStore {
    /// Load the records stored under `key`, in render order
    fn load(&self, key: &str) -> Result<Vec<Annotation>, AnnotationLoadError>;
}

/// Catalog of pre-built reference documents
pub trait AssetCatalog {
    /// Load a reference document by file name
    fn load(&self, name: &str) -> Result<DocumentAsset, AssetLoadError>;
}
