//! Document uploads and reference assets
//!
//! Uploads are filtered by extension only; no format validation is done
//! on the bytes themselves.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{AssetCatalog, DocumentStore};
use crate::error::AssetLoadError;
use crate::models::DocumentAsset;

/// Extensions accepted by the upload filter
const ACCEPTED_EXTENSIONS: &[&str] = &["pdf"];

/// Check a file name against the upload filter
fn check_extension(path: &Path) -> Result<(), AssetLoadError> {
    let accepted = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false);

    if accepted {
        Ok(())
    } else {
        Err(AssetLoadError::Rejected {
            filename: file_name(path),
            reason: format!("expected one of: {}", ACCEPTED_EXTENSIONS.join(", ")),
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_asset(path: &Path) -> Result<DocumentAsset, AssetLoadError> {
    let bytes = fs::read(path).map_err(|e| AssetLoadError::from_io(e, path.to_path_buf()))?;
    debug!("Read {} bytes from {:?}", bytes.len(), path);
    Ok(DocumentAsset::new(bytes, file_name(path)))
}

/// Reads user uploads from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FsDocumentStore;

impl FsDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for FsDocumentStore {
    fn upload(&self, path: &Path) -> Result<DocumentAsset, AssetLoadError> {
        check_extension(path)?;
        read_asset(path)
    }
}

/// Reference documents stored in a directory
#[derive(Debug, Clone)]
pub struct FsAssetCatalog {
    dir: PathBuf,
}

impl FsAssetCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AssetCatalog for FsAssetCatalog {
    fn load(&self, name: &str) -> Result<DocumentAsset, AssetLoadError> {
        read_asset(&self.dir.join(name))
    }
}

/// Reference documents held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetCatalog {
    assets: HashMap<String, Vec<u8>>,
}

impl InMemoryAssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.assets.insert(name.into(), bytes);
        self
    }
}

impl AssetCatalog for InMemoryAssetCatalog {
    fn load(&self, name: &str) -> Result<DocumentAsset, AssetLoadError> {
        self.assets
            .get(name)
            .map(|bytes| DocumentAsset::new(bytes.clone(), name))
            .ok_or_else(|| AssetLoadError::NotFound {
                path: PathBuf::from(name),
            })
    }
}
