//! Annotation sources
//!
//! Each source is a JSON array of overlay records stored under a key.
//! On disk the key maps to `<annotations_dir>/<key>.json`.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::AnnotationStore;
use crate::error::AnnotationLoadError;
use crate::models::Annotation;

/// Parse and validate the text of an annotation source
///
/// Every record must validate; a single bad record rejects the whole source.
pub fn parse_annotation_source(
    key: &str,
    content: &str,
) -> Result<Vec<Annotation>, AnnotationLoadError> {
    let annotations: Vec<Annotation> =
        serde_json::from_str(content).map_err(|e| AnnotationLoadError::Malformed {
            key: key.to_string(),
            details: e.to_string(),
        })?;

    check_records(key, &annotations)?;
    Ok(annotations)
}

/// A source with no records counts as missing
fn check_records(key: &str, annotations: &[Annotation]) -> Result<(), AnnotationLoadError> {
    if annotations.is_empty() {
        return Err(AnnotationLoadError::NotFound {
            key: key.to_string(),
        });
    }

    for (index, annotation) in annotations.iter().enumerate() {
        annotation
            .validate()
            .map_err(|details| AnnotationLoadError::Invalid {
                key: key.to_string(),
                index,
                details,
            })?;
    }

    Ok(())
}

/// Annotation store backed by a directory of JSON files
#[derive(Debug, Clone)]
pub struct JsonAnnotationStore {
    dir: PathBuf,
}

impl JsonAnnotationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn source_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl AnnotationStore for JsonAnnotationStore {
    fn load(&self, key: &str) -> Result<Vec<Annotation>, AnnotationLoadError> {
        let path = self.source_path(key);
        debug!("Loading annotation source {:?}", path);

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AnnotationLoadError::NotFound {
                key: key.to_string(),
            },
            _ => AnnotationLoadError::Read {
                path: path.clone(),
                source: e,
            },
        })?;

        parse_annotation_source(key, &content)
    }
}

#[derive(Debug, Clone)]
enum Source {
    Records(Vec<Annotation>),
    Raw(String),
}

/// Annotation store held in memory
///
/// Sources are checked on every load, so malformed text or an invalid
/// record behaves exactly like a bad file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnnotationStore {
    sources: HashMap<String, Source>,
}

impl InMemoryAnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store already-built records under `key`
    pub fn insert(&mut self, key: impl Into<String>, annotations: Vec<Annotation>) {
        self.sources.insert(key.into(), Source::Records(annotations));
    }

    /// Store unparsed JSON text under `key`
    pub fn insert_raw(&mut self, key: impl Into<String>, content: impl Into<String>) {
        self.sources.insert(key.into(), Source::Raw(content.into()));
    }

    pub fn with(mut self, key: impl Into<String>, annotations: Vec<Annotation>) -> Self {
        self.insert(key, annotations);
        self
    }
}

impl AnnotationStore for InMemoryAnnotationStore {
    fn load(&self, key: &str) -> Result<Vec<Annotation>, AnnotationLoadError> {
        match self.sources.get(key) {
            Some(Source::Records(records)) => {
                check_records(key, records)?;
                Ok(records.clone())
            }
            Some(Source::Raw(content)) => parse_annotation_source(key, content),
            None => Err(AnnotationLoadError::NotFound {
                key: key.to_string(),
            }),
        }
    }
}
