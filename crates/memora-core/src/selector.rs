//! Reading-mode presentation selector
//!
//! Resolves a reading mode and an optional user document into the payload
//! and overlay set handed to the presentation surface.
//!
//! ## Failure semantics
//!
//! - Annotation source missing or malformed: the document still renders,
//!   without overlays, and the error is returned as a warning.
//! - No payload available (no upload and no reference document, or the
//!   reference document cannot be read): `AssetLoadError`, nothing renders.
//!
//! ## Usage
//!
//! ```ignore
//! let selector = PresentationSelector::new(profiles, annotations, assets);
//! let presentation = selector.resolve_presentation(ReadingMode::Understanding, Some(&doc))?;
//! ```

use tracing::{debug, info, warn};

use crate::error::{AnnotationLoadError, AssetLoadError};
use crate::models::{Annotation, DocumentAsset, ReadingMode};
use crate::profile::{display_text, ModeProfiles};
use crate::storage::{AnnotationStore, AssetCatalog};

/// Notification text shown when an overlay is activated
pub const ACTIVATION_NOTICE: &str = "Seen✅, Understood🧠, Revisit❓";

/// Resolved payload and overlays for one render
#[derive(Debug)]
pub struct Presentation {
    pub mode: ReadingMode,
    /// Bytes to render, unchanged from the source
    pub payload: DocumentAsset,
    /// Overlays in render order
    pub annotations: Vec<Annotation>,
    /// Mode-dependent text shown alongside the document
    pub display_text: String,
    /// Set when overlays could not be loaded
    pub warning: Option<AnnotationLoadError>,
}

/// Transient message surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Maps reading modes to document payloads and overlay sets
pub struct PresentationSelector {
    profiles: ModeProfiles,
    annotations: Box<dyn AnnotationStore>,
    assets: Box<dyn AssetCatalog>,
}

impl PresentationSelector {
    pub fn new(
        profiles: ModeProfiles,
        annotations: impl AnnotationStore + 'static,
        assets: impl AssetCatalog + 'static,
    ) -> Self {
        Self {
            profiles,
            annotations: Box::new(annotations),
            assets: Box::new(assets),
        }
    }

    pub fn profiles(&self) -> &ModeProfiles {
        &self.profiles
    }

    /// Resolve the payload and overlays for `mode`
    ///
    /// The supplied document is used unconditionally when present. Without
    /// one, the mode's reference document is loaded if it defines one.
    /// Does not touch session state.
    pub fn resolve_presentation(
        &self,
        mode: ReadingMode,
        document: Option<&DocumentAsset>,
    ) -> Result<Presentation, AssetLoadError> {
        let profile = self.profiles.get(mode);

        let payload = match document {
            Some(doc) => doc.clone(),
            None => {
                let name = profile
                    .fallback_asset
                    .as_deref()
                    .ok_or(AssetLoadError::NoDocument { mode })?;
                debug!("No document supplied, loading reference {} for {}", name, mode);
                self.assets.load(name)?
            }
        };

        let (annotations, warning) = match self.annotations.load(&profile.annotation_source_key) {
            Ok(annotations) => (annotations, None),
            Err(e) => {
                warn!("Rendering {} without overlays: {}", mode, e);
                (Vec::new(), Some(e))
            }
        };

        debug!(
            "Resolved {} presentation: {} bytes, {} annotations",
            mode,
            payload.len(),
            annotations.len()
        );

        Ok(Presentation {
            mode,
            payload,
            annotations,
            display_text: display_text(mode),
            warning,
        })
    }

    /// React to the user activating an overlay
    ///
    /// Pure notification hook: never fails and changes no state.
    pub fn on_annotation_activated(&self, annotation: &Annotation) -> Notification {
        info!(
            "Annotation activated: page={} x={} y={} {}x{} color={}",
            annotation.page,
            annotation.x,
            annotation.y,
            annotation.width,
            annotation.height,
            annotation.color
        );
        Notification::new(ACTIVATION_NOTICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnnotationColor, BorderStyle};
    use crate::profile::ModeProfile;
    use crate::storage::{InMemoryAnnotationStore, InMemoryAssetCatalog};

    fn understanding_annotation() -> Annotation {
        Annotation::new(1, 220.0, 255.0, 65.0, 22.0, AnnotationColor::Green)
            .with_border(BorderStyle::Dotted)
    }

    fn annotation_store() -> InMemoryAnnotationStore {
        InMemoryAnnotationStore::new()
            .with(
                "anno1",
                vec![
                    Annotation::new(1, 10.0, 20.0, 100.0, 12.0, AnnotationColor::Blue),
                    Annotation::new(3, 50.0, 60.0, 80.0, 14.0, AnnotationColor::Blue)
                        .with_border(BorderStyle::Dashed),
                ],
            )
            .with("anno2", vec![understanding_annotation()])
            .with(
                "anno3",
                vec![Annotation::new(2, 0.0, 0.0, 10.0, 10.0, AnnotationColor::Orange)],
            )
    }

    fn no_fallback_profiles() -> ModeProfiles {
        let mut profiles = ModeProfiles::builtin();
        for mode in ReadingMode::ALL {
            let profile = ModeProfile {
                fallback_asset: None,
                ..profiles.get(mode).clone()
            };
            profiles = profiles.with_profile(mode, profile);
        }
        profiles
    }

    fn selector() -> PresentationSelector {
        PresentationSelector::new(
            no_fallback_profiles(),
            annotation_store(),
            InMemoryAssetCatalog::new(),
        )
    }

    #[test]
    fn test_understanding_scenario() {
        let doc = DocumentAsset::new(vec![7u8; 100], "d.pdf");
        let presentation = selector()
            .resolve_presentation(ReadingMode::Understanding, Some(&doc))
            .unwrap();

        assert_eq!(presentation.payload, doc);
        assert_eq!(presentation.annotations, vec![understanding_annotation()]);
        assert!(presentation.warning.is_none());
        assert_eq!(presentation.display_text, "Viewing in Understanding mode");
    }

    #[test]
    fn test_every_mode_returns_bytes_and_its_source() {
        let selector = selector();
        let store = annotation_store();
        let doc = DocumentAsset::new(b"%PDF".to_vec(), "paper.pdf");

        for mode in ReadingMode::ALL {
            let presentation = selector.resolve_presentation(mode, Some(&doc)).unwrap();
            let key = &selector.profiles().get(mode).annotation_source_key;

            assert_eq!(presentation.payload.bytes, doc.bytes);
            assert_eq!(presentation.annotations, store.load(key).unwrap());
            assert_eq!(presentation.mode, mode);
        }
    }

    #[test]
    fn test_mode_switch_is_idempotent() {
        let selector = selector();
        let doc = DocumentAsset::new(vec![1, 2, 3], "paper.pdf");

        let first = selector
            .resolve_presentation(ReadingMode::Exploratory, Some(&doc))
            .unwrap();
        let _ = selector
            .resolve_presentation(ReadingMode::Understanding, Some(&doc))
            .unwrap();
        let again = selector
            .resolve_presentation(ReadingMode::Exploratory, Some(&doc))
            .unwrap();

        assert_eq!(first.annotations, again.annotations);
        assert_eq!(first.annotations.len(), 2);
        assert_eq!(first.annotations[1].page, 3);
    }

    #[test]
    fn test_missing_annotation_source_degrades() {
        let selector = PresentationSelector::new(
            no_fallback_profiles(),
            InMemoryAnnotationStore::new(),
            InMemoryAssetCatalog::new(),
        );
        let doc = DocumentAsset::new(vec![9; 10], "paper.pdf");

        let presentation = selector
            .resolve_presentation(ReadingMode::Revisiting, Some(&doc))
            .unwrap();
        assert_eq!(presentation.payload, doc);
        assert!(presentation.annotations.is_empty());
        assert!(matches!(
            presentation.warning,
            Some(AnnotationLoadError::NotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_annotation_source_degrades() {
        let mut store = InMemoryAnnotationStore::new();
        store.insert_raw("anno2", r#"[{"page": "one"}]"#);
        let selector =
            PresentationSelector::new(no_fallback_profiles(), store, InMemoryAssetCatalog::new());
        let doc = DocumentAsset::new(vec![9; 10], "paper.pdf");

        let presentation = selector
            .resolve_presentation(ReadingMode::Understanding, Some(&doc))
            .unwrap();
        assert!(presentation.annotations.is_empty());
        assert!(matches!(
            presentation.warning,
            Some(AnnotationLoadError::Malformed { .. })
        ));
    }

    #[test]
    fn test_empty_annotation_source_degrades() {
        let mut store = InMemoryAnnotationStore::new();
        store.insert_raw("anno2", "[]");
        let selector =
            PresentationSelector::new(no_fallback_profiles(), store, InMemoryAssetCatalog::new());
        let doc = DocumentAsset::new(vec![9; 10], "paper.pdf");

        let presentation = selector
            .resolve_presentation(ReadingMode::Understanding, Some(&doc))
            .unwrap();
        assert_eq!(presentation.payload, doc);
        assert!(presentation.annotations.is_empty());
        assert!(matches!(
            presentation.warning,
            Some(AnnotationLoadError::NotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_record_never_reaches_surface() {
        let bad = Annotation::new(0, f64::NAN, 0.0, -5.0, 1.0, AnnotationColor::Red);
        let selector = PresentationSelector::new(
            no_fallback_profiles(),
            InMemoryAnnotationStore::new().with("anno2", vec![bad]),
            InMemoryAssetCatalog::new(),
        );
        let doc = DocumentAsset::new(vec![9; 10], "paper.pdf");

        let presentation = selector
            .resolve_presentation(ReadingMode::Understanding, Some(&doc))
            .unwrap();
        assert!(presentation.annotations.is_empty());
        assert!(matches!(
            presentation.warning,
            Some(AnnotationLoadError::Invalid { index: 0, .. })
        ));
    }

    #[test]
    fn test_no_document_without_fallback_fails() {
        let err = selector()
            .resolve_presentation(ReadingMode::Exploratory, None)
            .unwrap_err();
        assert!(matches!(
            err,
            AssetLoadError::NoDocument {
                mode: ReadingMode::Exploratory
            }
        ));
    }

    #[test]
    fn test_no_document_uses_fallback() {
        let profiles = ModeProfiles::builtin();
        let name = profiles
            .get(ReadingMode::Understanding)
            .fallback_asset
            .clone()
            .unwrap();
        let catalog = InMemoryAssetCatalog::new().with(name.clone(), b"reference".to_vec());
        let selector = PresentationSelector::new(profiles, annotation_store(), catalog);

        let presentation = selector
            .resolve_presentation(ReadingMode::Understanding, None)
            .unwrap();
        assert_eq!(presentation.payload.bytes, b"reference");
        assert_eq!(presentation.payload.origin_filename, name);
        assert_eq!(presentation.annotations, vec![understanding_annotation()]);
    }

    #[test]
    fn test_missing_fallback_asset_fails() {
        let selector = PresentationSelector::new(
            ModeProfiles::builtin(),
            annotation_store(),
            InMemoryAssetCatalog::new(),
        );
        let err = selector
            .resolve_presentation(ReadingMode::Exploratory, None)
            .unwrap_err();
        assert!(matches!(err, AssetLoadError::NotFound { .. }));
    }

    #[test]
    fn test_supplied_document_wins_over_fallback() {
        let selector = PresentationSelector::new(
            ModeProfiles::builtin(),
            annotation_store(),
            InMemoryAssetCatalog::new(),
        );
        let doc = DocumentAsset::new(vec![4, 2], "mine.pdf");
        let presentation = selector
            .resolve_presentation(ReadingMode::Exploratory, Some(&doc))
            .unwrap();
        assert_eq!(presentation.payload, doc);
    }

    #[test]
    fn test_activation_returns_notice() {
        let selector = selector();
        let notification = selector.on_annotation_activated(&understanding_annotation());
        assert_eq!(notification.message, ACTIVATION_NOTICE);
    }
}
