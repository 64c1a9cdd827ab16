//! Reading mode profiles
//!
//! Static, read-only configuration mapping each `ReadingMode` to its display
//! color, annotation source key, explanatory text and optional reference
//! document. Built once at startup and never mutated afterwards.

use std::collections::HashMap;

use crate::models::{AnnotationColor, ReadingMode};

/// Presentation settings for one reading mode
#[derive(Debug, Clone, PartialEq)]
pub struct ModeProfile {
    pub display_color: AnnotationColor,
    /// Key looked up in the annotation store
    pub annotation_source_key: String,
    /// One-line description shown while viewing
    pub explanatory_text: String,
    /// Reference document used when the user has not supplied one
    pub fallback_asset: Option<String>,
}

/// The process-wide table of mode profiles
#[derive(Debug, Clone)]
pub struct ModeProfiles {
    exploratory: ModeProfile,
    understanding: ModeProfile,
    revisiting: ModeProfile,
}

impl ModeProfiles {
    /// Built-in profiles shipped with the application
    pub fn builtin() -> Self {
        Self {
            exploratory: ModeProfile {
                display_color: AnnotationColor::Blue,
                annotation_source_key: "anno1".to_string(),
                explanatory_text: "Only highlighting new key ideas. Well-known sections are \
                                   auto-collapsed with summaries."
                    .to_string(),
                fallback_asset: Some(
                    "toward-human-centered-algorithm-design-exploratory.pdf".to_string(),
                ),
            },
            understanding: ModeProfile {
                display_color: AnnotationColor::Green,
                annotation_source_key: "anno2".to_string(),
                explanatory_text: "Highlighting key ideas, supporting examples, and contextual \
                                   setup with varying levels of highlighting."
                    .to_string(),
                fallback_asset: Some(
                    "toward-human-centered-algorithm-design-exploratory-understanding.pdf"
                        .to_string(),
                ),
            },
            revisiting: ModeProfile {
                display_color: AnnotationColor::Orange,
                annotation_source_key: "anno3".to_string(),
                explanatory_text: "Skipping parts that set up context for main contents. \
                                   Showing connections to your new knowledge."
                    .to_string(),
                fallback_asset: None,
            },
        }
    }

    /// Built-in profiles with fallback assets replaced per mode
    ///
    /// An empty filename removes the mode's fallback.
    pub fn with_fallback_overrides(overrides: &HashMap<ReadingMode, String>) -> Self {
        let mut profiles = Self::builtin();
        for (mode, asset) in overrides {
            let profile = profiles.get_mut(*mode);
            profile.fallback_asset = if asset.is_empty() {
                None
            } else {
                Some(asset.clone())
            };
        }
        profiles
    }

    /// Replace one profile, consuming the table
    pub fn with_profile(mut self, mode: ReadingMode, profile: ModeProfile) -> Self {
        *self.get_mut(mode) = profile;
        self
    }

    pub fn get(&self, mode: ReadingMode) -> &ModeProfile {
        match mode {
            ReadingMode::Exploratory => &self.exploratory,
            ReadingMode::Understanding => &self.understanding,
            ReadingMode::Revisiting => &self.revisiting,
        }
    }

    fn get_mut(&mut self, mode: ReadingMode) -> &mut ModeProfile {
        match mode {
            ReadingMode::Exploratory => &mut self.exploratory,
            ReadingMode::Understanding => &mut self.understanding,
            ReadingMode::Revisiting => &mut self.revisiting,
        }
    }

    /// Iterate profiles in mode order
    pub fn iter(&self) -> impl Iterator<Item = (ReadingMode, &ModeProfile)> {
        ReadingMode::ALL.into_iter().map(move |mode| (mode, self.get(mode)))
    }
}

impl Default for ModeProfiles {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Text recorded for the user while a mode is active
pub fn display_text(mode: ReadingMode) -> String {
    format!("Viewing in {} mode", mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_source_keys() {
        let profiles = ModeProfiles::builtin();
        assert_eq!(profiles.get(ReadingMode::Exploratory).annotation_source_key, "anno1");
        assert_eq!(profiles.get(ReadingMode::Understanding).annotation_source_key, "anno2");
        assert_eq!(profiles.get(ReadingMode::Revisiting).annotation_source_key, "anno3");
    }

    #[test]
    fn test_builtin_colors() {
        let profiles = ModeProfiles::builtin();
        assert_eq!(profiles.get(ReadingMode::Exploratory).display_color, AnnotationColor::Blue);
        assert_eq!(profiles.get(ReadingMode::Understanding).display_color, AnnotationColor::Green);
        assert_eq!(profiles.get(ReadingMode::Revisiting).display_color, AnnotationColor::Orange);
    }

    #[test]
    fn test_revisiting_has_no_fallback() {
        let profiles = ModeProfiles::builtin();
        assert!(profiles.get(ReadingMode::Revisiting).fallback_asset.is_none());
        assert!(profiles.get(ReadingMode::Exploratory).fallback_asset.is_some());
    }

    #[test]
    fn test_fallback_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert(ReadingMode::Exploratory, String::new());
        overrides.insert(ReadingMode::Revisiting, "review.pdf".to_string());

        let profiles = ModeProfiles::with_fallback_overrides(&overrides);
        assert!(profiles.get(ReadingMode::Exploratory).fallback_asset.is_none());
        assert_eq!(
            profiles.get(ReadingMode::Revisiting).fallback_asset.as_deref(),
            Some("review.pdf")
        );
        // Untouched mode keeps its built-in
        assert!(profiles.get(ReadingMode::Understanding).fallback_asset.is_some());
    }

    #[test]
    fn test_iter_order() {
        let profiles = ModeProfiles::builtin();
        let modes: Vec<_> = profiles.iter().map(|(mode, _)| mode).collect();
        assert_eq!(modes, ReadingMode::ALL.to_vec());
    }

    #[test]
    fn test_display_text() {
        assert_eq!(display_text(ReadingMode::Understanding), "Viewing in Understanding mode");
    }
}
