//! Data models for Memora
//!
//! Defines the core data structures: ReadingMode, Annotation and DocumentAsset.
//! Annotations deserialize from the same JSON records the annotation files
//! on disk use (`page`, `x`, `y`, `width`, `height`, `color`, `border`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InvalidModeSelection;

/// Strategy controlling which annotation set and reference asset apply
/// to a document view
///
/// Serialized lowercase; deserialized through `FromStr`, so config files
/// accept the same spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingMode {
    /// Only new key ideas are highlighted
    Exploratory,
    /// Key ideas, supporting examples and contextual setup are highlighted
    #[default]
    Understanding,
    /// Context-setting parts are skipped on a second read
    Revisiting,
}

impl ReadingMode {
    /// All modes in the order they are offered to the user
    pub const ALL: [ReadingMode; 3] = [
        ReadingMode::Exploratory,
        ReadingMode::Understanding,
        ReadingMode::Revisiting,
    ];

    /// Capitalised display name
    pub fn name(&self) -> &'static str {
        match self {
            ReadingMode::Exploratory => "Exploratory",
            ReadingMode::Understanding => "Understanding",
            ReadingMode::Revisiting => "Revisiting",
        }
    }

    /// Bullet points shown when the user asks what the reading modes are
    pub fn guide(&self) -> &'static [&'static str] {
        match self {
            ReadingMode::Exploratory => &[
                "Only highlights new key ideas",
                "Auto-collapses well-known sections with a one-line summary",
                "Knowledge base isn't updated",
            ],
            ReadingMode::Understanding => &[
                "Highlights key ideas, supporting examples, contextual setup",
                "Uses different colors for different importance levels",
                "Shows how ideas connect to your prior knowledge",
            ],
            ReadingMode::Revisiting => &[
                "Skips parts that set up context for main contents",
                "Shows connections to knowledge you've acquired since first reading",
            ],
        }
    }
}

impl fmt::Display for ReadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReadingMode {
    type Err = InvalidModeSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exploratory" => Ok(ReadingMode::Exploratory),
            "understanding" => Ok(ReadingMode::Understanding),
            "revisiting" => Ok(ReadingMode::Revisiting),
            _ => Err(InvalidModeSelection(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for ReadingMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Overlay color token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationColor {
    Blue,
    Green,
    Orange,
    Red,
    Yellow,
    Purple,
    Gray,
}

impl AnnotationColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationColor::Blue => "blue",
            AnnotationColor::Green => "green",
            AnnotationColor::Orange => "orange",
            AnnotationColor::Red => "red",
            AnnotationColor::Yellow => "yellow",
            AnnotationColor::Purple => "purple",
            AnnotationColor::Gray => "gray",
        }
    }
}

impl fmt::Display for AnnotationColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overlay border style token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dotted,
    Dashed,
}

impl BorderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Dashed => "dashed",
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positioned rectangular overlay on one page of a document
///
/// Coordinates are in page space as understood by the presentation surface.
/// Render order is list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// 1-based page number
    pub page: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: AnnotationColor,
    #[serde(rename = "border", alias = "border_style", alias = "borderStyle", default)]
    pub border_style: BorderStyle,
}

impl Annotation {
    /// Create an annotation with a solid border
    pub fn new(page: u32, x: f64, y: f64, width: f64, height: f64, color: AnnotationColor) -> Self {
        Self {
            page,
            x,
            y,
            width,
            height,
            color,
            border_style: BorderStyle::Solid,
        }
    }

    /// Builder-style border override
    pub fn with_border(mut self, border_style: BorderStyle) -> Self {
        self.border_style = border_style;
        self
    }

    /// Check the record is renderable
    ///
    /// Pages start at 1; geometry must be finite with non-negative extent.
    /// The page is not checked against the document's page count.
    pub fn validate(&self) -> Result<(), String> {
        if self.page == 0 {
            return Err("page must be at least 1".to_string());
        }
        for (name, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() {
                return Err(format!("{} is not a finite number", name));
            }
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(format!(
                "negative extent {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

/// A renderable document owned by a viewing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAsset {
    /// Raw document bytes, passed to the surface unchanged
    pub bytes: Vec<u8>,
    /// Name of the file the bytes came from
    pub origin_filename: String,
}

impl DocumentAsset {
    pub fn new(bytes: Vec<u8>, origin_filename: impl Into<String>) -> Self {
        Self {
            bytes,
            origin_filename: origin_filename.into(),
        }
    }

    /// Size of the payload in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
