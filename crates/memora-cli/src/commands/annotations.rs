//! Annotations command handler

use anyhow::{Context, Result};

use memora_core::{AnnotationStore, Config, JsonAnnotationStore, ReadingMode};

use crate::output::Output;

/// Show the annotation source behind a reading mode
pub fn show(config: &Config, mode: ReadingMode, output: &Output) -> Result<()> {
    let profiles = config.mode_profiles()?;
    let key = &profiles.get(mode).annotation_source_key;
    let store = JsonAnnotationStore::new(config.annotations_path());

    let annotations = store
        .load(key)
        .with_context(|| format!("Failed to load annotations for {} mode", mode))?;

    output.print_annotations(&annotations);
    Ok(())
}
