//! Read command handler
//!
//! Runs one viewing session: supply the document, choose the mode, render
//! through the terminal surface, then dispatch any replayed clicks.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use memora_core::{
    event_channel, Config, DocumentStore, FsAssetCatalog, FsDocumentStore, JsonAnnotationStore,
    Notification, Notifier, PresentationSelector, PresentationSurface, ReadingMode,
    RenderRequest, ViewingSession,
};

use crate::output::Output;
use crate::surface::TerminalSurface;

/// Prints notifications as they are dispatched
struct OutputNotifier<'a> {
    output: &'a Output,
}

impl Notifier for OutputNotifier<'_> {
    fn notify(&mut self, notification: Notification) {
        self.output.notify(&notification);
    }
}

/// Build the selector from configuration
pub fn selector(config: &Config) -> Result<PresentationSelector> {
    Ok(PresentationSelector::new(
        config.mode_profiles()?,
        JsonAnnotationStore::new(config.annotations_path()),
        FsAssetCatalog::new(config.assets_path()),
    ))
}

/// Open a document (or a mode's reference document) in a reading mode
///
/// Returns the number of annotation activations that were dispatched.
pub fn read(
    config: &Config,
    file: Option<PathBuf>,
    mode: Option<ReadingMode>,
    clicks: Vec<usize>,
    output: &Output,
) -> Result<usize> {
    let selector = selector(config)?;
    let mut session = ViewingSession::new(config.default_mode);

    if let Some(path) = file {
        let document = FsDocumentStore::new()
            .upload(&path)
            .map_err(|e| anyhow!("{}\n{}", e, e.recovery_suggestion()))?;
        session.supply_document(document);
    }
    if let Some(mode) = mode {
        session.select_mode(mode);
    }

    let presentation = session
        .render(&selector)
        .map_err(|e| anyhow!("{}\n{}", e, e.recovery_suggestion()))?;
    output.print_presentation(presentation);

    let (events, mut dispatcher) = event_channel();
    let mut surface = TerminalSurface::new(output, clicks);
    surface.render(
        RenderRequest::new(presentation, config.viewer_settings()),
        events,
    )?;

    let mut notifier = OutputNotifier { output };
    let activated = dispatcher.dispatch_pending(&selector, &mut notifier);

    session.end();
    Ok(activated)
}
