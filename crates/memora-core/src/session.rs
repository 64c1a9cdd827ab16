//! Viewing session
//!
//! Explicit per-session context: the active reading mode, the supplied
//! document, the current presentation and the chat history. Every operation
//! takes the session it works on; nothing is stored globally.
//!
//! ```text
//! NoDocument --select_mode / supply_document--> ModeSelected
//! ModeSelected --render ok--> Rendered
//! ModeSelected --render err--> ModeSelected (error recorded)
//! Rendered --select_mode / supply_document--> ModeSelected
//! ```

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::chat::ChatHistory;
use crate::error::AssetLoadError;
use crate::models::{DocumentAsset, ReadingMode};
use crate::selector::{Presentation, PresentationSelector};

/// Lifecycle state of a viewing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Nothing chosen yet
    NoDocument,
    /// A mode is active; no presentation is held
    ModeSelected,
    /// A presentation has been resolved for the active mode
    Rendered,
}

/// One user's viewing session
#[derive(Debug)]
pub struct ViewingSession {
    id: Uuid,
    state: SessionState,
    default_mode: ReadingMode,
    mode: Option<ReadingMode>,
    document: Option<DocumentAsset>,
    presentation: Option<Presentation>,
    last_error: Option<String>,
    pub chat: ChatHistory,
}

impl ViewingSession {
    /// Start a session; `default_mode` applies when a document arrives first
    pub fn new(default_mode: ReadingMode) -> Self {
        let id = Uuid::new_v4();
        debug!("Viewing session {} started", id);
        Self {
            id,
            state: SessionState::NoDocument,
            default_mode,
            mode: None,
            document: None,
            presentation: None,
            last_error: None,
            chat: ChatHistory::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> Option<ReadingMode> {
        self.mode
    }

    pub fn document(&self) -> Option<&DocumentAsset> {
        self.document.as_ref()
    }

    pub fn presentation(&self) -> Option<&Presentation> {
        self.presentation.as_ref()
    }

    /// Message from the last failed render, cleared on success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Make `mode` the active reading mode
    ///
    /// The current presentation is discarded, never merged.
    pub fn select_mode(&mut self, mode: ReadingMode) {
        debug!("Session {}: mode {:?} -> {}", self.id, self.mode, mode);
        self.mode = Some(mode);
        self.presentation = None;
        self.state = SessionState::ModeSelected;
    }

    /// Replace the session's document
    ///
    /// Applies the default mode if none has been chosen yet.
    pub fn supply_document(&mut self, document: DocumentAsset) {
        debug!(
            "Session {}: document {} ({} bytes)",
            self.id,
            document.origin_filename,
            document.len()
        );
        self.document = Some(document);
        self.presentation = None;
        if self.mode.is_none() {
            self.mode = Some(self.default_mode);
        }
        self.state = SessionState::ModeSelected;
    }

    /// Resolve and hold the presentation for the active mode
    ///
    /// On failure the session stays in `ModeSelected` and keeps no
    /// partial presentation; the user may retry by selecting a mode or
    /// supplying a document.
    pub fn render(
        &mut self,
        selector: &PresentationSelector,
    ) -> Result<&Presentation, AssetLoadError> {
        let mode = self.mode.unwrap_or(self.default_mode);
        if self.mode.is_none() {
            self.select_mode(mode);
        }

        match selector.resolve_presentation(mode, self.document.as_ref()) {
            Ok(presentation) => {
                self.last_error = None;
                self.state = SessionState::Rendered;
                let presentation = self.presentation.insert(presentation);
                Ok(&*presentation)
            }
            Err(e) => {
                warn!("Session {}: render failed: {}", self.id, e);
                self.last_error = Some(e.to_string());
                self.presentation = None;
                self.state = SessionState::ModeSelected;
                Err(e)
            }
        }
    }

    /// End the session, releasing its document and presentation
    pub fn end(self) {
        debug!("Viewing session {} ended", self.id);
    }
}

impl Default for ViewingSession {
    fn default() -> Self {
        Self::new(ReadingMode::default())
    }
}
