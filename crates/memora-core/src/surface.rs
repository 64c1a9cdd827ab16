//! Presentation surface and its event channel
//!
//! The surface renders a payload with overlays and reports user interaction
//! back as typed events. Events travel over a bounded channel so the surface
//! never blocks on the core; the `EventDispatcher` drains them and invokes
//! the selector's activation hook.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::models::Annotation;
use crate::selector::{Notification, Presentation, PresentationSelector};

/// Events buffered between surface and dispatcher
const EVENT_CAPACITY: usize = 64;

/// Viewer dimensions and text-layer flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSettings {
    pub width: u32,
    pub height: u32,
    pub render_text: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 1000,
            render_text: false,
        }
    }
}

/// Everything the surface needs to draw one presentation
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub payload: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub render_text: bool,
    pub annotations: &'a [Annotation],
}

impl<'a> RenderRequest<'a> {
    pub fn new(presentation: &'a Presentation, settings: ViewerSettings) -> Self {
        Self {
            payload: &presentation.payload.bytes,
            width: settings.width,
            height: settings.height,
            render_text: settings.render_text,
            annotations: &presentation.annotations,
        }
    }
}

/// Events emitted by a presentation surface
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationEvent {
    /// User clicked an overlay
    AnnotationActivated {
        /// Position in the rendered annotation list
        index: usize,
        annotation: Annotation,
    },
}

/// Renders documents and reports interaction
pub trait PresentationSurface {
    fn render(&mut self, request: RenderRequest<'_>, events: EventSender) -> Result<()>;
}

/// Receives notifications produced by event handling
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Fire-and-forget handle given to the surface
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<PresentationEvent>,
}

impl EventSender {
    /// Queue an event without blocking
    ///
    /// Events that cannot be queued are dropped and logged.
    pub fn emit(&self, event: PresentationEvent) {
        if let Err(e) = self.tx.try_send(event) {
            warn!("Dropping presentation event: {}", e);
        }
    }

    /// Convenience for the common click case
    pub fn annotation_activated(&self, index: usize, annotation: Annotation) {
        self.emit(PresentationEvent::AnnotationActivated { index, annotation });
    }
}

/// Create a connected sender/dispatcher pair
pub fn event_channel() -> (EventSender, EventDispatcher) {
    let (tx, rx) = mpsc::channel(EVENT_CAPACITY);
    (EventSender { tx }, EventDispatcher { rx })
}

/// Drains presentation events and reacts to them
pub struct EventDispatcher {
    rx: mpsc::Receiver<PresentationEvent>,
}

impl EventDispatcher {
    fn handle(
        event: PresentationEvent,
        selector: &PresentationSelector,
        notifier: &mut dyn Notifier,
    ) {
        match event {
            PresentationEvent::AnnotationActivated { index, annotation } => {
                debug!("Dispatching activation of annotation #{}", index);
                notifier.notify(selector.on_annotation_activated(&annotation));
            }
        }
    }

    /// Handle every event queued so far, returning how many were handled
    pub fn dispatch_pending(
        &mut self,
        selector: &PresentationSelector,
        notifier: &mut dyn Notifier,
    ) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.rx.try_recv() {
            Self::handle(event, selector, notifier);
            handled += 1;
        }
        handled
    }

    /// Handle events until every sender has been dropped
    pub async fn run(
        mut self,
        selector: &PresentationSelector,
        notifier: &mut dyn Notifier,
    ) -> usize {
        let mut handled = 0;
        while let Some(event) = self.rx.recv().await {
            Self::handle(event, selector, notifier);
            handled += 1;
        }
        handled
    }
}
