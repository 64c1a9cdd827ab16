//! Terminal presentation surface
//!
//! Stands in for a graphical document viewer: prints what would be drawn and
//! replays the clicks requested on the command line as activation events.

use anyhow::Result;
use tracing::{debug, warn};

use memora_core::{EventSender, PresentationSurface, RenderRequest};

use crate::output::{Output, OutputFormat};

pub struct TerminalSurface<'a> {
    output: &'a Output,
    /// Annotation indices to activate after rendering
    clicks: Vec<usize>,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(output: &'a Output, clicks: Vec<usize>) -> Self {
        Self { output, clicks }
    }
}

impl PresentationSurface for TerminalSurface<'_> {
    fn render(&mut self, request: RenderRequest<'_>, events: EventSender) -> Result<()> {
        debug!(
            "Rendering {} bytes at {}x{} with {} overlays",
            request.payload.len(),
            request.width,
            request.height,
            request.annotations.len()
        );

        if self.output.format == OutputFormat::Human {
            println!(
                "[viewer {}x{}, text layer {}]",
                request.width,
                request.height,
                if request.render_text { "on" } else { "off" }
            );
        }

        for &index in &self.clicks {
            match request.annotations.get(index) {
                Some(annotation) => events.annotation_activated(index, annotation.clone()),
                None => {
                    warn!("Click on missing annotation #{}", index);
                    self.output
                        .message(&format!("No annotation #{} to activate", index));
                }
            }
        }

        Ok(())
    }
}
