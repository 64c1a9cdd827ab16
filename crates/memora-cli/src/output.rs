//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use memora_core::{Annotation, ModeProfiles, Notification, Presentation};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the reading modes with their profiles
    pub fn print_modes(&self, profiles: &ModeProfiles) {
        match self.format {
            OutputFormat::Human => {
                println!("Reading Modes");
                println!("=============");
                for (mode, profile) in profiles.iter() {
                    println!();
                    println!("{} ({})", mode, profile.display_color);
                    println!("  {}", profile.explanatory_text);
                    for line in mode.guide() {
                        println!("  - {}", line);
                    }
                    println!(
                        "  Reference document: {}",
                        profile.fallback_asset.as_deref().unwrap_or("(none)")
                    );
                }
            }
            OutputFormat::Json => {
                let modes: Vec<_> = profiles
                    .iter()
                    .map(|(mode, profile)| {
                        serde_json::json!({
                            "mode": mode,
                            "color": profile.display_color,
                            "annotation_source": profile.annotation_source_key,
                            "text": profile.explanatory_text,
                            "guide": mode.guide(),
                            "fallback_asset": profile.fallback_asset,
                        })
                    })
                    .collect();
                println!("{}", to_json(&modes));
            }
            OutputFormat::Quiet => {
                for (mode, _) in profiles.iter() {
                    println!("{}", mode);
                }
            }
        }
    }

    /// Print a list of annotations
    pub fn print_annotations(&self, annotations: &[Annotation]) {
        match self.format {
            OutputFormat::Human => {
                if annotations.is_empty() {
                    println!("No annotations.");
                    return;
                }
                for (index, a) in annotations.iter().enumerate() {
                    println!("{}", format_annotation(index, a));
                }
                println!("\n{} annotation(s)", annotations.len());
            }
            OutputFormat::Json => {
                println!("{}", to_json(annotations));
            }
            OutputFormat::Quiet => {
                println!("{}", annotations.len());
            }
        }
    }

    /// Print a resolved presentation summary
    pub fn print_presentation(&self, presentation: &Presentation) {
        match self.format {
            OutputFormat::Human => {
                println!("{}", presentation.display_text);
                println!(
                    "Document: {} ({} bytes)",
                    presentation.payload.origin_filename,
                    presentation.payload.len()
                );
                if let Some(ref warning) = presentation.warning {
                    eprintln!("⚠ {}", warning);
                }
                println!();
                self.print_annotations(&presentation.annotations);
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "mode": presentation.mode,
                        "text": presentation.display_text,
                        "document": presentation.payload.origin_filename,
                        "bytes": presentation.payload.len(),
                        "annotations": presentation.annotations,
                        "warning": presentation.warning.as_ref().map(|w| w.to_string()),
                    })
                );
            }
            OutputFormat::Quiet => {
                println!("{}", presentation.payload.origin_filename);
            }
        }
    }

    /// Print a transient notification
    pub fn notify(&self, notification: &Notification) {
        match self.format {
            OutputFormat::Human => println!("» {}", notification.message),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"notification": notification.message}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// One-line summary of an annotation
fn format_annotation(index: usize, a: &Annotation) -> String {
    format!(
        "#{:<2} page {:<3} at ({}, {}) {}x{}  {} {}",
        index, a.page, a.x, a.y, a.width, a.height, a.color, a.border_style
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use memora_core::{AnnotationColor, BorderStyle};

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_format_annotation() {
        let a = Annotation::new(1, 220.0, 255.0, 65.0, 22.0, AnnotationColor::Green)
            .with_border(BorderStyle::Dotted);
        let line = format_annotation(0, &a);
        assert!(line.starts_with("#0"));
        assert!(line.contains("page 1"));
        assert!(line.contains("(220, 255)"));
        assert!(line.contains("65x22"));
        assert!(line.ends_with("green dotted"));
    }
}
