//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use memora_core::{Config, ReadingMode};

use crate::output::{Output, OutputFormat};

/// Keys accepted by `config set`
const VALID_KEYS: &str = "data_dir, annotations_dir, assets_dir, default_mode, viewer_width, \
                          viewer_height, render_text, token_delay_ms, log_file, \
                          fallback.<mode>";

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:        {}", config.data_dir.display());
            println!("  annotations_dir: {}", config.annotations_path().display());
            println!("  assets_dir:      {}", config.assets_path().display());
            println!("  default_mode:    {}", config.default_mode);
            println!(
                "  viewer:          {}x{} (text layer {})",
                config.viewer_width,
                config.viewer_height,
                if config.render_text { "on" } else { "off" }
            );
            println!("  token_delay_ms:  {}", config.token_delay_ms);
            println!("  log_file:        {}", config.log_path().display());
            for (mode, asset) in &config.fallback_assets {
                println!(
                    "  fallback.{}: {}",
                    mode,
                    if asset.is_empty() { "(disabled)" } else { asset.as_str() }
                );
            }
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Parse an optional path value; empty or "none" clears it
fn optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value.into())
    }
}

/// Apply one `key = value` assignment to a configuration
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => config.data_dir = value.into(),
        "annotations_dir" => config.annotations_dir = optional_path(value),
        "assets_dir" => config.assets_dir = optional_path(value),
        "log_file" => config.log_file = optional_path(value),
        "default_mode" => {
            config.default_mode = value.parse()?;
        }
        "viewer_width" => {
            config.viewer_width = value
                .parse()
                .context("Invalid value for viewer_width. Use a positive integer.")?;
        }
        "viewer_height" => {
            config.viewer_height = value
                .parse()
                .context("Invalid value for viewer_height. Use a positive integer.")?;
        }
        "render_text" => {
            config.render_text = value
                .parse()
                .context("Invalid value for render_text. Use 'true' or 'false'.")?;
        }
        "token_delay_ms" => {
            config.token_delay_ms = value
                .parse()
                .context("Invalid value for token_delay_ms. Use milliseconds.")?;
        }
        _ => match key.strip_prefix("fallback.") {
            Some(mode) => {
                let mode: ReadingMode = mode.parse()?;
                let value = if value == "none" { "" } else { value };
                config
                    .fallback_assets
                    .insert(mode.name().to_lowercase(), value.to_string());
            }
            None => bail!(
                "Unknown configuration key: '{}'\nValid keys: {}",
                key,
                VALID_KEYS
            ),
        },
    }
    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "default_mode", "revisiting").unwrap();
        assert_eq!(config.default_mode, ReadingMode::Revisiting);

        apply(&mut config, "render_text", "true").unwrap();
        assert!(config.render_text);

        apply(&mut config, "assets_dir", "/srv/docs").unwrap();
        assert_eq!(config.assets_path(), PathBuf::from("/srv/docs"));

        apply(&mut config, "assets_dir", "none").unwrap();
        assert!(config.assets_dir.is_none());
    }

    #[test]
    fn test_apply_fallback_override() {
        let mut config = Config::default();

        apply(&mut config, "fallback.Revisiting", "review.pdf").unwrap();
        apply(&mut config, "fallback.exploratory", "none").unwrap();

        let profiles = config.mode_profiles().unwrap();
        assert_eq!(
            profiles.get(ReadingMode::Revisiting).fallback_asset.as_deref(),
            Some("review.pdf")
        );
        assert!(profiles.get(ReadingMode::Exploratory).fallback_asset.is_none());
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply(&mut config, "default_mode", "Novice").is_err());
        assert!(apply(&mut config, "viewer_width", "wide").is_err());
        assert!(apply(&mut config, "fallback.skimming", "x.pdf").is_err());

        let err = apply(&mut config, "theme", "dark").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_set_writes_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);

        set(
            "viewer_width".to_string(),
            "800".to_string(),
            Some(&path),
            &output,
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("viewer_width = 800"));
    }
}
