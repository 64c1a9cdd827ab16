//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/memora/config.toml)
//! 3. Environment variables (MEMORA_* prefix)
//!
//! Environment variables take precedence over config file values.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::ReadingMode;
use crate::profile::ModeProfiles;
use crate::surface::ViewerSettings;

/// Environment variable prefix
const ENV_PREFIX: &str = "MEMORA";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base directory for annotation sources and reference documents
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory of `<key>.json` annotation sources (default: data_dir/annotations)
    #[serde(default)]
    pub annotations_dir: Option<PathBuf>,

    /// Directory of reference documents (default: data_dir/docs)
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,

    /// Mode applied when a document is supplied before any mode is chosen
    #[serde(default)]
    pub default_mode: ReadingMode,

    #[serde(default = "default_viewer_width")]
    pub viewer_width: u32,

    #[serde(default = "default_viewer_height")]
    pub viewer_height: u32,

    /// Ask the surface to render the text layer
    #[serde(default)]
    pub render_text: bool,

    /// Pause between streamed chat tokens
    #[serde(default = "default_token_delay_ms")]
    pub token_delay_ms: u64,

    /// Log file (default: data_dir/memora.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Per-mode reference document overrides keyed by mode name;
    /// empty string disables
    #[serde(default)]
    pub fallback_assets: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            annotations_dir: None,
            assets_dir: None,
            default_mode: ReadingMode::default(),
            viewer_width: default_viewer_width(),
            viewer_height: default_viewer_height(),
            render_text: false,
            token_delay_ms: default_token_delay_ms(),
            log_file: None,
            fallback_assets: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (MEMORA_DATA_DIR, MEMORA_DEFAULT_MODE, MEMORA_TOKEN_DELAY_MS)
    /// 2. Config file (~/.config/memora/config.toml or MEMORA_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load from `--config` if given, otherwise the default location
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        // MEMORA_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // MEMORA_DEFAULT_MODE
        if let Ok(val) = std::env::var(format!("{}_DEFAULT_MODE", ENV_PREFIX)) {
            self.default_mode = val
                .parse()
                .with_context(|| format!("Invalid {}_DEFAULT_MODE", ENV_PREFIX))?;
        }

        // MEMORA_TOKEN_DELAY_MS
        if let Ok(val) = std::env::var(format!("{}_TOKEN_DELAY_MS", ENV_PREFIX)) {
            self.token_delay_ms = val
                .parse()
                .with_context(|| format!("Invalid {}_TOKEN_DELAY_MS: {}", ENV_PREFIX, val))?;
        }

        Ok(())
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with MEMORA_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("memora")
            .join("config.toml")
    }

    pub fn annotations_path(&self) -> PathBuf {
        self.annotations_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("annotations"))
    }

    pub fn assets_path(&self) -> PathBuf {
        self.assets_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("docs"))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("memora.log"))
    }

    pub fn viewer_settings(&self) -> ViewerSettings {
        ViewerSettings {
            width: self.viewer_width,
            height: self.viewer_height,
            render_text: self.render_text,
        }
    }

    pub fn token_delay(&self) -> Duration {
        Duration::from_millis(self.token_delay_ms)
    }

    /// Mode profiles with this configuration's reference document overrides
    pub fn mode_profiles(&self) -> Result<ModeProfiles> {
        let overrides = self
            .fallback_assets
            .iter()
            .map(|(mode, asset)| {
                let mode: ReadingMode = mode
                    .parse()
                    .context("Invalid mode in [fallback_assets]")?;
                Ok::<_, anyhow::Error>((mode, asset.clone()))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(ModeProfiles::with_fallback_overrides(&overrides))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("memora")
}

fn default_viewer_width() -> u32 {
    1200
}

fn default_viewer_height() -> u32 {
    1000
}

fn default_token_delay_ms() -> u64 {
    50
}
