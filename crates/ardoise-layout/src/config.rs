//! # Render Configuration
//!
//! Installation-wide appearance profile and output settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ARDOISE_PRIMARY_COLOR=#0f766e                                      │
//! │     ARDOISE_DRAFT=true                                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/ardoise/appearance.toml (Linux)                          │
//! │     ~/Library/Application Support/com.ardoise.ardoise/appearance.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     empty profile, compact JSON                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The profile sits under each document's own `appearance`, which in turn
//! sits over the per-kind table and the base defaults.
//!
//! ## Configuration File Format
//! ```toml
//! # appearance.toml
//! [appearance]
//! primaryColor = "#0f766e"
//! layoutPreset = "premium-grid"
//!
//! [appearance.columns]
//! showUnite = true
//!
//! [output]
//! pretty = true
//! ```

use ardoise_core::appearance::{AppearanceOverrides, HeaderStyle, LayoutPreset, TableStyle};
use ardoise_core::color::is_valid_hex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Leading comment of a written profile.
const PROFILE_HEADER: &str = "# Ardoise appearance profile\n\
# Keys mirror a document's `appearance` object (camelCase).\n\n";

// =============================================================================
// Output Settings
// =============================================================================

/// Settings of the bundled JSON backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Indent the emitted layout description.
    #[serde(default)]
    pub pretty: bool,
}

// =============================================================================
// Render Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Profile layer applied under every document's own overrides.
    #[serde(default)]
    pub appearance: AppearanceOverrides,

    #[serde(default)]
    pub output: OutputSettings,
}

impl RenderConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (appearance.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading render config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load render config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the profile, validated, and returns where it went.
    ///
    /// Used by `ardoise --init-config` to seed an editable file from the
    /// effective profile (file values plus `ARDOISE_*` overrides).
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        self.validate()?;
        let Some(path) = config_path.or_else(Self::default_config_path) else {
            return Err(ConfigError::InvalidValue(
                "no platform config directory, pass an explicit path".into(),
            ));
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let mut contents = String::from(PROFILE_HEADER);
        contents.push_str(&toml::to_string_pretty(self)?);
        std::fs::write(&path, contents)?;

        info!(path = %path.display(), "Appearance profile written");
        Ok(path)
    }

    /// Rejects profile values that can only be typos.
    ///
    /// Documents degrade on bad appearance input; a profile file is edited
    /// by an operator and fails loudly instead.
    pub fn validate(&self) -> ConfigResult<()> {
        for (key, color) in [
            ("primaryColor", &self.appearance.primary_color),
            ("secondaryColor", &self.appearance.secondary_color),
        ] {
            if let Some(color) = color {
                if !is_valid_hex(color) {
                    return Err(ConfigError::InvalidValue(format!(
                        "{} must be a hex color like #0f766e, got: {}",
                        key, color
                    )));
                }
            }
        }

        if let Some(size) = self.appearance.base_font_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(ConfigError::InvalidValue(format!(
                    "baseFontSize must be greater than 0, got: {}",
                    size
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(color) = lookup("ARDOISE_PRIMARY_COLOR") {
            debug!(color = %color, "Overriding primary color from environment");
            self.appearance.primary_color = Some(color);
        }

        if let Some(style) = lookup("ARDOISE_HEADER_STYLE") {
            match style.parse::<HeaderStyle>() {
                Ok(parsed) => self.appearance.header_style = Some(parsed),
                Err(_) => warn!(style = %style, "Unknown header style in environment"),
            }
        }

        if let Some(style) = lookup("ARDOISE_TABLE_STYLE") {
            match style.parse::<TableStyle>() {
                Ok(parsed) => self.appearance.table_style = Some(parsed),
                Err(_) => warn!(style = %style, "Unknown table style in environment"),
            }
        }

        if let Some(preset) = lookup("ARDOISE_LAYOUT_PRESET") {
            match preset.parse::<LayoutPreset>() {
                Ok(parsed) => self.appearance.layout_preset = Some(parsed),
                Err(_) => warn!(preset = %preset, "Unknown layout preset in environment"),
            }
        }

        if let Some(draft) = lookup("ARDOISE_DRAFT").as_deref().and_then(parse_flag) {
            self.appearance.show_draft_watermark = Some(draft);
        }

        if let Some(pretty) = lookup("ARDOISE_PRETTY").as_deref().and_then(parse_flag) {
            self.output.pretty = pretty;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ardoise", "ardoise")
            .map(|dirs| dirs.config_dir().join("appearance.toml"))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_toml_profile() {
        let toml_str = r##"
            [appearance]
            primaryColor = "#0f766e"
            layoutPreset = "premium-grid"

            [appearance.columns]
            showUnite = true

            [output]
            pretty = true
        "##;
        let config: RenderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.appearance.primary_color.as_deref(), Some("#0f766e"));
        assert_eq!(config.appearance.layout_preset, Some(LayoutPreset::PremiumGrid));
        assert_eq!(config.appearance.columns.show_unite, Some(true));
        assert!(config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ARDOISE_PRIMARY_COLOR", "#112233"),
            ("ARDOISE_HEADER_STYLE", "ultra"),
            ("ARDOISE_TABLE_STYLE", "sparkly"),
            ("ARDOISE_DRAFT", "yes"),
            ("ARDOISE_PRETTY", "1"),
        ]
        .into_iter()
        .collect();

        let mut config = RenderConfig::default();
        config.appearance.table_style = Some(TableStyle::Bordered);
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.appearance.primary_color.as_deref(), Some("#112233"));
        assert_eq!(config.appearance.header_style, Some(HeaderStyle::Ultra));
        // unknown value keeps the file setting
        assert_eq!(config.appearance.table_style, Some(TableStyle::Bordered));
        assert_eq!(config.appearance.show_draft_watermark, Some(true));
        assert!(config.output.pretty);
    }

    #[test]
    fn test_validation() {
        let mut config = RenderConfig::default();
        assert!(config.validate().is_ok());

        config.appearance.primary_color = Some("teal".into());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        config.appearance.primary_color = Some("#0f766e".into());
        config.appearance.base_font_size = Some(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        // parent directories are created on save
        let path = dir.path().join("profiles").join("appearance.toml");
        let mut config = RenderConfig::default();
        config.appearance.secondary_color = Some("#ccfbf1".into());
        config.appearance.hide.bank_details = Some(true);
        config.output.pretty = true;

        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# Ardoise appearance profile"));

        let loaded = RenderConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.appearance.secondary_color.as_deref(), Some("#ccfbf1"));
        assert_eq!(loaded.appearance.hide.bank_details, Some(true));
    }

    #[test]
    fn test_save_refuses_invalid_profile() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("appearance.toml");
        let mut config = RenderConfig::default();
        config.appearance.primary_color = Some("teal".into());

        assert!(matches!(
            config.save(Some(path.clone())),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_or_default_on_bad_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "appearance = [not toml").unwrap();

        assert!(matches!(
            RenderConfig::load(Some(path.clone())),
            Err(ConfigError::Parse(_))
        ));
        let config = RenderConfig::load_or_default(Some(path));
        assert!(config.appearance.primary_color.is_none());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
