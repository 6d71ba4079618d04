//! Configuration file handling.
//!
//! Loads `config.toml` from the user config directory (`glyphorbit/config.toml`)
//! or a path given with `--config`. A missing file yields defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub portrait: PortraitConfig,
    #[serde(default)]
    pub typewriter: TypewriterConfig,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct MotionConfig {
    #[serde(default)]
    pub reduced: bool,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub hud: bool,
    /// Forces truecolor on or off; detected from the environment when unset.
    #[serde(default)]
    pub truecolor: Option<bool>,
    #[serde(default = "default_color")]
    pub color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hud: true,
            truecolor: None,
            color: default_color(),
        }
    }
}

/// Grid used in headless runs, where there is no terminal to measure.
#[derive(Debug, Deserialize, PartialEq)]
pub struct ViewportConfig {
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default = "default_rows")]
    pub rows: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
        }
    }
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct PortraitConfig {
    #[serde(default)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct TypewriterConfig {
    #[serde(default)]
    pub text: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_color() -> [u8; 3] {
    [200, 220, 255]
}

fn default_cols() -> usize {
    120
}

fn default_rows() -> usize {
    40
}

impl Config {
    /// Returns defaults when the file does not exist, an error when it cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);
        log::debug!("config path: {}", path.display());

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("glyphorbit")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load(Some(&dir.path().join("absent.toml"))).expect("defaults");
        assert_eq!(config, Config::default());
        assert!(config.display.hud);
        assert_eq!(config.viewport.cols, 120);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let file = write_config(
            r#"
            [motion]
            reduced = true

            [portrait]
            image = "/tmp/me.png"
            "#,
        );
        let config = Config::load(Some(file.path())).expect("parse");
        assert!(config.motion.reduced);
        assert_eq!(config.portrait.image, Some(PathBuf::from("/tmp/me.png")));
        assert!(config.display.hud);
        assert_eq!(config.display.truecolor, None);
        assert_eq!(config.typewriter.text, None);
    }

    #[test]
    fn display_and_viewport_sections_parse() {
        let file = write_config(
            r#"
            [display]
            hud = false
            truecolor = true
            color = [255, 128, 0]

            [viewport]
            cols = 90
            rows = 30

            [typewriter]
            text = "hello there"
            "#,
        );
        let config = Config::load(Some(file.path())).expect("parse");
        assert!(!config.display.hud);
        assert_eq!(config.display.truecolor, Some(true));
        assert_eq!(config.display.color, [255, 128, 0]);
        assert_eq!(config.viewport.cols, 90);
        assert_eq!(config.viewport.rows, 30);
        assert_eq!(config.typewriter.text.as_deref(), Some("hello there"));
    }

    #[test]
    fn malformed_file_reports_path() {
        let file = write_config("[motion\nreduced = ");
        let err = Config::load(Some(file.path())).expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn default_path_ends_in_app_dir() {
        let path = default_path();
        assert!(path.ends_with("glyphorbit/config.toml"));
    }
}
