// src/config/config_load.rs
//
// loading of config.toml

use super::config_types::{CurtainConfig, OscConfig, PathConfig, WindowConfig};
use crate::error::{CurtainError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub window: WindowConfig,
    pub paths: PathConfig,
    #[serde(default)]
    pub curtain: CurtainConfig,
    pub osc: OscConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            tracing::info!("Loaded config from executable directory");
            return exe_config;
        }

        // Fallback to loading from the current working directory
        let config = Self::load_from_path(Path::new("config.toml"))?;
        tracing::info!("Loaded config from working directory");
        Ok(config)
    }

    fn load_from_exe_dir() -> Option<Result<Self>> {
        let exe_path = std::env::current_exe().ok()?;
        let config_path = exe_path.parent()?.join("config.toml");

        if config_path.exists() {
            Some(Self::load_from_path(&config_path))
        } else {
            None
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let curtain = &self.curtain;
        if curtain.columns == 0 || curtain.rows == 0 {
            return Err(CurtainError::Config(format!(
                "grid must have at least one column and row, got {}x{}",
                curtain.columns, curtain.rows
            )));
        }
        if !(curtain.smoothing > 0.0 && curtain.smoothing <= 1.0) {
            return Err(CurtainError::Config(format!(
                "smoothing must be in (0, 1], got {}",
                curtain.smoothing
            )));
        }
        if curtain.tick_ms == 0 {
            return Err(CurtainError::Config("tick_ms must be positive".into()));
        }
        if !curtain.max_wave.is_finite() {
            return Err(CurtainError::Config("max_wave must be finite".into()));
        }
        Ok(())
    }

    pub fn resolve_texture_path(&self) -> PathBuf {
        if Path::new(&self.paths.texture_file).is_absolute() {
            PathBuf::from(&self.paths.texture_file)
        } else {
            // If path is relative, resolve it relative to the executable or working directory
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .map(|exe_dir| exe_dir.join(&self.paths.texture_file))
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from(&self.paths.texture_file))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;
    use crate::utilities::easing::EasingType;

    const MINIMAL: &str = r#"
        [window]
        width = 800
        height = 400

        [paths]
        texture_file = "assets/curtain.png"

        [osc]
        rx_port = 9000
    "#;

    #[test]
    fn test_defaults_fill_missing_curtain_section() {
        let config = Config::from_toml(MINIMAL).unwrap();
        assert_eq!(config.curtain.columns, 40);
        assert_eq!(config.curtain.rows, 7);
        assert_eq!(config.curtain.direction, Direction::Right);
        assert_eq!(config.curtain.tick_ms, 20);
        assert_eq!(config.curtain.max_alpha, 255);
        assert!((config.curtain.smoothing - 0.3).abs() < 1e-6);
        assert!(config.curtain.per_vertex_color);
    }

    #[test]
    fn test_partial_curtain_section() {
        let content = format!(
            "{}\n[curtain]\ndirection = \"left\"\neasing = \"ease_out\"\nper_vertex_color = false\n",
            MINIMAL
        );
        let config = Config::from_toml(&content).unwrap();
        assert_eq!(config.curtain.direction, Direction::Left);
        assert_eq!(config.curtain.easing, EasingType::EaseOut);
        assert!(!config.curtain.per_vertex_color);
        assert_eq!(config.curtain.columns, 40);
    }

    #[test]
    fn test_rejects_invalid_values() {
        for bad in ["columns = 0", "rows = 0", "smoothing = 0.0", "smoothing = 1.5", "tick_ms = 0"] {
            let content = format!("{}\n[curtain]\n{}\n", MINIMAL, bad);
            assert!(
                matches!(Config::from_toml(&content), Err(CurtainError::Config(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Config::from_toml("[window]\nwidth = \"wide\""),
            Err(CurtainError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_absolute_texture_path_is_kept() {
        let mut config = Config::from_toml(MINIMAL).unwrap();
        let absolute = std::env::temp_dir().join("curtain.png");
        config.paths.texture_file = absolute.to_string_lossy().into_owned();
        assert_eq!(config.resolve_texture_path(), absolute);
    }

    #[test]
    fn test_missing_relative_texture_falls_back_to_working_dir() {
        let mut config = Config::from_toml(MINIMAL).unwrap();
        config.paths.texture_file = "no/such/texture.png".into();
        assert_eq!(config.resolve_texture_path(), PathBuf::from("no/such/texture.png"));
    }

    #[test]
    fn test_shipped_config_parses() {
        let content = include_str!("../../config.toml");
        assert!(Config::from_toml(content).is_ok());
    }
}
