// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurtainError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Texture error: {0}")]
    Texture(String),

    #[error("OSC error: {0}")]
    Osc(String),
}

pub type Result<T> = std::result::Result<T, CurtainError>;
