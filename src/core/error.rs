use thiserror::Error;

use crate::core::types::DwarfId;

#[derive(Error, Debug)]
pub enum BunkerError {
    #[error("Dwarf not found: {0:?}")]
    DwarfNotFound(DwarfId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Scenario error: {0}")]
    ScenarioError(#[from] crate::world::loader::LoadError),
}

pub type Result<T> = std::result::Result<T, BunkerError>;
