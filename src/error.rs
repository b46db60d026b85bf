//! Unified error types for audiotray

use crate::menu::Category;
use thiserror::Error;

/// Main error type for audiotray operations
#[derive(Error, Debug)]
pub enum AudioTrayError {
    /// An entry with this index already exists in the collection
    #[error("{category} entry {index} already exists")]
    DuplicateIndex { category: Category, index: u32 },

    /// The tray shell failed to create or remove a visual
    #[error("Tray shell error: {0}")]
    Shell(String),

    /// IO error reading/writing a config or script file
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Error parsing a TOML file
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    /// Error serializing settings
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type alias for audiotray operations
pub type Result<T> = std::result::Result<T, AudioTrayError>;

impl AudioTrayError {
    /// Create a shell error from any displayable toolkit error
    pub fn shell(message: impl std::fmt::Display) -> Self {
        Self::Shell(message.to_string())
    }

    /// Check if this error only means the event was redundant
    pub fn is_benign(&self) -> bool {
        matches!(self, AudioTrayError::DuplicateIndex { .. })
    }
}
