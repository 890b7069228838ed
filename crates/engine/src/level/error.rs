use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("malformed geometry at {path}: {message}")]
    MalformedGeometry { path: String, message: String },
    #[error("unknown entity type '{tag}' at {path}")]
    UnknownVariant { path: String, tag: String },
    #[error("unsupported level format_version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: u32, actual: u32 },
    #[error("parse level json at {path}: {message}")]
    Parse { path: String, message: String },
    #[error("encode level json: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("invalid level name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("failed to read level file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write level file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LevelError {
    pub(crate) fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedGeometry {
            path: path.into(),
            message: message.into(),
        }
    }
}
