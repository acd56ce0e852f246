use std::path::PathBuf;
use thiserror::Error;

/// Error produced by a [`Codec`](crate::Codec) while encoding or decoding a value.
pub type CodecError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ConflowError {
    #[error("No default value for {path} — call .set_default() before binding a file that may not exist")]
    MissingDefault { path: PathBuf },

    #[error("Builder is not bound to a file — call .bind_file() before .build()")]
    NotBound,

    #[error("Failed to decode {path} as {codec}: {source}")]
    Deserialize {
        path: PathBuf,
        codec: &'static str,
        source: CodecError,
    },

    #[error("Failed to encode configuration for {path} as {codec}: {source}")]
    Serialize {
        path: PathBuf,
        codec: &'static str,
        source: CodecError,
    },

    #[error("I/O error on {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not resolve config location: {0}")]
    UnresolvedLocation(String),
}

impl ConflowError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConflowError::IoError {
            path: path.into(),
            source,
        }
    }
}
