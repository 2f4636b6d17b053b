use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the JSON store and the actor that owns it.
///
/// Missing, empty and corrupt files are not errors: they load as an empty
/// collection. Only genuine I/O failures and a vanished store task get here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
