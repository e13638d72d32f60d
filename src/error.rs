use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain the dataset at all. Individual bad rows never produce one.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read deck {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("deck loader stopped before finishing: {0}")]
    Interrupted(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to export deck to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to set up logging at {path}: {source}")]
    Logger {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
