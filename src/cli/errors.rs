use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Nothing to do: pass --output and/or --plot")]
    NoOutput,

    #[error("Cannot infer image format from {path:?}; pass --format")]
    UnknownFormat { path: PathBuf },

    #[error(transparent)]
    Pinnacle(#[from] pinnacle::Error),
}
