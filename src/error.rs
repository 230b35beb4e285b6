//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Covers dataset lookups, array shape validation, geometric preconditions and
//! detector modes, and converts underlying I/O, JSON and image encoder errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Variable not found in dataset: {name}")]
    Lookup { name: String },

    #[error("{array} must have same length as {target} (expected {expected}, got {found})")]
    ShapeMismatch {
        array: String,
        target: String,
        expected: usize,
        found: usize,
    },

    #[error("Variable {name} does not have dimensions ({expected})")]
    Dimension { name: String, expected: &'static str },

    #[error("Domain error: {reason}")]
    Domain { reason: String },

    #[error("Invalid surface detection mode: {mode} (expected one of max, max+, max++)")]
    InvalidMode { mode: String },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("TIFF encoding error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("JPEG encoding error: {0}")]
    Jpeg(#[from] jpeg_encoder::EncodingError),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }

    pub(crate) fn shape_mismatch(
        array: impl Into<String>,
        target: impl Into<String>,
        expected: usize,
        found: usize,
    ) -> Self {
        Error::ShapeMismatch {
            array: array.into(),
            target: target.into(),
            expected,
            found,
        }
    }
}
