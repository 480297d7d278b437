//! Error type shared by every stage of badge generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while validating, rendering or persisting a badge.
///
/// All variants are local to a single badge: the batch driver decides
/// whether one failure aborts the run or is collected into the report.
#[derive(Debug, Error)]
pub enum BadgeError {
    /// Radius, stroke, padding or font size cannot produce a canvas.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A required label is empty or blank.
    #[error("invalid label: {0}")]
    InvalidLabel(String),

    /// A color string that is neither a known name nor a hex code.
    #[error("invalid color `{0}`")]
    InvalidColor(String),

    /// A catalog entry that cannot be expanded into badges.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// The typeface could not be found or parsed. Not retried.
    #[error("failed to load font from {origin}: {reason}")]
    FontLoad { origin: String, reason: String },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PNG encoding failed.
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Catalog JSON could not be parsed or produced.
    #[error("catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl BadgeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = BadgeError> = std::result::Result<T, E>;
