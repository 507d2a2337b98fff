//! Content loading errors
//!
//! Every variant is fatal for a build: a post that cannot be read or parsed
//! stops generation instead of being skipped.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} has no front-matter block")]
    MissingFrontMatter { path: PathBuf },

    #[error("{path:?} front-matter is not terminated by a closing ---")]
    UnterminatedFrontMatter { path: PathBuf },

    #[error("invalid front-matter in {path:?}: {source}")]
    InvalidFrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to render markdown in {path:?}: {message}")]
    Render { path: PathBuf, message: String },
}
