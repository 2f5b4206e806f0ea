//! Typed errors for the classification pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Per-line classification
//! failures are deliberately NOT errors: they are recorded as data in
//! the output corpus (see [`crate::outcome`]). Only startup
//! preconditions and output I/O can fail a run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input corpus does not exist
    #[error("input corpus not found: {path}")]
    MissingInput {
        /// The path that was checked
        path: PathBuf,
    },

    /// Taxonomy failed validation
    #[error("invalid taxonomy: {reason}")]
    InvalidTaxonomy {
        /// Why the label set was rejected
        reason: String,
    },

    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the output corpus failed
    #[error("output corpus error: {0}")]
    Csv(#[from] csv::Error),

    /// Document collection failed
    #[error("collect failed: {0}")]
    Collect(#[from] crate::collect::CollectError),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
