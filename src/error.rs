//! Library error type.
//!
//! Row-level validation problems are data (error-code lists attached to the
//! row), never `Err`s; only boundary failures abort a run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced at the pipeline boundary.
#[derive(Debug, Error)]
pub enum QgenError {
    /// The sole fatal input condition: a required file is missing.
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("failed to parse TSV input")]
    Tsv(#[from] csv::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("template error")]
    Template(#[from] handlebars::TemplateError),

    #[error("render error")]
    Render(#[from] handlebars::RenderError),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, QgenError>;
