//! Error types for the CLI and the miette conversion at the binary boundary.

use pkgtree_graph::BuildError;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command-line arguments or options beyond what clap validates.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Graph construction failed (resolution error with stop-on-error set).
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The requested subtree path does not exist in the built tree.
    #[error("subtree path '{0}' does not exist in the package tree")]
    SubtreeNotFound(String),

    /// I/O errors from process/environment operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CliError into a miette report for terminal rendering.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Build(e) => miette::miette!(
            "{e}\n\nHint: pass --stop-on-error=false to render whatever does resolve"
        ),
        CliError::SubtreeNotFound(path) => miette::miette!(
            "subtree path '{path}' does not exist in the package tree\n\n\
             Hint: the path is the slash-separated normalized import path of a tree node"
        ),
        other => miette::miette!("{other}"),
    }
}
