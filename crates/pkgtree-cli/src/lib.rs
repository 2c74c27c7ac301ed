//! pkgtree CLI - render the import graph of Go packages.
//!
//! This crate wraps `pkgtree-graph` in a command-line interface. It is
//! organized into:
//!
//! - [`cli`] - clap argument surface
//! - [`error`] - error types and the miette conversion at the binary boundary
//! - [`logger`] - structured logging with tracing
//! - [`run`] - the command body: build the graph, pick an output shape

pub mod cli;
pub mod error;
pub mod logger;
pub mod run;

pub use error::{CliError, Result};
