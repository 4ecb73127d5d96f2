//! Host-level error types.
//!
//! Syntax problems are reported as diagnostics and never abort a parse;
//! these errors cover the surrounding machinery (file access, bad
//! arguments to the incremental entry points).

use thiserror::Error;

/// Errors produced by the host-facing layers of the parser.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
