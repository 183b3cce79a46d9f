//! Error types for sqlpretty

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for sqlpretty operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sqlpretty
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("{message}")]
    #[diagnostic(code(sqlpretty::parse_error))]
    ParseError {
        message: String,
        #[label("here")]
        span: Option<(usize, usize)>,
    },

    /// Strict-mode rendering hit a node kind with no formatting rule.
    #[error("no formatting rule for node kind '{kind}'")]
    #[diagnostic(code(sqlpretty::unrecognized_node))]
    UnrecognizedNode { kind: String },
}
