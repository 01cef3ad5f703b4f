//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while converting or inspecting problem markup
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// A converted block was not well-formed XML when it had to be parsed
    MalformedBlock { block: usize, message: String },
    /// A block's only response element sits inside other markup and cannot take in its siblings
    NestedResponse { block: usize, response: String },
    /// A standalone OLX document could not be parsed
    ParseError(String),
    /// Stage name not known to the pipeline
    UnknownStage(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MalformedBlock { block, message } => {
                write!(f, "Block {} is not well-formed XML: {message}", block + 1)
            }
            FormatError::NestedResponse { block, response } => write!(
                f,
                "Block {} has its only <{response}> nested inside other markup",
                block + 1
            ),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::UnknownStage(name) => write!(f, "Stage '{name}' not found"),
        }
    }
}

impl std::error::Error for FormatError {}
