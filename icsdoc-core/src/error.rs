//! Error types for icsdoc.

use std::path::PathBuf;

use thiserror::Error;

use crate::event::EventField;

/// Errors that can occur while turning a calendar into a document.
#[derive(Error, Debug)]
pub enum IcsDocError {
    #[error("Event {event} is missing its {field}")]
    MissingField { field: EventField, event: String },

    #[error("Could not read calendar: {0}")]
    SourceRead(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Could not write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF conversion failed: {0}")]
    Conversion(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<tera::Error> for IcsDocError {
    fn from(err: tera::Error) -> Self {
        // Tera keeps the useful detail (unknown variable, parse position) in
        // the source chain, not in the top-level message.
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        IcsDocError::Template(message)
    }
}

/// Result type alias for icsdoc operations.
pub type IcsDocResult<T> = Result<T, IcsDocError>;
