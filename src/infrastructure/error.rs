//! Error types for the collection pipelines.
//!
//! Every variant aborts the run: these are one-shot batch extractions with
//! no partial-result tolerance, so a missing field or unparsable date must
//! surface instead of leaking a corrupted artifact.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ScrapeError {
    #[error("Invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Required element '{selector}' not found ({context})")]
    ElementNotFound { selector: String, context: String },

    #[error("Could not parse calendar date from '{text}'")]
    DateParse { text: String },

    #[error("Content matching '{selector}' did not load within {waited_ms}ms")]
    LoadTimeout { selector: String, waited_ms: u64 },

    #[error("Collection cancelled")]
    Cancelled,

    #[error("Failed to write artifact '{path}': {reason}")]
    SinkWrite { path: String, reason: String },
}

impl ScrapeError {
    pub fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }

    pub fn element_not_found(selector: &str, context: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.to_string(),
            context: context.into(),
        }
    }

    pub fn date_parse(text: &str) -> Self {
        Self::DateParse {
            text: text.to_string(),
        }
    }

    pub fn sink_write(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::SinkWrite {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
