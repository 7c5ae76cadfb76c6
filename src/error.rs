//! Fatal error types with fix suggestions
//!
//! Only failures that stop a run live here. Content problems found in a
//! well-formed document are [`Finding`](crate::findings::Finding)s instead.

use std::path::PathBuf;

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON syntax error at line {line}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("JSON nested deeper than {limit} levels at line {line}")]
    TooDeep { line: usize, limit: usize },
}

impl FlowError {
    /// Build a syntax error from a serde_json parse failure.
    ///
    /// serde_json appends " at line X column Y" to its messages; the position
    /// is kept in the structured fields instead.
    pub fn from_parse(err: &serde_json::Error) -> Self {
        let full = err.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };

        FlowError::Syntax {
            line: err.line(),
            column: err.column(),
            message,
        }
    }

    /// Line number for parse failures (1-based)
    pub fn line(&self) -> Option<usize> {
        match self {
            FlowError::Syntax { line, .. } | FlowError::TooDeep { line, .. } => Some(*line),
            FlowError::Read { .. } => None,
        }
    }
}

impl FixSuggestion for FlowError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            FlowError::Read { .. } => Some("Check file path, permissions and UTF-8 encoding"),
            FlowError::Syntax { .. } => {
                Some("Check for trailing commas, unquoted keys and unbalanced brackets")
            }
            FlowError::TooDeep { .. } => {
                Some("Flatten the nested arrays or objects")
            }
        }
    }
}
