//! Error types for pyast-json
//!
//! Only input problems are errors. A node kind without a dedicated converter
//! is not an error; it degrades to the fallback conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, parsing or encoding a Python source file
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SyntaxError: {message} (line {line}, column {column})")]
    Syntax {
        /// 1-based line of the offending token
        line: usize,
        /// 1-based column (UTF-8 bytes) of the offending token
        column: usize,
        message: String,
    },

    #[error("failed to load the Python grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            column,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
