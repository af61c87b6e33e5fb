/*!
 * Error types for the tgrename application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while reading or writing TextGrid files
#[derive(Error, Debug)]
pub enum TextGridError {
    /// The file does not start with the `ooTextFile` / `TextGrid` header
    #[error("Not a TextGrid file: {0}")]
    InvalidHeader(String),

    /// A token could not be interpreted where it appeared
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending token
        line: usize,
        /// What was expected
        message: String,
    },

    /// The input ended before the document was complete
    #[error("Unexpected end of file while reading {0}")]
    UnexpectedEof(String),

    /// A tier declared a class other than IntervalTier or TextTier
    #[error("Unknown tier class: {0}")]
    UnknownTierClass(String),

    /// Two tiers share a name and duplicates are not allowed
    #[error("Duplicate tier name: {0}")]
    DuplicateTierName(String),

    /// The file is neither UTF-8 nor BOM-marked UTF-16
    #[error("Unsupported text encoding: {0}")]
    Encoding(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by configuration validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required value is missing or empty
    #[error("Missing configuration value: {0}")]
    Missing(String),

    /// A value is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
