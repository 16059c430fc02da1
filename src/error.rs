//! Error types for bar-viz operations.
//!
//! Every error is a caller-contract violation reported synchronously from
//! `draw`/`update` or from the option/series boundary; nothing is retried.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bar-viz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A record data point without a numeric `value` field.
    #[error("malformed data point at index {index}: {reason}")]
    MalformedDataPoint {
        /// Flattened position of the offending point.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Series shape differs from what the operation requires.
    #[error("shape mismatch in {context}: expected {expected} elements, found {actual}")]
    ShapeMismatch {
        /// Where the mismatch was detected.
        context: &'static str,
        /// Expected element count.
        expected: usize,
        /// Actual element count.
        actual: usize,
    },

    /// The value range produces a non-finite or non-positive pixel scale.
    #[error("degenerate y-scale: value range [{min}, {max}] cannot be mapped to pixels")]
    DegenerateScale {
        /// Upper bound of the value range.
        max: f64,
        /// Lower bound of the value range.
        min: f64,
    },

    /// Option document could not be parsed.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// Option file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Series document could not be parsed.
    #[error("series parse error: {0}")]
    SeriesParse(String),

    /// A surface was handed a handle it does not hold.
    #[error("unknown shape handle {0}")]
    UnknownShape(usize),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// I/O error (file output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = Error::ShapeMismatch { context: "update", expected: 3, actual: 4 };
        let msg = err.to_string();
        assert!(msg.contains("update"));
        assert!(msg.contains('3'));
        assert!(msg.contains('4'));
    }

    #[test]
    fn test_degenerate_scale_display() {
        let err = Error::DegenerateScale { max: 0.0, min: 0.0 };
        assert!(err.to_string().contains("degenerate"));
    }

    #[test]
    fn test_io_from() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
