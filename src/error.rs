//! Error types for codec, table and engine operations
//!
//! Two recoverable classes: a value left the representable range of its
//! width (caller data problem), or the requested width/iteration setup is
//! unusable (deployment problem). Nothing here is ever clamped or wrapped
//! silently.

use thiserror::Error;

/// Errors reported by fixed-point conversion, table construction and the
/// vectoring engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CordicError {
    /// A fixed-point code fell outside the representable range of its width.
    #[error("value {value} outside {bits}-bit range [{min}, {max}]")]
    Range {
        value: i64,
        bits: u32,
        min: i64,
        max: i64,
    },

    /// Width or iteration setup cannot produce a usable data path.
    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

impl CordicError {
    /// Range error for `value` against the signed range of `bits`.
    pub fn range(value: i64, bits: u32) -> Self {
        let min = -(1i64 << (bits - 1));
        let max = (1i64 << (bits - 1)) - 1;
        Self::Range {
            value,
            bits,
            min,
            max,
        }
    }

    /// Configuration error with a human-readable reason.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
