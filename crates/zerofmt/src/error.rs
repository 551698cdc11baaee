//! Error types for the formatting crate.
//!
//! These cover caller-configuration mistakes only: bad slice ranges, bad
//! integer bases, malformed map definitions. Malformed *template* text is
//! never an error: the engine absorbs it through its revert rules and emits
//! it literally.

use thiserror::Error;

/// Errors raised synchronously at the call that introduced them.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A string-range argument falls outside its source string, or does not
    /// land on character boundaries.
    #[error("range {start}+{len} out of bounds for string of length {bounds}")]
    OutOfRange {
        start: usize,
        len: usize,
        bounds: usize,
    },

    /// Integer base outside the supported 2..=36 range.
    #[error("unsupported integer base {0}, expected 2..=36")]
    UnsupportedBase(u32),

    /// Malformed color or alias map definition.
    #[error("invalid map definition: {0}")]
    Config(String),
}

/// Result type for fallible zerofmt operations.
pub type Result<T> = std::result::Result<T, FormatError>;
