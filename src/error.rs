//! Error types for iosparse.
//!
//! Parsing has exactly one fatal failure mode: input that cannot be treated as
//! configuration text at all. Everything else a running-config can contain is
//! reported as a [`ParseWarning`](crate::warning::ParseWarning) next to a
//! still-usable device model.

use thiserror::Error;

/// Result type alias for parse operations.
pub type Result<T> = std::result::Result<T, InputError>;

/// Fatal input errors. No partial device is produced when one of these occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Byte input is not valid UTF-8.
    #[error("input is not valid UTF-8 text (valid up to byte {valid_up_to})")]
    NotUtf8 {
        /// Length of the longest valid UTF-8 prefix
        valid_up_to: usize,
    },

    /// A line contains bytes that never appear in configuration text.
    #[error("line {line} contains binary data (byte 0x{byte:02x})")]
    BinaryContent {
        /// Line number (1-indexed)
        line: usize,
        /// Offending byte value
        byte: u8,
    },
}

impl InputError {
    /// Line number the error refers to, when it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            InputError::NotUtf8 { .. } => None,
            InputError::BinaryContent { line, .. } => Some(*line),
        }
    }
}

impl From<std::str::Utf8Error> for InputError {
    fn from(err: std::str::Utf8Error) -> Self {
        InputError::NotUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}
