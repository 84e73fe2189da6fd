use thiserror::Error;

/// Errors that can occur when reading a category from raw input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Invalid category value: {0} (expected 0 to 7)")]
    OutOfRange(i64),
}
