//! Error types for data parsing in carnet-types.

use thiserror::Error;

/// Errors that can occur when parsing logbook data.
///
/// This error type is storage-agnostic; file and CSV errors belong in
/// carnet-store.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A date string did not match the `YYYY-MM-DD` calendar format.
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Result type alias using carnet-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
