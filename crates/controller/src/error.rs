//! Controller error types.

use thiserror::Error;

/// Controller errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A declared API path was empty or contained a blank name.
    ///
    /// Nothing is registered when this is returned.
    #[error("invalid declaration: {0}")]
    Declaration(#[from] registry::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
