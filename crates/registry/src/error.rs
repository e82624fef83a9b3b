//! Registry error types.

use thiserror::Error;

/// Errors raised while building capability paths.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A capability path must name at least one capability.
    #[error("capability path must contain at least one name")]
    EmptyPath,

    /// A capability name was empty or only whitespace.
    #[error("capability name must not be blank")]
    EmptyName,
}

pub type Result<T> = std::result::Result<T, Error>;
