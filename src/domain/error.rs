//! Error types for the Postboard plugin.
//!
//! [`PostboardError`] is the single error type of the crate and [`Result`] the
//! matching alias. Expected conditions of the widget (a post id that resolves
//! to nothing, a filter with no matches, a missing anchor target) are not
//! errors and never surface here.

use thiserror::Error;

/// The main error type for Postboard operations.
///
/// # Examples
///
/// ```
/// use postboard::PostboardError;
///
/// let err = PostboardError::Catalog("duplicate post id 1".to_string());
/// assert_eq!(err.to_string(), "Catalog error: duplicate post id 1");
/// ```
#[derive(Debug, Error)]
pub enum PostboardError {
    /// The post catalog violates an invariant (duplicate or zero id,
    /// empty required field).
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A TOML document (catalog or theme) could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Theme loading failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for Postboard operations.
pub type Result<T> = std::result::Result<T, PostboardError>;
