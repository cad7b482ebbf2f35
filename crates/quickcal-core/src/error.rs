//! Page error types.

use thiserror::Error;

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Errors that can occur while activating the overlay on a page.
///
/// Date parsing never produces an error; unparseable input simply yields no
/// value. These errors only cover preconditions of the page itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    /// The page address is not on the activation site.
    #[error("page is outside the activation site: {url}")]
    OutsideSite { url: String },

    /// The document has no insertion point for the overlay yet.
    #[error("document is not ready: missing {element}")]
    NotReady { element: &'static str },
}

impl PageError {
    /// Creates an outside-site error.
    pub fn outside_site(url: impl Into<String>) -> Self {
        Self::OutsideSite { url: url.into() }
    }

    /// Creates a not-ready error for a missing element.
    pub fn not_ready(element: &'static str) -> Self {
        Self::NotReady { element }
    }
}
