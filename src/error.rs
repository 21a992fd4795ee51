//! Error types for request URL construction and parsing
//!
//! Every error here is an input problem the caller can correct and retry.

use thiserror::Error;

/// Errors raised while building or reading a proxy request URL
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// The source image URL was empty
    #[error("Image URL is required")]
    MissingImageUrl,

    /// A transformation option could not be turned into its typed form
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    /// A request path did not have the `<options>/<image-url>` shape
    #[error("Invalid request path: {0}")]
    InvalidRequestPath(String),
}

impl UrlError {
    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        UrlError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// True for the only validation the form performs before building a URL
    pub fn is_validation_error(&self) -> bool {
        matches!(self, UrlError::MissingImageUrl)
    }
}
