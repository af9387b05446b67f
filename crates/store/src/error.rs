//! Data-store error types.

use std::sync::Arc;

use thiserror::Error;

/// Errors from the hosted data-store query surface.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request could not be built or sent, or the body could not be
    /// decoded.
    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Store returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for logging.
        body: String,
    },

    /// Invalid client configuration.
    #[error("Invalid store configuration: {0}")]
    Config(String),

    /// A load shared between concurrent cache readers failed.
    #[error("{0}")]
    Shared(Arc<StoreError>),
}
