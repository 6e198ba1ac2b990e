use planner_core::error::CoreError;
use planner_core::types::DbId;

/// Errors from the event API transport and the event cache.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status other than 404.
    #[error("Event API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The server has no event with this id.
    #[error("Event {id} not found")]
    NotFound { id: DbId },

    /// The input was rejected locally before any request was sent.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The configured base URL cannot be used.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// A subscriber fell behind and missed this many snapshots.
    #[error("Subscriber lagged behind by {0} snapshots")]
    Lagged(u64),

    /// The cache was dropped; no more snapshots will arrive.
    #[error("Event cache closed")]
    Closed,
}
