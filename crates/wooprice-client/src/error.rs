use thiserror::Error;

use wooprice_core::PriceError;

/// Failures talking to the store's REST API.
#[derive(Debug, Error)]
pub enum WooError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-2xx status. `detail` is the service's
    /// own `message` when it sent one, otherwise the start of the body.
    #[error("HTTP {status} from {url}: {detail}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        detail: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid price for {context}: {source}")]
    InvalidPrice {
        context: String,
        #[source]
        source: PriceError,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("pagination limit reached for {url}: exceeded {max_pages} pages")]
    PaginationLimit { url: String, max_pages: u32 },

    #[error("could not sign request: {0}")]
    Signing(String),
}

impl WooError {
    /// `true` when the request did not complete within the configured timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, WooError::Http(e) if e.is_timeout())
    }

    /// HTTP status returned by the store, if the failure carried one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            WooError::UnexpectedStatus { status, .. } => Some(*status),
            WooError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
