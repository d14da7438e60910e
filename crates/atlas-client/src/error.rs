use thiserror::Error;

/// Errors returned by the Atlas service client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status. `detail` carries the
    /// body's `detail` field when the body had one.
    #[error("Atlas service error (HTTP {status}): {}", detail.as_deref().unwrap_or("no detail provided"))]
    Service { status: u16, detail: Option<String> },

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
