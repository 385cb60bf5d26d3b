use thiserror::Error;

/// Errors returned by the Google API clients.
///
/// Request URLs are never included in messages because Places requests
/// carry the API key as a query parameter.
#[derive(Debug, Error)]
pub enum GoogleError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered 2xx but reported a non-OK `status` in the envelope.
    #[error("{endpoint} returned status {status}: {message}")]
    Api {
        endpoint: String,
        status: String,
        message: String,
    },

    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl GoogleError {
    /// Strip the request URL (and with it any `key=` parameter) from
    /// transport errors before they are logged.
    pub(crate) fn http(err: reqwest::Error) -> Self {
        GoogleError::Http(err.without_url())
    }
}
