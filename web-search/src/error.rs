use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP/transport errors when calling the provider.
    #[error("search transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status.
    #[error("search provider {provider} returned HTTP {status}: {snippet}")]
    Status {
        provider: &'static str,
        status: StatusCode,
        snippet: String,
    },

    /// Response body did not have the expected shape.
    #[error("failed to decode {provider} response: {reason}")]
    Decode {
        provider: &'static str,
        reason: String,
    },

    /// Invalid or incomplete configuration.
    #[error("search config error: {0}")]
    Config(String),
}
