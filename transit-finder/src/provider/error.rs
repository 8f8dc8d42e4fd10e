//! Provider error types.

/// Errors from a geodata provider.
///
/// "Nothing found" is not an error: lookups return `Ok(None)` or an empty
/// list for that.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized: check AMAP_KEY")]
    Unauthorized,

    /// Rate limited or daily quota exhausted
    #[error("rate limited by provider")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Provider not configured or not available
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Whether the provider itself cannot be reached or used.
    ///
    /// These surface to users as a blocking notice. Every other error is
    /// treated as a failed individual lookup.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ProviderError::Http(_)
                | ProviderError::Unauthorized
                | ProviderError::RateLimited
                | ProviderError::NotConfigured(_)
        )
    }
}
