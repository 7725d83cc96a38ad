// ============================================================================
// Client Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection refused, timeout, DNS and the like
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("{detail}")]
    Api { status: u16, detail: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Order service circuit breaker is open")]
    CircuitOpen,
}
