use thiserror::Error;

/// Errors that can occur when fetching from the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP 429 - the upstream is throttling us.
    #[error("upstream rate limit hit (HTTP 429)")]
    RateLimited,

    /// 5xx-class server error.
    #[error("upstream server error (HTTP {status})")]
    Server { status: u16 },

    /// 4xx-class client error other than 429. Not a capacity problem, so it
    /// neither retries nor triggers panic mode.
    #[error("upstream rejected the request (HTTP {status})")]
    Client { status: u16 },

    /// Network or connection failure below the HTTP layer.
    #[error("network error: {message}")]
    Network { message: String },

    /// Response body did not parse as the expected envelope.
    #[error("failed to decode upstream response: {message}")]
    Decode { message: String },
}

impl UpstreamError {
    /// Whether this failure class is worth retrying and, if retries are
    /// exhausted, worth a panic-mode cooldown.
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::Server { .. } | Self::Network { .. }
        )
    }
}

/// Result type for upstream operations.
pub type Result<T> = std::result::Result<T, UpstreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification_follows_status_class() {
        assert!(UpstreamError::RateLimited.is_transient());
        assert!(UpstreamError::Server { status: 503 }.is_transient());
        assert!(
            UpstreamError::Network {
                message: "reset".to_string()
            }
            .is_transient()
        );

        assert!(!UpstreamError::Client { status: 404 }.is_transient());
        assert!(
            !UpstreamError::Decode {
                message: "eof".to_string()
            }
            .is_transient()
        );
    }
}
