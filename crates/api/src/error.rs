//! The client-observable error taxonomy.
//!
//! Every failure a request can produce falls into one of four buckets:
//! transport (the server was never reached), validation (the server rejected
//! the request with a human-readable message), server failure (5xx), or a
//! malformed response. Empty result sets are *not* errors; they decode into
//! empty pages or empty lists and are rendered as an explicit empty state.
//!
//! Validation messages come from clinicians' workflows ("BPJS number is
//! required") and are surfaced verbatim; everything else falls back to a
//! generic string.

/// Fallback text shown when the server provides no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "The request could not be completed. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed: connection refused, timeout, TLS
    /// failure, or the response body never arrived.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server understood and rejected the request (4xx, or a 2xx
    /// envelope with `success: false`). Carries the server's message.
    #[error("request rejected by the server: {message}")]
    Validation { status: u16, message: String },
    /// The server failed (5xx).
    #[error("server failure (status {status})")]
    Server { status: u16 },
    /// The response arrived but could not be decoded into the expected
    /// shape, or contradicted the pagination invariants.
    #[error("malformed response from the server: {0}")]
    Malformed(String),
    /// The client was constructed with invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// The text to show the operator.
    ///
    /// Validation failures carry the server's message verbatim; every other
    /// failure maps to [`GENERIC_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation { message, .. } => message,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Whether this is a validation/business-rule rejection.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_surfaced_verbatim() {
        let err = ApiError::Validation {
            status: 422,
            message: "BPJS number is required".to_owned(),
        };
        assert_eq!(err.user_message(), "BPJS number is required");
        assert!(err.is_validation());
    }

    #[test]
    fn server_failures_fall_back_to_the_generic_message() {
        let err = ApiError::Server { status: 500 };
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(!err.is_validation());
    }

    #[test]
    fn malformed_responses_fall_back_to_the_generic_message() {
        let err = ApiError::Malformed("expected an object".to_owned());
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }
}
