//! Error types for the HTTP sink.

use thiserror::Error;

/// Result type alias for HTTP sink operations.
pub type HttpSinkResult<T> = Result<T, HttpSinkError>;

/// Errors raised while applying buffered actions to an HTTP response.
#[derive(Debug, Error)]
pub enum HttpSinkError {
    #[error("invalid header name {name:?}")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: http::header::InvalidHeaderName,
    },

    #[error("invalid value for header {name}")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: http::header::InvalidHeaderValue,
    },

    #[error("invalid status code {status}")]
    InvalidStatus {
        status: u16,
        #[source]
        source: http::status::InvalidStatusCode,
    },

    #[error("invalid cookie {name:?}: {part} not allowed in Set-Cookie")]
    InvalidCookie { name: String, part: &'static str },

    #[error("response already committed, cannot {operation}")]
    Committed { operation: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_names_operation() {
        let err = HttpSinkError::Committed {
            operation: "set_header",
        };
        assert_eq!(err.to_string(), "response already committed, cannot set_header");
    }

    #[test]
    fn invalid_status_keeps_source() {
        let source = http::StatusCode::from_u16(42).unwrap_err();
        let err = HttpSinkError::InvalidStatus {
            status: 42,
            source,
        };
        assert_eq!(err.to_string(), "invalid status code 42");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_cookie_names_offending_part() {
        let err = HttpSinkError::InvalidCookie {
            name: "sid".into(),
            part: "value",
        };
        assert_eq!(
            err.to_string(),
            "invalid cookie \"sid\": value not allowed in Set-Cookie"
        );
    }
}
