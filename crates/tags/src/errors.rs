//! Error taxonomy for tag operations against the provider.
//!
//! [`ApiError`] covers both local argument validation performed by a
//! [`crate::TagService`] implementation and every way the HTTP round trip can
//! fail. No variant is retried; callers receive the first failure unchanged.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by a [`crate::TagService`] operation.
///
/// [`ApiError::Argument`] is raised before any request is sent. Every other
/// variant is a transport failure (see [`ApiError::is_transport`]).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// An argument failed semantic validation (e.g. an empty tag name).
    #[error("{argument} is invalid because {reason}")]
    Argument {
        /// Name of the offending argument.
        argument: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The provider answered with a non-2xx status.
    ///
    /// `message` is the provider's error message when the body carried its
    /// error envelope, otherwise the raw body text.
    #[error("{method} {url}: {status} {message}")]
    Http {
        method: String,
        url: String,
        status: u16,
        message: String,
        /// Provider-side request id, when reported.
        request_id: Option<String>,
    },

    /// The request could not be sent or the response could not be read.
    #[error("Network error: {message}")]
    Network { message: String },

    /// No response arrived within the configured per-call deadline.
    #[error("Request timed out after {after:?}")]
    Timeout { after: Duration },

    /// A 2xx response body did not match the expected JSON envelope.
    #[error("Failed to decode response: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Convenience constructor for [`ApiError::Argument`].
    pub fn argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Argument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for network, HTTP status, timeout, and decode failures.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Argument { .. })
    }

    /// HTTP status of a non-2xx response, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_error_message_names_argument_and_reason() {
        let err = ApiError::argument("name", "cannot be empty");
        assert_eq!(err.to_string(), "name is invalid because cannot be empty");
        assert!(!err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn http_error_message_includes_request_line_and_status() {
        let err = ApiError::Http {
            method: "GET".into(),
            url: "https://api.digitalocean.com/v2/tags/missing".into(),
            status: 404,
            message: "The resource you were accessing could not be found.".into(),
            request_id: None,
        };
        assert_eq!(
            err.to_string(),
            "GET https://api.digitalocean.com/v2/tags/missing: 404 The resource you were accessing could not be found."
        );
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn timeout_is_a_transport_error() {
        let err = ApiError::Timeout {
            after: Duration::from_secs(10),
        };
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "Request timed out after 10s");
    }
}
