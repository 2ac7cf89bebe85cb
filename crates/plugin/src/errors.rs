//! Errors returned to the host for a failed call.

use tags::ApiError;
use thiserror::Error;

/// Why a call produced no output.
///
/// The `Display` form is exactly what the host shows the user, so usage
/// errors render as the bare usage string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PluginError {
    /// Wrong number of positional arguments. Raised before any request.
    #[error("{0}")]
    Usage(&'static str),

    /// An argument could not be converted to the type a method needs (a
    /// non-numeric droplet id, or an arguments bag of the wrong shape).
    /// Raised before any request.
    #[error("{0}")]
    InvalidArgument(String),

    /// Facade failure, passed through unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PluginError {
    pub(crate) fn invalid_droplet_id(raw: &str) -> Self {
        Self::InvalidArgument(format!("invalid droplet id: {raw}"))
    }

    pub(crate) fn invalid_arguments(reason: impl std::fmt::Display) -> Self {
        Self::InvalidArgument(format!("invalid arguments: {reason}"))
    }
}
