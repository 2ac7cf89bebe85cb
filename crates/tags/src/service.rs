//! The `TagService` port and its response envelope.
//!
//! One method per tag action. Implementations translate each call into a
//! single provider request; they hold no state between calls beyond their
//! credentials and connection pool.

use async_trait::async_trait;

use crate::{AccessToken, ApiError, ResourceAssociation, Tag};

/// Provider rate-limit window as reported alongside a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests permitted per window.
    pub limit: u64,
    /// Requests left in the current window.
    pub remaining: u64,
    /// Unix time (seconds) at which the window resets.
    pub reset: u64,
}

/// Transport-level facts about a successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMeta {
    /// HTTP status code (always 2xx on the success path).
    pub status: u16,
    /// Provider-side request id, if the response carried one.
    pub request_id: Option<String>,
    /// `None` when the rate-limit headers are absent or malformed.
    pub rate: Option<RateLimit>,
}

/// A decoded entity paired with the response it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub value: T,
    pub meta: ResponseMeta,
}

impl<T> ApiResponse<T> {
    pub fn new(value: T, meta: ResponseMeta) -> Self {
        Self { value, meta }
    }

    /// Discards the response metadata.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Tag operations against the provider.
///
/// Every method issues exactly one request except where an argument is
/// rejected locally, in which case none is issued. Failures are never retried.
#[async_trait]
pub trait TagService: Send + Sync {
    /// Creates a tag. Fails with [`ApiError::Argument`] if `name` is empty.
    async fn create(&self, name: &str) -> Result<ApiResponse<Tag>, ApiError>;

    /// Lists all tags in provider order.
    async fn list(&self) -> Result<ApiResponse<Vec<Tag>>, ApiError>;

    /// Fetches one tag. A missing tag surfaces as [`ApiError::Http`] (404).
    async fn get(&self, name: &str) -> Result<ApiResponse<Tag>, ApiError>;

    /// Renames `old_name` to `new_name` and returns the renamed tag.
    async fn rename(&self, old_name: &str, new_name: &str) -> Result<ApiResponse<Tag>, ApiError>;

    /// Applies a tag to a droplet.
    ///
    /// The provider usually answers with an empty body, in which case the
    /// value is `None`.
    async fn add(
        &self,
        association: &ResourceAssociation,
    ) -> Result<ApiResponse<Option<Tag>>, ApiError>;

    /// Removes a tag from a droplet. Same response shape as [`TagService::add`].
    async fn remove(
        &self,
        association: &ResourceAssociation,
    ) -> Result<ApiResponse<Option<Tag>>, ApiError>;
}

/// Builds a [`TagService`] bound to one caller's credentials.
///
/// The transport adapter asks for a fresh service on every call, so no
/// credential outlives the call that supplied it.
pub trait TagServiceConnector: Send + Sync {
    fn connect(&self, token: &AccessToken) -> Result<Box<dyn TagService>, ApiError>;
}
