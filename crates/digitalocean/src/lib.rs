//! DigitalOcean tags API facade.
//!
//! Implements the [`tags::TagService`] port against the provider's `v2/tags`
//! REST endpoints. Each operation builds one request, attaches the caller's
//! bearer token, sends it, and decodes the JSON envelope into a typed
//! [`tags::Tag`] alongside the response status and rate-limit headers.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL construction, HTTP transport, the request
//! timeout, and JSON envelopes all live here. The `plugin` crate sees only
//! [`tags::TagService`] and [`tags::TagServiceConnector`].
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | create | `POST v2/tags` with `{"name": ...}` |
//! | list | `GET v2/tags` |
//! | get | `GET v2/tags/{name}` |
//! | rename | `PUT v2/tags/{name}` with `{"name": ...}` |
//! | add | `POST v2/tags/{name}/resources` |
//! | remove | `DELETE v2/tags/{name}/resources` |
//!
//! There is no retry, pagination, or back-off: the first non-2xx status,
//! network failure, timeout, or decode failure is returned to the caller.

pub mod client;
pub mod config;
mod wire;

pub use client::{DigitalOceanClient, DigitalOceanConnector};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
