//! Tag domain for the doit tag provider plugin.
//!
//! This crate contains the tag entity types, identifiers, the error taxonomy,
//! and the [`TagService`] port. The HTTP facade in the `digitalocean` crate
//! implements the port; the `plugin` crate consumes it.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no I/O dependencies.
//! It defines *what* a tag operation is; infrastructure crates define *how*
//! it reaches the provider.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | `DropletId`, `CallId`, `AccessToken` |
//! | [`types`] | `Tag`, `TagResources`, `DropletResourceCount`, `ResourceAssociation` |
//! | [`errors`] | `ApiError` |
//! | [`service`] | `TagService`, `TagServiceConnector`, `ApiResponse` |

pub mod errors;
pub mod identifiers;
pub mod service;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::ApiError;
pub use identifiers::{AccessToken, CallId, DropletId};
pub use service::{ApiResponse, RateLimit, ResponseMeta, TagService, TagServiceConnector};
pub use types::{
    DropletResourceCount, DropletSnapshot, ResourceAssociation, ResourceType, Tag, TagResources,
    Timestamp,
};
