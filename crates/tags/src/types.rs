//! Tag entity types.
//!
//! Every value here is decoded fresh from a provider response and owned by the
//! single call that fetched it. Nothing is cached; a rename or resource change
//! is only observable by fetching again.
//!
//! Fields the provider may omit or send as `null` default to their empty
//! value so that a tag without resources renders with a droplet count of zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::DropletId;

// ---------------------------------------------------------------------------
// Tag
// ---------------------------------------------------------------------------

/// A named label that can be applied to droplets.
///
/// `name` is the sole identity key; uniqueness is enforced by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique tag name.
    pub name: String,

    /// Aggregate metadata about the resources currently carrying this tag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: TagResources,
}

impl Tag {
    /// Number of droplets carrying this tag (zero when the provider omits it).
    pub fn droplet_count(&self) -> u64 {
        self.resources.droplets.count
    }
}

/// Per-resource-kind tagging metadata. Only droplets are tracked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagResources {
    #[serde(default, deserialize_with = "null_as_default")]
    pub droplets: DropletResourceCount,
}

/// How many droplets carry a tag, and which one was tagged most recently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropletResourceCount {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,

    #[serde(default)]
    pub last_tagged: Option<DropletSnapshot>,
}

/// The subset of a droplet's attributes reported alongside a tag.
///
/// The provider embeds a full droplet object here; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropletSnapshot {
    pub id: DropletId,

    #[serde(default)]
    pub name: String,

    /// Lifecycle status (e.g. `"active"`, `"off"`).
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Decodes an explicit `null` the same way as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Resource associations
// ---------------------------------------------------------------------------

/// The kind of resource a tag is applied to.
///
/// Deliberately a single-variant enum: tagging any other resource kind is not
/// supported by this provider plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Droplet,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Droplet => f.write_str("droplet"),
        }
    }
}

/// Pairing of a tag name and a droplet, carried by add/remove requests.
///
/// Has no lifecycle of its own beyond the request it rides in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAssociation {
    pub tag: String,
    pub droplet: DropletId,
}

impl ResourceAssociation {
    pub fn new(tag: impl Into<String>, droplet: DropletId) -> Self {
        Self {
            tag: tag.into(),
            droplet,
        }
    }

    /// Always [`ResourceType::Droplet`].
    pub fn resource_type(&self) -> ResourceType {
        ResourceType::Droplet
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp as reported by the provider (RFC 3339).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tag_without_resources_has_zero_droplets() {
        let tag: Tag = serde_json::from_value(json!({ "name": "prod" })).unwrap();
        assert_eq!(tag.name, "prod");
        assert_eq!(tag.droplet_count(), 0);
        assert!(tag.resources.droplets.last_tagged.is_none());
    }

    #[test]
    fn tag_decodes_last_tagged_droplet_ignoring_extra_fields() {
        let tag: Tag = serde_json::from_value(json!({
            "name": "web",
            "resources": {
                "droplets": {
                    "count": 3,
                    "last_tagged": {
                        "id": 3164444,
                        "name": "example.com",
                        "memory": 512,
                        "status": "active",
                        "created_at": "2016-05-12T19:58:44Z",
                        "networks": { "v4": [] }
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(tag.droplet_count(), 3);
        let last = tag.resources.droplets.last_tagged.unwrap();
        assert_eq!(last.id, DropletId::new(3164444));
        assert_eq!(last.name, "example.com");
        assert_eq!(last.status.as_deref(), Some("active"));
        assert_eq!(
            last.created_at.unwrap().to_string(),
            "2016-05-12T19:58:44+00:00"
        );
    }

    #[test]
    fn null_last_tagged_is_accepted() {
        let tag: Tag = serde_json::from_value(json!({
            "name": "empty",
            "resources": { "droplets": { "count": 0, "last_tagged": null } }
        }))
        .unwrap();
        assert_eq!(tag.droplet_count(), 0);
    }

    #[test]
    fn null_resources_decode_as_zero_droplets() {
        let tag: Tag = serde_json::from_value(json!({ "name": "web", "resources": null })).unwrap();
        assert_eq!(tag.resources, TagResources::default());
        assert_eq!(tag.droplet_count(), 0);
    }

    #[test]
    fn null_droplets_decode_as_zero_droplets() {
        let tag: Tag = serde_json::from_value(json!({
            "name": "web",
            "resources": { "droplets": null }
        }))
        .unwrap();
        assert_eq!(tag.droplet_count(), 0);
        assert!(tag.resources.droplets.last_tagged.is_none());
    }

    #[test]
    fn null_count_decodes_as_zero() {
        let tag: Tag = serde_json::from_value(json!({
            "name": "web",
            "resources": { "droplets": { "count": null } }
        }))
        .unwrap();
        assert_eq!(tag.droplet_count(), 0);
    }

    #[test]
    fn resource_association_is_always_a_droplet() {
        let assoc = ResourceAssociation::new("prod", DropletId::new(42));
        assert_eq!(assoc.resource_type(), ResourceType::Droplet);
        assert_eq!(
            serde_json::to_value(assoc.resource_type()).unwrap(),
            json!("droplet")
        );
    }
}
