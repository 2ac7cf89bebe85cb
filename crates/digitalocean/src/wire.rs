//! JSON envelopes and header parsing for the tags endpoints.

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tags::{ApiError, DropletId, RateLimit, ResourceAssociation, ResourceType, ResponseMeta, Tag};
use url::Url;

const HEADER_RATE_LIMIT: &str = "ratelimit-limit";
const HEADER_RATE_REMAINING: &str = "ratelimit-remaining";
const HEADER_RATE_RESET: &str = "ratelimit-reset";
const HEADER_REQUEST_ID: &str = "x-request-id";

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of both create (`POST tags`) and rename (`PUT tags/{name}`).
#[derive(Debug, Serialize)]
pub(crate) struct TagNameRequest<'a> {
    pub name: &'a str,
}

/// Body of add/remove (`POST`/`DELETE tags/{name}/resources`).
#[derive(Debug, Serialize)]
pub(crate) struct TagResourcesRequest {
    pub resources: Vec<ResourceRef>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResourceRef {
    pub resource_id: DropletId,
    pub resource_type: ResourceType,
}

impl From<&ResourceAssociation> for TagResourcesRequest {
    fn from(association: &ResourceAssociation) -> Self {
        Self {
            resources: vec![ResourceRef {
                resource_id: association.droplet,
                resource_type: association.resource_type(),
            }],
        }
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct TagRoot {
    pub tag: Tag,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagsRoot {
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OptionalTagRoot {
    #[serde(default)]
    pub tag: Option<Tag>,
}

/// The provider's error body: `{"id": "not_found", "message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: String,
    #[serde(default)]
    request_id: Option<String>,
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| ApiError::Decode {
        message: err.to_string(),
    })
}

/// Builds the error for a non-2xx response.
pub(crate) fn http_error(method: &Method, url: &Url, status: StatusCode, body: &[u8]) -> ApiError {
    let (message, request_id) = match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.message, envelope.request_id),
        Err(_) => (String::from_utf8_lossy(body).trim().to_string(), None),
    };
    ApiError::Http {
        method: method.to_string(),
        url: url.to_string(),
        status: status.as_u16(),
        message,
        request_id,
    }
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

pub(crate) fn response_meta(status: StatusCode, headers: &HeaderMap) -> ResponseMeta {
    ResponseMeta {
        status: status.as_u16(),
        request_id: header_str(headers, HEADER_REQUEST_ID).map(str::to_string),
        rate: rate_limit(headers),
    }
}

fn rate_limit(headers: &HeaderMap) -> Option<RateLimit> {
    Some(RateLimit {
        limit: header_u64(headers, HEADER_RATE_LIMIT)?,
        remaining: header_u64(headers, HEADER_RATE_REMAINING)?,
        reset: header_u64(headers, HEADER_RATE_RESET)?,
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok()
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    header_str(headers, name)?.trim().parse().ok()
}
