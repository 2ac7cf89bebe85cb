//! HTTP implementation of [`TagService`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde::Serialize;
use tags::{
    AccessToken, ApiError, ApiResponse, ResourceAssociation, ResponseMeta, Tag, TagService,
    TagServiceConnector,
};
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::wire::{self, OptionalTagRoot, TagNameRequest, TagResourcesRequest, TagRoot, TagsRoot};

const TAGS_BASE_PATH: [&str; 2] = ["v2", "tags"];
const RESOURCES_SEGMENT: &str = "resources";

// ---------------------------------------------------------------------------
// Connector
// ---------------------------------------------------------------------------

/// Hands out one [`DigitalOceanClient`] per caller token.
///
/// All clients built by one connector share its connection pool.
#[derive(Debug, Clone)]
pub struct DigitalOceanConnector {
    http: reqwest::Client,
    config: ClientConfig,
}

impl DigitalOceanConnector {
    /// Builds the shared HTTP client from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| ApiError::Network {
                message: format!("failed to build HTTP client: {err}"),
            })?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a facade that authenticates every request with `token`.
    pub fn client(&self, token: &AccessToken) -> Result<DigitalOceanClient, ApiError> {
        DigitalOceanClient::with_http(self.http.clone(), &self.config, token)
    }
}

impl TagServiceConnector for DigitalOceanConnector {
    fn connect(&self, token: &AccessToken) -> Result<Box<dyn TagService>, ApiError> {
        Ok(Box::new(self.client(token)?))
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Typed client for the `v2/tags` endpoints, bound to one bearer token.
#[derive(Debug, Clone)]
pub struct DigitalOceanClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    authorization: HeaderValue,
}

impl DigitalOceanClient {
    /// Builds a standalone client with its own connection pool.
    pub fn new(config: &ClientConfig, token: &AccessToken) -> Result<Self, ApiError> {
        DigitalOceanConnector::new(config.clone())?.client(token)
    }

    fn with_http(
        http: reqwest::Client,
        config: &ClientConfig,
        token: &AccessToken,
    ) -> Result<Self, ApiError> {
        let mut authorization = HeaderValue::try_from(format!("Bearer {}", token.expose()))
            .map_err(|_| ApiError::argument("access token", "contains invalid header characters"))?;
        authorization.set_sensitive(true);

        if config.base_url.cannot_be_a_base() {
            return Err(ApiError::argument("base URL", "cannot be a base URL"));
        }

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            authorization,
        })
    }

    /// `<base>/v2/tags` followed by `segments`, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(TAGS_BASE_PATH)
                .extend(segments);
        }
        url
    }

    /// Sends one request and returns the metadata and body of a 2xx response.
    async fn send<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<(ResponseMeta, Vec<u8>), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let started = Instant::now();
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(AUTHORIZATION, self.authorization.clone())
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| self.transport_error(err))?;
        let status = response.status();
        let meta = wire::response_meta(status, response.headers());
        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.transport_error(err))?;

        debug!(
            method = %method,
            path = url.path(),
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "provider request completed"
        );

        if !status.is_success() {
            return Err(wire::http_error(&method, &url, status, &bytes));
        }
        Ok((meta, bytes.to_vec()))
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                after: self.timeout,
            }
        } else {
            ApiError::Network {
                message: err.to_string(),
            }
        }
    }

    /// Add and remove share a payload; only the verb differs.
    async fn change_resources(
        &self,
        method: Method,
        association: &ResourceAssociation,
    ) -> Result<ApiResponse<Option<Tag>>, ApiError> {
        let url = self.endpoint(&[association.tag.as_str(), RESOURCES_SEGMENT]);
        let payload = TagResourcesRequest::from(association);
        let (meta, body) = self.send(method, url, Some(&payload)).await?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiResponse::new(None, meta));
        }
        // The provider documents an empty body here; anything else is informational.
        let root = wire::decode::<OptionalTagRoot>(&body).unwrap_or_else(|err| {
            debug!(error = %err, "ignoring undecodable resources response body");
            OptionalTagRoot::default()
        });
        Ok(ApiResponse::new(root.tag, meta))
    }
}

#[async_trait]
impl TagService for DigitalOceanClient {
    async fn create(&self, name: &str) -> Result<ApiResponse<Tag>, ApiError> {
        if name.is_empty() {
            return Err(ApiError::argument("name", "cannot be empty"));
        }

        let url = self.endpoint(&[]);
        let (meta, body) = self
            .send(Method::POST, url, Some(&TagNameRequest { name }))
            .await?;
        let root: TagRoot = wire::decode(&body)?;
        Ok(ApiResponse::new(root.tag, meta))
    }

    async fn list(&self) -> Result<ApiResponse<Vec<Tag>>, ApiError> {
        let url = self.endpoint(&[]);
        let (meta, body) = self.send::<()>(Method::GET, url, None).await?;
        let root: TagsRoot = wire::decode(&body)?;
        Ok(ApiResponse::new(root.tags, meta))
    }

    async fn get(&self, name: &str) -> Result<ApiResponse<Tag>, ApiError> {
        let url = self.endpoint(&[name]);
        let (meta, body) = self.send::<()>(Method::GET, url, None).await?;
        let root: TagRoot = wire::decode(&body)?;
        Ok(ApiResponse::new(root.tag, meta))
    }

    async fn rename(&self, old_name: &str, new_name: &str) -> Result<ApiResponse<Tag>, ApiError> {
        let url = self.endpoint(&[old_name]);
        let (meta, body) = self
            .send(Method::PUT, url, Some(&TagNameRequest { name: new_name }))
            .await?;
        let root: TagRoot = wire::decode(&body)?;
        Ok(ApiResponse::new(root.tag, meta))
    }

    async fn add(
        &self,
        association: &ResourceAssociation,
    ) -> Result<ApiResponse<Option<Tag>>, ApiError> {
        self.change_resources(Method::POST, association).await
    }

    async fn remove(
        &self,
        association: &ResourceAssociation,
    ) -> Result<ApiResponse<Option<Tag>>, ApiError> {
        self.change_resources(Method::DELETE, association).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> DigitalOceanClient {
        let config = ClientConfig::new(Url::parse(base).unwrap());
        DigitalOceanClient::new(&config, &AccessToken::new("token")).unwrap()
    }

    #[test]
    fn endpoint_appends_tags_path_to_root() {
        let client = client("https://api.digitalocean.com/");
        assert_eq!(
            client.endpoint(&[]).as_str(),
            "https://api.digitalocean.com/v2/tags"
        );
        assert_eq!(
            client.endpoint(&["prod", RESOURCES_SEGMENT]).as_str(),
            "https://api.digitalocean.com/v2/tags/prod/resources"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = client("http://127.0.0.1:8080/proxy/");
        assert_eq!(
            client.endpoint(&["web"]).as_str(),
            "http://127.0.0.1:8080/proxy/v2/tags/web"
        );
    }

    #[test]
    fn endpoint_percent_encodes_tag_names() {
        let client = client("https://api.digitalocean.com/");
        assert_eq!(
            client.endpoint(&["a b/c?"]).as_str(),
            "https://api.digitalocean.com/v2/tags/a%20b%2Fc%3F"
        );
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let config = ClientConfig::new(Url::parse("https://api.digitalocean.com/").unwrap());
        let err = DigitalOceanClient::new(&config, &AccessToken::new("bad\ntoken")).unwrap_err();
        assert!(matches!(err, ApiError::Argument { .. }));
    }

    #[test]
    fn authorization_header_is_sensitive() {
        let client = client("https://api.digitalocean.com/");
        assert!(client.authorization.is_sensitive());
        assert!(!format!("{client:?}").contains("Bearer token"));
    }

    #[tokio::test]
    async fn empty_create_name_is_rejected_before_any_request() {
        // Port 9 (discard) is never contacted: validation fails first.
        let client = client("http://127.0.0.1:9/");
        let err = client.create("").await.unwrap_err();
        assert_eq!(err, ApiError::argument("name", "cannot be empty"));
    }
}
