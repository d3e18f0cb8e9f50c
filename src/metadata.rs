//! Metadata Service client.
//!
//! The Metadata Service lets a device manage its *own* subscriber over the
//! cellular connection. The server identifies the caller by source IP, so
//! no credential headers are attached and no IMSI appears in paths.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use url::Url;

use crate::client::SoracomClient;
use crate::error::{ApiError, Result, SoracomError};
use crate::models::{Subscriber, Tag};
use crate::timestamp::TimestampMilli;

/// Default base URL of the Metadata Service, reachable only from a SORACOM
/// Air connection.
pub const DEFAULT_METADATA_ENDPOINT: &str = "http://metadata.soracom.io";

/// Client for the Metadata Service.
///
/// # Example
///
/// ```no_run
/// use soracom::MetadataClient;
///
/// # async fn example() -> soracom::Result<()> {
/// let client = MetadataClient::new(soracom::DEFAULT_METADATA_ENDPOINT)?;
/// let me = client.subscriber().await?;
/// println!("speed class: {}", me.speed_class);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MetadataClient {
    http: Client,
    base_url: Arc<Url>,
}

impl std::fmt::Debug for MetadataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[derive(Debug, serde::Serialize)]
struct UpdateSpeedClassRequest<'a> {
    #[serde(rename = "speedClass")]
    speed_class: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct SetExpiryTimeRequest {
    #[serde(rename = "expiryTime")]
    expiry_time: String,
}

#[derive(Debug, serde::Serialize)]
struct SetGroupRequest<'a> {
    #[serde(rename = "groupId")]
    group_id: &'a str,
}

impl MetadataClient {
    /// Create a client against the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(SoracomError::Transport)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
        })
    }

    /// The base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Metadata for the calling subscriber.
    #[tracing::instrument(skip(self))]
    pub async fn subscriber(&self) -> Result<Subscriber> {
        let response = self.dispatch(Method::GET, "v1/subscriber", None).await?;
        SoracomClient::read_json(response).await
    }

    /// Change the calling subscriber's speed class.
    #[tracing::instrument(skip(self))]
    pub async fn update_speed_class(&self, speed_class: &str) -> Result<Subscriber> {
        let body = serde_json::to_string(&UpdateSpeedClassRequest { speed_class })?;
        let response = self
            .dispatch(Method::POST, "v1/subscriber/update_speed_class", Some(body))
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Allow the calling subscriber to be terminated.
    #[tracing::instrument(skip(self))]
    pub async fn enable_termination(&self) -> Result<Subscriber> {
        self.lifecycle("enable_termination").await
    }

    /// Protect the calling subscriber from termination.
    #[tracing::instrument(skip(self))]
    pub async fn disable_termination(&self) -> Result<Subscriber> {
        self.lifecycle("disable_termination").await
    }

    /// Set the calling subscriber's expiry time.
    #[tracing::instrument(skip(self))]
    pub async fn set_expiry_time(&self, expiry_time: TimestampMilli) -> Result<Subscriber> {
        let body = serde_json::to_string(&SetExpiryTimeRequest {
            expiry_time: expiry_time.unix_millis().to_string(),
        })?;
        let response = self
            .dispatch(Method::POST, "v1/subscriber/set_expiry_time", Some(body))
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Clear the calling subscriber's expiry time.
    #[tracing::instrument(skip(self))]
    pub async fn unset_expiry_time(&self) -> Result<Subscriber> {
        self.lifecycle("unset_expiry_time").await
    }

    /// Move the calling subscriber into a group.
    #[tracing::instrument(skip(self))]
    pub async fn set_group(&self, group_id: &str) -> Result<Subscriber> {
        let body = serde_json::to_string(&SetGroupRequest { group_id })?;
        let response = self
            .dispatch(Method::POST, "v1/subscriber/set_group", Some(body))
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Remove the calling subscriber from its group.
    #[tracing::instrument(skip(self))]
    pub async fn unset_group(&self) -> Result<Subscriber> {
        self.lifecycle("unset_group").await
    }

    /// Put (create or replace) tags on the calling subscriber.
    #[tracing::instrument(skip(self, tags))]
    pub async fn put_tags(&self, tags: &[Tag]) -> Result<Subscriber> {
        let body = serde_json::to_string(tags)?;
        let response = self
            .dispatch(Method::PUT, "v1/subscriber/tags", Some(body))
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Delete one tag by name from the calling subscriber.
    #[tracing::instrument(skip(self))]
    pub async fn delete_tag(&self, tag_name: &str) -> Result<()> {
        let encoded = urlencoding::encode(tag_name);
        let response = self
            .dispatch(Method::DELETE, &format!("v1/subscriber/tags/{encoded}"), None)
            .await?;
        SoracomClient::drain(response).await
    }

    /// Userdata configured for the calling subscriber's group, verbatim.
    #[tracing::instrument(skip(self))]
    pub async fn userdata(&self) -> Result<String> {
        let response = self.dispatch(Method::GET, "v1/userdata", None).await?;
        SoracomClient::read_text(response).await
    }

    async fn lifecycle(&self, verb: &str) -> Result<Subscriber> {
        let body = serde_json::to_string(&serde_json::json!({}))?;
        let response = self
            .dispatch(Method::POST, &format!("v1/subscriber/{verb}"), Some(body))
            .await?;
        SoracomClient::read_json(response).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await.map_err(SoracomError::Transport)?;
        if response.status().as_u16() < 400 {
            return Ok(response);
        }
        Err(SoracomError::Api(ApiError::from_response(response).await))
    }
}
