//! Device group model and configuration operations.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::SoracomClient;
use crate::error::Result;
use crate::models::{Subscriber, Tag, Tags};
use crate::pagination::Page;
use crate::query::ListFilter;
use crate::timestamp::TimestampMilli;
use crate::traits::{Get, List};

/// A device group.
///
/// Groups carry per-namespace configuration (`SoracomAir`, `SoracomBeam`,
/// ...) applied to every subscriber in the group. Configuration values are
/// namespace-specific, so they stay as raw JSON here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: String,

    #[serde(default)]
    pub operator_id: String,

    #[serde(default)]
    pub configuration: HashMap<String, serde_json::Value>,

    #[serde(default)]
    pub created_time: Option<TimestampMilli>,

    #[serde(default)]
    pub last_modified_time: Option<TimestampMilli>,

    #[serde(default)]
    pub tags: Tags,
}

/// One key/value entry in a group configuration namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    pub key: String,
    pub value: serde_json::Value,
}

impl GroupConfig {
    /// Build a config entry; the value may be any JSON-serializable type.
    ///
    /// # Errors
    ///
    /// Returns an error if the value fails to serialize.
    pub fn new<V: Serialize>(key: impl Into<String>, value: V) -> Result<Self> {
        Ok(Self {
            key: key.into(),
            value: serde_json::to_value(value)?,
        })
    }
}

/// Metadata service settings inside [`AirConfig`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub enabled: bool,
    #[serde(rename = "readonly")]
    pub read_only: bool,
    #[serde(rename = "allowOrigin")]
    pub allow_origin: String,
}

/// Configuration for the `SoracomAir` namespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirConfig {
    #[serde(rename = "useCustomDns")]
    pub use_custom_dns: bool,
    #[serde(rename = "dnsServers")]
    pub dns_servers: Vec<String>,
    pub metadata: MetadataConfig,
    pub userdata: String,
}

/// Configuration for one Beam TCP entry point in the `SoracomBeam`
/// namespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeamTcpConfig {
    pub name: String,
    pub destination: String,
    pub enabled: bool,
    #[serde(rename = "addSubscriberHeader")]
    pub add_subscriber_header: bool,
    #[serde(rename = "addSignature")]
    pub add_signature: bool,
    pub psk: String,
}

#[derive(Debug, Serialize)]
struct CreateGroupRequest<'a> {
    tags: &'a Tags,
}

impl Group {
    /// Create a group with the given tags.
    #[tracing::instrument(skip(client, tags))]
    pub async fn create(client: &SoracomClient, tags: &Tags) -> Result<Self> {
        let response = client.post("v1/groups", &CreateGroupRequest { tags }).await?;
        SoracomClient::read_json(response).await
    }

    /// Create a group with just a `name` tag.
    #[tracing::instrument(skip(client))]
    pub async fn create_with_name(client: &SoracomClient, name: &str) -> Result<Self> {
        let tags = Tags::from([("name".to_string(), name.to_string())]);
        Self::create(client, &tags).await
    }

    /// Delete a group.
    #[tracing::instrument(skip(client))]
    pub async fn delete(client: &SoracomClient, group_id: &str) -> Result<()> {
        let response = client.delete(&format!("v1/groups/{group_id}")).await?;
        SoracomClient::drain(response).await
    }

    /// List subscribers belonging to a group.
    ///
    /// Only `limit` and `last_evaluated_key` apply to this listing.
    #[tracing::instrument(skip(client, filter))]
    pub async fn subscribers(
        client: &SoracomClient,
        group_id: &str,
        filter: &ListFilter,
    ) -> Result<Page<Subscriber>> {
        let response = client
            .get_with_query(&format!("v1/groups/{group_id}/subscribers"), &filter.encode())
            .await?;
        SoracomClient::read_page(response).await
    }

    /// Replace configuration entries in a namespace.
    #[tracing::instrument(skip(client, configs))]
    pub async fn update_configuration(
        client: &SoracomClient,
        group_id: &str,
        namespace: &str,
        configs: &[GroupConfig],
    ) -> Result<Self> {
        let response = client
            .put(&format!("v1/groups/{group_id}/configuration/{namespace}"), configs)
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Update the `SoracomAir` configuration for a group.
    #[tracing::instrument(skip(client, config))]
    pub async fn update_air_config(
        client: &SoracomClient,
        group_id: &str,
        config: &AirConfig,
    ) -> Result<Self> {
        let configs = vec![
            GroupConfig::new("useCustomDns", config.use_custom_dns)?,
            GroupConfig::new("dnsServers", &config.dns_servers)?,
            GroupConfig::new("metadata", &config.metadata)?,
            GroupConfig::new("userdata", &config.userdata)?,
        ];
        Self::update_configuration(client, group_id, "SoracomAir", &configs).await
    }

    /// Update one Beam TCP entry point in the `SoracomBeam` configuration.
    ///
    /// The entry point name is the configuration key; the whole config is
    /// its value.
    #[tracing::instrument(skip(client, config))]
    pub async fn update_beam_tcp_config(
        client: &SoracomClient,
        group_id: &str,
        entry_point: &str,
        config: &BeamTcpConfig,
    ) -> Result<Self> {
        let configs = vec![GroupConfig::new(entry_point, config)?];
        Self::update_configuration(client, group_id, "SoracomBeam", &configs).await
    }

    /// Delete one configuration entry by name.
    ///
    /// Entry names are free-form, so the path segment is percent-encoded.
    #[tracing::instrument(skip(client))]
    pub async fn delete_configuration(
        client: &SoracomClient,
        group_id: &str,
        namespace: &str,
        name: &str,
    ) -> Result<Self> {
        let encoded = urlencoding::encode(name);
        let response = client
            .delete(&format!(
                "v1/groups/{group_id}/configuration/{namespace}/{encoded}"
            ))
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Put (create or replace) tags on the group.
    #[tracing::instrument(skip(client, tags))]
    pub async fn update_tags(
        client: &SoracomClient,
        group_id: &str,
        tags: &[Tag],
    ) -> Result<Self> {
        let response = client
            .put(&format!("v1/groups/{group_id}/tags"), tags)
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Delete one tag by name.
    #[tracing::instrument(skip(client))]
    pub async fn delete_tag(
        client: &SoracomClient,
        group_id: &str,
        tag_name: &str,
    ) -> Result<()> {
        let encoded = urlencoding::encode(tag_name);
        let response = client
            .delete(&format!("v1/groups/{group_id}/tags/{encoded}"))
            .await?;
        SoracomClient::drain(response).await
    }
}

#[async_trait]
impl Get for Group {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &SoracomClient, group_id: String) -> Result<Self> {
        let response = client.get(&format!("v1/groups/{group_id}")).await?;
        SoracomClient::read_json(response).await
    }
}

#[async_trait]
impl List for Group {
    type Filter = ListFilter;

    #[tracing::instrument(skip(client, filter))]
    async fn list_page(client: &SoracomClient, filter: &ListFilter) -> Result<Page<Self>> {
        let response = client.get_with_query("v1/groups", &filter.encode()).await?;
        SoracomClient::read_page(response).await
    }
}
