//! Subscriber (SIM) model and lifecycle operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::SoracomClient;
use crate::error::Result;
use crate::models::{Tag, Tags};
use crate::pagination::Page;
use crate::query::ListFilter;
use crate::timestamp::TimestampMilli;
use crate::traits::{Get, List};

/// A subscriber (SIM) managed by the operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    /// The IMSI identifying this subscriber.
    pub imsi: String,

    /// Access point name the SIM connects through.
    #[serde(default)]
    pub apn: String,

    #[serde(default)]
    pub msisdn: String,

    /// Owning operator.
    #[serde(default)]
    pub operator_id: String,

    /// Lifecycle status, e.g. `"active"`, `"inactive"`, `"terminated"`.
    #[serde(default)]
    pub status: String,

    /// Current speed class, e.g. `"s1.standard"`.
    #[serde(default)]
    pub speed_class: String,

    #[serde(default)]
    pub plan: i32,

    /// Wire name for this field is capitalized, unlike every other field.
    #[serde(default, rename = "ModuleType")]
    pub module_type: String,

    /// Group this subscriber belongs to, if any.
    #[serde(default)]
    pub group_id: Option<String>,

    #[serde(default)]
    pub ip_address: Option<String>,

    #[serde(default)]
    pub session_status: Option<SessionStatus>,

    #[serde(default)]
    pub created_time: Option<TimestampMilli>,

    #[serde(default)]
    pub last_modified_time: Option<TimestampMilli>,

    /// When the subscriber expires, if an expiry is set.
    #[serde(default)]
    pub expiry_time: Option<TimestampMilli>,

    #[serde(default)]
    pub termination_enabled: bool,

    #[serde(default)]
    pub tags: Tags,
}

/// Session state reported for an online subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    #[serde(default)]
    pub online: bool,

    #[serde(default)]
    pub imei: String,

    #[serde(default)]
    pub dns_servers: Vec<String>,

    #[serde(default, rename = "ueIpAddress")]
    pub ue_ip_address: String,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub last_updated_at: Option<TimestampMilli>,
}

/// Parameters for registering a subscriber.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSubscriberOptions {
    /// Registration secret (PUK) printed on the SIM.
    pub registration_secret: String,

    /// Group to place the subscriber into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    /// Initial tags.
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

#[derive(Debug, Serialize)]
struct UpdateSpeedClassRequest<'a> {
    #[serde(rename = "speedClass")]
    speed_class: &'a str,
}

// The server expects this one as a decimal-milliseconds *string*, unlike
// the integer timestamps on resource records.
#[derive(Debug, Serialize)]
struct SetExpiryTimeRequest {
    #[serde(rename = "expiryTime")]
    expiry_time: String,
}

#[derive(Debug, Serialize)]
struct SetGroupRequest<'a> {
    #[serde(rename = "groupId")]
    group_id: &'a str,
}

impl Subscriber {
    /// Register a subscriber under the current operator.
    #[tracing::instrument(skip(client, options))]
    pub async fn register(
        client: &SoracomClient,
        imsi: &str,
        options: &RegisterSubscriberOptions,
    ) -> Result<Self> {
        let response = client
            .post(&format!("v1/subscribers/{imsi}/register"), options)
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Activate a subscriber.
    #[tracing::instrument(skip(client))]
    pub async fn activate(client: &SoracomClient, imsi: &str) -> Result<Self> {
        Self::lifecycle(client, imsi, "activate").await
    }

    /// Deactivate a subscriber.
    #[tracing::instrument(skip(client))]
    pub async fn deactivate(client: &SoracomClient, imsi: &str) -> Result<Self> {
        Self::lifecycle(client, imsi, "deactivate").await
    }

    /// Terminate a subscriber. Irreversible once termination is enabled.
    #[tracing::instrument(skip(client))]
    pub async fn terminate(client: &SoracomClient, imsi: &str) -> Result<Self> {
        Self::lifecycle(client, imsi, "terminate").await
    }

    /// Allow this subscriber to be terminated.
    #[tracing::instrument(skip(client))]
    pub async fn enable_termination(client: &SoracomClient, imsi: &str) -> Result<Self> {
        Self::lifecycle(client, imsi, "enable_termination").await
    }

    /// Protect this subscriber from termination.
    #[tracing::instrument(skip(client))]
    pub async fn disable_termination(client: &SoracomClient, imsi: &str) -> Result<Self> {
        Self::lifecycle(client, imsi, "disable_termination").await
    }

    /// Clear the expiry time.
    #[tracing::instrument(skip(client))]
    pub async fn unset_expiry_time(client: &SoracomClient, imsi: &str) -> Result<Self> {
        Self::lifecycle(client, imsi, "unset_expiry_time").await
    }

    /// Remove the subscriber from its group.
    #[tracing::instrument(skip(client))]
    pub async fn unset_group(client: &SoracomClient, imsi: &str) -> Result<Self> {
        Self::lifecycle(client, imsi, "unset_group").await
    }

    // All the body-less lifecycle mutations share one shape:
    // POST /v1/subscribers/{imsi}/{verb} with an empty JSON object.
    async fn lifecycle(client: &SoracomClient, imsi: &str, verb: &str) -> Result<Self> {
        let response = client
            .post(&format!("v1/subscribers/{imsi}/{verb}"), &serde_json::json!({}))
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Change the subscriber's speed class.
    #[tracing::instrument(skip(client))]
    pub async fn update_speed_class(
        client: &SoracomClient,
        imsi: &str,
        speed_class: &str,
    ) -> Result<Self> {
        let body = UpdateSpeedClassRequest { speed_class };
        let response = client
            .post(&format!("v1/subscribers/{imsi}/update_speed_class"), &body)
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Set the expiry time.
    #[tracing::instrument(skip(client))]
    pub async fn set_expiry_time(
        client: &SoracomClient,
        imsi: &str,
        expiry_time: TimestampMilli,
    ) -> Result<Self> {
        let body = SetExpiryTimeRequest {
            expiry_time: expiry_time.unix_millis().to_string(),
        };
        let response = client
            .post(&format!("v1/subscribers/{imsi}/set_expiry_time"), &body)
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Move the subscriber into a group.
    #[tracing::instrument(skip(client))]
    pub async fn set_group(
        client: &SoracomClient,
        imsi: &str,
        group_id: &str,
    ) -> Result<Self> {
        let body = SetGroupRequest { group_id };
        let response = client
            .post(&format!("v1/subscribers/{imsi}/set_group"), &body)
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Put (create or replace) tags on the subscriber.
    #[tracing::instrument(skip(client, tags))]
    pub async fn put_tags(client: &SoracomClient, imsi: &str, tags: &[Tag]) -> Result<Self> {
        let response = client
            .put(&format!("v1/subscribers/{imsi}/tags"), tags)
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Delete one tag by name.
    ///
    /// Tag names are free-form, so the path segment is percent-encoded.
    #[tracing::instrument(skip(client))]
    pub async fn delete_tag(client: &SoracomClient, imsi: &str, tag_name: &str) -> Result<()> {
        let encoded = urlencoding::encode(tag_name);
        let response = client
            .delete(&format!("v1/subscribers/{imsi}/tags/{encoded}"))
            .await?;
        SoracomClient::drain(response).await
    }
}

#[async_trait]
impl Get for Subscriber {
    type Id = String; // IMSI

    #[tracing::instrument(skip(client))]
    async fn get(client: &SoracomClient, imsi: String) -> Result<Self> {
        let response = client.get(&format!("v1/subscribers/{imsi}")).await?;
        SoracomClient::read_json(response).await
    }
}

#[async_trait]
impl List for Subscriber {
    type Filter = ListFilter;

    #[tracing::instrument(skip(client, filter))]
    async fn list_page(client: &SoracomClient, filter: &ListFilter) -> Result<Page<Self>> {
        let response = client
            .get_with_query("v1/subscribers", &filter.encode())
            .await?;
        SoracomClient::read_page(response).await
    }
}
