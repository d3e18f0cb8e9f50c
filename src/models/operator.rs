//! Operator (account) model and signup operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::SoracomClient;
use crate::error::Result;
use crate::traits::Get;

/// An operator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub operator_id: String,

    #[serde(default)]
    pub root_operator_id: Option<String>,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub description: Option<String>,

    // Unlike resource records, operator dates are ISO-8601 strings.
    #[serde(default)]
    pub create_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub update_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct CreateOperatorRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyOperatorRequest<'a> {
    token: &'a str,
}

impl Operator {
    /// Start creating an operator account; the server mails a verification
    /// token to `email`.
    #[tracing::instrument(skip(client, password))]
    pub async fn create(client: &SoracomClient, email: &str, password: &str) -> Result<()> {
        let body = CreateOperatorRequest { email, password };
        let response = client.post("v1/operators", &body).await?;
        SoracomClient::drain(response).await
    }

    /// Complete account creation with the mailed verification token.
    #[tracing::instrument(skip(client, token))]
    pub async fn verify(client: &SoracomClient, token: &str) -> Result<()> {
        let body = VerifyOperatorRequest { token };
        let response = client.post("v1/operators/verify", &body).await?;
        SoracomClient::drain(response).await
    }
}

#[async_trait]
impl Get for Operator {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &SoracomClient, operator_id: String) -> Result<Self> {
        let response = client.get(&format!("v1/operators/{operator_id}")).await?;
        SoracomClient::read_json(response).await
    }
}
