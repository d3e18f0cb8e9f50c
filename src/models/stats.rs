//! Usage statistics for Air (data) and Beam (forwarding) services.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::SoracomClient;
use crate::error::Result;

/// Aggregation period for stats queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsPeriod {
    Month,
    Day,
    Minutes,
}

impl StatsPeriod {
    /// The query-string literal for this period.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Day => "day",
            Self::Minutes => "minutes",
        }
    }
}

impl fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the predefined Air speed classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedClass {
    S1Minimum,
    S1Slow,
    S1Standard,
    S1Fast,
}

impl SpeedClass {
    /// The wire literal for this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S1Minimum => "s1.minimum",
            Self::S1Slow => "s1.slow",
            Self::S1Standard => "s1.standard",
            Self::S1Fast => "s1.fast",
        }
    }
}

impl fmt::Display for SpeedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upload/download traffic counters for one speed class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirTraffic {
    #[serde(rename = "uploadByteSizeTotal")]
    pub upload_bytes: u64,
    #[serde(rename = "uploadPacketSizeTotal")]
    pub upload_packets: u64,
    #[serde(rename = "downloadByteSizeTotal")]
    pub download_bytes: u64,
    #[serde(rename = "downloadPacketSizeTotal")]
    pub download_packets: u64,
}

/// Air traffic for one sample point, broken down by speed class.
///
/// Traffic map keys are speed-class literals (`"s1.standard"`, ...); kept
/// as strings so records with classes unknown to this crate still decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirStats {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub unixtime: u64,
    #[serde(default, rename = "dataTrafficStatsMap")]
    pub traffic: HashMap<String, AirTraffic>,
}

/// Request counter for one Beam channel type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeamTraffic {
    pub count: u64,
}

/// Beam usage for one sample point, broken down by channel type
/// (`"inHttp"`, `"outMqtt"`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamStats {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub unixtime: u64,
    #[serde(default, rename = "beamStatsMap")]
    pub traffic: HashMap<String, BeamTraffic>,
}

#[derive(Debug, Serialize)]
struct ExportStatsRequest {
    from: i64,
    to: i64,
    period: String,
}

#[derive(Debug, Deserialize)]
struct ExportStatsResponse {
    url: String,
}

fn stats_query(from: DateTime<Utc>, to: DateTime<Utc>, period: StatsPeriod) -> String {
    format!(
        "from={}&to={}&period={}",
        from.timestamp(),
        to.timestamp(),
        period.as_str()
    )
}

impl AirStats {
    /// Air stats for one subscriber over `[from, to]`.
    #[tracing::instrument(skip(client))]
    pub async fn for_subscriber(
        client: &SoracomClient,
        imsi: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        period: StatsPeriod,
    ) -> Result<Vec<Self>> {
        let response = client
            .get_with_query(
                &format!("v1/stats/air/subscribers/{imsi}"),
                &stats_query(from, to, period),
            )
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Request a CSV export of Air stats for every SIM of the operator.
    ///
    /// Returns the URL the export can be downloaded from.
    #[tracing::instrument(skip(client))]
    pub async fn export(
        client: &SoracomClient,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        period: StatsPeriod,
    ) -> Result<Url> {
        export_stats(client, "air", from, to, period).await
    }
}

impl BeamStats {
    /// Beam stats for one subscriber over `[from, to]`.
    #[tracing::instrument(skip(client))]
    pub async fn for_subscriber(
        client: &SoracomClient,
        imsi: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        period: StatsPeriod,
    ) -> Result<Vec<Self>> {
        let response = client
            .get_with_query(
                &format!("v1/stats/beam/subscribers/{imsi}"),
                &stats_query(from, to, period),
            )
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Request a CSV export of Beam stats for the operator.
    #[tracing::instrument(skip(client))]
    pub async fn export(
        client: &SoracomClient,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        period: StatsPeriod,
    ) -> Result<Url> {
        export_stats(client, "beam", from, to, period).await
    }
}

async fn export_stats(
    client: &SoracomClient,
    service: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    period: StatsPeriod,
) -> Result<Url> {
    let operator_id = client.operator_id()?.to_string();
    let body = ExportStatsRequest {
        from: from.timestamp(),
        to: to.timestamp(),
        period: period.as_str().to_string(),
    };
    let response = client
        .post(&format!("v1/stats/{service}/operators/{operator_id}/export"), &body)
        .await?;
    let export: ExportStatsResponse = SoracomClient::read_json(response).await?;
    Ok(Url::parse(&export.url)?)
}
