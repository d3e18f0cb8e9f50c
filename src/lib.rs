//! SORACOM API client library.
//!
//! A Rust library for the SORACOM REST management API: subscriber (SIM)
//! lifecycle, device groups, event handlers, usage statistics, and the
//! on-device Metadata Service.
//!
//! # Quick Start
//!
//! ```no_run
//! use soracom::{Get, List, ListFilter, SoracomClient, Subscriber};
//!
//! #[tokio::main]
//! async fn main() -> soracom::Result<()> {
//!     // Authenticate and thread the returned credentials back in.
//!     let client = SoracomClient::new(soracom::DEFAULT_ENDPOINT)?;
//!     let credentials = client.auth("me@example.com", "passw0rd", None).await?;
//!     let client = client.with_credentials(credentials);
//!
//!     // List active subscribers one page at a time.
//!     let filter = ListFilter::default().status_filter("active").limit(100);
//!     let mut page = Subscriber::list_page(&client, &filter).await?;
//!     while let Some(key) = page.next_key() {
//!         let next = filter.clone().last_evaluated_key(key.to_string());
//!         page = Subscriber::list_page(&client, &next).await?;
//!     }
//!
//!     // Or fetch one by IMSI.
//!     let subscriber = Subscriber::get(&client, "440103000000001".to_string()).await?;
//!     println!("{} is {}", subscriber.imsi, subscriber.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Single-resource fetches go through the [`Get`] trait and listings
//! through the cursor-paginated [`List`] trait; lifecycle verbs (activate,
//! terminate, tag mutations, ...) are associated functions on the resource
//! types. Every operation is one HTTP round trip: no retries, no caching,
//! no internal scheduling. Error responses are classified into a uniform
//! [`ApiError`] regardless of the server's payload format.
//!
//! Credentials are immutable: [`SoracomClient::auth`] returns a fresh
//! [`Credentials`] value and [`SoracomClient::with_credentials`] returns a
//! new client carrying it, so clients can be shared across tasks without
//! locks.

mod client;
mod credentials;
mod error;
mod metadata;
mod models;
mod pagination;
mod query;
mod timestamp;
mod traits;

// Re-export core types
pub use client::{SoracomClient, DEFAULT_ENDPOINT, DEFAULT_TOKEN_TIMEOUT_SECONDS};
pub use credentials::Credentials;
pub use error::{
    ApiError, Result, SoracomError, ERROR_CODE_UNKNOWN, ERROR_CODE_UNSUPPORTED_CONTENT_TYPE,
};
pub use metadata::{MetadataClient, DEFAULT_METADATA_ENDPOINT};
pub use pagination::{Page, PaginationKeys};
pub use query::{ListFilter, TagValueMatchMode};
pub use timestamp::TimestampMilli;

// Re-export traits
pub use traits::{CursorFilter, Get, List};

// Re-export models
pub use models::{
    // Subscriber types
    RegisterSubscriberOptions,
    SessionStatus,
    Subscriber,
    // Group types
    AirConfig,
    BeamTcpConfig,
    Group,
    GroupConfig,
    MetadataConfig,
    // Event handler types
    ActionConfig,
    CreateEventHandlerOptions,
    EmailProperties,
    EventDateTimeConst,
    EventHandler,
    EventHandlerActionType,
    EventHandlerRuleType,
    EventStatus,
    RuleConfig,
    WebhookProperties,
    // Stats types
    AirStats,
    AirTraffic,
    BeamStats,
    BeamTraffic,
    SpeedClass,
    StatsPeriod,
    // Operator types
    Operator,
    // Shared
    Properties,
    Tag,
    Tags,
};
