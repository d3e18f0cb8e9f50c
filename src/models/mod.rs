//! Resource records and the typed operation facade.

mod event_handler;
mod group;
mod operator;
mod stats;
mod subscriber;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use event_handler::{
    ActionConfig, CreateEventHandlerOptions, EmailProperties, EventDateTimeConst, EventHandler,
    EventHandlerActionType, EventHandlerRuleType, EventStatus, RuleConfig, WebhookProperties,
};
pub use group::{AirConfig, BeamTcpConfig, Group, GroupConfig, MetadataConfig};
pub use operator::Operator;
pub use stats::{
    AirStats, AirTraffic, BeamStats, BeamTraffic, SpeedClass, StatsPeriod,
};
pub use subscriber::{RegisterSubscriberOptions, SessionStatus, Subscriber};

/// A tag as it appears in tag-mutation request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    #[serde(rename = "tagName")]
    pub tag_name: String,
    /// Tag value.
    #[serde(rename = "tagValue")]
    pub tag_value: String,
}

impl Tag {
    /// Build a tag from a name/value pair.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag_name: name.into(),
            tag_value: value.into(),
        }
    }
}

/// Tags as they appear on resource records: a name-to-value map.
pub type Tags = HashMap<String, String>;

/// Free-form property map used by event handler rules and actions.
pub type Properties = HashMap<String, String>;
