//! Event handlers: watch a target and run actions when a rule fires.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::SoracomClient;
use crate::error::Result;
use crate::models::{Properties, Tags};
use crate::traits::Get;

/// Condition type that triggers an event handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventHandlerRuleType {
    #[serde(rename = "DailyTrafficRule")]
    DailyTraffic,
    #[serde(rename = "MonthlyTraffic")]
    MonthlyTraffic,
    #[serde(rename = "CumulativeTraffic")]
    CumulativeTraffic,
    #[serde(rename = "DailyTotalTraffic")]
    DailyTotalTraffic,
    #[serde(rename = "MonthlyTotalTraffic")]
    MonthlyTotalTraffic,
    #[serde(rename = "SubscriberStatusChanged")]
    SubscriberStatusChanged,
    #[serde(rename = "SubscriberSpeedClassChanged")]
    SubscriberSpeedClassChanged,
}

/// Action type an event handler runs when its rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventHandlerActionType {
    #[serde(rename = "ChangeSpeedClassAction")]
    ChangeSpeedClass,
    #[serde(rename = "SendMailAction")]
    SendMail,
    #[serde(rename = "InvokeAWSLambdaAction")]
    InvokeAwsLambda,
    #[serde(rename = "ExecuteWebRequestAction")]
    ExecuteWebRequest,
    #[serde(rename = "ActivationAction")]
    Activate,
    #[serde(rename = "DeactivationAction")]
    Deactivate,
}

/// Whether a handler is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Inactive,
}

/// When a rule re-arms or an action executes, relative to the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDateTimeConst {
    Immediately,
    AfterOneDay,
    BeginningOfNextDay,
    BeginningOfNextMonth,
    Never,
}

impl EventDateTimeConst {
    /// The wire literal for this constant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Immediately => "IMMEDIATELY",
            Self::AfterOneDay => "AFTER_ONE_DAY",
            Self::BeginningOfNextDay => "BEGINNING_OF_NEXT_DAY",
            Self::BeginningOfNextMonth => "BEGINNING_OF_NEXT_MONTH",
            Self::Never => "NEVER",
        }
    }
}

/// A condition to invoke actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(rename = "type")]
    pub rule_type: EventHandlerRuleType,
    #[serde(default)]
    pub properties: Properties,
}

impl RuleConfig {
    fn new(
        rule_type: EventHandlerRuleType,
        re_arm: EventDateTimeConst,
        mut properties: Properties,
    ) -> Self {
        properties.insert(
            "inactiveTimeoutDateConst".to_string(),
            re_arm.as_str().to_string(),
        );
        Self {
            rule_type,
            properties,
        }
    }

    /// Fire when a subscriber's daily traffic exceeds `limit_mib` megabytes.
    pub fn daily_traffic(limit_mib: u64, re_arm: EventDateTimeConst) -> Self {
        let properties = Properties::from([(
            "limitTotalTrafficMegaByte".to_string(),
            limit_mib.to_string(),
        )]);
        Self::new(EventHandlerRuleType::DailyTraffic, re_arm, properties)
    }

    /// Fire when a subscriber's monthly traffic exceeds `limit_mib` megabytes.
    pub fn monthly_traffic(limit_mib: u64, re_arm: EventDateTimeConst) -> Self {
        let properties = Properties::from([(
            "limitTotalTrafficMegaByte".to_string(),
            limit_mib.to_string(),
        )]);
        Self::new(EventHandlerRuleType::MonthlyTraffic, re_arm, properties)
    }
}

/// Properties for a web-request action.
#[derive(Debug, Clone, Default)]
pub struct WebhookProperties {
    pub url: String,
    pub method: String,
    pub content_type: String,
    pub body: String,
}

/// Properties for a send-mail action.
#[derive(Debug, Clone, Default)]
pub struct EmailProperties {
    pub to: String,
    pub title: String,
    pub message: String,
}

/// An action to run when a rule fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionConfig {
    #[serde(rename = "type")]
    pub action_type: EventHandlerActionType,
    #[serde(default)]
    pub properties: Properties,
}

impl ActionConfig {
    fn new(
        action_type: EventHandlerActionType,
        execute_at: EventDateTimeConst,
        mut properties: Properties,
    ) -> Self {
        properties.insert(
            "executionDateTimeConst".to_string(),
            execute_at.as_str().to_string(),
        );
        Self {
            action_type,
            properties,
        }
    }

    /// Activate the target subscriber.
    pub fn activate(execute_at: EventDateTimeConst) -> Self {
        Self::new(EventHandlerActionType::Activate, execute_at, Properties::new())
    }

    /// Deactivate the target subscriber.
    pub fn deactivate(execute_at: EventDateTimeConst) -> Self {
        Self::new(
            EventHandlerActionType::Deactivate,
            execute_at,
            Properties::new(),
        )
    }

    /// Change the target subscriber's speed class.
    pub fn change_speed_class(
        speed_class: crate::models::SpeedClass,
        execute_at: EventDateTimeConst,
    ) -> Self {
        let properties = Properties::from([(
            "speedClass".to_string(),
            speed_class.as_str().to_string(),
        )]);
        Self::new(
            EventHandlerActionType::ChangeSpeedClass,
            execute_at,
            properties,
        )
    }

    /// Issue an HTTP request.
    pub fn webhook(webhook: WebhookProperties, execute_at: EventDateTimeConst) -> Self {
        let properties = Properties::from([
            ("url".to_string(), webhook.url),
            ("httpMethod".to_string(), webhook.method),
            ("contentType".to_string(), webhook.content_type),
            ("body".to_string(), webhook.body),
        ]);
        Self::new(
            EventHandlerActionType::ExecuteWebRequest,
            execute_at,
            properties,
        )
    }

    /// Send an email.
    pub fn send_mail(email: EmailProperties, execute_at: EventDateTimeConst) -> Self {
        let properties = Properties::from([
            ("to".to_string(), email.to),
            ("title".to_string(), email.title),
            ("message".to_string(), email.message),
        ]);
        Self::new(EventHandlerActionType::SendMail, execute_at, properties)
    }
}

/// An event handler owned by the operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHandler {
    pub handler_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Lifecycle status, `"active"` or `"inactive"`.
    #[serde(default)]
    pub status: String,

    /// Watch one subscriber.
    #[serde(default)]
    pub target_imsi: Option<String>,

    /// Watch every subscriber of an operator.
    #[serde(default)]
    pub target_operator_id: Option<String>,

    /// Watch subscribers carrying these tags.
    #[serde(default)]
    pub target_tag: Option<Tags>,

    /// Watch every subscriber in a group.
    #[serde(default)]
    pub target_group_id: Option<String>,

    pub rule_config: RuleConfig,

    #[serde(default)]
    pub action_config_list: Vec<ActionConfig>,
}

/// Parameters for creating an event handler.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventHandlerOptions {
    pub name: String,

    pub description: String,

    pub status: EventStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_imsi: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_operator_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_tag: Option<Tags>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_group_id: Option<String>,

    pub rule_config: RuleConfig,

    pub action_config_list: Vec<ActionConfig>,
}

impl EventHandler {
    /// List event handlers for the operator, optionally narrowed to one
    /// target specifier (e.g. an operator or group reference).
    #[tracing::instrument(skip(client))]
    pub async fn list(client: &SoracomClient, target: Option<&str>) -> Result<Vec<Self>> {
        let query = match target {
            Some(target) => format!("target={}", urlencoding::encode(target)),
            None => String::new(),
        };
        let response = client.get_with_query("v1/event_handlers", &query).await?;
        SoracomClient::read_json(response).await
    }

    /// List event handlers watching one subscriber.
    #[tracing::instrument(skip(client))]
    pub async fn list_for_subscriber(
        client: &SoracomClient,
        imsi: &str,
    ) -> Result<Vec<Self>> {
        let response = client
            .get(&format!("v1/event_handlers/subscribers/{imsi}"))
            .await?;
        SoracomClient::read_json(response).await
    }

    /// Create an event handler.
    #[tracing::instrument(skip(client, options))]
    pub async fn create(
        client: &SoracomClient,
        options: &CreateEventHandlerOptions,
    ) -> Result<()> {
        let response = client.post("v1/event_handlers", options).await?;
        SoracomClient::drain(response).await
    }

    /// Replace an existing handler with this value.
    #[tracing::instrument(skip(client, handler))]
    pub async fn update(client: &SoracomClient, handler: &EventHandler) -> Result<()> {
        let response = client
            .put(&format!("v1/event_handlers/{}", handler.handler_id), handler)
            .await?;
        SoracomClient::drain(response).await
    }

    /// Delete an event handler.
    #[tracing::instrument(skip(client))]
    pub async fn delete(client: &SoracomClient, handler_id: &str) -> Result<()> {
        let response = client
            .delete(&format!("v1/event_handlers/{handler_id}"))
            .await?;
        SoracomClient::drain(response).await
    }
}

#[async_trait]
impl Get for EventHandler {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &SoracomClient, handler_id: String) -> Result<Self> {
        let response = client
            .get(&format!("v1/event_handlers/{handler_id}"))
            .await?;
        SoracomClient::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpeedClass;

    #[test]
    fn rule_builder_sets_rearm_constant() {
        let rule = RuleConfig::daily_traffic(100, EventDateTimeConst::BeginningOfNextDay);
        assert_eq!(rule.rule_type, EventHandlerRuleType::DailyTraffic);
        assert_eq!(
            rule.properties.get("limitTotalTrafficMegaByte").map(String::as_str),
            Some("100")
        );
        assert_eq!(
            rule.properties.get("inactiveTimeoutDateConst").map(String::as_str),
            Some("BEGINNING_OF_NEXT_DAY")
        );
    }

    #[test]
    fn action_builder_sets_execution_constant() {
        let action = ActionConfig::change_speed_class(
            SpeedClass::S1Minimum,
            EventDateTimeConst::Immediately,
        );
        assert_eq!(action.action_type, EventHandlerActionType::ChangeSpeedClass);
        assert_eq!(
            action.properties.get("speedClass").map(String::as_str),
            Some("s1.minimum")
        );
        assert_eq!(
            action.properties.get("executionDateTimeConst").map(String::as_str),
            Some("IMMEDIATELY")
        );
    }

    #[test]
    fn rule_type_serializes_to_wire_names() {
        let json = serde_json::to_string(&EventHandlerRuleType::DailyTraffic).unwrap();
        assert_eq!(json, r#""DailyTrafficRule""#);
        let json = serde_json::to_string(&EventHandlerActionType::SendMail).unwrap();
        assert_eq!(json, r#""SendMailAction""#);
    }

    #[test]
    fn create_options_omit_absent_targets() {
        let options = CreateEventHandlerOptions {
            name: "daily cap".to_string(),
            description: String::new(),
            status: EventStatus::Active,
            target_imsi: Some("440103000000001".to_string()),
            target_operator_id: None,
            target_tag: None,
            target_group_id: None,
            rule_config: RuleConfig::daily_traffic(50, EventDateTimeConst::Never),
            action_config_list: vec![ActionConfig::deactivate(EventDateTimeConst::Immediately)],
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["targetImsi"], "440103000000001");
        assert!(json.get("targetGroupId").is_none());
    }

    #[test]
    fn decodes_wire_record() {
        let json = r#"{
            "handlerId": "h-0001",
            "name": "cap",
            "description": "",
            "status": "active",
            "targetImsi": "440103000000001",
            "ruleConfig": {"type": "DailyTrafficRule", "properties": {}},
            "actionConfigList": [
                {"type": "DeactivationAction", "properties": {}}
            ]
        }"#;
        let handler: EventHandler = serde_json::from_str(json).unwrap();
        assert_eq!(handler.handler_id, "h-0001");
        assert_eq!(handler.rule_config.rule_type, EventHandlerRuleType::DailyTraffic);
        assert_eq!(
            handler.action_config_list[0].action_type,
            EventHandlerActionType::Deactivate
        );
    }
}
