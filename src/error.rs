//! Error types for SORACOM API operations.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during SORACOM API operations.
#[derive(Debug, Error)]
pub enum SoracomError {
    /// Configuration is missing or incomplete.
    #[error("SORACOM configuration required: {0}")]
    ConfigMissing(String),

    /// The operation requires credentials but the client has none.
    ///
    /// Only returned when a request path cannot even be constructed without
    /// an operator ID (e.g. stats export). Every other unauthenticated call
    /// is sent as-is and classified from the server's 4xx response.
    #[error("operation requires an authenticated client")]
    MissingCredentials,

    /// The server returned an error response (status >= 400).
    #[error("SORACOM API error: {0}")]
    Api(#[from] ApiError),

    /// HTTP transport error (DNS, connection refused, TLS failure).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response carried a body that could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for SORACOM operations.
pub type Result<T> = core::result::Result<T, SoracomError>;

/// Error code used when the server returned a plain-text error payload.
pub const ERROR_CODE_UNKNOWN: &str = "UNK0001";

/// Error code used when the server returned an unsupported content type.
pub const ERROR_CODE_UNSUPPORTED_CONTENT_TYPE: &str = "INT0001";

/// A structured error classified from an HTTP error response.
///
/// The server answers 4xx/5xx with one of several payload formats; this
/// type normalizes them all into a `{status, code, message}` triple. `code`
/// is the server's mnemonic (e.g. `SEM0095`) for structured JSON payloads,
/// [`ERROR_CODE_UNKNOWN`] for plain-text payloads,
/// [`ERROR_CODE_UNSUPPORTED_CONTENT_TYPE`] for anything else, and empty for
/// 5xx payloads, which are not assumed to follow the structured schema.
#[derive(Debug, Clone, Error)]
#[error("{message} (HTTP {status}, code {code:?})")]
pub struct ApiError {
    /// HTTP status code of the error response.
    pub status: u16,
    /// Short error mnemonic, possibly empty.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Wire shape of a structured JSON error payload.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorPayload {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default, rename = "messageArgs")]
    message_args: String,
}

impl ApiError {
    /// Classify a non-success response from its status, content type and body.
    ///
    /// Decision tree, in order:
    /// 1. `text/plain` payloads carry the message verbatim under `UNK0001`.
    /// 2. `application/json` payloads in the 4xx band follow the structured
    ///    `{code, message, messageArgs}` schema; 5xx JSON payloads do not,
    ///    and are carried raw with an empty code.
    /// 3. Any other content type maps to `INT0001`.
    ///
    /// Malformed JSON never produces a secondary error: fields degrade to
    /// empty strings so the caller still gets a diagnosable value.
    pub fn classify(status: u16, content_type: &str, body: &str) -> Self {
        let (code, message) = if content_type.starts_with("text/plain") {
            (ERROR_CODE_UNKNOWN.to_string(), body.to_string())
        } else if content_type.starts_with("application/json") {
            if (400..500).contains(&status) {
                let payload: ApiErrorPayload =
                    serde_json::from_str(body).unwrap_or_default();
                (
                    payload.code,
                    expand_message(&payload.message, &payload.message_args),
                )
            } else {
                (String::new(), body.to_string())
            }
        } else {
            (
                ERROR_CODE_UNSUPPORTED_CONTENT_TYPE.to_string(),
                format!("Content-Type: {content_type} is not supported"),
            )
        };

        Self {
            status,
            code,
            message,
        }
    }

    /// Classify a `reqwest` response, consuming its body.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        // A body read failure still yields a classifiable (empty) message.
        let body = response.text().await.unwrap_or_default();
        Self::classify(status, &content_type, &body)
    }
}

/// Substitute `messageArgs` into the server's message template.
///
/// The server contract guarantees at most one `%s`-style placeholder per
/// message. Templates without a placeholder are returned unchanged; extra
/// placeholders are left verbatim. This is a known limitation inherited
/// from the server contract, not a general templating engine.
fn expand_message(template: &str, args: &str) -> String {
    match template.find("%s") {
        Some(idx) => format!("{}{}{}", &template[..idx], args, &template[idx + 2..]),
        None => template.to_string(),
    }
}
