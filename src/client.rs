//! SORACOM API client.
//!
//! Low-level HTTP client that handles credential headers, request dispatch
//! and error classification. Resource operations are implemented via traits
//! and associated functions on the model types.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::credentials::{Credentials, API_KEY_HEADER, TOKEN_HEADER};
use crate::error::{ApiError, Result, SoracomError};
use crate::pagination::{Page, PaginationKeys};

/// Default base URL of the production management API.
pub const DEFAULT_ENDPOINT: &str = "https://api.soracom.io";

const USER_AGENT: &str = concat!("soracom-rs/", env!("CARGO_PKG_VERSION"));

/// Token lifetime requested by [`SoracomClient::auth`] when the caller does
/// not specify one: 24 hours.
pub const DEFAULT_TOKEN_TIMEOUT_SECONDS: u64 = 24 * 60 * 60;

/// Low-level SORACOM API client.
///
/// Holds the connection pool, the base endpoint and an optional immutable
/// [`Credentials`] value. The endpoint is fixed at construction; credentials
/// are attached with [`with_credentials`](Self::with_credentials), which
/// returns a new client rather than mutating shared state, so one client
/// per credential set can be used from many tasks without locks.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use soracom::SoracomClient;
///
/// # async fn example() -> soracom::Result<()> {
/// let client = SoracomClient::new(soracom::DEFAULT_ENDPOINT)?;
/// let credentials = client.auth("me@example.com", "passw0rd", None).await?;
/// let client = client.with_credentials(credentials);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SoracomClient {
    http: Client,
    base_url: Arc<Url>,
    credentials: Option<Credentials>,
}

impl std::fmt::Debug for SoracomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoracomClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

/// Body of `POST /v1/auth`.
#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "tokenTimeoutSeconds")]
    token_timeout_seconds: u64,
}

/// Response of `POST /v1/auth`.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(rename = "apiKey")]
    api_key: String,
    #[serde(rename = "operatorId")]
    operator_id: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct GenerateTokenRequest {
    timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct UpdatePasswordRequest<'a> {
    #[serde(rename = "currentPassword")]
    current_password: &'a str,
    #[serde(rename = "newPassword")]
    new_password: &'a str,
}

impl SoracomClient {
    /// Create an unauthenticated client against the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str) -> Result<Self> {
        // Ensure base URL ends with / so Url::join keeps the full path.
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(SoracomError::Transport)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            credentials: None,
        })
    }

    /// Create a client against the production endpoint, reading credentials
    /// from `SORACOM_API_KEY`, `SORACOM_TOKEN` and `SORACOM_OPERATOR_ID`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the variables is not set.
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials::from_env()?;
        Ok(Self::new(DEFAULT_ENDPOINT)?.with_credentials(credentials))
    }

    /// A new client carrying the given credentials.
    ///
    /// The returned client shares this client's connection pool.
    #[must_use]
    pub fn with_credentials(self, credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            ..self
        }
    }

    /// The credentials this client attaches to requests, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// The base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The operator ID from the attached credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SoracomError::MissingCredentials`] on an unauthenticated
    /// client; some request paths embed the operator ID and cannot be built
    /// without it.
    pub(crate) fn operator_id(&self) -> Result<&str> {
        self.credentials
            .as_ref()
            .map(Credentials::operator_id)
            .ok_or(SoracomError::MissingCredentials)
    }

    /// Authenticate with email and password.
    ///
    /// Returns a fresh [`Credentials`] value; this client is not modified.
    /// Pass the value to [`with_credentials`](Self::with_credentials) to get
    /// an authenticated client. `token_timeout_seconds` defaults to
    /// [`DEFAULT_TOKEN_TIMEOUT_SECONDS`].
    #[tracing::instrument(skip(self, password))]
    pub async fn auth(
        &self,
        email: &str,
        password: &str,
        token_timeout_seconds: Option<u64>,
    ) -> Result<Credentials> {
        let body = AuthRequest {
            email,
            password,
            token_timeout_seconds: token_timeout_seconds
                .unwrap_or(DEFAULT_TOKEN_TIMEOUT_SECONDS),
        };
        let response = self.post("v1/auth", &body).await?;
        let auth: AuthResponse = Self::read_json(response).await?;
        Ok(Credentials::new(auth.api_key, auth.token, auth.operator_id))
    }

    /// Generate a fresh API token for the current operator.
    ///
    /// Returns a new [`Credentials`] value carrying the refreshed token;
    /// the credentials attached to this client are untouched.
    #[tracing::instrument(skip(self))]
    pub async fn generate_api_token(&self, timeout_seconds: u64) -> Result<Credentials> {
        let operator_id = self.operator_id()?.to_string();
        let path = format!("v1/operators/{operator_id}/token");
        let body = GenerateTokenRequest { timeout_seconds };
        let response = self.post(&path, &body).await?;
        let token: TokenResponse = Self::read_json(response).await?;
        // operator_id() above guarantees credentials are present.
        self.credentials
            .as_ref()
            .map(|c| c.with_token(token.token))
            .ok_or(SoracomError::MissingCredentials)
    }

    /// Update the current operator's password.
    #[tracing::instrument(skip(self, current_password, new_password))]
    pub async fn update_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let operator_id = self.operator_id()?.to_string();
        let path = format!("v1/operators/{operator_id}/password");
        let body = UpdatePasswordRequest {
            current_password,
            new_password,
        };
        let response = self.post(&path, &body).await?;
        Self::drain(response).await
    }

    /// Retrieve a token for accessing the support site.
    #[tracing::instrument(skip(self))]
    pub async fn support_token(&self) -> Result<String> {
        let operator_id = self.operator_id()?.to_string();
        let path = format!("v1/operators/{operator_id}/support/token");
        let response = self.post(&path, &serde_json::json!({})).await?;
        let token: TokenResponse = Self::read_json(response).await?;
        Ok(token.token)
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub(crate) async fn get(&self, path: &str) -> Result<Response> {
        self.dispatch(Method::GET, path, "", None).await
    }

    /// Make a GET request with a pre-encoded query string.
    #[tracing::instrument(skip(self, query))]
    pub(crate) async fn get_with_query(&self, path: &str, query: &str) -> Result<Response> {
        self.dispatch(Method::GET, path, query, None).await
    }

    /// Make a POST request with a JSON body.
    #[tracing::instrument(skip(self, body))]
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let body = serde_json::to_string(body)?;
        self.dispatch(Method::POST, path, "", Some(body)).await
    }

    /// Make a PUT request with a JSON body.
    #[tracing::instrument(skip(self, body))]
    pub(crate) async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let body = serde_json::to_string(body)?;
        self.dispatch(Method::PUT, path, "", Some(body)).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub(crate) async fn delete(&self, path: &str) -> Result<Response> {
        self.dispatch(Method::DELETE, path, "", None).await
    }

    /// Issue one request: build the URL, attach credential headers, send,
    /// and classify any status >= 400 into an [`ApiError`].
    ///
    /// Exactly one round trip; no retries, no local recovery.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &str,
        body: Option<String>,
    ) -> Result<Response> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            url.set_query(Some(query));
        }

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }
        if let Some(credentials) = &self.credentials {
            request = request
                .header(API_KEY_HEADER, credentials.api_key())
                .header(TOKEN_HEADER, credentials.token());
        }

        let response = request.send().await.map_err(SoracomError::Transport)?;
        Self::check_response(response).await
    }

    /// Fail with a classified error for non-success statuses.
    async fn check_response(response: Response) -> Result<Response> {
        if response.status().as_u16() < 400 {
            return Ok(response);
        }
        Err(SoracomError::Api(ApiError::from_response(response).await))
    }

    /// Decode a success response body into `T`.
    ///
    /// Malformed JSON surfaces as [`SoracomError::Decode`] rather than a
    /// silently zero-valued record.
    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await.map_err(SoracomError::Transport)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Decode a listing response: JSON array body plus `Link` header cursors.
    pub(crate) async fn read_page<T: DeserializeOwned>(response: Response) -> Result<Page<T>> {
        let pagination = PaginationKeys::from_headers(response.headers());
        let body = response.text().await.map_err(SoracomError::Transport)?;
        let items: Vec<T> = serde_json::from_str(&body)?;
        Ok(Page { items, pagination })
    }

    /// Read a success response body as plain text.
    pub(crate) async fn read_text(response: Response) -> Result<String> {
        response.text().await.map_err(SoracomError::Transport)
    }

    /// Consume and discard a success response body.
    ///
    /// Bodies must be drained on every path so the connection returns to
    /// the pool.
    pub(crate) async fn drain(response: Response) -> Result<()> {
        response.text().await.map_err(SoracomError::Transport)?;
        Ok(())
    }
}
