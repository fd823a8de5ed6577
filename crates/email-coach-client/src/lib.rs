#![warn(missing_docs)]
//! # email-coach-client
//!
//! ## Purpose
//! HTTP access to the practice backend.
//!
//! ## Responsibilities
//! - Validate the backend base URL and resolve endpoint paths against it.
//! - Issue JSON `GET`/`POST` requests through an [`ApiTransport`].
//! - Collapse network, status and decode failures into [`ClientError`],
//!   whose `Display` is the exact message a result panel shows.
//!
//! ## Data flow
//! Typed request -> [`ApiRequest`] -> transport -> [`RawResponse`] ->
//! status check -> contract decode.
//!
//! ## Ownership and lifetimes
//! Requests and responses own their buffers; the transport is shared behind
//! an `Arc` so clients are cheap to clone.
//!
//! ## Error model
//! `GET` failures report `HTTP <status>`. `POST` failures surface the error
//! body's `detail` when present. Nothing is retried.

mod transport;

use std::sync::Arc;

use email_coach_contract::{
    EVALUATE_EMAIL_PATH, EvaluateEmailRequest, EvaluateEmailResponse, FILES_PATH,
    GENERATE_QUESTIONS_PATH, GenerateQuestionsRequest, GenerateQuestionsResponse, HEALTH_PATH,
    HealthResponse, InteractionLogEntry, LOGS_PATH, error_detail, parse_file_list, parse_response,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

pub use transport::ReqwestTransport;

/// HTTP method subset used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    /// Read request without a body.
    Get,
    /// Write request with a JSON body.
    Post,
}

/// One outgoing request, already resolved against the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Request method.
    pub method: ApiMethod,
    /// Endpoint path, for example `/api/files`.
    pub path: String,
    /// Absolute request URL.
    pub url: String,
    /// JSON body for `POST` requests.
    pub body: Option<Value>,
}

/// Status and body bytes of one completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Builds a response from a status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request transport abstraction.
#[async_trait::async_trait]
pub trait ApiTransport: Send + Sync {
    /// Sends one request and returns whatever the server answered.
    ///
    /// # Errors
    /// Returns [`ClientError::Network`] when no response was received.
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ClientError>;
}

/// Validated backend origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    url: Url,
}

impl BaseUrl {
    /// Parses and validates an `http`/`https` base URL with a host.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidBaseUrl`] for anything else.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let url = Url::parse(raw.trim())
            .map_err(|error| ClientError::InvalidBaseUrl(format!("{raw}: {error}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(format!(
                "{raw}: scheme must be http or https"
            )));
        }
        if url.host_str().is_none() {
            return Err(ClientError::InvalidBaseUrl(format!("{raw}: missing host")));
        }

        Ok(Self { url })
    }

    /// Appends `path` to the base, keeping any path prefix of the base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.url.as_str().trim_end_matches('/'))
    }

    /// The base URL as a string.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Typed client for every backend endpoint.
#[derive(Clone)]
pub struct ApiClient {
    base_url: BaseUrl,
    transport: Arc<dyn ApiTransport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for `base_url` over `transport`.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidBaseUrl`] when the URL is unusable.
    pub fn new(base_url: &str, transport: Arc<dyn ApiTransport>) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: BaseUrl::parse(base_url)?,
            transport,
        })
    }

    /// Validated base URL.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// `GET /api/files`.
    ///
    /// A 2xx body without a length, such as `{}`, is an empty list.
    ///
    /// # Errors
    /// See [`ApiClient::get_json`].
    pub async fn list_files(&self) -> Result<Vec<String>, ClientError> {
        let response = self.get_ok(FILES_PATH).await?;
        parse_file_list(&response.body).map_err(|error| ClientError::Decode(error.to_string()))
    }

    /// `POST /generate_questions`.
    ///
    /// # Errors
    /// See [`ApiClient::post_json`].
    pub async fn generate_questions(
        &self,
        request: &GenerateQuestionsRequest,
    ) -> Result<GenerateQuestionsResponse, ClientError> {
        self.post_json(GENERATE_QUESTIONS_PATH, request).await
    }

    /// `POST /evaluate_email`.
    ///
    /// # Errors
    /// See [`ApiClient::post_json`].
    pub async fn evaluate_email(
        &self,
        request: &EvaluateEmailRequest,
    ) -> Result<EvaluateEmailResponse, ClientError> {
        self.post_json(EVALUATE_EMAIL_PATH, request).await
    }

    /// `GET /health`.
    ///
    /// # Errors
    /// See [`ApiClient::get_json`].
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get_json(HEALTH_PATH).await
    }

    /// `GET /api/logs`.
    ///
    /// # Errors
    /// See [`ApiClient::get_json`].
    pub async fn recent_interactions(&self) -> Result<Vec<InteractionLogEntry>, ClientError> {
        self.get_json(LOGS_PATH).await
    }

    /// Issues a `GET` and decodes a 2xx body.
    ///
    /// # Errors
    /// Returns [`ClientError::Status`] without detail for non-2xx responses,
    /// [`ClientError::Network`] when the exchange fails, and
    /// [`ClientError::Decode`] for undecodable bodies.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.get_ok(path).await?;
        decode(&response)
    }

    async fn get_ok(&self, path: &str) -> Result<RawResponse, ClientError> {
        let request = self.request(ApiMethod::Get, path, None);
        let response = self.transport.send(&request).await?;
        tracing::debug!(method = "GET", path, status = response.status, "response received");

        if !response.is_success() {
            return Err(ClientError::Status {
                status: response.status,
                detail: None,
            });
        }

        Ok(response)
    }

    /// Issues a `POST` with a JSON body and decodes a 2xx body.
    ///
    /// # Errors
    /// Returns [`ClientError::Status`] carrying the error body's `detail` for
    /// non-2xx responses, [`ClientError::Network`] when the exchange fails,
    /// and [`ClientError::Decode`] for undecodable bodies.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body =
            serde_json::to_value(body).map_err(|error| ClientError::Encode(error.to_string()))?;
        let request = self.request(ApiMethod::Post, path, Some(body));
        let response = self.transport.send(&request).await?;
        tracing::debug!(method = "POST", path, status = response.status, "response received");

        if !response.is_success() {
            let detail = error_detail(&response.body);
            tracing::warn!(
                path,
                status = response.status,
                has_detail = detail.is_some(),
                "request rejected"
            );
            return Err(ClientError::Status {
                status: response.status,
                detail,
            });
        }

        decode(&response)
    }

    fn request(&self, method: ApiMethod, path: &str, body: Option<Value>) -> ApiRequest {
        ApiRequest {
            method,
            path: path.to_string(),
            url: self.base_url.endpoint(path),
            body,
        }
    }
}

fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T, ClientError> {
    parse_response(&response.body).map_err(|error| ClientError::Decode(error.to_string()))
}

fn status_message(status: u16, detail: Option<&str>) -> String {
    detail.map_or_else(|| format!("HTTP {status}"), str::to_owned)
}

/// Client errors. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Configured base URL is unusable.
    #[error("invalid base url {0}")]
    InvalidBaseUrl(String),
    /// Request body could not be serialized.
    #[error("{0}")]
    Encode(String),
    /// Connection, TLS, timeout or body read failure.
    #[error("{0}")]
    Network(String),
    /// Non-2xx response.
    #[error("{}", status_message(*.status, .detail.as_deref()))]
    Status {
        /// HTTP status code.
        status: u16,
        /// `detail` from the error body, when usable.
        detail: Option<String>,
    },
    /// 2xx response whose body did not match the contract.
    #[error("{0}")]
    Decode(String),
}
