#![warn(missing_docs)]
//! # email-coach-contract
//!
//! ## Purpose
//! Defines the wire contract between the `email-coach` client and the
//! practice backend.
//!
//! ## Responsibilities
//! - Name every endpoint path the client talks to.
//! - Model request and response bodies for file listing, question
//!   generation, email evaluation, health and interaction logs.
//! - Normalize error bodies into an optional human-readable `detail`.
//!
//! ## Data flow
//! Typed request -> JSON body -> backend -> raw response bytes ->
//! [`parse_response`] (success) or [`error_detail`] (non-2xx).
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs so nothing borrows from transient network
//! buffers.
//!
//! ## Error model
//! Undecodable success bodies return [`ContractError`]. Error bodies never
//! fail: anything unusable simply yields no detail.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Lists selectable source documents.
pub const FILES_PATH: &str = "/api/files";
/// Generates practice questions from one document.
pub const GENERATE_QUESTIONS_PATH: &str = "/generate_questions";
/// Evaluates one email response.
pub const EVALUATE_EMAIL_PATH: &str = "/evaluate_email";
/// Backend liveness check.
pub const HEALTH_PATH: &str = "/health";
/// Most recent stored interactions.
pub const LOGS_PATH: &str = "/api/logs";

/// Body of `POST /generate_questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateQuestionsRequest {
    /// Selected file name, relative to the backend's document directory.
    pub file_path: String,
    /// Free-text scenario context.
    pub scenario: String,
    /// CEFR proficiency label, passed through unmodified.
    pub cefr_level: String,
    /// Questions the backend must not repeat. Always empty from this client.
    pub existing_questions: Vec<String>,
}

impl GenerateQuestionsRequest {
    /// Builds a request with an empty `existing_questions` list.
    pub fn new(
        file_path: impl Into<String>,
        scenario: impl Into<String>,
        cefr_level: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            scenario: scenario.into(),
            cefr_level: cefr_level.into(),
            existing_questions: Vec::new(),
        }
    }
}

/// Body returned by `POST /generate_questions`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerateQuestionsResponse {
    /// Generated questions in backend order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub new_questions: Vec<String>,
}

/// Body of `POST /evaluate_email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateEmailRequest {
    /// Free-text scenario context.
    pub scenario: String,
    /// The question the email answers.
    pub scenario_question: String,
    /// CEFR proficiency label, passed through unmodified.
    pub cefr_level: String,
    /// Email body under evaluation.
    pub email_content: String,
}

/// Body returned by `POST /evaluate_email`.
///
/// `rating` and `format_evaluation` are kept as raw JSON. `None` means the
/// field was absent, `Some(Value::Null)` means it was an explicit `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluateEmailResponse {
    /// Narrative feedback text.
    #[serde(default, deserialize_with = "present")]
    pub feedback: Option<Value>,
    /// Scalar rating, usually an integer in `1..=5`.
    #[serde(default, deserialize_with = "present")]
    pub rating: Option<Value>,
    /// Structured format checks of unspecified shape.
    #[serde(default, deserialize_with = "present")]
    pub format_evaluation: Option<Value>,
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `true` when the backend is serving.
    #[serde(default)]
    pub ok: bool,
}

/// One stored interaction returned by `GET /api/logs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionLogEntry {
    /// Backend row id.
    pub id: i64,
    /// `questions` or `email`.
    pub kind: String,
    /// Scenario text of the stored request.
    #[serde(default)]
    pub scenario: String,
    /// CEFR label of the stored request.
    #[serde(default)]
    pub cefr_level: String,
    /// Serialized request body.
    #[serde(default)]
    pub request_json: String,
    /// Serialized response body.
    #[serde(default)]
    pub response_json: String,
    /// ISO-8601 creation time, if recorded.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Decodes a 2xx response body into `T`.
///
/// # Errors
/// Returns [`ContractError::Decode`] when the body is not valid JSON for `T`.
pub fn parse_response<T: DeserializeOwned>(raw: &[u8]) -> Result<T, ContractError> {
    serde_json::from_slice(raw).map_err(ContractError::Decode)
}

/// Extracts the human-readable `detail` of an error body.
///
/// Returns `None` when the body is not JSON, not an object, or carries a
/// falsy `detail` (missing, `null`, `false`, `0`, or empty string).
pub fn error_detail(raw: &[u8]) -> Option<String> {
    let body: Value = serde_json::from_slice(raw).ok()?;
    let detail = body.get("detail")?;
    is_truthy(detail).then(|| display_value(detail))
}

/// Interprets a `GET /api/files` body as a file list.
///
/// Arrays map item by item through [`display_value`]. Objects, numbers,
/// booleans and the empty string have no length and count as an empty list.
///
/// # Errors
/// Returns [`ContractError::Decode`] for invalid JSON and
/// [`ContractError::NotAFileList`] for `null` or a non-empty string.
pub fn parse_file_list(raw: &[u8]) -> Result<Vec<String>, ContractError> {
    let body: Value = parse_response(raw)?;
    match body {
        Value::Array(items) => Ok(items.iter().map(display_value).collect()),
        Value::String(text) if !text.is_empty() => Err(ContractError::NotAFileList("string")),
        Value::Null => Err(ContractError::NotAFileList("null")),
        _ => Ok(Vec::new()),
    }
}

/// Converts a JSON value to text the way string coercion does in a page
/// script: strings unquoted, arrays comma-joined with `null` items blank,
/// objects as `[object Object]`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Contract decoding errors.
#[derive(Debug, Error)]
pub enum ContractError {
    /// JSON decode failure on a success body.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// File list body had no usable length.
    #[error("file list is {0}")]
    NotAFileList(&'static str),
}
