#![warn(missing_docs)]
//! # email-coach-app
//!
//! ## Purpose
//! Orchestrates the API client and UI state for `email-coach`.
//!
//! ## Responsibilities
//! - Load the file list into the selector.
//! - Submit the question-generation and email-evaluation forms and render
//!   their outcome into the matching result panel.
//! - Expose health and interaction-log lookups.
//! - Provide configuration, tracing setup and the build version.
//!
//! ## Data flow
//! Form input -> trimmed request -> [`ApiClient`] -> rendered text ->
//! [`UiState`] panel.
//!
//! ## Ownership and lifetimes
//! [`AppController`] owns both the client and the UI state; each action
//! borrows it mutably for one request, so actions are serialized.
//!
//! ## Error model
//! Form submissions never return errors: failures land in the panel as
//! `Error: <message>`. Setup and lookup failures are wrapped in [`AppError`].
//!
//! ## Privacy notes
//! Scenario and email text are only logged through [`log_preview`].

pub mod config;
mod tracing_init;

use std::sync::Arc;

use email_coach_client::{ApiClient, ApiTransport, ClientError, ReqwestTransport};
use email_coach_ui::{
    EVALUATING_TEXT, EvaluationForm, FileSelector, GENERATING_TEXT, QuestionForm, ResultPanel,
    UiState, render_evaluation, render_interactions, render_questions,
};
use thiserror::Error;

pub use config::{ClientConfig, ConfigError};
pub use tracing_init::init_tracing;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("EMAIL_COACH_VERSION");

/// Longest preview of user text that may appear in logs.
pub const LOG_PREVIEW_CHARS: usize = 40;

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Shortens free text for log fields, marking the cut with `...`.
pub fn log_preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Client UI controller: one client, one UI state.
#[derive(Debug)]
pub struct AppController {
    client: ApiClient,
    ui: UiState,
}

impl AppController {
    /// Creates a controller over an existing client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            ui: UiState::new(APP_VERSION),
        }
    }

    /// Creates a controller over `transport` for the configured base URL.
    ///
    /// # Errors
    /// Returns [`AppError::Client`] when the base URL is rejected.
    pub fn with_transport(
        config: &ClientConfig,
        transport: Arc<dyn ApiTransport>,
    ) -> Result<Self, AppError> {
        let client = ApiClient::new(&config.base_url, transport)?;
        Ok(Self::new(client))
    }

    /// Creates a controller backed by the `reqwest` transport.
    ///
    /// # Errors
    /// Returns [`AppError::Client`] when the transport or base URL fails.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AppError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Current UI state.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Mutable UI state, for selecting a file.
    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    /// Fetches the file list and rebuilds the selector. Never retries.
    pub async fn load_files(&mut self) -> &FileSelector {
        self.ui.selector.clear();
        match self.client.list_files().await {
            Ok(files) => {
                tracing::info!(count = files.len(), "file list loaded");
                self.ui.selector.show_files(&files);
            }
            Err(error) => {
                tracing::warn!(%error, "file list unavailable");
                self.ui.selector.show_load_error();
            }
        }
        &self.ui.selector
    }

    /// Builds a question form from the selector's current value.
    pub fn question_form(&self, scenario: &str, cefr_level: &str) -> QuestionForm {
        QuestionForm {
            file_name: self.ui.selector.selected_value().to_string(),
            scenario: scenario.to_string(),
            cefr_level: cefr_level.to_string(),
        }
    }

    /// Submits the question-generation form into the question panel.
    pub async fn submit_questions(&mut self, form: &QuestionForm) -> &ResultPanel {
        let request = form.to_request();
        tracing::info!(
            file = %request.file_path,
            cefr_level = %request.cefr_level,
            scenario = %log_preview(&request.scenario, LOG_PREVIEW_CHARS),
            "generating questions"
        );

        self.ui.question_panel.begin(GENERATING_TEXT);
        match self.client.generate_questions(&request).await {
            Ok(response) => {
                tracing::info!(count = response.new_questions.len(), "questions generated");
                self.ui
                    .question_panel
                    .succeed(render_questions(&response.new_questions));
            }
            Err(error) => self.ui.question_panel.fail(error.to_string()),
        }
        &self.ui.question_panel
    }

    /// Submits the email-evaluation form into the evaluation panel.
    pub async fn submit_evaluation(&mut self, form: &EvaluationForm) -> &ResultPanel {
        let request = form.to_request();
        tracing::info!(
            cefr_level = %request.cefr_level,
            email_chars = request.email_content.chars().count(),
            question = %log_preview(&request.scenario_question, LOG_PREVIEW_CHARS),
            "evaluating email"
        );

        self.ui.evaluation_panel.begin(EVALUATING_TEXT);
        match self.client.evaluate_email(&request).await {
            Ok(response) => self
                .ui
                .evaluation_panel
                .succeed(render_evaluation(&response)),
            Err(error) => self.ui.evaluation_panel.fail(error.to_string()),
        }
        &self.ui.evaluation_panel
    }

    /// Returns `true` when the backend reports itself healthy.
    ///
    /// # Errors
    /// Returns [`AppError::Client`] when the health check fails.
    pub async fn check_health(&self) -> Result<bool, AppError> {
        Ok(self.client.health().await?.ok)
    }

    /// Fetches and renders the most recent stored interactions.
    ///
    /// # Errors
    /// Returns [`AppError::Client`] when the lookup fails.
    pub async fn recent_interactions(&self) -> Result<String, AppError> {
        let entries = self.client.recent_interactions().await?;
        Ok(render_interactions(&entries))
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Client or transport error.
    #[error("{0}")]
    Client(#[from] ClientError),
    /// Local input could not be read.
    #[error("cannot read {path}: {source}")]
    Input {
        /// Offending path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
