#![warn(missing_docs)]
//! # email-coach-ui
//!
//! ## Purpose
//! Defines the UI-facing state model for `email-coach`: the file selector,
//! the two form inputs, and the two result panels.
//!
//! ## Responsibilities
//! - Rebuild the file selector from the last file-list fetch.
//! - Trim form fields into wire requests.
//! - Render question lists, evaluations and errors into panel text.
//!
//! ## Data flow
//! Controller events mutate [`UiState`]; the shell prints
//! [`ResultPanel::text`] and [`FileSelector::options`].
//!
//! ## Ownership and lifetimes
//! All state owns its strings so reducers never borrow from responses.
//!
//! ## Error model
//! This crate holds no recoverable errors. Failures arrive as messages and
//! are rendered with an `Error: ` prefix.

use email_coach_contract::{
    EvaluateEmailRequest, EvaluateEmailResponse, GenerateQuestionsRequest, InteractionLogEntry,
    display_value,
};
use serde_json::Value;

/// Placeholder option shown above a non-empty file list.
pub const PLACEHOLDER_TEXT: &str = "-- select a file --";
/// Single option shown when the backend has no documents.
pub const NO_FILES_TEXT: &str = "No .docx files found";
/// Single option shown when the file list could not be fetched.
pub const LOAD_ERROR_TEXT: &str = "Error loading files";
/// Question panel text while a request is in flight.
pub const GENERATING_TEXT: &str = "Generating...";
/// Evaluation panel text while a request is in flight.
pub const EVALUATING_TEXT: &str = "Evaluating...";

/// One entry of the file selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Displayed label.
    pub text: String,
}

impl SelectOption {
    fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Outcome of the last file-list load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorState {
    /// No load has completed.
    #[default]
    Unloaded,
    /// At least one file is listed.
    Files,
    /// The backend listed no files.
    NoFiles,
    /// The list could not be fetched.
    LoadError,
}

/// Selectable list of source documents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileSelector {
    options: Vec<SelectOption>,
    selected: usize,
    disabled: bool,
    state: SelectorState,
}

impl FileSelector {
    /// Current options in display order.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Outcome of the last load.
    pub fn state(&self) -> SelectorState {
        self.state
    }

    /// `true` when the last load failed.
    pub fn is_load_error(&self) -> bool {
        self.state == SelectorState::LoadError
    }

    /// `true` when the selector cannot be used.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Removes every option and re-enables the control.
    pub fn clear(&mut self) {
        self.options.clear();
        self.selected = 0;
        self.disabled = false;
        self.state = SelectorState::Unloaded;
    }

    /// Shows `files` under a placeholder, or the empty-list notice.
    pub fn show_files(&mut self, files: &[String]) {
        self.clear();
        if files.is_empty() {
            self.show_notice(NO_FILES_TEXT);
            self.state = SelectorState::NoFiles;
            return;
        }

        self.state = SelectorState::Files;
        self.options.push(SelectOption::new("", PLACEHOLDER_TEXT));
        self.options
            .extend(files.iter().map(|file| SelectOption::new(file.as_str(), file.as_str())));
    }

    /// Shows the fetch-failure notice.
    pub fn show_load_error(&mut self) {
        self.clear();
        self.show_notice(LOAD_ERROR_TEXT);
        self.state = SelectorState::LoadError;
    }

    fn show_notice(&mut self, text: &str) {
        self.options.push(SelectOption::new("", text));
        self.disabled = true;
    }

    /// Selects the option whose value is `value`.
    ///
    /// Returns `false` and leaves the selection unchanged when the control is
    /// disabled or no option matches.
    pub fn select(&mut self, value: &str) -> bool {
        if self.disabled {
            return false;
        }
        match self.options.iter().position(|option| option.value == value) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Value of the selected option, or `""` when there are no options.
    pub fn selected_value(&self) -> &str {
        self.options
            .get(self.selected)
            .map(|option| option.value.as_str())
            .unwrap_or("")
    }
}

/// Lifecycle of one result panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Request in flight; holds the placeholder text.
    Pending(&'static str),
    /// Rendered success output.
    Ready(String),
    /// Failure message without the `Error: ` prefix.
    Failed(String),
}

/// Text output area below one form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPanel {
    state: PanelState,
}

impl ResultPanel {
    /// Current lifecycle state.
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Marks a request as in flight.
    pub fn begin(&mut self, placeholder: &'static str) {
        self.state = PanelState::Pending(placeholder);
    }

    /// Stores rendered success output.
    pub fn succeed(&mut self, text: impl Into<String>) {
        self.state = PanelState::Ready(text.into());
    }

    /// Stores a failure message.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = PanelState::Failed(message.into());
    }

    /// `true` when the last request failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.state, PanelState::Failed(_))
    }

    /// Text currently displayed in the panel.
    pub fn text(&self) -> String {
        match &self.state {
            PanelState::Idle => String::new(),
            PanelState::Pending(placeholder) => (*placeholder).to_string(),
            PanelState::Ready(text) => text.clone(),
            PanelState::Failed(message) => format!("Error: {message}"),
        }
    }
}

/// Raw inputs of the question-generation form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionForm {
    /// Selected file value, sent as-is.
    pub file_name: String,
    /// Scenario field.
    pub scenario: String,
    /// CEFR level field.
    pub cefr_level: String,
}

impl QuestionForm {
    /// Trims text fields into a wire request.
    pub fn to_request(&self) -> GenerateQuestionsRequest {
        GenerateQuestionsRequest::new(
            self.file_name.as_str(),
            self.scenario.trim(),
            self.cefr_level.trim(),
        )
    }
}

/// Raw inputs of the email-evaluation form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvaluationForm {
    /// Scenario field.
    pub scenario: String,
    /// Scenario question field.
    pub scenario_question: String,
    /// CEFR level field.
    pub cefr_level: String,
    /// Email body field.
    pub email_content: String,
}

impl EvaluationForm {
    /// Trims every field into a wire request.
    pub fn to_request(&self) -> EvaluateEmailRequest {
        EvaluateEmailRequest {
            scenario: self.scenario.trim().to_string(),
            scenario_question: self.scenario_question.trim().to_string(),
            cefr_level: self.cefr_level.trim().to_string(),
            email_content: self.email_content.trim().to_string(),
        }
    }
}

/// Aggregate UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// App version string sourced from root `VERSION`.
    pub version: String,
    /// Source document selector.
    pub selector: FileSelector,
    /// Output of the question-generation form.
    pub question_panel: ResultPanel,
    /// Output of the email-evaluation form.
    pub evaluation_panel: ResultPanel,
}

impl UiState {
    /// Creates empty UI state.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            selector: FileSelector::default(),
            question_panel: ResultPanel::default(),
            evaluation_panel: ResultPanel::default(),
        }
    }
}

/// Renders questions as a 1-indexed, newline-joined enumeration.
pub fn render_questions(questions: &[String]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| format!("{}. {question}", index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders feedback, rating and a pretty-printed format check.
pub fn render_evaluation(response: &EvaluateEmailResponse) -> String {
    format!(
        "Feedback:\n{}\n\nRating: {}\n\nFormat Check:\n{}",
        render_scalar(response.feedback.as_ref()),
        render_scalar(response.rating.as_ref()),
        render_pretty(response.format_evaluation.as_ref()),
    )
}

/// Renders a JSON value the way template interpolation shows it.
///
/// Strings render without quotes, `null` as `null`, and an absent value as
/// `undefined`.
pub fn render_scalar(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), display_value)
}

/// Pretty-prints a JSON value with two-space indentation.
pub fn render_pretty(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
    }
}

/// Renders interaction log entries, one per line.
pub fn render_interactions(entries: &[InteractionLogEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "#{} [{}] {} {} {}",
                entry.id,
                entry.kind,
                entry.cefr_level,
                entry.created_at.as_deref().unwrap_or("-"),
                entry.scenario
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    //! Unit tests for selector and panel rendering.

    use super::*;
    use serde_json::json;

    #[test]
    fn empty_file_list_disables_selector() {
        let mut selector = FileSelector::default();
        selector.show_files(&[]);

        assert!(selector.is_disabled());
        assert_eq!(selector.options().len(), 1);
        assert_eq!(selector.options()[0].text, NO_FILES_TEXT);
        assert_eq!(selector.selected_value(), "");
        assert_eq!(selector.state(), SelectorState::NoFiles);
        assert!(!selector.is_load_error());
    }

    #[test]
    fn file_list_gets_placeholder_and_matching_entries() {
        let mut selector = FileSelector::default();
        selector.show_files(&["a.docx".to_string(), "b.docx".to_string()]);

        assert!(!selector.is_disabled());
        let options = selector.options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0], SelectOption::new("", PLACEHOLDER_TEXT));
        assert_eq!(options[1], SelectOption::new("a.docx", "a.docx"));
        assert_eq!(options[2], SelectOption::new("b.docx", "b.docx"));
        assert_eq!(selector.selected_value(), "");
    }

    #[test]
    fn reload_replaces_previous_options() {
        let mut selector = FileSelector::default();
        selector.show_files(&["a.docx".to_string()]);
        assert!(selector.select("a.docx"));

        selector.show_load_error();
        assert!(selector.is_disabled());
        assert_eq!(selector.options().len(), 1);
        assert_eq!(selector.options()[0].text, LOAD_ERROR_TEXT);
        assert!(!selector.select(""));
        assert!(selector.is_load_error());

        selector.clear();
        assert_eq!(selector.state(), SelectorState::Unloaded);
    }

    #[test]
    fn file_named_like_load_error_is_not_a_failure() {
        let mut selector = FileSelector::default();
        selector.show_files(&[LOAD_ERROR_TEXT.to_string()]);

        assert_eq!(selector.state(), SelectorState::Files);
        assert!(!selector.is_load_error());
        assert_eq!(selector.options()[1].text, LOAD_ERROR_TEXT);
    }

    #[test]
    fn unknown_selection_is_rejected() {
        let mut selector = FileSelector::default();
        selector.show_files(&["a.docx".to_string()]);
        assert!(!selector.select("missing.docx"));
        assert_eq!(selector.selected_value(), "");
    }

    #[test]
    fn questions_render_one_indexed() {
        let questions = vec!["Q1".to_string(), "Q2".to_string()];
        assert_eq!(render_questions(&questions), "1. Q1\n2. Q2");
        assert_eq!(render_questions(&[]), "");
    }

    #[test]
    fn panel_prefixes_failures() {
        let mut panel = ResultPanel::default();
        assert_eq!(panel.text(), "");

        panel.begin(GENERATING_TEXT);
        assert_eq!(panel.text(), "Generating...");

        panel.fail("bad input");
        assert!(panel.is_failed());
        assert_eq!(panel.text(), "Error: bad input");
    }

    #[test]
    fn evaluation_renders_template() {
        let response = EvaluateEmailResponse {
            feedback: Some(json!("Clear and polite.")),
            rating: Some(json!(4)),
            format_evaluation: Some(json!({"greeting": true, "sign_off": false})),
        };

        assert_eq!(
            render_evaluation(&response),
            "Feedback:\nClear and polite.\n\nRating: 4\n\nFormat Check:\n{\n  \"greeting\": true,\n  \"sign_off\": false\n}"
        );
    }

    #[test]
    fn absent_evaluation_fields_render_undefined() {
        let rendered = render_evaluation(&EvaluateEmailResponse::default());
        assert_eq!(
            rendered,
            "Feedback:\nundefined\n\nRating: undefined\n\nFormat Check:\nundefined"
        );
    }

    #[test]
    fn null_evaluation_fields_render_null() {
        let response = EvaluateEmailResponse {
            feedback: Some(json!("ok")),
            rating: Some(Value::Null),
            format_evaluation: Some(Value::Null),
        };
        assert_eq!(
            render_evaluation(&response),
            "Feedback:\nok\n\nRating: null\n\nFormat Check:\nnull"
        );
        assert_eq!(render_scalar(Some(&json!(["a", null, 3]))), "a,,3");
    }

    #[test]
    fn forms_trim_text_fields() {
        let form = QuestionForm {
            file_name: "a.docx".to_string(),
            scenario: "  office move \n".to_string(),
            cefr_level: " B2 ".to_string(),
        };
        let request = form.to_request();
        assert_eq!(request.scenario, "office move");
        assert_eq!(request.cefr_level, "B2");
        assert!(request.existing_questions.is_empty());
    }
}
