//! Integration tests for the question-generation form.

mod common;

use email_coach_ui::{PanelState, QuestionForm};
use serde_json::json;

#[tokio::test]
async fn question_generation_tests_renders_numbered_questions() {
    let transport =
        common::transport().respond("/generate_questions", 200, r#"{"new_questions":["Q1","Q2"]}"#);
    let mut controller = common::controller(transport);

    let form = QuestionForm {
        file_name: "a.docx".to_string(),
        scenario: "office".to_string(),
        cefr_level: "B2".to_string(),
    };
    let panel = controller.submit_questions(&form).await;
    assert_eq!(panel.text(), "1. Q1\n2. Q2");
}

#[tokio::test]
async fn question_generation_tests_sends_trimmed_fields_and_no_existing_questions() {
    let transport =
        common::transport().respond("/generate_questions", 200, r#"{"new_questions":[]}"#);
    let mut controller = common::controller(transport.clone());

    let form = QuestionForm {
        file_name: "a.docx".to_string(),
        scenario: "  team offsite  ".to_string(),
        cefr_level: "\tC1\n".to_string(),
    };
    let panel = controller.submit_questions(&form).await;
    assert_eq!(panel.state(), &PanelState::Ready(String::new()));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://127.0.0.1:8000/generate_questions");
    assert_eq!(
        requests[0].body,
        Some(json!({
            "file_path": "a.docx",
            "scenario": "team offsite",
            "cefr_level": "C1",
            "existing_questions": []
        }))
    );
}

#[tokio::test]
async fn question_generation_tests_uses_selected_file() {
    let transport = common::transport()
        .respond("/api/files", 200, r#"["a.docx","b.docx"]"#)
        .respond("/generate_questions", 200, r#"{"new_questions":["Q"]}"#);
    let mut controller = common::controller(transport.clone());

    controller.load_files().await;
    assert!(controller.ui_mut().selector.select("b.docx"));
    let form = controller.question_form("s", "A2");
    controller.submit_questions(&form).await;

    let body = transport.requests()[1].body.clone().expect("post has body");
    assert_eq!(body["file_path"], json!("b.docx"));
}

#[tokio::test]
async fn question_generation_tests_missing_questions_render_empty() {
    let transport = common::transport().respond("/generate_questions", 200, "{}");
    let mut controller = common::controller(transport);

    let panel = controller.submit_questions(&QuestionForm::default()).await;
    assert_eq!(panel.text(), "");
    assert!(!panel.is_failed());
}

#[tokio::test]
async fn question_generation_tests_null_questions_render_empty() {
    let transport =
        common::transport().respond("/generate_questions", 200, r#"{"new_questions":null}"#);
    let mut controller = common::controller(transport);

    let panel = controller.submit_questions(&QuestionForm::default()).await;
    assert_eq!(panel.text(), "");
    assert!(!panel.is_failed());
}
