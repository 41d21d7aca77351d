mod common;

use std::collections::HashMap;

use common::*;
use question_paper::error::{AppError, ValidationError};
use question_paper::models::paper::{PaperMeta, PaperSpec};
use question_paper::{PaperDraft, PaperService, Question};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn question(id: &str, marks: u32) -> Question {
    serde_json::from_value(question_json(id, marks)).unwrap()
}

fn draft_of(items: &[(&str, u32)]) -> PaperDraft {
    let mut draft = PaperDraft::new();
    for (id, marks) in items {
        draft.add(question(id, *marks)).unwrap();
    }
    draft
}

#[tokio::test]
async fn test_update_marks_keeps_edit_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(api_path("/questions/q1")))
        .and(body_json(json!({ "marks": 5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(question_json("q1", 5)))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let service = PaperService::new(&api);
    let mut draft = draft_of(&[("q1", 2), ("q2", 3)]);

    assert_ok!(service.update_marks(&mut draft, "q1", 5).await);
    assert_eq!(draft.total_marks(), 8);
}

#[tokio::test]
async fn test_update_marks_rolls_back_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(api_path("/questions/q1")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let service = PaperService::new(&api);
    let mut draft = draft_of(&[("q1", 2), ("q2", 3)]);

    let err = assert_err!(service.update_marks(&mut draft, "q1", 9).await);
    assert!(err.is_status(500));
    assert_eq!(draft.get("q1").map(|q| q.marks), Some(2));
    assert_eq!(draft.total_marks(), 5);
}

#[tokio::test]
async fn test_save_paper_posts_ordered_items_and_total() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/teacher/papers")))
        .and(body_json(json!({
            "title": "Optics Test",
            "category": "school",
            "total_marks": 5,
            "duration_minutes": 45,
            "instructions": "Answer all.",
            "questions": [
                { "id": "q2", "marks": 3 },
                { "id": "q1", "marks": 2 }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "paper-1",
            "title": "Optics Test",
            "total_marks": 5,
            "questions": [
                { "id": "q2", "marks": 3 },
                { "id": "q1", "marks": 2 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let service = PaperService::new(&api);
    let draft = draft_of(&[("q2", 3), ("q1", 2)]);
    let mut meta = PaperMeta::new("Optics Test");
    meta.category = Some("school".into());
    meta.duration_minutes = 45;
    meta.instructions = "Answer all.".into();

    let record = assert_ok!(service.save_paper(&draft, &meta).await);
    assert_eq!(record.id, "paper-1");
}

#[tokio::test]
async fn test_empty_paper_is_never_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/teacher/papers")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let service = PaperService::new(&api);
    let err = assert_err!(
        service
            .save_paper(&PaperDraft::new(), &PaperMeta::new("Empty"))
            .await
    );
    assert!(matches!(err, AppError::Validation(ValidationError::EmptyPaper)));
}

#[tokio::test]
async fn test_export_pdf_writes_named_file() {
    let server = MockServer::start().await;
    let pdf = b"%PDF-1.4 fake".to_vec();
    Mock::given(method("POST"))
        .and(path(api_path("/questions/generate-pdf")))
        .and(body_json(json!({
            "question_ids": ["q1", "q2"],
            "title": "Unit  Test 3"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(pdf.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let service = PaperService::new(&api);
    let draft = draft_of(&[("q1", 1), ("q2", 1)]);
    let dir = tempfile::tempdir().unwrap();

    let written = assert_ok!(service.export_pdf(&draft, "Unit  Test 3", dir.path()).await);
    assert_eq!(written, dir.path().join("Unit_Test_3.pdf"));
    assert_eq!(std::fs::read(&written).unwrap(), pdf);
}

#[tokio::test]
async fn test_build_from_spec_skips_duplicates_and_applies_overrides() {
    let server = MockServer::start().await;
    for (id, marks) in [("q1", 1), ("q2", 2)] {
        Mock::given(method("GET"))
            .and(path(api_path(&format!("/questions/{}", id))))
            .respond_with(ResponseTemplate::new(200).set_body_json(question_json(id, marks)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let spec = PaperSpec {
        meta: PaperMeta::new("Optics Unit Paper"),
        questions: vec!["q2".into(), "q1".into(), "q2".into()],
        marks: HashMap::from([("q1".to_string(), 6), ("q9".to_string(), 4)]),
        export_pdf: false,
        file_path: None,
    };

    let api = client_for(&server);
    let draft = assert_ok!(PaperService::new(&api).build_from_spec(&spec).await);
    assert_eq!(draft.question_ids(), vec!["q2", "q1"]);
    assert_eq!(draft.total_marks(), 8);
}
