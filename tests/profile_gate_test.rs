mod common;

use common::*;
use question_paper::models::profile::{Category, ProfileCreate};
use question_paper::{ApiClient, Config, ProfileGate, Route};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_signed_out_never_calls_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/profile/me")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config::default().with_api_base_url(format!("{}{}", server.uri(), PREFIX));
    let api = ApiClient::new(&config).unwrap();
    let decision = ProfileGate::new(&api).resolve().await.unwrap();
    assert_eq!(decision.route, Route::SignIn);
}

#[tokio::test]
async fn test_no_profile_routes_to_onboarding_then_dashboard() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/profile/me")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Profile not found" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/profile")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "role": "student",
            "category": "college"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let gate = ProfileGate::new(&api);

    let decision = gate.resolve().await.unwrap();
    assert_eq!(decision.route, Route::Onboarding);
    assert!(decision.profile.is_none());

    let decision = gate
        .complete_onboarding(&ProfileCreate::student(Category::College))
        .await
        .unwrap();
    assert_eq!(decision.route, Route::StudentDashboard);
}

#[tokio::test]
async fn test_incomplete_student_profile_routes_to_onboarding() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/profile/me")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "role": "student"
        })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let decision = ProfileGate::new(&api).resolve().await.unwrap();
    assert_eq!(decision.route, Route::Onboarding);
}

#[tokio::test]
async fn test_teacher_profile_routes_to_teacher_dashboard() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/profile/me")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p2",
            "role": "teacher",
            "categories": ["school", "competition"]
        })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let decision = ProfileGate::new(&api).resolve().await.unwrap();
    assert_eq!(decision.route, Route::TeacherDashboard);
}

#[tokio::test]
async fn test_gate_surfaces_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/profile/me")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = ProfileGate::new(&api).resolve().await.unwrap_err();
    assert!(err.is_status(503));
}
