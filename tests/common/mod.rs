#![allow(dead_code)]

use question_paper::{ApiClient, Config};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";
pub const USER_ID: &str = "user-42";
pub const PREFIX: &str = "/api/v1";

pub fn config_for(server: &MockServer) -> Config {
    Config::default()
        .with_api_base_url(format!("{}{}", server.uri(), PREFIX))
        .with_session(TOKEN, USER_ID)
}

pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&config_for(server)).unwrap()
}

pub fn api_path(endpoint: &str) -> String {
    format!("{}{}", PREFIX, endpoint)
}

pub fn question_json(id: &str, marks: u32) -> Value {
    json!({
        "id": id,
        "question_type": "MCQ",
        "subject": "Physics",
        "class_grade": "12",
        "topic": "Optics",
        "difficulty": "MEDIUM",
        "question_text": format!("Question {}", id),
        "option_a": "A",
        "option_b": "B",
        "option_c": "C",
        "option_d": "D",
        "answer_text": "A",
        "marks": marks,
        "is_starred": false
    })
}

pub fn list_json(questions: Vec<Value>, total: u64, page: u32) -> Value {
    json!({
        "questions": questions,
        "total": total,
        "page": page,
        "page_size": 20,
        "total_pages": (total + 19) / 20
    })
}
