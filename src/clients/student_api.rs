/// 学生复习资料接口
use reqwest::Method;
use serde_json::{json, Value};

use crate::clients::api_client::ApiClient;
use crate::error::AppResult;
use crate::models::artifact::{ArtifactKind, Flashcard, MindMap, QuizQuestion, SavedArtifact};

impl ApiClient {
    pub async fn create_notes(
        &self,
        title: &str,
        content: &str,
        source_pdf_name: Option<&str>,
    ) -> AppResult<SavedArtifact> {
        let body = json!({
            "title": title,
            "content": content,
            "source_pdf_name": source_pdf_name,
        });
        self.save_artifact(ArtifactKind::Notes, &body).await
    }

    pub async fn create_flashcards(
        &self,
        deck_title: &str,
        cards: &[Flashcard],
        source_pdf_name: Option<&str>,
    ) -> AppResult<SavedArtifact> {
        let body = json!({
            "deck_title": deck_title,
            "cards": cards,
            "source_pdf_name": source_pdf_name,
        });
        self.save_artifact(ArtifactKind::Flashcards, &body).await
    }

    pub async fn create_quiz(
        &self,
        title: &str,
        questions: &[QuizQuestion],
        source_pdf_name: Option<&str>,
    ) -> AppResult<SavedArtifact> {
        let body = json!({
            "title": title,
            "questions": questions,
            "source_pdf_name": source_pdf_name,
        });
        self.save_artifact(ArtifactKind::Quiz, &body).await
    }

    pub async fn create_mind_map(
        &self,
        title: &str,
        data: &MindMap,
        source_pdf_name: Option<&str>,
    ) -> AppResult<SavedArtifact> {
        let body = json!({
            "title": title,
            "data": data,
            "source_pdf_name": source_pdf_name,
        });
        self.save_artifact(ArtifactKind::MindMap, &body).await
    }

    /// 列出当前学生保存的某类资料（按创建时间倒序，由后端排序）
    pub async fn list_artifacts(&self, kind: ArtifactKind) -> AppResult<Vec<SavedArtifact>> {
        let endpoint = format!("/student/{}", kind.path());
        let builder = self.request(Method::GET, &endpoint);
        self.send_json(builder, &endpoint).await
    }

    async fn save_artifact(&self, kind: ArtifactKind, body: &Value) -> AppResult<SavedArtifact> {
        let endpoint = format!("/student/{}", kind.path());
        let builder = self.request(Method::POST, &endpoint).json(body);
        self.send_json(builder, &endpoint).await
    }
}
