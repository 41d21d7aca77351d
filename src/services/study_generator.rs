//! 复习资料生成能力
//!
//! 流水线只依赖这个 trait；后端 AI 接口和直连 LLM 各自实现一份。

use async_trait::async_trait;

use crate::clients::ApiClient;
use crate::error::AppResult;
use crate::models::artifact::{Flashcard, LectureOutline, MindMap, QuizQuestion};

#[async_trait]
pub trait StudyGenerator: Send + Sync {
    async fn generate_notes(&self, content: &str, topic: Option<&str>) -> AppResult<String>;

    async fn generate_quiz(
        &self,
        content: &str,
        num_questions: u32,
        question_type: &str,
    ) -> AppResult<Vec<QuizQuestion>>;

    async fn generate_mind_map(&self, content: &str, topic: Option<&str>) -> AppResult<MindMap>;

    async fn generate_flashcards(&self, content: &str, num_cards: u32) -> AppResult<Vec<Flashcard>>;

    async fn generate_lecture_outline(
        &self,
        topic: &str,
        duration: u32,
        level: &str,
    ) -> AppResult<LectureOutline>;
}

/// 走后端 `/ai/*` 接口
#[async_trait]
impl StudyGenerator for ApiClient {
    async fn generate_notes(&self, content: &str, topic: Option<&str>) -> AppResult<String> {
        self.ai_generate_notes(content, topic).await
    }

    async fn generate_quiz(
        &self,
        content: &str,
        num_questions: u32,
        question_type: &str,
    ) -> AppResult<Vec<QuizQuestion>> {
        self.ai_generate_quiz(content, num_questions, question_type).await
    }

    async fn generate_mind_map(&self, content: &str, topic: Option<&str>) -> AppResult<MindMap> {
        self.ai_generate_mind_map(content, topic).await
    }

    async fn generate_flashcards(&self, content: &str, num_cards: u32) -> AppResult<Vec<Flashcard>> {
        self.ai_generate_flashcards(content, num_cards).await
    }

    async fn generate_lecture_outline(
        &self,
        topic: &str,
        duration: u32,
        level: &str,
    ) -> AppResult<LectureOutline> {
        self.ai_generate_lecture_outline(topic, duration, level).await
    }
}
