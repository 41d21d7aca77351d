/// AI 生成接口
///
/// 文本类接口以表单提交，PDF 类接口以 multipart 上传
use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;

use crate::clients::api_client::ApiClient;
use crate::error::{AppError, AppResult};
use crate::models::artifact::{
    ExtractedText, Flashcard, LectureOutline, MindMap, ProcessedPdf, QuizQuestion,
};

/// 待上传的 PDF
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl PdfUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// 从磁盘读取 PDF
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.pdf".to_string());
        Ok(Self { filename, bytes })
    }

    fn into_part(self) -> AppResult<Part> {
        Part::bytes(self.bytes)
            .file_name(self.filename)
            .mime_str("application/pdf")
            .map_err(AppError::from)
    }
}

#[derive(Deserialize)]
struct NotesResponse {
    notes: String,
}

#[derive(Deserialize)]
struct FlashcardsResponse {
    flashcards: Vec<Flashcard>,
}

#[derive(Deserialize)]
struct QuizResponse {
    questions: Vec<QuizQuestion>,
}

#[derive(Deserialize)]
struct MindMapResponse {
    mindmap: MindMap,
}

#[derive(Deserialize)]
struct OutlineResponse {
    outline: LectureOutline,
}

impl ApiClient {
    /// 提取 PDF 文本
    pub async fn extract_pdf_text(&self, upload: PdfUpload) -> AppResult<ExtractedText> {
        let endpoint = "/ai/extract-pdf-text";
        let form = Form::new().part("file", upload.into_part()?);
        let builder = self.request(Method::POST, endpoint).multipart(form);
        self.send_json(builder, endpoint).await
    }

    /// 上传 PDF 并生成笔记（单次请求）
    pub async fn process_pdf(&self, upload: PdfUpload, topic: Option<&str>) -> AppResult<ProcessedPdf> {
        let endpoint = "/ai/process-pdf";
        let mut form = Form::new().part("file", upload.into_part()?);
        if let Some(topic) = topic {
            form = form.text("topic", topic.to_string());
        }
        let builder = self.request(Method::POST, endpoint).multipart(form);
        self.send_json(builder, endpoint).await
    }

    pub async fn ai_generate_notes(&self, content: &str, topic: Option<&str>) -> AppResult<String> {
        let endpoint = "/ai/generate-notes";
        let mut fields = vec![("content", content.to_string())];
        if let Some(topic) = topic {
            fields.push(("topic", topic.to_string()));
        }
        let builder = self.request(Method::POST, endpoint).form(&fields);
        let response: NotesResponse = self.send_json(builder, endpoint).await?;
        Ok(response.notes)
    }

    pub async fn ai_generate_flashcards(&self, content: &str, num_cards: u32) -> AppResult<Vec<Flashcard>> {
        let endpoint = "/ai/generate-flashcards";
        let fields = [
            ("content", content.to_string()),
            ("num_cards", num_cards.to_string()),
        ];
        let builder = self.request(Method::POST, endpoint).form(&fields);
        let response: FlashcardsResponse = self.send_json(builder, endpoint).await?;
        Ok(response.flashcards)
    }

    pub async fn ai_generate_quiz(
        &self,
        content: &str,
        num_questions: u32,
        question_type: &str,
    ) -> AppResult<Vec<QuizQuestion>> {
        let endpoint = "/ai/generate-quiz";
        let fields = [
            ("content", content.to_string()),
            ("num_questions", num_questions.to_string()),
            ("question_type", question_type.to_string()),
        ];
        let builder = self.request(Method::POST, endpoint).form(&fields);
        let response: QuizResponse = self.send_json(builder, endpoint).await?;
        Ok(response.questions)
    }

    pub async fn ai_generate_mind_map(&self, content: &str, topic: Option<&str>) -> AppResult<MindMap> {
        let endpoint = "/ai/generate-mindmap";
        let mut fields = vec![("content", content.to_string())];
        if let Some(topic) = topic {
            fields.push(("topic", topic.to_string()));
        }
        let builder = self.request(Method::POST, endpoint).form(&fields);
        let response: MindMapResponse = self.send_json(builder, endpoint).await?;
        Ok(response.mindmap)
    }

    pub async fn ai_generate_lecture_outline(
        &self,
        topic: &str,
        duration: u32,
        level: &str,
    ) -> AppResult<LectureOutline> {
        let endpoint = "/ai/generate-lecture-outline";
        let fields = [
            ("topic", topic.to_string()),
            ("duration", duration.to_string()),
            ("level", level.to_string()),
        ];
        let builder = self.request(Method::POST, endpoint).form(&fields);
        let response: OutlineResponse = self.send_json(builder, endpoint).await?;
        Ok(response.outline)
    }
}
