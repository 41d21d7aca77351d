use serde::{Deserialize, Serialize};

/// `/ai/process-pdf` 的响应：上传后立即生成的笔记
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedPdf {
    pub filename: String,
    pub notes: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl ProcessedPdf {
    /// 后续生成使用的上下文：优先原文，缺失时退回笔记
    pub fn context(&self) -> &str {
        match self.text.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => &self.notes,
        }
    }
}

/// `/ai/extract-pdf-text` 的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question_text: String,
    pub question_type: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// 闪卡；写出时用 front/back，读入时也接受 term/definition、question/answer
///
/// 保存接口只接受字符串值，`id` 以字符串发送
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub id: Option<String>,
    #[serde(rename = "front", alias = "term", alias = "question")]
    pub term: String,
    #[serde(rename = "back", alias = "definition", alias = "answer")]
    pub definition: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindMapNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindMapConnection {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindMap {
    pub central_topic: String,
    #[serde(default)]
    pub nodes: Vec<MindMapNode>,
    #[serde(default)]
    pub connections: Vec<MindMapConnection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LectureSection {
    pub title: String,
    pub duration: u32,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LectureOutline {
    pub topic: String,
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    #[serde(default)]
    pub sections: Vec<LectureSection>,
    #[serde(default)]
    pub summary_duration: u32,
    #[serde(default)]
    pub qa_duration: u32,
}

/// 一次上传得到的全部复习资料，随流水线逐步填充
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudyBundle {
    pub filename: String,
    pub notes: String,
    pub quiz: Option<Vec<QuizQuestion>>,
    pub mind_map: Option<MindMap>,
    pub flashcards: Option<Vec<Flashcard>>,
}

impl StudyBundle {
    pub fn from_processed(processed: &ProcessedPdf) -> Self {
        Self {
            filename: processed.filename.clone(),
            notes: processed.notes.clone(),
            ..Default::default()
        }
    }
}

/// 学生可保存的复习资料种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Notes,
    Flashcards,
    Quiz,
    MindMap,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Notes,
        ArtifactKind::Flashcards,
        ArtifactKind::Quiz,
        ArtifactKind::MindMap,
    ];

    /// `/student/` 下的路径
    pub fn path(self) -> &'static str {
        match self {
            ArtifactKind::Notes => "notes",
            ArtifactKind::Flashcards => "flashcards",
            ArtifactKind::Quiz => "quizzes",
            ArtifactKind::MindMap => "mindmaps",
        }
    }

    /// 保存时的默认标题
    pub fn title_for(self, filename: &str) -> String {
        match self {
            ArtifactKind::Notes => format!("Notes: {}", filename),
            ArtifactKind::Flashcards => format!("Deck: {}", filename),
            ArtifactKind::Quiz => format!("Quiz: {}", filename),
            ArtifactKind::MindMap => format!("Map: {}", filename),
        }
    }
}

/// 后端保存的复习资料；除标识字段外内容原样保留
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedArtifact {
    pub id: String,
    #[serde(default, alias = "deck_title")]
    pub title: Option<String>,
    #[serde(default)]
    pub source_pdf_name: Option<String>,
    #[serde(flatten)]
    pub content: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_falls_back_to_notes() {
        let mut processed = ProcessedPdf {
            filename: "ch1.pdf".into(),
            notes: "- key idea".into(),
            text: Some("   ".into()),
        };
        assert_eq!(processed.context(), "- key idea");
        processed.text = Some("full text".into());
        assert_eq!(processed.context(), "full text");
        processed.text = None;
        assert_eq!(processed.context(), "- key idea");
    }

    #[test]
    fn test_flashcard_accepts_front_back() {
        let card: Flashcard =
            serde_json::from_value(json!({ "front": "F = ?", "back": "ma" })).unwrap();
        assert_eq!(card.term, "F = ?");
        assert_eq!(card.definition, "ma");
        assert_eq!(card.id, None);
    }

    #[test]
    fn test_flashcard_writes_front_back_with_string_id() {
        let card: Flashcard =
            serde_json::from_value(json!({ "id": 3, "term": "F = ?", "definition": "ma" })).unwrap();
        assert_eq!(card.id.as_deref(), Some("3"));
        assert_eq!(
            serde_json::to_value(&card).unwrap(),
            json!({ "id": "3", "front": "F = ?", "back": "ma" })
        );

        let plain: Flashcard =
            serde_json::from_value(json!({ "question": "q", "answer": "a" })).unwrap();
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({ "front": "q", "back": "a" })
        );
    }

    #[test]
    fn test_saved_artifact_keeps_payload() {
        let saved: SavedArtifact = serde_json::from_value(json!({
            "id": "n1",
            "deck_title": "Deck: ch1.pdf",
            "cards": [{ "term": "a", "definition": "b" }]
        }))
        .unwrap();
        assert_eq!(saved.title.as_deref(), Some("Deck: ch1.pdf"));
        assert!(saved.content.contains_key("cards"));
    }
}
