use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_INSTRUCTIONS: &str =
    "All questions are compulsory.\nFigures to the right indicate full marks.";
pub const DEFAULT_DURATION_MINUTES: u32 = 180;

/// 试卷中的一道题及其分值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperItem {
    pub id: String,
    pub marks: u32,
}

/// 试卷元信息（标题、时长、说明）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperMeta {
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default = "default_instructions")]
    pub instructions: String,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

fn default_instructions() -> String {
    DEFAULT_INSTRUCTIONS.to_string()
}

impl PaperMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: None,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
        }
    }
}

/// 保存试卷的请求体
#[derive(Debug, Clone, Serialize)]
pub struct PaperCreate {
    pub title: String,
    pub category: String,
    pub total_marks: u32,
    pub duration_minutes: u32,
    pub instructions: String,
    pub questions: Vec<PaperItem>,
}

/// 后端保存的试卷记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub total_marks: u32,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub questions: Vec<PaperItem>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// PDF 导出请求体
#[derive(Debug, Clone, Serialize)]
pub struct PdfRequest<'a> {
    pub question_ids: Vec<&'a str>,
    pub title: &'a str,
}

/// TOML 文件描述的一张试卷
///
/// ```toml
/// title = "Physics Mid-term"
/// category = "school"
/// duration_minutes = 90
/// questions = ["q-1", "q-2", "q-3"]
///
/// [marks]
/// q-2 = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperSpec {
    #[serde(flatten)]
    pub meta: PaperMeta,
    pub questions: Vec<String>,
    /// 覆盖题库中的默认分值
    #[serde(default)]
    pub marks: HashMap<String, u32>,
    /// 是否导出 PDF
    #[serde(default = "default_true")]
    pub export_pdf: bool,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

fn default_true() -> bool {
    true
}

impl PaperSpec {
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}
