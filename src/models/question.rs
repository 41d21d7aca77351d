use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Mcq,
    Long,
    TrueFalse,
    FillBlank,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::Long => "LONG",
            QuestionType::TrueFalse => "TRUE_FALSE",
            QuestionType::FillBlank => "FILL_BLANK",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 题库中的一道题（后端返回的完整记录）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub subject: String,
    pub class_grade: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_b: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_d: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    #[serde(default = "default_marks")]
    pub marks: u32,
    #[serde(default)]
    pub is_starred: bool,
}

fn default_marks() -> u32 {
    1
}

impl Question {
    /// 选择题选项（按 A-D 顺序，跳过空选项）
    pub fn options(&self) -> Vec<&str> {
        if self.question_type != QuestionType::Mcq {
            return Vec::new();
        }
        [&self.option_a, &self.option_b, &self.option_c, &self.option_d]
            .into_iter()
            .filter_map(|o| o.as_deref())
            .filter(|o| !o.trim().is_empty())
            .collect()
    }
}

/// 新建题目的请求体
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionDraft {
    pub question_type: Option<QuestionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub subject: String,
    pub class_grade: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_a: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_b: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_d: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub marks: u32,
    pub is_starred: bool,
}

impl QuestionDraft {
    /// 提交前校验必填字段
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.question_type.is_none() {
            return Err(ValidationError::MissingField {
                field: "question_type",
            });
        }
        let required = [
            ("subject", &self.subject),
            ("class_grade", &self.class_grade),
            ("topic", &self.topic),
            ("question_text", &self.question_text),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField { field });
            }
        }
        if self.marks == 0 {
            return Err(ValidationError::InvalidMarks { marks: self.marks });
        }
        if self.question_type == Some(QuestionType::Mcq)
            && (self.option_a.is_none() || self.option_b.is_none())
        {
            return Err(ValidationError::MissingField { field: "option_a" });
        }
        Ok(())
    }
}

/// 局部更新请求体，只序列化有值的字段
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_starred: Option<bool>,
}

impl QuestionUpdate {
    /// 只修改分值
    pub fn marks(marks: u32) -> Self {
        Self {
            marks: Some(marks),
            ..Default::default()
        }
    }
}

/// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// 题库统计概览（内容由后端决定，原样展示）
pub type QuestionStats = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json() -> serde_json::Value {
        json!({
            "id": "6f1c",
            "question_type": "MCQ",
            "subject": "Physics",
            "class_grade": "12",
            "topic": "Optics",
            "difficulty": "HARD",
            "question_text": "Which lens converges light?",
            "option_a": "Convex",
            "option_b": "Concave",
            "option_c": "",
            "marks": 2,
            "is_starred": true,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    #[test]
    fn test_deserialize_backend_question() {
        let q: Question = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(q.question_type, QuestionType::Mcq);
        assert_eq!(q.difficulty, Difficulty::Hard);
        assert_eq!(q.marks, 2);
        assert!(q.is_starred);
        assert_eq!(q.options(), vec!["Convex", "Concave"]);
    }

    #[test]
    fn test_missing_marks_defaults_to_one() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("marks");
        value["question_type"] = json!("FILL_BLANK");
        let q: Question = serde_json::from_value(value).unwrap();
        assert_eq!(q.marks, 1);
        assert!(q.options().is_empty());
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let body = serde_json::to_value(QuestionUpdate::marks(7)).unwrap();
        assert_eq!(body, json!({ "marks": 7 }));
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = QuestionDraft {
            question_type: Some(QuestionType::Long),
            subject: "History".into(),
            class_grade: "10".into(),
            topic: "Revolutions".into(),
            question_text: "Explain the causes.".into(),
            marks: 5,
            ..Default::default()
        };
        assert_eq!(draft.validate(), Ok(()));

        draft.marks = 0;
        assert_eq!(
            draft.validate(),
            Err(ValidationError::InvalidMarks { marks: 0 })
        );

        draft.marks = 5;
        draft.topic = "  ".into();
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField { field: "topic" })
        );
    }
}
