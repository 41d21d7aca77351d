//! LLM 服务 - 业务能力层
//!
//! 不经过后端，直接调用 LLM 生成复习资料
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::models::artifact::{Flashcard, LectureOutline, MindMap, QuizQuestion};
use crate::services::study_generator::StudyGenerator;

const NOTES_CONTENT_LIMIT: usize = 8000;
const CONTENT_LIMIT: usize = 6000;
const EDUCATOR_JSON_SYSTEM: &str = "You are an expert educator. Return only valid JSON.";

/// LLM 服务
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（去掉首尾空白）
    pub async fn send_to_llm(&self, user_message: &str, system_message: Option<&str>) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.4)
            .max_tokens(4096u32)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }

    async fn ask_json<T: DeserializeOwned>(&self, what: &str, prompt: &str) -> AppResult<T> {
        let response = self.send_to_llm(prompt, Some(EDUCATOR_JSON_SYSTEM)).await?;
        parse_json_response(what, &response)
    }
}

#[async_trait]
impl StudyGenerator for LlmService {
    async fn generate_notes(&self, content: &str, topic: Option<&str>) -> AppResult<String> {
        let prompt = format!(
            "Write concise, well-organised study notes for the content below.\n\n{}\
             Content:\n{}\n\n\
             Use headings and bullet points, highlight key concepts and definitions, \
             and keep the notes brief but complete.",
            topic_line(topic),
            snippet(content, NOTES_CONTENT_LIMIT)
        );
        self.send_to_llm(
            &prompt,
            Some("You are an expert educator who writes clear, concise study notes."),
        )
        .await
    }

    async fn generate_quiz(
        &self,
        content: &str,
        num_questions: u32,
        question_type: &str,
    ) -> AppResult<Vec<QuizQuestion>> {
        let prompt = format!(
            "Write {} quiz questions about the content below.\n\n\
             Content:\n{}\n\n\
             Question type: {} (MCQ, TRUE_FALSE, FILL_BLANK or mixed).\n\
             MCQ questions have four options and one correct answer. \
             Give every question a difficulty of EASY, MEDIUM or HARD.\n\n\
             Reply with a JSON object holding a \"questions\" array whose items have the keys \
             question_text, question_type, options (array or null), correct_answer, \
             difficulty and explanation.",
            num_questions,
            snippet(content, CONTENT_LIMIT),
            question_type
        );
        let value: Value = self.ask_json("quiz", &prompt).await?;
        extract_list(&value, &["questions", "quiz"])
            .map_err(|e| malformed("quiz", e))
    }

    async fn generate_mind_map(&self, content: &str, topic: Option<&str>) -> AppResult<MindMap> {
        let prompt = format!(
            "Build a mind map of the content below.\n\n{}\
             Content:\n{}\n\n\
             Reply with a JSON object of the form \
             {{\"central_topic\": \"...\", \
             \"nodes\": [{{\"id\": \"1\", \"label\": \"...\", \"level\": 1}}, \
             {{\"id\": \"2\", \"label\": \"...\", \"level\": 2, \"parent\": \"1\"}}], \
             \"connections\": [{{\"from\": \"1\", \"to\": \"2\"}}]}}",
            topic_line(topic),
            snippet(content, CONTENT_LIMIT)
        );
        self.ask_json("mind map", &prompt).await
    }

    async fn generate_flashcards(&self, content: &str, num_cards: u32) -> AppResult<Vec<Flashcard>> {
        let prompt = format!(
            "Write {} flashcards about the content below.\n\n\
             Content:\n{}\n\n\
             Each card tests understanding of one key concept. \
             Reply with a JSON object of the form \
             {{\"flashcards\": [{{\"front\": \"question\", \"back\": \"answer\"}}]}}",
            num_cards,
            snippet(content, CONTENT_LIMIT)
        );
        let value: Value = self.ask_json("flashcards", &prompt).await?;
        extract_list(&value, &["flashcards", "cards"])
            .map_err(|e| malformed("flashcards", e))
    }

    async fn generate_lecture_outline(
        &self,
        topic: &str,
        duration: u32,
        level: &str,
    ) -> AppResult<LectureOutline> {
        let prompt = format!(
            "Plan a lecture.\n\nTopic: {}\nDuration: {} minutes\nLevel: {}\n\n\
             Include learning objectives, timed sections with key points, activities and \
             examples, and time for a summary and for questions.\n\n\
             Reply with a JSON object with the keys topic, learning_objectives, \
             sections (title, duration, key_points, activities, examples), \
             summary_duration and qa_duration.",
            topic, duration, level
        );
        self.ask_json("lecture outline", &prompt).await
    }
}

fn topic_line(topic: Option<&str>) -> String {
    match topic {
        Some(t) if !t.trim().is_empty() => format!("Topic: {}\n\n", t.trim()),
        _ => String::new(),
    }
}

/// 按字符截断内容以控制 token
fn snippet(content: &str, limit: usize) -> String {
    content.chars().take(limit).collect()
}

/// 去掉 LLM 经常包裹在 JSON 外的 ``` 代码块标记
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    if let Ok(re) = Regex::new(r"(?s)^```[a-zA-Z]*\s*(.*?)\s*```$") {
        if let Some(inner) = re.captures(trimmed).and_then(|c| c.get(1)) {
            return inner.as_str();
        }
    }
    trimmed
}

/// 解析 LLM 返回的 JSON
pub fn parse_json_response<T: DeserializeOwned>(what: &str, response: &str) -> AppResult<T> {
    serde_json::from_str(strip_code_fence(response)).map_err(|e| malformed(what, e))
}

/// 从 `{"<key>": [...]}`、任意数组字段或顶层数组中取出列表；找不到列表时报错
pub fn extract_list<T: DeserializeOwned>(value: &Value, keys: &[&str]) -> Result<Vec<T>, serde_json::Error> {
    let list = match value {
        Value::Array(_) => Some(value.clone()),
        Value::Object(map) => keys
            .iter()
            .find_map(|k| map.get(*k).filter(|v| v.is_array()))
            .or_else(|| map.values().find(|v| v.is_array()))
            .cloned(),
        _ => None,
    };
    match list {
        Some(list) => Vec::<T>::deserialize(list),
        None => Err(serde::de::Error::custom(format!(
            "响应中没有列表字段（期望 {}）",
            keys.join(" / ")
        ))),
    }
}

fn malformed(what: &str, source: serde_json::Error) -> AppError {
    AppError::Llm(LlmError::MalformedJson {
        what: what.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_mind_map_response() {
        let response = "```json\n{\"central_topic\": \"Cells\", \"nodes\": [{\"id\": \"1\", \"label\": \"Nucleus\", \"level\": 1}], \"connections\": []}\n```";
        let map: MindMap = parse_json_response("mind map", response).unwrap();
        assert_eq!(map.central_topic, "Cells");
        assert_eq!(map.nodes.len(), 1);
    }

    #[test]
    fn test_parse_invalid_json_is_llm_error() {
        let result: AppResult<MindMap> = parse_json_response("mind map", "not json at all");
        assert!(matches!(
            result,
            Err(AppError::Llm(LlmError::MalformedJson { .. }))
        ));
    }

    #[test]
    fn test_extract_flashcards_from_various_shapes() {
        let keyed = json!({ "flashcards": [{ "front": "a", "back": "b" }] });
        let cards: Vec<Flashcard> = extract_list(&keyed, &["flashcards", "cards"]).unwrap();
        assert_eq!(cards[0].term, "a");

        let other_key = json!({ "deck": [{ "term": "c", "definition": "d" }] });
        let cards: Vec<Flashcard> = extract_list(&other_key, &["flashcards", "cards"]).unwrap();
        assert_eq!(cards[0].definition, "d");

        let bare = json!([{ "front": "e", "back": "f" }]);
        let cards: Vec<Flashcard> = extract_list(&bare, &["flashcards"]).unwrap();
        assert_eq!(cards.len(), 1);

        let missing = extract_list::<Flashcard>(&json!({ "note": "none" }), &["flashcards"]);
        assert!(missing.is_err());
    }

    #[test]
    fn test_reply_without_list_is_malformed() {
        let reply = json!({ "error": "rate limited" });
        let result: AppResult<Vec<QuizQuestion>> =
            extract_list(&reply, &["questions", "quiz"]).map_err(|e| malformed("quiz", e));
        assert!(matches!(
            result,
            Err(AppError::Llm(LlmError::MalformedJson { .. }))
        ));
    }

    #[test]
    fn test_snippet_counts_chars() {
        assert_eq!(snippet("héllo", 2), "hé");
        assert_eq!(topic_line(Some("  ")), "");
        assert_eq!(topic_line(Some("Optics")), "Topic: Optics\n\n");
    }

    /// 测试通用 LLM 调用
    #[tokio::test]
    #[ignore]
    async fn test_send_to_llm_simple() {
        let _ = tracing_subscriber::fmt::try_init();

        let service = LlmService::new(&Config::from_env());
        let response = service
            .send_to_llm("Say hello in one word.", Some("You are terse."))
            .await
            .expect("LLM 调用失败");
        assert!(!response.is_empty());
    }
}
