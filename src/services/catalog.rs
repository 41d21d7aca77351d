//! 题库浏览会话
//!
//! 持有当前筛选条件和展示中的题目列表。每次刷新都用后端响应整体替换列表和总数；
//! 收藏切换用服务端返回的题目替换对应条目。

use tracing::{debug, info};

use crate::clients::ApiClient;
use crate::error::{AppResult, DraftError};
use crate::models::filter::{FilterField, QuestionFilter};
use crate::models::profile::Profile;
use crate::models::question::Question;
use crate::store::PaperDraft;

#[derive(Debug, Clone, Default)]
pub struct CatalogSession {
    filter: QuestionFilter,
    questions: Vec<Question>,
    total: u64,
}

impl CatalogSession {
    pub fn new(filter: QuestionFilter) -> Self {
        Self {
            filter,
            questions: Vec::new(),
            total: 0,
        }
    }

    /// 按用户档案固定方向
    pub fn for_profile(profile: Option<&Profile>) -> Self {
        let category = profile
            .and_then(|p| p.category)
            .map(|c| c.as_str().to_string())
            .unwrap_or_default();
        Self::new(QuestionFilter::for_category(category))
    }

    pub fn filter(&self) -> &QuestionFilter {
        &self.filter
    }

    /// 修改筛选字段（回到第 1 页）
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filter.set(field, value);
    }

    pub fn set_page(&mut self, page: u32) {
        self.filter.set_page(page);
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.filter.set_page_size(page_size);
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
    }

    /// 按当前筛选条件重新拉取列表
    pub async fn refresh(&mut self, api: &ApiClient) -> AppResult<()> {
        let response = api.list_questions(&self.filter).await?;
        debug!(
            "题库第 {} 页: {} 道题 / 共 {} 道",
            response.page,
            response.questions.len(),
            response.total
        );
        self.questions = response.questions;
        self.total = response.total;
        Ok(())
    }

    /// 切换收藏，并用服务端返回的题目替换列表中的条目
    pub async fn toggle_star(&mut self, api: &ApiClient, question_id: &str) -> AppResult<Question> {
        let updated = api.toggle_star(question_id).await?;
        if let Some(slot) = self.questions.iter_mut().find(|q| q.id == updated.id) {
            *slot = updated.clone();
        }
        info!(
            "{} 题目 {}",
            if updated.is_starred { "⭐ 已收藏" } else { "已取消收藏" },
            updated.id
        );
        Ok(updated)
    }

    /// 删除题目，并从当前列表中移除
    pub async fn delete(&mut self, api: &ApiClient, question_id: &str) -> AppResult<()> {
        api.delete_question(question_id).await?;
        let before = self.questions.len();
        self.questions.retain(|q| q.id != question_id);
        if self.questions.len() < before {
            self.total = self.total.saturating_sub(1);
        }
        Ok(())
    }

    /// 点选题目卡片：把题目加入试卷草稿
    pub fn select(&self, question_id: &str, draft: &mut PaperDraft) -> Result<(), DraftError> {
        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| DraftError::NotDisplayed {
                id: question_id.to_string(),
            })?;
        draft.add(question.clone())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u64 {
        let page_size = u64::from(self.filter.page_size.max(1));
        (self.total + page_size - 1) / page_size
    }

    #[cfg(test)]
    pub(crate) fn with_questions(mut self, questions: Vec<Question>, total: u64) -> Self {
        self.questions = questions;
        self.total = total;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Category, Role};

    fn question(id: &str) -> Question {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "question_type": "LONG",
            "subject": "Biology",
            "class_grade": "11",
            "topic": "Cells",
            "question_text": "Describe mitosis.",
            "marks": 4
        }))
        .unwrap()
    }

    #[test]
    fn test_profile_category_is_always_in_filter() {
        let profile = Profile {
            id: "p".into(),
            role: Role::Student,
            category: Some(Category::Competition),
            categories: None,
        };
        let mut session = CatalogSession::for_profile(Some(&profile));
        session.reset_filters();
        assert_eq!(session.filter().category, "competition");
    }

    #[test]
    fn test_select_adds_displayed_question_once() {
        let session =
            CatalogSession::default().with_questions(vec![question("a"), question("b")], 2);
        let mut draft = PaperDraft::new();

        session.select("b", &mut draft).unwrap();
        assert_eq!(draft.total_marks(), 4);
        assert_eq!(
            session.select("b", &mut draft),
            Err(DraftError::AlreadyPresent { id: "b".into() })
        );
        assert_eq!(
            session.select("zzz", &mut draft),
            Err(DraftError::NotDisplayed { id: "zzz".into() })
        );
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let mut session = CatalogSession::default().with_questions(Vec::new(), 41);
        assert_eq!(session.total_pages(), 3);
        session.set_page_size(41);
        assert_eq!(session.total_pages(), 1);
    }

    #[test]
    fn test_filter_change_returns_to_first_page() {
        let mut session = CatalogSession::default();
        session.set_page(5);
        session.set_filter(FilterField::Subject, "Chemistry");
        assert_eq!(session.filter().page, 1);
    }
}
