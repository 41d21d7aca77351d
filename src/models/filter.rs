//! 题库筛选条件
//!
//! 用户每修改一个筛选字段，分页都会回到第 1 页；
//! 生成查询参数时，空值字段一律省略。

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// 可由用户修改的筛选字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Subject,
    ClassGrade,
    Topic,
    Difficulty,
    QuestionType,
    Source,
    Starred,
    Search,
}

/// 题库筛选条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFilter {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub class_grade: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub question_type: String,
    #[serde(default)]
    pub source: String,
    /// 学生档案中的方向，由登录用户决定，不随重置清空
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_starred: Option<bool>,
    #[serde(default)]
    pub search: String,
    pub page: u32,
    pub page_size: u32,
}

impl Default for QuestionFilter {
    fn default() -> Self {
        Self {
            subject: String::new(),
            class_grade: String::new(),
            topic: String::new(),
            difficulty: String::new(),
            question_type: String::new(),
            source: String::new(),
            category: String::new(),
            is_starred: None,
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QuestionFilter {
    /// 固定方向的筛选条件
    pub fn for_category(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Default::default()
        }
    }

    /// 修改单个筛选字段，并回到第 1 页
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Subject => self.subject = value,
            FilterField::ClassGrade => self.class_grade = value,
            FilterField::Topic => self.topic = value,
            FilterField::Difficulty => self.difficulty = value,
            FilterField::QuestionType => self.question_type = value,
            FilterField::Source => self.source = value,
            FilterField::Search => self.search = value,
            FilterField::Starred => {
                self.is_starred = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "1" | "yes" => Some(true),
                    "false" | "0" | "no" => Some(false),
                    _ => None,
                }
            }
        }
        self.page = 1;
    }

    /// 翻页（不影响其他字段）
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// 修改每页条数，限制在 1..=100 并回到第 1 页
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.page = 1;
    }

    /// 清空所有筛选，保留方向
    pub fn reset(&mut self) {
        let category = std::mem::take(&mut self.category);
        *self = Self::for_category(category);
    }

    /// 构建查询参数，省略空值
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        let text_fields = [
            ("subject", &self.subject),
            ("class_grade", &self.class_grade),
            ("topic", &self.topic),
            ("difficulty", &self.difficulty),
            ("question_type", &self.question_type),
            ("source", &self.source),
            ("category", &self.category),
            ("search", &self.search),
        ];
        for (key, value) in text_fields {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                pairs.push((key, trimmed.to_string()));
            }
        }
        if let Some(starred) = self.is_starred {
            pairs.push(("is_starred", starred.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_only_has_paging() {
        let filter = QuestionFilter::default();
        assert_eq!(
            filter.query_pairs(),
            vec![("page", "1".to_string()), ("page_size", "20".to_string())]
        );
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut filter = QuestionFilter::default();
        filter.set_page(4);
        assert_eq!(filter.page, 4);

        filter.set(FilterField::Difficulty, "HARD");
        assert_eq!(filter.page, 1);
        assert_eq!(filter.difficulty, "HARD");
    }

    #[test]
    fn test_blank_values_are_omitted() {
        let mut filter = QuestionFilter::for_category("school");
        filter.set(FilterField::Subject, "Math");
        filter.set(FilterField::Search, "   ");
        filter.set(FilterField::Starred, "true");

        let pairs = filter.query_pairs();
        assert!(pairs.contains(&("subject", "Math".to_string())));
        assert!(pairs.contains(&("category", "school".to_string())));
        assert!(pairs.contains(&("is_starred", "true".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "search"));
    }

    #[test]
    fn test_reset_keeps_category() {
        let mut filter = QuestionFilter::for_category("college");
        filter.set(FilterField::Topic, "Kinematics");
        filter.set_page(3);
        filter.reset();
        assert_eq!(filter, QuestionFilter::for_category("college"));
    }

    #[test]
    fn test_page_size_is_clamped() {
        let mut filter = QuestionFilter::default();
        filter.set_page(2);
        filter.set_page_size(500);
        assert_eq!(filter.page_size, MAX_PAGE_SIZE);
        assert_eq!(filter.page, 1);
        filter.set_page_size(0);
        assert_eq!(filter.page_size, 1);
    }
}
