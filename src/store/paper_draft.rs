//! 试卷草稿
//!
//! 正在组卷的有序题目列表。按题目 ID 去重，插入顺序即卷面顺序；
//! 总分始终等于当前各题分值之和。草稿只存在于内存中，不做持久化。

use crate::error::DraftError;
use crate::models::paper::PaperItem;
use crate::models::question::Question;

/// 试卷草稿
#[derive(Debug, Clone, Default)]
pub struct PaperDraft {
    items: Vec<Question>,
}

impl PaperDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加题目；已存在时返回 `AlreadyPresent`，草稿保持不变
    pub fn add(&mut self, question: Question) -> Result<(), DraftError> {
        if self.contains(&question.id) {
            return Err(DraftError::AlreadyPresent { id: question.id });
        }
        self.items.push(question);
        Ok(())
    }

    /// 移除题目，不存在时什么也不做
    pub fn remove(&mut self, question_id: &str) -> Option<Question> {
        let pos = self.position(question_id)?;
        Some(self.items.remove(pos))
    }

    /// 把 `from` 位置的题目移动到 `to`，中间的题目顺移
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), DraftError> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(DraftError::IndexOutOfRange { index, len });
            }
        }
        let moved = self.items.remove(from);
        self.items.insert(to, moved);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.items.iter().any(|q| q.id == question_id)
    }

    /// 总分，空草稿为 0
    pub fn total_marks(&self) -> u32 {
        self.items.iter().map(|q| q.marks).sum()
    }

    /// 修改本地分值，返回修改前的值
    pub fn set_marks(&mut self, question_id: &str, marks: u32) -> Result<u32, DraftError> {
        if marks == 0 {
            return Err(DraftError::InvalidMarks { marks });
        }
        let question = self
            .items
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| DraftError::NotInDraft {
                id: question_id.to_string(),
            })?;
        Ok(std::mem::replace(&mut question.marks, marks))
    }

    pub fn get(&self, question_id: &str) -> Option<&Question> {
        self.items.iter().find(|q| q.id == question_id)
    }

    pub fn items(&self) -> &[Question] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 按卷面顺序的题目 ID
    pub fn question_ids(&self) -> Vec<&str> {
        self.items.iter().map(|q| q.id.as_str()).collect()
    }

    /// 保存试卷用的 (id, 分值) 列表
    pub fn paper_items(&self) -> Vec<PaperItem> {
        self.items
            .iter()
            .map(|q| PaperItem {
                id: q.id.clone(),
                marks: q.marks,
            })
            .collect()
    }

    fn position(&self, question_id: &str) -> Option<usize> {
        self.items.iter().position(|q| q.id == question_id)
    }
}
