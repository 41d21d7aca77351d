//! 试卷服务
//!
//! 组合试卷草稿和后端接口：修改分值、保存试卷、导出 PDF、按 TOML 描述组卷

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::clients::ApiClient;
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::paper::{PaperCreate, PaperMeta, PaperRecord, PaperSpec};
use crate::models::question::QuestionUpdate;
use crate::store::PaperDraft;

/// 试卷服务
pub struct PaperService<'a> {
    api: &'a ApiClient,
}

impl<'a> PaperService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// 先改本地分值，再请求后端保存；后端失败时恢复原值并返回错误
    pub async fn update_marks(
        &self,
        draft: &mut PaperDraft,
        question_id: &str,
        marks: u32,
    ) -> AppResult<()> {
        let previous = draft.set_marks(question_id, marks)?;

        match self
            .api
            .update_question(question_id, &QuestionUpdate::marks(marks))
            .await
        {
            Ok(_) => {
                debug!("题目 {} 分值: {} → {}", question_id, previous, marks);
                Ok(())
            }
            Err(e) => {
                warn!(
                    "⚠️ 题目 {} 分值保存失败，恢复为 {}: {}",
                    question_id, previous, e
                );
                draft.set_marks(question_id, previous)?;
                Err(e)
            }
        }
    }

    /// 保存试卷（题目顺序与草稿一致，总分重新计算）
    pub async fn save_paper(&self, draft: &PaperDraft, meta: &PaperMeta) -> AppResult<PaperRecord> {
        let body = build_paper_create(draft, meta)?;
        info!(
            "📋 保存试卷「{}」: {} 道题, 总分 {}",
            body.title,
            body.questions.len(),
            body.total_marks
        );
        self.api.create_paper(&body).await
    }

    /// 导出 PDF，文件名取自标题；返回写入的路径
    pub async fn export_pdf(&self, draft: &PaperDraft, title: &str, out_dir: &Path) -> AppResult<PathBuf> {
        if draft.is_empty() {
            return Err(ValidationError::EmptyPaper.into());
        }

        let bytes = self.api.generate_pdf(&draft.question_ids(), title).await?;

        tokio::fs::create_dir_all(out_dir)
            .await
            .map_err(|e| AppError::file_write_failed(out_dir.display().to_string(), e))?;
        let path = out_dir.join(pdf_file_name(title));
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        info!("✓ PDF 已导出: {} ({} 字节)", path.display(), bytes.len());
        Ok(path)
    }

    /// 按 TOML 描述拉取题目并组成草稿
    ///
    /// 描述中的重复 ID 只保留第一次出现；分值覆盖只改本地副本
    pub async fn build_from_spec(&self, spec: &PaperSpec) -> AppResult<PaperDraft> {
        let mut draft = PaperDraft::new();

        for question_id in &spec.questions {
            if draft.contains(question_id) {
                warn!("⚠️ 试卷「{}」中题目 {} 重复，已跳过", spec.meta.title, question_id);
                continue;
            }
            let question = self.api.get_question(question_id).await?;
            draft.add(question)?;
        }

        for (question_id, marks) in &spec.marks {
            if !draft.contains(question_id) {
                warn!("⚠️ 分值覆盖的题目 {} 不在试卷中，已忽略", question_id);
                continue;
            }
            draft.set_marks(question_id, *marks)?;
        }

        Ok(draft)
    }
}

/// 构建保存试卷的请求体
pub fn build_paper_create(draft: &PaperDraft, meta: &PaperMeta) -> Result<PaperCreate, ValidationError> {
    if meta.title.trim().is_empty() {
        return Err(ValidationError::MissingField { field: "title" });
    }
    if draft.is_empty() {
        return Err(ValidationError::EmptyPaper);
    }
    Ok(PaperCreate {
        title: meta.title.trim().to_string(),
        category: meta.category.clone().unwrap_or_default(),
        total_marks: draft.total_marks(),
        duration_minutes: meta.duration_minutes,
        instructions: meta.instructions.clone(),
        questions: draft.paper_items(),
    })
}

/// 标题中的连续空白替换为下划线
pub fn pdf_file_name(title: &str) -> String {
    let trimmed = title.trim();
    let stem = match Regex::new(r"\s+") {
        Ok(re) => re.replace_all(trimmed, "_").into_owned(),
        Err(_) => trimmed.to_string(),
    };
    let stem = stem.replace(['/', '\\'], "_");
    if stem.is_empty() {
        "Question_Paper.pdf".to_string()
    } else {
        format!("{}.pdf", stem)
    }
}
