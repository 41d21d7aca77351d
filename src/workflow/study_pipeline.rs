//! 复习资料流水线 - 流程层
//!
//! 一次 PDF 上传的完整处理流程：
//! 1. process-pdf → 笔记（立即回调）
//! 2. 测验 → 思维导图 → 闪卡，严格逐个执行
//!
//! 任一阶段失败即停止后续阶段，已完成的资料保留在结果中

use std::fmt;

use tracing::{info, warn};

use crate::clients::{ApiClient, PdfUpload};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::artifact::{ArtifactKind, ProcessedPdf, SavedArtifact, StudyBundle};
use crate::services::StudyGenerator;

pub const MIXED_QUESTION_TYPE: &str = "mixed";

/// 流水线阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Notes,
    Quiz,
    MindMap,
    Flashcards,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Notes => "笔记",
            PipelineStage::Quiz => "测验",
            PipelineStage::MindMap => "思维导图",
            PipelineStage::Flashcards => "闪卡",
        };
        f.write_str(name)
    }
}

/// 某个阶段的失败
#[derive(Debug)]
pub struct StageFailure {
    pub stage: PipelineStage,
    pub error: AppError,
}

/// 流水线结果
#[derive(Debug)]
pub struct PipelineOutcome {
    pub bundle: StudyBundle,
    pub failure: Option<StageFailure>,
}

impl PipelineOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// 复习资料流水线
pub struct StudyPipeline<'a, G: StudyGenerator + ?Sized> {
    api: &'a ApiClient,
    generator: &'a G,
    quiz_question_count: u32,
    flashcard_count: u32,
}

impl<'a, G: StudyGenerator + ?Sized> StudyPipeline<'a, G> {
    pub fn new(api: &'a ApiClient, generator: &'a G, config: &Config) -> Self {
        Self {
            api,
            generator,
            quiz_question_count: config.quiz_question_count,
            flashcard_count: config.flashcard_count,
        }
    }

    /// 上传 PDF 并跑完整条流水线
    ///
    /// # 参数
    /// - `upload`: 待上传的 PDF
    /// - `topic`: 可选主题，用于笔记和思维导图生成
    /// - `on_update`: 每完成一个阶段回调一次（笔记阶段在上传返回后立即回调）
    ///
    /// # 返回
    /// 上传失败返回 `Err`；之后的阶段失败记录在 `PipelineOutcome::failure`
    pub async fn run<F>(
        &self,
        upload: PdfUpload,
        topic: Option<&str>,
        on_update: F,
    ) -> AppResult<PipelineOutcome>
    where
        F: FnMut(PipelineStage, &StudyBundle) + Send,
    {
        info!("📄 上传 PDF: {} ({} 字节)", upload.filename, upload.bytes.len());
        let processed = self.api.process_pdf(upload, topic).await?;
        Ok(self.continue_with(&processed, topic, on_update).await)
    }

    /// 从已处理的 PDF 开始，依次生成测验、思维导图和闪卡；主题传给思维导图
    pub async fn continue_with<F>(
        &self,
        processed: &ProcessedPdf,
        topic: Option<&str>,
        mut on_update: F,
    ) -> PipelineOutcome
    where
        F: FnMut(PipelineStage, &StudyBundle) + Send,
    {
        let mut bundle = StudyBundle::from_processed(processed);
        on_update(PipelineStage::Notes, &bundle);

        let context = processed.context();

        match self
            .generator
            .generate_quiz(context, self.quiz_question_count, MIXED_QUESTION_TYPE)
            .await
        {
            Ok(quiz) => {
                info!("✓ 测验生成完成: {} 道题", quiz.len());
                bundle.quiz = Some(quiz);
                on_update(PipelineStage::Quiz, &bundle);
            }
            Err(e) => return stop(bundle, PipelineStage::Quiz, e),
        }

        match self.generator.generate_mind_map(context, topic).await {
            Ok(map) => {
                info!("✓ 思维导图生成完成: {} 个节点", map.nodes.len());
                bundle.mind_map = Some(map);
                on_update(PipelineStage::MindMap, &bundle);
            }
            Err(e) => return stop(bundle, PipelineStage::MindMap, e),
        }

        match self
            .generator
            .generate_flashcards(context, self.flashcard_count)
            .await
        {
            Ok(cards) => {
                info!("✓ 闪卡生成完成: {} 张", cards.len());
                bundle.flashcards = Some(cards);
                on_update(PipelineStage::Flashcards, &bundle);
            }
            Err(e) => return stop(bundle, PipelineStage::Flashcards, e),
        }

        PipelineOutcome {
            bundle,
            failure: None,
        }
    }

    /// 把已生成的资料保存到学生账户
    pub async fn persist(&self, bundle: &StudyBundle) -> AppResult<Vec<SavedArtifact>> {
        let source = Some(bundle.filename.as_str());
        let mut saved = Vec::new();

        if !bundle.notes.trim().is_empty() {
            let title = ArtifactKind::Notes.title_for(&bundle.filename);
            saved.push(self.api.create_notes(&title, &bundle.notes, source).await?);
        }
        if let Some(quiz) = &bundle.quiz {
            let title = ArtifactKind::Quiz.title_for(&bundle.filename);
            saved.push(self.api.create_quiz(&title, quiz, source).await?);
        }
        if let Some(map) = &bundle.mind_map {
            let title = ArtifactKind::MindMap.title_for(&bundle.filename);
            saved.push(self.api.create_mind_map(&title, map, source).await?);
        }
        if let Some(cards) = &bundle.flashcards {
            let title = ArtifactKind::Flashcards.title_for(&bundle.filename);
            saved.push(self.api.create_flashcards(&title, cards, source).await?);
        }

        info!("💾 已保存 {} 份复习资料: {}", saved.len(), bundle.filename);
        Ok(saved)
    }
}

fn stop(bundle: StudyBundle, stage: PipelineStage, error: AppError) -> PipelineOutcome {
    warn!("⚠️ {} 生成失败，停止后续阶段: {}", stage, error);
    PipelineOutcome {
        bundle,
        failure: Some(StageFailure { stage, error }),
    }
}
