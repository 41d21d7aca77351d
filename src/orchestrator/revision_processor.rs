//! 单个 PDF 处理器 - 编排层
//!
//! 上传一份学习资料 PDF，跑完复习资料流水线并保存到学生账户

use std::path::Path;

use tracing::{error, info};

use crate::clients::{ApiClient, PdfUpload};
use crate::config::Config;
use crate::error::AppResult;
use crate::services::StudyGenerator;
use crate::workflow::{PipelineStage, StudyPipeline};

/// 单份 PDF 的处理结果
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RevisionReport {
    pub filename: String,
    pub saved: usize,
    /// 中途失败的阶段
    pub failed_stage: Option<PipelineStage>,
}

/// 处理单个 PDF
///
/// # 参数
/// - `api`: 后端客户端（上传与保存）
/// - `generator`: 测验/导图/闪卡生成器
/// - `pdf_path`: PDF 路径
/// - `pdf_index`: 索引（用于日志）
/// - `config`: 配置
pub async fn process_pdf(
    api: &ApiClient,
    generator: &dyn StudyGenerator,
    pdf_path: &Path,
    pdf_index: usize,
    config: &Config,
) -> AppResult<RevisionReport> {
    info!("[PDF {}] 开始处理: {}", pdf_index, pdf_path.display());

    let upload = PdfUpload::from_path(pdf_path).await?;
    let pipeline = StudyPipeline::new(api, generator, config);

    let outcome = pipeline
        .run(upload, None, |stage, bundle| {
            info!("[PDF {}] ✓ {} 就绪: {}", pdf_index, stage, bundle.filename);
        })
        .await?;

    let failed_stage = outcome.failure.as_ref().map(|f| f.stage);
    if let Some(failure) = &outcome.failure {
        error!(
            "[PDF {}] {} 阶段失败，已完成的资料仍会保存: {}",
            pdf_index, failure.stage, failure.error
        );
    }

    let saved = pipeline.persist(&outcome.bundle).await?;
    info!("[PDF {}] ✅ 处理完成，保存 {} 份资料", pdf_index, saved.len());

    Ok(RevisionReport {
        filename: outcome.bundle.filename,
        saved: saved.len(),
        failed_stage,
    })
}
