//! 单个试卷处理器 - 编排层
//!
//! ## 职责
//!
//! 处理一份 TOML 试卷描述：
//!
//! 1. **组卷**：按描述拉取题目并组成草稿（应用分值覆盖）
//! 2. **保存**：提交试卷到教师账户
//! 3. **导出**：按需生成 PDF
//! 4. **归档**：把已处理的 TOML 重命名为 `.done`
//! 5. **统计输出**：记录题目数和总分

use std::path::Path;

use tracing::{error, info, warn};

use crate::clients::ApiClient;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::paper::PaperSpec;
use crate::services::PaperService;
use crate::utils::truncate_text;

/// 单份试卷的处理结果
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PaperReport {
    pub paper_id: String,
    pub question_count: usize,
    pub total_marks: u32,
    pub pdf_path: Option<String>,
}

/// 处理单个试卷
///
/// # 参数
/// - `api`: 后端客户端
/// - `spec`: 试卷描述
/// - `paper_index`: 试卷索引（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 返回保存后的试卷信息；PDF 导出失败只记录日志
pub async fn process_paper(
    api: &ApiClient,
    spec: PaperSpec,
    paper_index: usize,
    config: &Config,
) -> AppResult<PaperReport> {
    log_paper_start(paper_index, &spec);

    let service = PaperService::new(api);

    let draft = service.build_from_spec(&spec).await?;
    if config.verbose_logging {
        for (i, question) in draft.items().iter().enumerate() {
            info!(
                "[试卷 {}] {}. ({} 分) {}",
                paper_index,
                i + 1,
                question.marks,
                truncate_text(&question.question_text, 40)
            );
        }
    }

    let record = service.save_paper(&draft, &spec.meta).await?;
    info!("[试卷 {}] ✓ 试卷已保存: {}", paper_index, record.id);

    let mut report = PaperReport {
        paper_id: record.id,
        question_count: draft.len(),
        total_marks: draft.total_marks(),
        pdf_path: None,
    };

    if spec.export_pdf {
        let out_dir = Path::new(&config.pdf_output_folder);
        match service.export_pdf(&draft, &spec.meta.title, out_dir).await {
            Ok(path) => report.pdf_path = Some(path.display().to_string()),
            Err(e) => error!("[试卷 {}] PDF 导出失败: {}", paper_index, e),
        }
    }

    archive_file(spec.file_path.as_deref(), paper_index).await?;

    log_paper_complete(paper_index, &report);
    Ok(report)
}

/// 已处理的文件改名为 `<name>.done`，下次运行不再加载
async fn archive_file(file_path: Option<&str>, paper_index: usize) -> AppResult<()> {
    let Some(file_path) = file_path else {
        warn!("[试卷 {}] ⚠️ 文件路径未设置", paper_index);
        return Ok(());
    };

    let path = Path::new(file_path);
    if !path.exists() {
        warn!("[试卷 {}] ⚠️ 文件不存在: {}", paper_index, file_path);
        return Ok(());
    }

    let archived = path.with_extension("toml.done");
    tokio::fs::rename(path, &archived)
        .await
        .map_err(|e| AppError::file_write_failed(file_path, e))?;
    info!("[试卷 {}] 🗂️ 已归档: {}", paper_index, archived.display());
    Ok(())
}

// ========== 日志辅助函数 ==========

fn log_paper_start(paper_index: usize, spec: &PaperSpec) {
    info!("[试卷 {}] 开始处理", paper_index);
    info!("[试卷 {}] 名称: {}", paper_index, spec.meta.title);
    info!("[试卷 {}] 题目总数: {}", paper_index, spec.questions.len());
}

fn log_paper_complete(paper_index: usize, report: &PaperReport) {
    info!(
        "[试卷 {}] 题目 {} 道, 总分 {}",
        paper_index, report.question_count, report.total_marks
    );
    info!("\n[试卷 {}] ✅ 试卷处理完成\n", paper_index);
}
