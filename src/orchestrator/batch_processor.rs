//! 批量处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责登录门禁、任务加载和并发控制。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：日志文件、API 客户端、档案门禁
//! 2. **新手引导**：尚未建档时按配置提交档案
//! 3. **教师模式**：批量处理试卷 TOML，Semaphore 限制并发，分批执行
//! 4. **学生模式**：逐个处理 PDF，生成并保存复习资料
//! 5. **全局统计**：汇总所有任务的处理结果

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::clients::ApiClient;
use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError};
use crate::models::loaders::{list_files_with_extension, load_all_toml_files};
use crate::models::paper::PaperSpec;
use crate::models::profile::ProfileCreate;
use crate::orchestrator::{paper_processor, revision_processor};
use crate::services::{GateDecision, LlmService, ProfileGate, Route, StudyGenerator};
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    api: ApiClient,
    decision: GateDecision,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        logging::init_log_file(&config.output_log_file, "试卷与复习资料处理日志")?;
        logging::log_startup(&config.api_base_url, config.max_concurrent_papers);

        let api = ApiClient::new(&config)?;
        let gate = ProfileGate::new(&api);

        let mut decision = gate.resolve().await?;
        if decision.route == Route::Onboarding {
            decision = Self::onboard(&gate, &config).await?;
        }

        Ok(Self {
            config,
            api,
            decision,
        })
    }

    async fn onboard(gate: &ProfileGate<'_>, config: &Config) -> AppResult<GateDecision> {
        let Some(role) = config.onboarding_role.as_deref() else {
            warn!("⚠️ 尚未建档，请设置 ONBOARDING_ROLE / ONBOARDING_CATEGORIES 后重试");
            return Ok(GateDecision {
                route: Route::Onboarding,
                profile: None,
            });
        };
        info!("🆕 尚未建档，按配置提交新手引导: {}", role);
        let create = ProfileCreate::parse(role, &config.onboarding_categories)?;
        gate.complete_onboarding(&create).await
    }

    pub fn route(&self) -> Route {
        self.decision.route
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<()> {
        match self.decision.route {
            Route::SignIn => {
                error!("❌ 未登录：请设置 AUTH_TOKEN 和 AUTH_USER_ID");
                Err(ConfigError::Unauthenticated.into())
            }
            Route::Onboarding => Ok(()),
            Route::TeacherDashboard => self.run_teacher().await,
            Route::StudentDashboard => self.run_student().await,
        }
    }

    async fn run_teacher(&self) -> AppResult<()> {
        info!("\n📁 正在扫描待处理的试卷...");
        let all_papers = load_all_toml_files(&self.config.paper_toml_folder).await?;

        if all_papers.is_empty() {
            warn!("⚠️ 没有找到待处理的TOML文件，程序结束");
            return Ok(());
        }

        logging::log_jobs_loaded("试卷", all_papers.len(), self.config.max_concurrent_papers);
        let stats = self.process_all_papers(all_papers).await?;
        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );
        Ok(())
    }

    async fn run_student(&self) -> AppResult<()> {
        info!("\n📁 正在扫描待处理的 PDF...");
        let pdfs = list_files_with_extension(&self.config.pdf_input_folder, "pdf").await?;

        if pdfs.is_empty() {
            warn!("⚠️ 没有找到待处理的 PDF 文件，程序结束");
            return Ok(());
        }

        logging::log_jobs_loaded("PDF", pdfs.len(), 1);

        let llm;
        let generator: &dyn StudyGenerator = if self.config.use_direct_llm {
            info!("🤖 直接调用 LLM 生成复习资料: {}", self.config.llm_model_name);
            llm = LlmService::new(&self.config);
            &llm
        } else {
            &self.api
        };

        let mut stats = ProcessingStats {
            total: pdfs.len(),
            ..Default::default()
        };

        for (idx, path) in pdfs.iter().enumerate() {
            let pdf_index = idx + 1;
            match revision_processor::process_pdf(&self.api, generator, path, pdf_index, &self.config)
                .await
            {
                Ok(report) if report.failed_stage.is_none() => stats.success += 1,
                Ok(_) => stats.failed += 1,
                Err(e) => {
                    error!("[PDF {}] ❌ 处理过程中发生错误: {}", pdf_index, e);
                    stats.failed += 1;
                }
            }
        }

        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );
        Ok(())
    }

    /// 分批并发处理所有试卷
    async fn process_all_papers(&self, all_papers: Vec<PaperSpec>) -> AppResult<ProcessingStats> {
        let batch_size = self.config.max_concurrent_papers.max(1);
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total_papers = all_papers.len();
        let total_batches = (total_papers + batch_size - 1) / batch_size;
        let mut stats = ProcessingStats {
            total: total_papers,
            ..Default::default()
        };

        for (batch_idx, batch_papers) in all_papers.chunks(batch_size).enumerate() {
            let batch_start = batch_idx * batch_size;
            let batch_num = batch_idx + 1;

            logging::log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_start + batch_papers.len(),
                total_papers,
            );

            let batch_result = self
                .process_batch(batch_papers, batch_start, semaphore.clone())
                .await?;

            stats.success += batch_result.success;
            stats.failed += batch_result.failed;

            logging::log_batch_complete(
                batch_num,
                batch_result.success,
                batch_result.success + batch_result.failed,
            );
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_papers: &[PaperSpec],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> AppResult<BatchResult> {
        let mut batch_handles = Vec::new();

        for (idx, spec) in batch_papers.iter().enumerate() {
            let paper_index = batch_start + idx + 1;
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| AppError::Other(e.to_string()))?;

            let api = self.api.clone();
            let config = self.config.clone();
            let spec = spec.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                paper_processor::process_paper(&api, spec, paper_index, &config).await
            });
            batch_handles.push((paper_index, handle));
        }

        let (indices, handles): (Vec<_>, Vec<_>) = batch_handles.into_iter().unzip();
        let mut result = BatchResult::default();

        for (paper_index, joined) in indices.into_iter().zip(join_all(handles).await) {
            match joined {
                Ok(Ok(_)) => result.success += 1,
                Ok(Err(e)) => {
                    error!("[试卷 {}] ❌ 处理过程中发生错误: {}", paper_index, e);
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[试卷 {}] 任务执行失败: {}", paper_index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
}
