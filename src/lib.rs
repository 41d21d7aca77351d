//! # Question Paper
//!
//! 题库组卷与复习资料生成客户端
//!
//! ## 架构设计
//!
//! ### ① 接口层（Clients）
//! - `clients/` - 后端 REST 接口，`ApiClient` 统一注入身份请求头
//!
//! ### ② 状态层（Store）
//! - `store/` - `PaperDraft` 试卷草稿：有序、去重、总分
//!
//! ### ③ 业务能力层（Services）
//! - `CatalogSession` - 题库浏览、筛选、收藏
//! - `PaperService` - 修改分值、保存试卷、导出 PDF
//! - `ProfileGate` - 登录与档案门禁
//! - `StudyGenerator` / `LlmService` - 复习资料生成能力
//!
//! ### ④ 流程层（Workflow）
//! - `StudyPipeline` - 上传 → 笔记 → 测验 → 思维导图 → 闪卡
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 门禁后按角色批量处理
//! - `orchestrator/paper_processor` - 单份试卷
//! - `orchestrator/revision_processor` - 单份 PDF

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod store;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ApiClient, PdfUpload, Session};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::question::Question;
pub use orchestrator::App;
pub use services::{CatalogSession, PaperService, ProfileGate, Route, StudyGenerator};
pub use store::PaperDraft;
pub use workflow::{PipelineOutcome, PipelineStage, StudyPipeline};
