//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量处理器
//! - 管理应用生命周期（初始化、门禁、运行）
//! - 教师：批量加载试卷描述（Vec<PaperSpec>），Semaphore 控制并发
//! - 学生：逐个处理 PDF
//! - 输出全局统计信息
//!
//! ### `paper_processor` - 单个试卷处理器
//! - 组卷、保存、导出 PDF、归档描述文件
//!
//! ### `revision_processor` - 单个 PDF 处理器
//! - 复习资料流水线 + 保存
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor
//!     ↓
//! paper_processor / revision_processor
//!     ↓
//! services::PaperService / workflow::StudyPipeline
//!     ↓
//! clients::ApiClient
//! ```

pub mod batch_processor;
pub mod paper_processor;
pub mod revision_processor;

pub use batch_processor::App;
pub use paper_processor::{process_paper, PaperReport};
pub use revision_processor::{process_pdf, RevisionReport};
