/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    // --- 后端 API 配置 ---
    /// 后端 API 根地址（含 /api/v1 前缀）
    pub api_base_url: String,
    /// 身份提供方签发的 Bearer 令牌
    pub auth_token: Option<String>,
    /// 身份提供方的用户ID
    pub auth_user_id: Option<String>,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    // --- 批处理配置 ---
    /// 同时处理的试卷数量
    pub max_concurrent_papers: usize,
    /// 试卷 TOML 文件存放目录
    pub paper_toml_folder: String,
    /// 待处理 PDF 存放目录（学生复习资料）
    pub pdf_input_folder: String,
    /// 导出的试卷 PDF 存放目录
    pub pdf_output_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- LLM 配置 ---
    /// 为 true 时直接调用 LLM 生成复习资料，而不是走后端 AI 接口
    pub use_direct_llm: bool,
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    // --- 复习资料生成参数 ---
    pub quiz_question_count: u32,
    pub flashcard_count: u32,
    // --- 新手引导 ---
    /// 尚未建档时使用的角色（teacher / student）
    pub onboarding_role: Option<String>,
    /// 学生方向，或教师覆盖的方向（逗号分隔）
    pub onboarding_categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            auth_token: None,
            auth_user_id: None,
            request_timeout_secs: 120,
            max_concurrent_papers: 4,
            paper_toml_folder: "papers".to_string(),
            pdf_input_folder: "uploads".to_string(),
            pdf_output_folder: "output_pdf".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            use_direct_llm: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            quiz_question_count: 10,
            flashcard_count: 10,
            onboarding_role: None,
            onboarding_categories: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            auth_token: non_empty_var("AUTH_TOKEN").or(default.auth_token),
            auth_user_id: non_empty_var("AUTH_USER_ID").or(default.auth_user_id),
            request_timeout_secs: parsed_var("REQUEST_TIMEOUT_SECS").unwrap_or(default.request_timeout_secs),
            max_concurrent_papers: parsed_var("MAX_CONCURRENT_PAPERS")
                .filter(|n| *n > 0)
                .unwrap_or(default.max_concurrent_papers),
            paper_toml_folder: std::env::var("PAPER_TOML_FOLDER").unwrap_or(default.paper_toml_folder),
            pdf_input_folder: std::env::var("PDF_INPUT_FOLDER").unwrap_or(default.pdf_input_folder),
            pdf_output_folder: std::env::var("PDF_OUTPUT_FOLDER").unwrap_or(default.pdf_output_folder),
            verbose_logging: parsed_var("VERBOSE_LOGGING").unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            use_direct_llm: parsed_var("USE_DIRECT_LLM").unwrap_or(default.use_direct_llm),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            quiz_question_count: parsed_var("QUIZ_QUESTION_COUNT").unwrap_or(default.quiz_question_count),
            flashcard_count: parsed_var("FLASHCARD_COUNT").unwrap_or(default.flashcard_count),
            onboarding_role: non_empty_var("ONBOARDING_ROLE").or(default.onboarding_role),
            onboarding_categories: non_empty_var("ONBOARDING_CATEGORIES")
                .map(|v| split_list(&v))
                .unwrap_or(default.onboarding_categories),
        }
    }

    /// 指向指定后端地址的配置（测试和脚本使用）
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// 设置身份信息
    pub fn with_session(mut self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self.auth_user_id = Some(user_id.into());
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
