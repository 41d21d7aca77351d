use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 表单/参数校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 试卷草稿操作错误
    #[error("试卷错误: {0}")]
    Draft(#[from] DraftError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回非 2xx 响应
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApiError {
    /// 响应状态码（仅 BadResponse 有）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 返回内容不是预期的 JSON
    #[error("无法解析LLM返回的JSON ({what}): {source}")]
    MalformedJson {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 必填字段缺失
    #[error("缺少必填字段: {field}")]
    MissingField { field: &'static str },
    /// 分值必须为正整数
    #[error("分值必须为正整数, 实际为 {marks}")]
    InvalidMarks { marks: u32 },
    /// 试卷中没有题目
    #[error("试卷中没有任何题目")]
    EmptyPaper,
    /// 无法识别的取值
    #[error("无法识别的{field}: {value}")]
    UnknownValue { field: &'static str, value: String },
}

/// 试卷草稿错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// 题目已在试卷中
    #[error("题目已在试卷中: {id}")]
    AlreadyPresent { id: String },
    /// 题目不在试卷中
    #[error("题目不在试卷中: {id}")]
    NotInDraft { id: String },
    /// 当前列表中没有该题目
    #[error("当前列表中没有该题目: {id}")]
    NotDisplayed { id: String },
    /// 索引超出范围
    #[error("索引 {index} 超出范围 [0, {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// 分值非法
    #[error("分值必须为正整数, 实际为 {marks}")]
    InvalidMarks { marks: u32 },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 未登录（缺少令牌或用户ID）
    #[error("未配置身份令牌, 请设置 AUTH_TOKEN 和 AUTH_USER_ID")]
    Unauthenticated,
    /// 无法构建 HTTP 客户端
    #[error("HTTP客户端初始化失败: {0}")]
    HttpClient(String),
}

// ========== 从常见错误类型转换 ==========

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_default();
        if err.is_decode() {
            return AppError::Api(ApiError::JsonParseFailed {
                source: Box::new(err),
            });
        }
        AppError::Api(ApiError::RequestFailed {
            endpoint,
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 是否为指定状态码的 API 错误响应
    pub fn is_status(&self, code: u16) -> bool {
        matches!(self, AppError::Api(e) if e.status() == Some(code))
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
