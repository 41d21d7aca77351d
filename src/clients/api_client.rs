//! 后端 API 客户端
//!
//! 封装 HTTP 细节：根地址、身份请求头、状态码与错误体的映射。
//! 各业务接口以 `impl ApiClient` 的形式分布在同级模块中。

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, ConfigError};

pub const USER_ID_HEADER: &str = "X-User-Id";

/// 身份提供方给出的登录态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

impl Session {
    pub fn from_config(config: &Config) -> Option<Self> {
        match (&config.auth_token, &config.auth_user_id) {
            (Some(token), Some(user_id)) => Some(Self {
                user_id: user_id.clone(),
                token: token.clone(),
            }),
            _ => None,
        }
    }
}

/// 后端 API 客户端
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    /// 创建新的 API 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session: Session::from_config(config),
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// 构建请求并注入身份请求头
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        debug!("API 请求: {} {}", method, endpoint);
        let mut builder = self.http.request(method, self.url(endpoint));
        if let Some(session) = &self.session {
            builder = builder
                .bearer_auth(&session.token)
                .header(USER_ID_HEADER, &session.user_id);
        }
        builder
    }

    /// 发送请求并把响应体解析为 JSON
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        endpoint: &str,
    ) -> AppResult<T> {
        let response = self.send(builder, endpoint).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// 发送请求并返回原始字节（PDF 下载）
    pub(crate) async fn send_bytes(&self, builder: RequestBuilder, endpoint: &str) -> AppResult<Vec<u8>> {
        let response = self.send(builder, endpoint).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;
        Ok(body.to_vec())
    }

    /// 发送请求，忽略响应体
    pub(crate) async fn send_empty(&self, builder: RequestBuilder, endpoint: &str) -> AppResult<()> {
        self.send(builder, endpoint).await?;
        Ok(())
    }

    async fn send(&self, builder: RequestBuilder, endpoint: &str) -> AppResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        debug!("API 错误响应 {} {}: {:?}", status, endpoint, message);

        Err(ApiError::BadResponse {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        }
        .into())
    }
}

/// 提取后端错误体中的 `detail` 字段，没有时退回原文
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(other) => Some(other.to_string()),
            None => Some(trimmed.to_string()),
        },
        Err(_) => Some(trimmed.to_string()),
    }
}
