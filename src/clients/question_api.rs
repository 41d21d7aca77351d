/// 题库接口
use reqwest::Method;
use tracing::debug;

use crate::clients::api_client::ApiClient;
use crate::error::AppResult;
use crate::models::filter::QuestionFilter;
use crate::models::paper::PdfRequest;
use crate::models::question::{
    Question, QuestionDraft, QuestionListResponse, QuestionStats, QuestionUpdate,
};

impl ApiClient {
    /// 按筛选条件分页获取题目，空值条件不发送
    pub async fn list_questions(&self, filter: &QuestionFilter) -> AppResult<QuestionListResponse> {
        let endpoint = "/questions";
        let pairs = filter.query_pairs();
        debug!("题库查询参数: {:?}", pairs);
        let builder = self.request(Method::GET, endpoint).query(&pairs);
        self.send_json(builder, endpoint).await
    }

    pub async fn get_question(&self, question_id: &str) -> AppResult<Question> {
        let endpoint = format!("/questions/{}", question_id);
        let builder = self.request(Method::GET, &endpoint);
        self.send_json(builder, &endpoint).await
    }

    /// 新建题目（提交前先做本地校验）
    pub async fn create_question(&self, draft: &QuestionDraft) -> AppResult<Question> {
        draft.validate()?;
        let endpoint = "/questions";
        let builder = self.request(Method::POST, endpoint).json(draft);
        self.send_json(builder, endpoint).await
    }

    pub async fn update_question(
        &self,
        question_id: &str,
        update: &QuestionUpdate,
    ) -> AppResult<Question> {
        let endpoint = format!("/questions/{}", question_id);
        let builder = self.request(Method::PUT, &endpoint).json(update);
        self.send_json(builder, &endpoint).await
    }

    pub async fn delete_question(&self, question_id: &str) -> AppResult<()> {
        let endpoint = format!("/questions/{}", question_id);
        let builder = self.request(Method::DELETE, &endpoint);
        self.send_empty(builder, &endpoint).await
    }

    /// 切换收藏，返回服务端更新后的题目
    pub async fn toggle_star(&self, question_id: &str) -> AppResult<Question> {
        let endpoint = format!("/questions/{}/star", question_id);
        let builder = self.request(Method::PATCH, &endpoint);
        self.send_json(builder, &endpoint).await
    }

    pub async fn question_stats(&self) -> AppResult<QuestionStats> {
        let endpoint = "/questions/stats/overview";
        let builder = self.request(Method::GET, endpoint);
        self.send_json(builder, endpoint).await
    }

    /// 由题目 ID 列表生成试卷 PDF，返回文件字节
    pub async fn generate_pdf(&self, question_ids: &[&str], title: &str) -> AppResult<Vec<u8>> {
        let endpoint = "/questions/generate-pdf";
        let body = PdfRequest {
            question_ids: question_ids.to_vec(),
            title,
        };
        let builder = self.request(Method::POST, endpoint).json(&body);
        self.send_bytes(builder, endpoint).await
    }
}
