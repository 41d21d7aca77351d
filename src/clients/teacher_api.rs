/// 教师试卷接口
use reqwest::Method;

use crate::clients::api_client::ApiClient;
use crate::error::AppResult;
use crate::models::paper::{PaperCreate, PaperRecord};

impl ApiClient {
    pub async fn create_paper(&self, paper: &PaperCreate) -> AppResult<PaperRecord> {
        let endpoint = "/teacher/papers";
        let builder = self.request(Method::POST, endpoint).json(paper);
        self.send_json(builder, endpoint).await
    }

    pub async fn list_papers(&self) -> AppResult<Vec<PaperRecord>> {
        let endpoint = "/teacher/papers";
        let builder = self.request(Method::GET, endpoint);
        self.send_json(builder, endpoint).await
    }
}
