/// 用户档案接口
use reqwest::Method;

use crate::clients::api_client::ApiClient;
use crate::error::AppResult;
use crate::models::profile::{Profile, ProfileCreate};

impl ApiClient {
    /// 获取当前用户档案；404 表示尚未建档，返回 `None`
    pub async fn get_my_profile(&self) -> AppResult<Option<Profile>> {
        let endpoint = "/profile/me";
        let builder = self.request(Method::GET, endpoint);
        match self.send_json(builder, endpoint).await {
            Ok(profile) => Ok(Some(profile)),
            Err(e) if e.is_status(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// 新手引导：创建档案
    pub async fn create_profile(&self, profile: &ProfileCreate) -> AppResult<Profile> {
        profile.validate()?;
        let endpoint = "/profile";
        let builder = self.request(Method::POST, endpoint).json(profile);
        self.send_json(builder, endpoint).await
    }

    pub async fn update_profile(&self, profile: &ProfileCreate) -> AppResult<Profile> {
        profile.validate()?;
        let endpoint = "/profile/me";
        let builder = self.request(Method::PUT, endpoint).json(profile);
        self.send_json(builder, endpoint).await
    }
}
