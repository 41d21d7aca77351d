//! 登录与档案门禁
//!
//! 根据登录态和档案状态决定进入哪个页面

use tracing::info;

use crate::clients::{ApiClient, Session};
use crate::error::AppResult;
use crate::models::profile::{Profile, ProfileCreate, Role};

/// 目标页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Onboarding,
    StudentDashboard,
    TeacherDashboard,
}

impl Route {
    pub fn as_str(self) -> &'static str {
        match self {
            Route::SignIn => "sign-in",
            Route::Onboarding => "onboarding",
            Route::StudentDashboard => "student-dashboard",
            Route::TeacherDashboard => "teacher-dashboard",
        }
    }
}

/// 纯函数：登录态 + 档案 → 页面
pub fn route_for(session: Option<&Session>, profile: Option<&Profile>) -> Route {
    if session.is_none() {
        return Route::SignIn;
    }
    match profile {
        None => Route::Onboarding,
        Some(p) if !p.is_complete() => Route::Onboarding,
        Some(p) => dashboard_for(p.role),
    }
}

fn dashboard_for(role: Role) -> Route {
    match role {
        Role::Teacher => Route::TeacherDashboard,
        Role::Student => Route::StudentDashboard,
    }
}

/// 门禁解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct GateDecision {
    pub route: Route,
    pub profile: Option<Profile>,
}

pub struct ProfileGate<'a> {
    api: &'a ApiClient,
}

impl<'a> ProfileGate<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// 查询档案并决定页面；未登录时不发请求
    pub async fn resolve(&self) -> AppResult<GateDecision> {
        if !self.api.is_authenticated() {
            return Ok(GateDecision {
                route: Route::SignIn,
                profile: None,
            });
        }

        let profile = self.api.get_my_profile().await?;
        let route = route_for(self.api.session(), profile.as_ref());
        info!("🔐 门禁结果: {}", route.as_str());
        Ok(GateDecision { route, profile })
    }

    /// 提交新手引导，返回对应的工作台
    pub async fn complete_onboarding(&self, create: &ProfileCreate) -> AppResult<GateDecision> {
        create.validate()?;
        let profile = self.api.create_profile(create).await?;
        let route = route_for(self.api.session(), Some(&profile));
        info!("✓ 档案已创建: {} → {}", profile.role, route.as_str());
        Ok(GateDecision {
            route,
            profile: Some(profile),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Category;

    fn session() -> Session {
        Session {
            user_id: "u1".into(),
            token: "t".into(),
        }
    }

    fn profile(role: Role, category: Option<Category>) -> Profile {
        Profile {
            id: "p1".into(),
            role,
            category,
            categories: None,
        }
    }

    #[test]
    fn test_unauthenticated_goes_to_sign_in() {
        let teacher = profile(Role::Teacher, None);
        assert_eq!(route_for(None, None), Route::SignIn);
        assert_eq!(route_for(None, Some(&teacher)), Route::SignIn);
    }

    #[test]
    fn test_missing_or_incomplete_profile_goes_to_onboarding() {
        let s = session();
        assert_eq!(route_for(Some(&s), None), Route::Onboarding);
        let student = profile(Role::Student, None);
        assert_eq!(route_for(Some(&s), Some(&student)), Route::Onboarding);
    }

    #[test]
    fn test_complete_profile_goes_to_dashboard() {
        let s = session();
        let student = profile(Role::Student, Some(Category::School));
        let teacher = profile(Role::Teacher, None);
        assert_eq!(route_for(Some(&s), Some(&student)), Route::StudentDashboard);
        assert_eq!(route_for(Some(&s), Some(&teacher)), Route::TeacherDashboard);
    }
}
