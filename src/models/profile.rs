use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

/// 学生方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    College,
    School,
    Competition,
}

static CATEGORY_ALIASES: phf::Map<&'static str, Category> = phf_map! {
    "college" => Category::College,
    "university" => Category::College,
    "school" => Category::School,
    "k12" => Category::School,
    "competition" => Category::Competition,
    "competitive" => Category::Competition,
    "olympiad" => Category::Competition,
};

static ROLE_ALIASES: phf::Map<&'static str, Role> = phf_map! {
    "teacher" => Role::Teacher,
    "student" => Role::Student,
};

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// 从字符串解析角色（忽略大小写）
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        ROLE_ALIASES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ValidationError::UnknownValue {
                field: "role",
                value: s.to_string(),
            })
    }
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::College => "college",
            Category::School => "school",
            Category::Competition => "competition",
        }
    }

    /// 从字符串解析方向（忽略大小写，支持常见别名）
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        CATEGORY_ALIASES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ValidationError::UnknownValue {
                field: "category",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 用户档案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub category: Option<Category>,
    /// 教师可覆盖的多个方向
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
}

impl Profile {
    /// 档案是否完整：教师总是完整，学生必须选择方向
    pub fn is_complete(&self) -> bool {
        match self.role {
            Role::Teacher => true,
            Role::Student => self.category.is_some(),
        }
    }
}

/// 创建/更新档案的请求体（新手引导提交）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileCreate {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
}

impl ProfileCreate {
    pub fn student(category: Category) -> Self {
        Self {
            role: Role::Student,
            category: Some(category),
            categories: None,
        }
    }

    pub fn teacher(categories: Vec<Category>) -> Self {
        Self {
            role: Role::Teacher,
            category: None,
            categories: if categories.is_empty() {
                None
            } else {
                Some(categories)
            },
        }
    }

    /// 从文本形式的角色和方向构建（配置文件、命令行）
    pub fn parse(role: &str, categories: &[String]) -> Result<Self, ValidationError> {
        let parsed = categories
            .iter()
            .map(|c| Category::parse(c))
            .collect::<Result<Vec<_>, _>>()?;
        let create = match Role::parse(role)? {
            Role::Student => match parsed.first() {
                Some(category) => Self::student(*category),
                None => return Err(ValidationError::MissingField { field: "category" }),
            },
            Role::Teacher => Self::teacher(parsed),
        };
        Ok(create)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.role == Role::Student && self.category.is_none() {
            return Err(ValidationError::MissingField { field: "category" });
        }
        Ok(())
    }
}
