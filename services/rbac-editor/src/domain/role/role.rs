//! 角色实体

use campus_common::RoleId;
use serde::{Deserialize, Serialize};

use super::permission::deserialize_flag;

/// 角色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    /// 编号前缀 (如学号、工号前缀)
    #[serde(default)]
    pub prefix: Option<String>,
    /// 系统角色不可删除
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_system: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl Role {
    pub fn new(id: RoleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            prefix: None,
            is_system: false,
            description: None,
        }
    }

    /// 创建系统角色
    pub fn system_role(id: RoleId, name: impl Into<String>) -> Self {
        let mut role = Self::new(id, name);
        role.is_system = true;
        role
    }

    pub fn is_deletable(&self) -> bool {
        !self.is_system
    }
}

/// 创建或更新角色时提交的字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
