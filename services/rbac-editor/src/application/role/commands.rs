//! 角色相关命令定义

use campus_common::RoleId;
use campus_errors::ValidationErrors;

use crate::application::validation::{
    DESCRIPTION_MAX_LEN, FieldValidator, NAME_MAX_LEN, normalize_optional,
};
use crate::domain::role::RoleDraft;

/// 创建角色命令
#[derive(Debug, Clone)]
pub struct CreateRoleCommand {
    pub name: String,
    pub prefix: Option<String>,
    pub description: Option<String>,
}

impl CreateRoleCommand {
    /// 验证命令参数
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        FieldValidator::new()
            .required("name", &self.name, NAME_MAX_LEN)
            .prefix("prefix", self.prefix.as_deref())
            .optional("description", self.description.as_deref(), DESCRIPTION_MAX_LEN)
            .finish()
    }

    /// 转换为提交字段 (移动语义，避免克隆)
    pub fn into_draft(self) -> RoleDraft {
        RoleDraft {
            name: self.name.trim().to_string(),
            prefix: normalize_optional(self.prefix),
            description: normalize_optional(self.description),
        }
    }
}

/// 更新角色命令
#[derive(Debug, Clone)]
pub struct UpdateRoleCommand {
    pub role_id: RoleId,
    pub name: String,
    pub prefix: Option<String>,
    pub description: Option<String>,
}

impl UpdateRoleCommand {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        FieldValidator::new()
            .required("name", &self.name, NAME_MAX_LEN)
            .prefix("prefix", self.prefix.as_deref())
            .optional("description", self.description.as_deref(), DESCRIPTION_MAX_LEN)
            .finish()
    }

    pub fn into_draft(self) -> RoleDraft {
        RoleDraft {
            name: self.name.trim().to_string(),
            prefix: normalize_optional(self.prefix),
            description: normalize_optional(self.description),
        }
    }
}

/// 删除角色命令
#[derive(Debug, Clone)]
pub struct DeleteRoleCommand {
    pub role_id: RoleId,
}
