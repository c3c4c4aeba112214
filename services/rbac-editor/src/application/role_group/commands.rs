//! 角色组相关命令定义

use campus_common::RoleGroupId;
use campus_errors::ValidationErrors;

use crate::application::validation::{
    DESCRIPTION_MAX_LEN, FieldValidator, NAME_MAX_LEN, normalize_optional,
};
use crate::domain::role::RoleGroupDraft;

/// 创建角色组命令
#[derive(Debug, Clone)]
pub struct CreateRoleGroupCommand {
    pub name: String,
    pub description: Option<String>,
}

impl CreateRoleGroupCommand {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(&self.name, self.description.as_deref())
    }

    pub fn into_draft(self) -> RoleGroupDraft {
        RoleGroupDraft {
            name: self.name.trim().to_string(),
            description: normalize_optional(self.description),
        }
    }
}

/// 更新角色组命令
#[derive(Debug, Clone)]
pub struct UpdateRoleGroupCommand {
    pub group_id: RoleGroupId,
    pub name: String,
    pub description: Option<String>,
}

impl UpdateRoleGroupCommand {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(&self.name, self.description.as_deref())
    }

    pub fn into_draft(self) -> RoleGroupDraft {
        RoleGroupDraft {
            name: self.name.trim().to_string(),
            description: normalize_optional(self.description),
        }
    }
}

/// 删除角色组命令
#[derive(Debug, Clone)]
pub struct DeleteRoleGroupCommand {
    pub group_id: RoleGroupId,
}

fn validate_fields(name: &str, description: Option<&str>) -> Result<(), ValidationErrors> {
    FieldValidator::new()
        .required("name", name, NAME_MAX_LEN)
        .optional("description", description, DESCRIPTION_MAX_LEN)
        .finish()
}
