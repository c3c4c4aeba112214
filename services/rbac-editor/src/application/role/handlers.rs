//! 角色命令处理器

use std::sync::Arc;

use campus_common::RoleId;
use campus_errors::{AppError, AppResult, ValidationErrors};
use tracing::info;

use super::commands::*;
use crate::domain::role::{Role, RoleApi};
use crate::error::EditorError;

/// 角色命令处理器
pub struct RoleCommandHandler<R>
where
    R: RoleApi,
{
    role_api: Arc<R>,
}

impl<R> RoleCommandHandler<R>
where
    R: RoleApi,
{
    pub fn new(role_api: Arc<R>) -> Self {
        Self { role_api }
    }

    /// 创建角色
    pub async fn handle_create(&self, cmd: CreateRoleCommand) -> AppResult<Role> {
        cmd.validate().map_err(AppError::Validation)?;
        let roles = self.role_api.list_roles().await?;
        ensure_unique_name(&roles, &cmd.name, None)?;

        let draft = cmd.into_draft();
        let role = self.role_api.create_role(&draft).await?;
        info!(role_id = %role.id, name = %role.name, "Role created");
        Ok(role)
    }

    /// 更新角色
    pub async fn handle_update(&self, cmd: UpdateRoleCommand) -> AppResult<Role> {
        cmd.validate().map_err(AppError::Validation)?;
        let roles = self.role_api.list_roles().await?;
        find(&roles, cmd.role_id)?;
        ensure_unique_name(&roles, &cmd.name, Some(cmd.role_id))?;

        let role_id = cmd.role_id;
        let role = self.role_api.update_role(role_id, &cmd.into_draft()).await?;
        info!(role_id = %role.id, "Role updated");
        Ok(role)
    }

    /// 删除角色
    pub async fn handle_delete(&self, cmd: DeleteRoleCommand) -> AppResult<()> {
        let roles = self.role_api.list_roles().await?;
        let role = find(&roles, cmd.role_id)?;

        // 系统角色不可删除
        if !role.is_deletable() {
            return Err(EditorError::SystemRoleImmutable(role.name.clone()).into());
        }

        self.role_api.delete_role(role.id).await?;
        info!(role_id = %role.id, "Role deleted");
        Ok(())
    }
}

fn find(roles: &[Role], role_id: RoleId) -> AppResult<&Role> {
    roles
        .iter()
        .find(|r| r.id == role_id)
        .ok_or_else(|| AppError::not_found(format!("Role {} not found", role_id)))
}

fn ensure_unique_name(roles: &[Role], name: &str, except: Option<RoleId>) -> AppResult<()> {
    let taken = roles
        .iter()
        .any(|r| Some(r.id) != except && r.name.trim().eq_ignore_ascii_case(name.trim()));
    if taken {
        return Err(AppError::Validation(
            ValidationErrors::new("The given data was invalid.")
                .with_field("name", "The name has already been taken."),
        ));
    }
    Ok(())
}
