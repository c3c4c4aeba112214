//! 角色组命令处理器

use std::sync::Arc;

use campus_common::RoleGroupId;
use campus_errors::{AppError, AppResult, ValidationErrors};
use tracing::info;

use super::commands::*;
use crate::domain::role::{RoleGroup, RoleGroupApi};

/// 角色组命令处理器
pub struct RoleGroupCommandHandler<G>
where
    G: RoleGroupApi,
{
    group_api: Arc<G>,
}

impl<G> RoleGroupCommandHandler<G>
where
    G: RoleGroupApi,
{
    pub fn new(group_api: Arc<G>) -> Self {
        Self { group_api }
    }

    /// 列出角色组 (成员已去重)
    pub async fn handle_list(&self) -> AppResult<Vec<RoleGroup>> {
        let mut groups = self.group_api.list_groups().await?;
        for group in &mut groups {
            group.dedup_roles();
        }
        Ok(groups)
    }

    /// 提交前在本地检查重名
    async fn ensure_unique_name(&self, name: &str, except: Option<RoleGroupId>) -> AppResult<()> {
        let taken = self
            .group_api
            .list_groups()
            .await?
            .iter()
            .any(|g| Some(g.id) != except && g.name.trim().eq_ignore_ascii_case(name.trim()));
        if taken {
            return Err(AppError::Validation(
                ValidationErrors::new("The given data was invalid.")
                    .with_field("name", "The name has already been taken."),
            ));
        }
        Ok(())
    }

    /// 创建角色组
    pub async fn handle_create(&self, cmd: CreateRoleGroupCommand) -> AppResult<RoleGroup> {
        cmd.validate().map_err(AppError::Validation)?;
        self.ensure_unique_name(&cmd.name, None).await?;

        let group = self.group_api.create_group(&cmd.into_draft()).await?;
        info!(group_id = %group.id, name = %group.name, "Role group created");
        Ok(group)
    }

    /// 更新角色组
    pub async fn handle_update(&self, cmd: UpdateRoleGroupCommand) -> AppResult<RoleGroup> {
        cmd.validate().map_err(AppError::Validation)?;
        self.ensure_unique_name(&cmd.name, Some(cmd.group_id)).await?;

        let group_id = cmd.group_id;
        let group = self.group_api.update_group(group_id, &cmd.into_draft()).await?;
        info!(group_id = %group.id, "Role group updated");
        Ok(group)
    }

    /// 删除角色组
    pub async fn handle_delete(&self, cmd: DeleteRoleGroupCommand) -> AppResult<()> {
        self.group_api.delete_group(cmd.group_id).await?;
        info!(group_id = %cmd.group_id, "Role group deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use crate::domain::role::repository::MockRoleGroupApi;
    use campus_common::RoleId;

    fn groups() -> Vec<RoleGroup> {
        let mut staff = RoleGroup::new(RoleGroupId::new(1), "Academic Staff");
        staff.roles = vec![
            Role::new(RoleId::new(2), "Teacher"),
            Role::new(RoleId::new(2), "Teacher"),
        ];
        vec![staff, RoleGroup::new(RoleGroupId::new(2), "Office")]
    }

    #[tokio::test]
    async fn test_list_dedups_members() {
        let mut api = MockRoleGroupApi::new();
        api.expect_list_groups().returning(|| Ok(groups()));
        let handler = RoleGroupCommandHandler::new(Arc::new(api));

        let list = handler.handle_list().await.unwrap();
        assert_eq!(list[0].roles.len(), 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_name_is_validation_error() {
        let mut api = MockRoleGroupApi::new();
        api.expect_list_groups().returning(|| Ok(groups()));
        api.expect_create_group().never();
        let handler = RoleGroupCommandHandler::new(Arc::new(api));

        let err = handler
            .handle_create(CreateRoleGroupCommand {
                name: " office ".to_string(),
                description: None,
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.field_errors().unwrap()["name"],
            vec!["The name has already been taken.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_create_and_rename() {
        let mut api = MockRoleGroupApi::new();
        api.expect_list_groups().returning(|| Ok(groups()));
        api.expect_create_group()
            .withf(|d| d.name == "Transport")
            .returning(|d| Ok(RoleGroup::new(RoleGroupId::new(3), d.name.clone())));
        api.expect_update_group()
            .withf(|id, d| *id == RoleGroupId::new(2) && d.name == "Office")
            .returning(|id, d| Ok(RoleGroup::new(id, d.name.clone())));
        let handler = RoleGroupCommandHandler::new(Arc::new(api));

        let created = handler
            .handle_create(CreateRoleGroupCommand {
                name: "Transport".to_string(),
                description: Some("Drivers and conductors".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(created.id, RoleGroupId::new(3));

        // 保留自身名称不算重名
        let updated = handler
            .handle_update(UpdateRoleGroupCommand {
                group_id: RoleGroupId::new(2),
                name: "Office".to_string(),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Office");
    }

    #[tokio::test]
    async fn test_delete_propagates_server_error() {
        let mut api = MockRoleGroupApi::new();
        api.expect_delete_group()
            .returning(|_| Err(AppError::conflict("Role group has members")));
        let handler = RoleGroupCommandHandler::new(Arc::new(api));

        let err = handler
            .handle_delete(DeleteRoleGroupCommand {
                group_id: RoleGroupId::new(1),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
