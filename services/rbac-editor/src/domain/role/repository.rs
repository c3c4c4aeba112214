//! 后端接口抽象
//!
//! 服务端是外部协作者，这里只定义编辑器依赖的契约

use async_trait::async_trait;
use campus_common::{RoleGroupId, RoleId};
use campus_errors::AppResult;

use super::group::{RoleGroup, RoleGroupDraft};
use super::permission::Module;
use super::role::{Role, RoleDraft};

/// 角色接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleApi: Send + Sync {
    /// 列出所有角色
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// 创建角色
    async fn create_role(&self, draft: &RoleDraft) -> AppResult<Role>;

    /// 更新角色
    async fn update_role(&self, id: RoleId, draft: &RoleDraft) -> AppResult<Role>;

    /// 删除角色
    async fn delete_role(&self, id: RoleId) -> AppResult<()>;
}

/// 角色权限矩阵接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RolePermissionApi: Send + Sync {
    /// 获取角色的完整权限矩阵
    async fn get_permissions(&self, role_id: RoleId) -> AppResult<Vec<Module>>;

    /// 整体替换角色的权限矩阵 (最后写入者生效)
    async fn save_permissions(&self, role_id: RoleId, modules: &[Module]) -> AppResult<()>;
}

/// 角色组接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleGroupApi: Send + Sync {
    /// 列出所有角色组
    async fn list_groups(&self) -> AppResult<Vec<RoleGroup>>;

    /// 创建角色组
    async fn create_group(&self, draft: &RoleGroupDraft) -> AppResult<RoleGroup>;

    /// 更新角色组
    async fn update_group(&self, id: RoleGroupId, draft: &RoleGroupDraft) -> AppResult<RoleGroup>;

    /// 删除角色组
    async fn delete_group(&self, id: RoleGroupId) -> AppResult<()>;

    /// 获取角色组成员
    async fn get_group_roles(&self, id: RoleGroupId) -> AppResult<Vec<Role>>;

    /// 整体替换角色组成员
    async fn replace_group_roles(&self, id: RoleGroupId, role_ids: &[RoleId]) -> AppResult<()>;
}
