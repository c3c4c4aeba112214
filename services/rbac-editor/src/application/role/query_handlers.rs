//! 角色查询处理器

use std::sync::Arc;

use campus_common::{PagedResult, RoleId};
use campus_errors::{AppError, AppResult};

use super::queries::*;
use crate::domain::role::{Role, RoleApi};

/// 角色查询处理器
///
/// 后端列表接口不分页，分页与搜索在本地完成
pub struct RoleQueryHandler<R: RoleApi> {
    role_api: Arc<R>,
}

impl<R: RoleApi> RoleQueryHandler<R> {
    pub fn new(role_api: Arc<R>) -> Self {
        Self { role_api }
    }

    /// 获取角色详情
    pub async fn handle_get(&self, role_id: RoleId) -> AppResult<Role> {
        self.role_api
            .list_roles()
            .await?
            .into_iter()
            .find(|r| r.id == role_id)
            .ok_or_else(|| AppError::not_found(format!("Role {} not found", role_id)))
    }

    /// 列出角色
    pub async fn handle_list(&self, query: ListRolesQuery) -> AppResult<PagedResult<Role>> {
        let roles = self.role_api.list_roles().await?;
        Ok(PagedResult::from_slice(&roles, &query.pagination))
    }

    /// 搜索角色 (名称或前缀，不区分大小写)
    pub async fn handle_search(&self, query: SearchRolesQuery) -> AppResult<PagedResult<Role>> {
        let needle = query.query.trim().to_lowercase();
        let roles: Vec<Role> = self
            .role_api
            .list_roles()
            .await?
            .into_iter()
            .filter(|r| {
                needle.is_empty()
                    || r.name.to_lowercase().contains(&needle)
                    || r
                        .prefix
                        .as_deref()
                        .is_some_and(|p| p.to_lowercase().contains(&needle))
            })
            .collect();
        Ok(PagedResult::from_slice(&roles, &query.pagination))
    }
}
