//! 角色查询定义

use campus_common::Pagination;

/// 列出角色
#[derive(Debug, Clone, Default)]
pub struct ListRolesQuery {
    pub pagination: Pagination,
}

/// 按名称搜索角色
#[derive(Debug, Clone)]
pub struct SearchRolesQuery {
    pub query: String,
    pub pagination: Pagination,
}
