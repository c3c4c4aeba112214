//! rbac-editor - 角色权限矩阵编辑器
//!
//! 角色按 模块 → 权限 → 操作 (view/add/edit/delete) 授权，
//! 本地批量编辑后一次性保存。

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
