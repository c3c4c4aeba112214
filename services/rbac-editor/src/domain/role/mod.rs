//! RBAC 角色权限领域模块

#![allow(clippy::module_inception)]

pub mod group;
pub mod permission;
pub mod repository;
pub mod role;

pub use group::{RoleGroup, RoleGroupDraft};
pub use permission::{Action, Module, Permission};
pub use repository::{RoleApi, RoleGroupApi, RolePermissionApi};
pub use role::{Role, RoleDraft};
