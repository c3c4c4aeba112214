//! 后端 REST 接口适配器

pub mod client;
pub mod dto;
pub mod role_api;
pub mod role_group_api;

pub use client::ApiClient;
pub use role_api::HttpRoleApi;
pub use role_group_api::HttpRoleGroupApi;
