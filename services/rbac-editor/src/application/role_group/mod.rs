//! 角色组应用层模块

pub mod commands;
pub mod handlers;

pub use commands::*;
pub use handlers::RoleGroupCommandHandler;
