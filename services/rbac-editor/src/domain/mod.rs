//! 领域层

pub mod assignment;
pub mod matrix;
pub mod role;

pub use assignment::RoleGroupAssignment;
pub use matrix::{ColumnState, PermissionMatrix};
