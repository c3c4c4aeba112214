//! 应用层

pub mod assignment;
pub mod editor;
pub mod role;
pub mod role_group;
pub mod validation;

pub use assignment::RoleGroupAssignmentService;
pub use editor::{EditorSnapshot, EditorStatus, LoadOutcome, MatrixEditor};
