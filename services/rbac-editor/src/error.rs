use campus_common::RoleId;
use campus_errors::AppError;
use thiserror::Error;

use crate::application::editor::EditorStatus;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Cannot {operation} while {status}")]
    Busy {
        operation: &'static str,
        status: EditorStatus,
    },
    #[error("No permission matrix loaded")]
    NoMatrix,
    #[error("Role {0} has unsaved changes")]
    UnsavedChanges(RoleId),
    #[error("System role '{0}' cannot be deleted")]
    SystemRoleImmutable(String),
}

impl From<EditorError> for AppError {
    fn from(error: EditorError) -> Self {
        match error {
            EditorError::SystemRoleImmutable(_) => AppError::Forbidden(error.to_string()),
            EditorError::Busy { .. } | EditorError::NoMatrix | EditorError::UnsavedChanges(_) => {
                AppError::FailedPrecondition(error.to_string())
            }
        }
    }
}
