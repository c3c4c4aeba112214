//! 接口请求/响应体

use campus_common::RoleId;
use campus_errors::{AppError, AppResult, ValidationErrors};
use serde::{Deserialize, Serialize};

use crate::domain::role::Module;
use crate::domain::role::permission::deserialize_flag;

/// `{ "data": ... }` 包装
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct SavePermissionsRequest<'a> {
    pub modules: &'a [Module],
}

#[derive(Debug, Serialize)]
pub struct ReplaceRolesRequest<'a> {
    pub role_ids: &'a [RoleId],
}

/// 保存类接口的返回
#[derive(Debug, Deserialize)]
pub struct SaveResponse {
    #[serde(deserialize_with = "deserialize_flag")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SaveResponse {
    /// `success: false` 转为校验错误，保留服务端消息
    pub fn into_result(self) -> AppResult<()> {
        if self.success {
            return Ok(());
        }
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Save rejected by server".to_string());
        Err(AppError::Validation(ValidationErrors::new(message)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::{Action, Permission};
    use campus_common::{ModuleId, PermissionId};

    #[test]
    fn test_save_request_shape() {
        let modules = vec![Module::new(
            ModuleId::new(1),
            "Attendance",
            vec![
                Permission::new(PermissionId::new(10), "Mark Attendance")
                    .with_capabilities(&[Action::View]),
            ],
        )];

        let json = serde_json::to_value(SavePermissionsRequest { modules: &modules }).unwrap();
        assert_eq!(json["modules"][0]["id"], 1);
        assert_eq!(json["modules"][0]["permissions"][0]["show_view"], true);
        assert_eq!(json["modules"][0]["permissions"][0]["is_view"], false);
    }

    #[test]
    fn test_replace_roles_shape() {
        let ids = [RoleId::new(2), RoleId::new(7)];
        let json = serde_json::to_string(&ReplaceRolesRequest { role_ids: &ids }).unwrap();
        assert_eq!(json, r#"{"role_ids":[2,7]}"#);
    }

    #[test]
    fn test_save_response_failure_keeps_message() {
        let response: SaveResponse =
            serde_json::from_str(r#"{"success": false, "message": "Role is locked"}"#).unwrap();
        let err = response.into_result().unwrap_err();
        assert!(err.to_string().contains("Role is locked"));
    }
}
