//! rbac-editor 命令行入口
//!
//! 不带参数时列出所有角色；给出角色 ID 时打印该角色的权限矩阵

use std::sync::Arc;

use campus_auth_core::{Session, SessionContext};
use campus_common::{Pagination, RoleId};
use campus_config::AppConfig;
use campus_errors::AppError;
use campus_telemetry::init_runtime;

use rbac_editor::application::MatrixEditor;
use rbac_editor::application::role::{ListRolesQuery, RoleQueryHandler};
use rbac_editor::infrastructure::http::{ApiClient, HttpRoleApi};
use rbac_editor::presentation::EditorView;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置
    let config = AppConfig::load("config")?;

    // 2. 初始化日志
    init_runtime(&config)?;

    // 3. 建立会话
    let token = config
        .api
        .token
        .clone()
        .ok_or_else(|| AppError::unauthenticated("api.token is not configured"))?;
    let session = SessionContext::with_session(Session::new(token, config.app_name.clone()));

    let client = Arc::new(ApiClient::new(&config.api, session)?);
    let role_api = Arc::new(HttpRoleApi::new(client));

    match std::env::args().nth(1) {
        None => {
            let roles = RoleQueryHandler::new(role_api)
                .handle_list(ListRolesQuery {
                    pagination: Pagination::new(1, 100),
                })
                .await?;
            for role in &roles.items {
                let marker = if role.is_system { " (system)" } else { "" };
                println!("{:>5}  {}{}", role.id.value(), role.name, marker);
            }
            println!("{} role(s)", roles.total);
        }
        Some(arg) => {
            let role_id: RoleId = arg.parse()?;
            let editor = MatrixEditor::new(role_api);
            editor.load_role(role_id).await?;

            let view = EditorView::from_snapshot(&editor.snapshot().await);
            match view.matrix {
                Some(matrix) if !matrix.is_empty() => print!("{}", matrix.render_text()),
                _ => println!("Role {} has no permissions configured", role_id),
            }
        }
    }

    Ok(())
}
