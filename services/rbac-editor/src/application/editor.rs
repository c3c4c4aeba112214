//! 权限矩阵编辑器
//!
//! 协调 选择角色 → 加载 → 本地编辑 → 保存。状态机:
//!
//! ```text
//! Idle → Loading → Ready ⇄ Saving
//!          ↓         ↓        ↓
//!        Error ←─────┴────────┘
//! ```
//!
//! 每次加载分配单调递增的序号，完成时序号已过期的响应直接丢弃，
//! 快速切换角色时最终状态总是最后一次选择的角色。

use std::sync::Arc;
use std::time::Instant;

use campus_common::{ModuleId, PermissionId, RoleId};
use campus_errors::{AppError, AppResult};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::PermissionMatrix;
use crate::domain::role::{Action, Module, RolePermissionApi};
use crate::error::EditorError;
use crate::infrastructure::metrics::EditorMetrics;

/// 编辑器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Idle,
    Loading,
    Ready,
    Saving,
    Error,
}

impl std::fmt::Display for EditorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EditorStatus::Idle => "idle",
            EditorStatus::Loading => "loading",
            EditorStatus::Ready => "ready",
            EditorStatus::Saving => "saving",
            EditorStatus::Error => "in error",
        };
        f.write_str(s)
    }
}

/// 加载结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 响应已应用到编辑器
    Applied,
    /// 期间选择了其他角色，响应被丢弃
    Superseded,
}

/// 供展示层读取的状态快照
#[derive(Debug, Clone)]
pub struct EditorSnapshot {
    pub status: EditorStatus,
    pub role_id: Option<RoleId>,
    pub matrix: Option<PermissionMatrix>,
    pub last_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug)]
struct EditorState {
    status: EditorStatus,
    role_id: Option<RoleId>,
    matrix: Option<PermissionMatrix>,
    last_error: Option<String>,
    /// 当前有效请求的序号
    seq: u64,
}

struct LoadTicket {
    seq: u64,
    role_id: RoleId,
}

struct SaveTicket {
    seq: u64,
    role_id: RoleId,
    modules: Vec<Module>,
}

impl EditorState {
    fn new() -> Self {
        Self {
            status: EditorStatus::Idle,
            role_id: None,
            matrix: None,
            last_error: None,
            seq: 0,
        }
    }

    fn is_dirty(&self) -> bool {
        self.matrix.as_ref().is_some_and(PermissionMatrix::is_dirty)
    }

    fn begin_load(&mut self, role_id: RoleId, discard: bool) -> Result<LoadTicket, EditorError> {
        if self.status == EditorStatus::Saving {
            return Err(EditorError::Busy {
                operation: "switch role",
                status: self.status,
            });
        }
        if !discard
            && self.is_dirty()
            && let Some(current) = self.role_id
        {
            return Err(EditorError::UnsavedChanges(current));
        }

        self.seq += 1;
        self.status = EditorStatus::Loading;
        self.role_id = Some(role_id);
        self.matrix = None;
        self.last_error = None;
        Ok(LoadTicket {
            seq: self.seq,
            role_id,
        })
    }

    fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: AppResult<Vec<Module>>,
    ) -> AppResult<LoadOutcome> {
        if ticket.seq != self.seq {
            warn!(
                role_id = %ticket.role_id,
                current = ?self.role_id,
                "Discarding stale permission matrix response"
            );
            EditorMetrics::record_stale("load");
            return Ok(LoadOutcome::Superseded);
        }

        match result.and_then(PermissionMatrix::from_modules) {
            Ok(matrix) => {
                info!(
                    role_id = %ticket.role_id,
                    modules = matrix.modules().len(),
                    granted = matrix.granted_count(),
                    "Permission matrix loaded"
                );
                EditorMetrics::record_load("ok");
                self.matrix = Some(matrix);
                self.status = EditorStatus::Ready;
                Ok(LoadOutcome::Applied)
            }
            Err(e) => {
                error!(role_id = %ticket.role_id, error = %e, "Failed to load permission matrix");
                EditorMetrics::record_load("error");
                self.status = EditorStatus::Error;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn begin_save(&mut self) -> Result<SaveTicket, EditorError> {
        match self.status {
            EditorStatus::Ready | EditorStatus::Error => {}
            status @ (EditorStatus::Loading | EditorStatus::Saving) => {
                return Err(EditorError::Busy {
                    operation: "save",
                    status,
                });
            }
            EditorStatus::Idle => return Err(EditorError::NoMatrix),
        }
        let (Some(role_id), Some(matrix)) = (self.role_id, self.matrix.as_ref()) else {
            return Err(EditorError::NoMatrix);
        };

        let modules = matrix.serialize();
        self.status = EditorStatus::Saving;
        Ok(SaveTicket {
            seq: self.seq,
            role_id,
            modules,
        })
    }

    fn finish_save(&mut self, ticket: &SaveTicket, result: AppResult<()>) -> AppResult<()> {
        if ticket.seq != self.seq {
            // 编辑器已被重置
            EditorMetrics::record_stale("save");
            return result;
        }

        match result {
            Ok(()) => {
                if let Some(matrix) = self.matrix.as_mut() {
                    matrix.mark_saved();
                }
                self.status = EditorStatus::Ready;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.status = EditorStatus::Error;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn editable_matrix(&mut self, operation: &'static str) -> Result<&mut PermissionMatrix, EditorError> {
        match self.status {
            EditorStatus::Ready | EditorStatus::Error => {
                self.matrix.as_mut().ok_or(EditorError::NoMatrix)
            }
            EditorStatus::Idle => Err(EditorError::NoMatrix),
            status => Err(EditorError::Busy { operation, status }),
        }
    }
}

/// 权限矩阵编辑器
///
/// 所有方法接收 `&self`，状态锁不会跨网络等待持有，
/// 多个操作可以并发交错执行。
pub struct MatrixEditor<P: RolePermissionApi> {
    api: Arc<P>,
    state: Mutex<EditorState>,
}

impl<P: RolePermissionApi> MatrixEditor<P> {
    pub fn new(api: Arc<P>) -> Self {
        Self {
            api,
            state: Mutex::new(EditorState::new()),
        }
    }

    /// 选择角色并加载其权限矩阵
    ///
    /// 当前矩阵有未保存修改时拒绝切换，见 [`Self::discard_and_load`]
    pub async fn load_role(&self, role_id: RoleId) -> AppResult<LoadOutcome> {
        self.load(role_id, false).await
    }

    /// 丢弃未保存修改并加载
    pub async fn discard_and_load(&self, role_id: RoleId) -> AppResult<LoadOutcome> {
        self.load(role_id, true).await
    }

    async fn load(&self, role_id: RoleId, discard: bool) -> AppResult<LoadOutcome> {
        let ticket = self.state.lock().await.begin_load(role_id, discard)?;
        info!(role_id = %role_id, seq = ticket.seq, "Loading permission matrix");

        let result = self.api.get_permissions(role_id).await;

        self.state.lock().await.finish_load(ticket, result)
    }

    /// 保存完整矩阵
    pub async fn save(&self) -> AppResult<()> {
        let ticket = self.state.lock().await.begin_save()?;
        info!(role_id = %ticket.role_id, modules = ticket.modules.len(), "Saving permission matrix");

        let start = Instant::now();
        let result = self
            .api
            .save_permissions(ticket.role_id, &ticket.modules)
            .await;
        match &result {
            Ok(()) => EditorMetrics::record_save(start, "ok"),
            Err(e) => {
                error!(role_id = %ticket.role_id, error = %e, "Failed to save permission matrix");
                EditorMetrics::record_save(start, "error");
            }
        }

        self.state.lock().await.finish_save(&ticket, result)
    }

    /// 切换单个授权位
    ///
    /// 权限不支持该操作时视为空操作，返回 `Ok(false)`
    pub async fn toggle(
        &self,
        module_id: ModuleId,
        permission_id: PermissionId,
        action: Action,
        value: bool,
    ) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let matrix = state.editable_matrix("edit")?;

        match matrix.set_grant(module_id, permission_id, action, value) {
            Ok(changed) => {
                debug!(%module_id, %permission_id, %action, value, changed, "Grant toggled");
                Ok(changed)
            }
            Err(AppError::InvalidAction(msg)) => {
                warn!(%module_id, %permission_id, %action, "Ignored toggle: {}", msg);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// 表头全选/全不选，返回变化的权限数量
    pub async fn toggle_column(&self, action: Action, value: bool) -> AppResult<usize> {
        let mut state = self.state.lock().await;
        let changed = state.editable_matrix("edit")?.set_column_all(action, value);
        debug!(%action, value, changed, "Column toggled");
        Ok(changed)
    }

    /// 卸载编辑器: 回到 Idle，在途请求的响应将被丢弃
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.seq += 1;
        state.status = EditorStatus::Idle;
        state.role_id = None;
        state.matrix = None;
        state.last_error = None;
    }

    pub async fn status(&self) -> EditorStatus {
        self.state.lock().await.status
    }

    pub async fn role_id(&self) -> Option<RoleId> {
        self.state.lock().await.role_id
    }

    pub async fn is_dirty(&self) -> bool {
        self.state.lock().await.is_dirty()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.last_error.clone()
    }

    /// 用户关闭错误提示
    pub async fn clear_error(&self) {
        self.state.lock().await.last_error = None;
    }

    pub async fn snapshot(&self) -> EditorSnapshot {
        let state = self.state.lock().await;
        EditorSnapshot {
            status: state.status,
            role_id: state.role_id,
            matrix: state.matrix.clone(),
            last_error: state.last_error.clone(),
            dirty: state.is_dirty(),
        }
    }
}
