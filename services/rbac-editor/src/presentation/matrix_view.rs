//! 矩阵视图
//!
//! 把矩阵与编辑器状态映射为可渲染的表头、行和单元格。
//! 本模块只读，不修改任何状态。

use std::fmt::Write as _;

use campus_common::{ModuleId, PermissionId, RoleId};

use crate::application::{EditorSnapshot, EditorStatus};
use crate::domain::role::Action;
use crate::domain::{ColumnState, PermissionMatrix};

/// 表头列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub action: Action,
    pub label: &'static str,
    pub state: ColumnState,
    /// 没有任何权限支持该操作时不可点击
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixCell {
    pub action: Action,
    /// 权限支持该操作时才显示复选框
    pub visible: bool,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub module_id: ModuleId,
    pub module_name: String,
    pub permission_id: PermissionId,
    pub permission_name: String,
    /// 模块的第一行，用于合并模块名单元格
    pub first_in_module: bool,
    pub cells: [MatrixCell; 4],
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixView {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<MatrixRow>,
}

impl MatrixView {
    pub fn from_matrix(matrix: &PermissionMatrix) -> Self {
        let columns = Action::ALL
            .iter()
            .map(|&action| {
                let state = matrix.column_state(action);
                ColumnHeader {
                    action,
                    label: action.label(),
                    state,
                    enabled: state != ColumnState::Unavailable,
                }
            })
            .collect();

        let rows = matrix
            .modules()
            .iter()
            .flat_map(|module| {
                module
                    .permissions
                    .iter()
                    .enumerate()
                    .map(move |(i, permission)| MatrixRow {
                        module_id: module.id,
                        module_name: module.name.clone(),
                        permission_id: permission.id,
                        permission_name: permission.name.clone(),
                        first_in_module: i == 0,
                        cells: Action::ALL.map(|action| MatrixCell {
                            action,
                            visible: permission.is_capable(action),
                            checked: permission.is_granted(action),
                        }),
                    })
            })
            .collect();

        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 渲染为定宽文本表格
    pub fn render_text(&self) -> String {
        let module_width = self
            .rows
            .iter()
            .map(|r| r.module_name.chars().count())
            .chain(std::iter::once("Module".len()))
            .max()
            .unwrap_or(0);
        let permission_width = self
            .rows
            .iter()
            .map(|r| r.permission_name.chars().count())
            .chain(std::iter::once("Permission".len()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let _ = write!(
            out,
            "{:<mw$} | {:<pw$}",
            "Module",
            "Permission",
            mw = module_width,
            pw = permission_width
        );
        for column in &self.columns {
            let _ = write!(out, " | {:<6}", column.label);
        }
        out.push('\n');

        let _ = write!(out, "{:<mw$} | {:<pw$}", "", "", mw = module_width, pw = permission_width);
        for column in &self.columns {
            let _ = write!(out, " | {:<6}", header_mark(column.state));
        }
        out.push('\n');

        for row in &self.rows {
            let module = if row.first_in_module { row.module_name.as_str() } else { "" };
            let _ = write!(
                out,
                "{:<mw$} | {:<pw$}",
                module,
                row.permission_name,
                mw = module_width,
                pw = permission_width
            );
            for cell in &row.cells {
                let _ = write!(out, " | {:<6}", cell_mark(cell));
            }
            out.push('\n');
        }
        out
    }
}

fn header_mark(state: ColumnState) -> &'static str {
    match state {
        ColumnState::All => "[x]",
        ColumnState::None => "[ ]",
        ColumnState::Partial => "[~]",
        ColumnState::Unavailable => "-",
    }
}

fn cell_mark(cell: &MatrixCell) -> &'static str {
    match (cell.visible, cell.checked) {
        (false, _) => "-",
        (true, true) => "[x]",
        (true, false) => "[ ]",
    }
}

/// 整个编辑页的视图
#[derive(Debug, Clone)]
pub struct EditorView {
    pub role_id: Option<RoleId>,
    pub status: EditorStatus,
    /// 加载中或保存中时显示加载指示
    pub busy: bool,
    /// 有修改且当前可保存时保存按钮可用
    pub can_save: bool,
    pub error: Option<String>,
    pub matrix: Option<MatrixView>,
}

impl EditorView {
    pub fn from_snapshot(snapshot: &EditorSnapshot) -> Self {
        let busy = matches!(snapshot.status, EditorStatus::Loading | EditorStatus::Saving);
        let can_save = snapshot.dirty
            && snapshot.matrix.is_some()
            && matches!(snapshot.status, EditorStatus::Ready | EditorStatus::Error);

        Self {
            role_id: snapshot.role_id,
            status: snapshot.status,
            busy,
            can_save,
            error: snapshot.last_error.clone(),
            matrix: snapshot.matrix.as_ref().map(MatrixView::from_matrix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::{Module, Permission};

    fn matrix() -> PermissionMatrix {
        PermissionMatrix::from_modules(vec![
            Module::new(
                ModuleId::new(1),
                "Attendance",
                vec![
                    Permission::new(PermissionId::new(10), "Mark Attendance")
                        .with_capabilities(&[Action::View, Action::Add]),
                    Permission::new(PermissionId::new(11), "Attendance Report")
                        .with_capabilities(&[Action::View]),
                ],
            ),
            Module::new(
                ModuleId::new(2),
                "Library",
                vec![
                    Permission::new(PermissionId::new(20), "Books")
                        .with_capabilities(&[Action::View, Action::Add]),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_rows_follow_module_order() {
        let view = MatrixView::from_matrix(&matrix());
        let names: Vec<_> = view.rows.iter().map(|r| r.permission_name.as_str()).collect();
        assert_eq!(names, ["Mark Attendance", "Attendance Report", "Books"]);
        assert!(view.rows[0].first_in_module);
        assert!(!view.rows[1].first_in_module);
        assert!(view.rows[2].first_in_module);
    }

    #[test]
    fn test_cells_reflect_capability_and_grant() {
        let mut m = matrix();
        m.set_grant(ModuleId::new(1), PermissionId::new(10), Action::View, true)
            .unwrap();
        let view = MatrixView::from_matrix(&m);

        let cells = view.rows[0].cells;
        assert!(cells[0].visible && cells[0].checked);
        assert!(cells[1].visible && !cells[1].checked);
        assert!(!cells[2].visible && !cells[3].visible);
    }

    #[test]
    fn test_column_headers() {
        let mut m = matrix();
        m.set_column_all(Action::Add, true);
        m.set_grant(ModuleId::new(1), PermissionId::new(11), Action::View, true)
            .unwrap();
        let view = MatrixView::from_matrix(&m);

        assert_eq!(view.columns[0].state, ColumnState::Partial);
        assert_eq!(view.columns[1].state, ColumnState::All);
        assert_eq!(view.columns[2].state, ColumnState::Unavailable);
        assert!(!view.columns[2].enabled);
        assert!(view.columns[0].enabled);
    }

    #[test]
    fn test_render_text() {
        let text = MatrixView::from_matrix(&matrix()).render_text();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Module"));
        assert!(lines[0].contains("View") && lines[0].contains("Delete"));
        assert!(lines[2].starts_with("Attendance"));
        assert!(lines[3].starts_with(' '));
        assert!(lines[3].contains("Attendance Report"));
        assert!(lines[2].contains("[ ]"));
    }

    #[test]
    fn test_editor_view_flags() {
        let snapshot = EditorSnapshot {
            status: EditorStatus::Saving,
            role_id: Some(RoleId::new(3)),
            matrix: Some(matrix()),
            last_error: None,
            dirty: true,
        };
        let view = EditorView::from_snapshot(&snapshot);
        assert!(view.busy);
        assert!(!view.can_save);
        assert_eq!(view.matrix.map(|m| m.rows.len()), Some(3));

        let idle = EditorSnapshot {
            status: EditorStatus::Idle,
            role_id: None,
            matrix: None,
            last_error: None,
            dirty: false,
        };
        let view = EditorView::from_snapshot(&idle);
        assert!(!view.busy && !view.can_save && view.matrix.is_none());
    }
}
