//! 角色权限矩阵
//!
//! 单个角色的 模块 → 权限 → 操作 授权表。矩阵是角色选择时创建的临时副本，
//! 切换角色即丢弃；保存时总是提交完整矩阵而不是差异。

use std::collections::HashSet;

use campus_common::{ModuleId, PermissionId};
use campus_errors::{AppError, AppResult};

use super::role::{Action, Module, Permission};

/// 表头全选框的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnState {
    /// 所有可用权限均已授予
    All,
    /// 没有任何可用权限被授予
    None,
    /// 部分授予
    Partial,
    /// 没有任何权限支持该操作，表头不可点
    Unavailable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatrix {
    modules: Vec<Module>,
    /// 最近一次加载或保存成功时的内容，用于判断是否有未保存修改
    baseline: Vec<Module>,
}

impl PermissionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// 校验后构造
    pub fn from_modules(modules: Vec<Module>) -> AppResult<Self> {
        let mut matrix = Self::new();
        matrix.load(modules)?;
        Ok(matrix)
    }

    /// 校验服务端返回的矩阵
    ///
    /// 模块 ID 不可重复，同一模块内权限 ID 不可重复，授权位不得越过能力位
    pub fn validate(modules: &[Module]) -> AppResult<()> {
        let mut module_ids = HashSet::new();
        for module in modules {
            if !module_ids.insert(module.id) {
                return Err(AppError::decode(format!("Duplicate module id {}", module.id)));
            }

            let mut permission_ids = HashSet::new();
            for permission in &module.permissions {
                if !permission_ids.insert(permission.id) {
                    return Err(AppError::decode(format!(
                        "Duplicate permission id {} in module '{}'",
                        permission.id, module.name
                    )));
                }
                let violations = permission.violations();
                if !violations.is_empty() {
                    let actions: Vec<&str> = violations.iter().map(|a| a.as_str()).collect();
                    return Err(AppError::decode(format!(
                        "Permission '{}' ({}) grants [{}] without capability",
                        permission.name,
                        permission.id,
                        actions.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }

    /// 替换当前矩阵并重置修改状态
    ///
    /// 校验失败时保持原内容不变
    pub fn load(&mut self, modules: Vec<Module>) -> AppResult<()> {
        Self::validate(&modules)?;
        self.baseline = modules.clone();
        self.modules = modules;
        Ok(())
    }

    /// 设置单个授权位，返回是否发生变化
    pub fn set_grant(
        &mut self,
        module_id: ModuleId,
        permission_id: PermissionId,
        action: Action,
        value: bool,
    ) -> AppResult<bool> {
        let module = self
            .modules
            .iter_mut()
            .find(|m| m.id == module_id)
            .ok_or_else(|| AppError::not_found(format!("Module {} not loaded", module_id)))?;
        let permission = module.permission_mut(permission_id).ok_or_else(|| {
            AppError::not_found(format!(
                "Permission {} not found in module {}",
                permission_id, module_id
            ))
        })?;

        permission.set_grant(action, value)
    }

    /// 整列设置授权位 (表头全选)
    ///
    /// 只修改支持该操作的权限，返回实际变化的数量
    pub fn set_column_all(&mut self, action: Action, value: bool) -> usize {
        self.modules
            .iter_mut()
            .flat_map(|m| m.permissions.iter_mut())
            .filter(|p| p.is_capable(action))
            .filter_map(|p| p.set_grant(action, value).ok())
            .filter(|changed| *changed)
            .count()
    }

    /// 表头全选框的状态
    pub fn column_state(&self, action: Action) -> ColumnState {
        let (capable, granted) = self
            .permissions()
            .filter(|p| p.is_capable(action))
            .fold((0usize, 0usize), |(c, g), p| {
                (c + 1, g + usize::from(p.is_granted(action)))
            });

        match (capable, granted) {
            (0, _) => ColumnState::Unavailable,
            (_, 0) => ColumnState::None,
            (c, g) if c == g => ColumnState::All,
            _ => ColumnState::Partial,
        }
    }

    /// 导出完整矩阵用于提交
    pub fn serialize(&self) -> Vec<Module> {
        self.modules.clone()
    }

    /// 与最近一次加载/保存的内容是否不同
    pub fn is_dirty(&self) -> bool {
        self.modules != self.baseline
    }

    /// 服务端确认保存后调用
    pub fn mark_saved(&mut self) {
        self.baseline = self.modules.clone();
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, module_id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == module_id)
    }

    pub fn permission(&self, module_id: ModuleId, permission_id: PermissionId) -> Option<&Permission> {
        self.module(module_id)?.permission(permission_id)
    }

    pub fn permissions(&self) -> impl Iterator<Item = &Permission> {
        self.modules.iter().flat_map(|m| m.permissions.iter())
    }

    /// 已授予的授权位总数
    pub fn granted_count(&self) -> usize {
        self.permissions()
            .map(|p| Action::ALL.iter().filter(|a| p.is_granted(**a)).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendance() -> Module {
        Module::new(
            ModuleId::new(1),
            "Attendance",
            vec![
                Permission::new(PermissionId::new(11), "Mark Attendance")
                    .with_capabilities(&[Action::View, Action::Edit]),
                Permission::new(PermissionId::new(12), "Attendance Report")
                    .with_capabilities(&[Action::View]),
            ],
        )
    }

    fn fees() -> Module {
        Module::new(
            ModuleId::new(2),
            "Fees",
            vec![Permission::new(PermissionId::new(21), "Collect Fee").with_capabilities(&Action::ALL)],
        )
    }

    fn matrix() -> PermissionMatrix {
        PermissionMatrix::from_modules(vec![attendance(), fees()]).unwrap()
    }

    #[test]
    fn test_set_grant_without_capability_leaves_matrix_unchanged() {
        let mut m = matrix();
        let before = m.clone();

        for action in [Action::Add, Action::Delete] {
            let err = m
                .set_grant(ModuleId::new(1), PermissionId::new(11), action, true)
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidAction(_)));
        }
        assert_eq!(m, before);
        assert!(!m.is_dirty());
    }

    #[test]
    fn test_set_grant_unknown_ids() {
        let mut m = matrix();
        assert!(matches!(
            m.set_grant(ModuleId::new(9), PermissionId::new(11), Action::View, true),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            m.set_grant(ModuleId::new(1), PermissionId::new(21), Action::View, true),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_column_all_touches_only_capable_permissions() {
        let mut m = matrix();

        assert_eq!(m.set_column_all(Action::Edit, true), 2);
        assert!(m.permission(ModuleId::new(1), PermissionId::new(11)).unwrap().is_edit);
        assert!(!m.permission(ModuleId::new(1), PermissionId::new(12)).unwrap().is_edit);
        assert!(m.permission(ModuleId::new(2), PermissionId::new(21)).unwrap().is_edit);
        assert_eq!(m.column_state(Action::Edit), ColumnState::All);

        assert_eq!(m.set_column_all(Action::Edit, true), 0);
        assert_eq!(m.set_column_all(Action::Edit, false), 2);
        assert_eq!(m.column_state(Action::Edit), ColumnState::None);
        assert_eq!(m, matrix());
        assert!(!m.is_dirty());
    }

    #[test]
    fn test_column_state() {
        let mut m = matrix();
        assert_eq!(m.column_state(Action::View), ColumnState::None);

        m.set_grant(ModuleId::new(1), PermissionId::new(12), Action::View, true).unwrap();
        assert_eq!(m.column_state(Action::View), ColumnState::Partial);

        let only_reports = PermissionMatrix::from_modules(vec![Module::new(
            ModuleId::new(5),
            "Reports",
            vec![Permission::new(PermissionId::new(51), "Export").with_capabilities(&[Action::View])],
        )])
        .unwrap();
        assert_eq!(only_reports.column_state(Action::Delete), ColumnState::Unavailable);
    }

    #[test]
    fn test_serialize_roundtrip_preserves_order() {
        let m = matrix();
        let reloaded = PermissionMatrix::from_modules(m.serialize()).unwrap();

        assert_eq!(reloaded, m);
        let names: Vec<&str> = reloaded.permissions().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mark Attendance", "Attendance Report", "Collect Fee"]);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut m = matrix();
        m.set_grant(ModuleId::new(2), PermissionId::new(21), Action::Delete, true).unwrap();
        assert!(m.is_dirty());
        assert_eq!(m.granted_count(), 1);

        m.mark_saved();
        assert!(!m.is_dirty());

        m.set_grant(ModuleId::new(2), PermissionId::new(21), Action::Delete, false).unwrap();
        assert!(m.is_dirty());
        // 改回基线值即不再有修改
        m.set_grant(ModuleId::new(2), PermissionId::new(21), Action::Delete, true).unwrap();
        assert!(!m.is_dirty());
    }

    #[test]
    fn test_load_resets_dirty_and_rejects_invalid_input() {
        let mut m = matrix();
        m.set_column_all(Action::View, true);
        assert!(m.is_dirty());

        let mut bad = fees();
        bad.permissions.push(Permission::new(PermissionId::new(21), "Duplicate"));
        assert!(matches!(m.load(vec![bad]), Err(AppError::Decode(_))));
        // 校验失败不影响现有内容
        assert!(m.is_dirty());

        m.load(vec![attendance()]).unwrap();
        assert!(!m.is_dirty());
        assert_eq!(m.modules().len(), 1);
    }

    #[test]
    fn test_validate_rejects_grant_without_capability() {
        let mut module = attendance();
        module.permissions[0].is_add = true;
        let err = PermissionMatrix::validate(&[module]).unwrap_err();
        assert!(matches!(err, AppError::Decode(ref m) if m.contains("Mark Attendance")));
    }

    #[test]
    fn test_validate_rejects_duplicate_modules() {
        assert!(PermissionMatrix::validate(&[fees(), fees()]).is_err());
    }

    #[test]
    fn test_scenario_teacher_attendance() {
        let mut m = PermissionMatrix::from_modules(vec![Module::new(
            ModuleId::new(1),
            "Attendance",
            vec![Permission::new(PermissionId::new(11), "Mark Attendance")
                .with_capabilities(&[Action::View, Action::Edit])],
        )])
        .unwrap();

        m.set_grant(ModuleId::new(1), PermissionId::new(11), Action::Edit, true).unwrap();
        assert_eq!(m.set_column_all(Action::Add, true), 0);

        let out = m.serialize();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].permissions.len(), 1);
        let p = &out[0].permissions[0];
        assert!(p.is_edit);
        assert!(!p.is_view && !p.is_add && !p.is_delete);
        assert!(p.show_view && p.show_edit && !p.show_add && !p.show_delete);
    }
}
