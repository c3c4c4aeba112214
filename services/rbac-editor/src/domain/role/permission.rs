//! 权限与功能模块

use campus_common::{ModuleId, PermissionId};
use campus_errors::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

/// 矩阵中的操作列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Add,
    Edit,
    Delete,
}

impl Action {
    /// 按列显示顺序
    pub const ALL: [Action; 4] = [Action::View, Action::Add, Action::Edit, Action::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Add => "add",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::View => "View",
            Action::Add => "Add",
            Action::Edit => "Edit",
            Action::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "view" => Ok(Action::View),
            "add" => Ok(Action::Add),
            "edit" => Ok(Action::Edit),
            "delete" => Ok(Action::Delete),
            other => Err(AppError::validation(format!("Unknown action '{}'", other))),
        }
    }
}

/// 后端的布尔字段可能以 `true/false` 或 `0/1` 返回
pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(n) => Err(D::Error::custom(format!(
            "invalid flag value {}, expected 0 or 1",
            n
        ))),
    }
}

/// 单个权限
///
/// `show_*` 表示该操作是否适用于此权限 (能力位)，
/// `is_*` 表示当前角色是否被授予该操作 (授权位)。
/// 授权位只能在对应能力位为 true 时置为 true。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    pub name: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub show_view: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub show_add: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub show_edit: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub show_delete: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_view: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_add: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_edit: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_delete: bool,
}

impl Permission {
    /// 创建没有任何能力与授权的权限
    pub fn new(id: PermissionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            show_view: false,
            show_add: false,
            show_edit: false,
            show_delete: false,
            is_view: false,
            is_add: false,
            is_edit: false,
            is_delete: false,
        }
    }

    /// 开启若干操作的能力位
    pub fn with_capabilities(mut self, actions: &[Action]) -> Self {
        for action in actions {
            *self.capability_mut(*action) = true;
        }
        self
    }

    /// 是否支持该操作
    pub fn is_capable(&self, action: Action) -> bool {
        match action {
            Action::View => self.show_view,
            Action::Add => self.show_add,
            Action::Edit => self.show_edit,
            Action::Delete => self.show_delete,
        }
    }

    /// 是否已授予该操作
    pub fn is_granted(&self, action: Action) -> bool {
        match action {
            Action::View => self.is_view,
            Action::Add => self.is_add,
            Action::Edit => self.is_edit,
            Action::Delete => self.is_delete,
        }
    }

    fn capability_mut(&mut self, action: Action) -> &mut bool {
        match action {
            Action::View => &mut self.show_view,
            Action::Add => &mut self.show_add,
            Action::Edit => &mut self.show_edit,
            Action::Delete => &mut self.show_delete,
        }
    }

    fn grant_mut(&mut self, action: Action) -> &mut bool {
        match action {
            Action::View => &mut self.is_view,
            Action::Add => &mut self.is_add,
            Action::Edit => &mut self.is_edit,
            Action::Delete => &mut self.is_delete,
        }
    }

    /// 设置授权位，返回是否发生变化
    ///
    /// 能力位为 false 时不做任何修改并返回 InvalidAction
    pub fn set_grant(&mut self, action: Action, value: bool) -> AppResult<bool> {
        if !self.is_capable(action) {
            return Err(AppError::invalid_action(format!(
                "'{}' is not applicable to permission '{}' ({})",
                action, self.name, self.id
            )));
        }
        let flag = self.grant_mut(action);
        let changed = *flag != value;
        *flag = value;
        Ok(changed)
    }

    /// 授权位与能力位是否一致
    pub fn violations(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|a| self.is_granted(*a) && !self.is_capable(*a))
            .collect()
    }
}

/// 功能模块，权限顺序即显示顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Module {
    pub fn new(id: ModuleId, name: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            id,
            name: name.into(),
            permissions,
        }
    }

    pub fn permission(&self, id: PermissionId) -> Option<&Permission> {
        self.permissions.iter().find(|p| p.id == id)
    }

    pub fn permission_mut(&mut self, id: PermissionId) -> Option<&mut Permission> {
        self.permissions.iter_mut().find(|p| p.id == id)
    }
}
