//! 角色组实体

use std::collections::{BTreeSet, HashSet};

use campus_common::{RoleGroupId, RoleId};
use serde::{Deserialize, Serialize};

use super::role::Role;

/// 角色组，成员按角色 ID 去重
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGroup {
    pub id: RoleGroupId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl RoleGroup {
    pub fn new(id: RoleGroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            roles: Vec::new(),
        }
    }

    /// 添加角色 (已存在时不做任何事)
    pub fn add_role(&mut self, role: Role) -> bool {
        if self.roles.iter().any(|r| r.id == role.id) {
            return false;
        }
        self.roles.push(role);
        true
    }

    /// 移除角色
    pub fn remove_role(&mut self, role_id: RoleId) -> bool {
        let before = self.roles.len();
        self.roles.retain(|r| r.id != role_id);
        before != self.roles.len()
    }

    pub fn role_ids(&self) -> BTreeSet<RoleId> {
        self.roles.iter().map(|r| r.id).collect()
    }

    /// 去掉重复的成员，保留第一次出现的，返回移除的数量
    pub fn dedup_roles(&mut self) -> usize {
        let before = self.roles.len();
        let mut seen = HashSet::new();
        self.roles.retain(|r| seen.insert(r.id));
        before - self.roles.len()
    }
}

/// 创建或更新角色组时提交的字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleGroupDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_role_is_idempotent() {
        let mut group = RoleGroup::new(RoleGroupId::new(1), "Academic Staff");
        assert!(group.add_role(Role::new(RoleId::new(3), "Teacher")));
        assert!(!group.add_role(Role::new(RoleId::new(3), "Teacher")));
        assert_eq!(group.roles.len(), 1);

        assert!(group.remove_role(RoleId::new(3)));
        assert!(!group.remove_role(RoleId::new(3)));
    }

    #[test]
    fn test_dedup_keeps_first() {
        let mut group = RoleGroup::new(RoleGroupId::new(1), "Office");
        group.roles = vec![
            Role::new(RoleId::new(4), "Clerk"),
            Role::new(RoleId::new(5), "Accountant"),
            Role::new(RoleId::new(4), "Clerk (dup)"),
        ];

        assert_eq!(group.dedup_roles(), 1);
        assert_eq!(group.roles[0].name, "Clerk");
        assert_eq!(group.role_ids().into_iter().collect::<Vec<_>>(), vec![RoleId::new(4), RoleId::new(5)]);
    }
}
