//! 角色组成员分配

use std::collections::BTreeSet;

use campus_common::{RoleGroupId, RoleId};

/// 单个角色组的成员编辑状态
///
/// `confirmed` 只在服务端确认提交后更新，`pending` 承载本地编辑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGroupAssignment {
    group_id: RoleGroupId,
    confirmed: BTreeSet<RoleId>,
    pending: BTreeSet<RoleId>,
}

impl RoleGroupAssignment {
    pub fn new(group_id: RoleGroupId, members: BTreeSet<RoleId>) -> Self {
        Self {
            group_id,
            pending: members.clone(),
            confirmed: members,
        }
    }

    pub fn group_id(&self) -> RoleGroupId {
        self.group_id
    }

    /// 加入角色，返回集合是否变化
    pub fn assign(&mut self, role_id: RoleId) -> bool {
        self.pending.insert(role_id)
    }

    /// 移除角色，返回集合是否变化
    pub fn unassign(&mut self, role_id: RoleId) -> bool {
        self.pending.remove(&role_id)
    }

    pub fn contains(&self, role_id: RoleId) -> bool {
        self.pending.contains(&role_id)
    }

    /// 待提交的成员集合
    pub fn pending(&self) -> &BTreeSet<RoleId> {
        &self.pending
    }

    /// 服务端当前的成员集合
    pub fn confirmed(&self) -> &BTreeSet<RoleId> {
        &self.confirmed
    }

    pub fn is_dirty(&self) -> bool {
        self.pending != self.confirmed
    }

    /// 提交成功后以 pending 为准
    pub fn confirm(&mut self) {
        self.confirmed = self.pending.clone();
    }

    /// 放弃本地编辑
    pub fn reset(&mut self) {
        self.pending = self.confirmed.clone();
    }
}
