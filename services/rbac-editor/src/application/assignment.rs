//! 角色组成员分配服务

use std::collections::BTreeSet;
use std::sync::Arc;

use campus_common::{RoleGroupId, RoleId};
use campus_errors::{AppError, AppResult};
use tracing::{error, info};

use crate::domain::RoleGroupAssignment;
use crate::domain::role::RoleGroupApi;
use crate::infrastructure::metrics::EditorMetrics;

pub struct RoleGroupAssignmentService<G: RoleGroupApi> {
    api: Arc<G>,
}

impl<G: RoleGroupApi> RoleGroupAssignmentService<G> {
    pub fn new(api: Arc<G>) -> Self {
        Self { api }
    }

    /// 获取角色组当前成员
    pub async fn load_assignment(&self, group_id: RoleGroupId) -> AppResult<RoleGroupAssignment> {
        let roles = self.api.get_group_roles(group_id).await?;
        let members: BTreeSet<RoleId> = roles.iter().map(|r| r.id).collect();
        info!(%group_id, members = members.len(), "Role group assignment loaded");
        Ok(RoleGroupAssignment::new(group_id, members))
    }

    /// 以给定集合整体替换服务端成员
    ///
    /// 任何失败都以 Assignment 错误返回
    pub async fn commit(&self, group_id: RoleGroupId, roles: &BTreeSet<RoleId>) -> AppResult<()> {
        let role_ids: Vec<RoleId> = roles.iter().copied().collect();
        match self.api.replace_group_roles(group_id, &role_ids).await {
            Ok(()) => {
                info!(%group_id, members = role_ids.len(), "Role group membership committed");
                EditorMetrics::record_assignment_commit("ok");
                Ok(())
            }
            Err(e) => {
                error!(%group_id, error = %e, "Failed to commit role group membership");
                EditorMetrics::record_assignment_commit("error");
                Err(match e {
                    AppError::Assignment(msg) => AppError::Assignment(msg),
                    AppError::Validation(v) => AppError::Assignment(v.to_string()),
                    other => AppError::Assignment(other.to_string()),
                })
            }
        }
    }

    /// 提交本地编辑，成功后才更新确认集合
    pub async fn commit_assignment(&self, assignment: &mut RoleGroupAssignment) -> AppResult<()> {
        self.commit(assignment.group_id(), assignment.pending()).await?;
        assignment.confirm();
        Ok(())
    }
}
