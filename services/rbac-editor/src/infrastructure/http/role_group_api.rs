//! 角色组接口

use std::sync::Arc;

use async_trait::async_trait;
use campus_common::{RoleGroupId, RoleId};
use campus_errors::AppResult;

use super::client::ApiClient;
use super::dto::{DataEnvelope, ReplaceRolesRequest};
use crate::domain::role::{Role, RoleGroup, RoleGroupApi, RoleGroupDraft};

pub struct HttpRoleGroupApi {
    client: Arc<ApiClient>,
}

impl HttpRoleGroupApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleGroupApi for HttpRoleGroupApi {
    async fn list_groups(&self) -> AppResult<Vec<RoleGroup>> {
        let envelope: DataEnvelope<Vec<RoleGroup>> = self.client.get("api/role-groups").await?;
        Ok(envelope.data)
    }

    async fn create_group(&self, draft: &RoleGroupDraft) -> AppResult<RoleGroup> {
        let envelope: DataEnvelope<RoleGroup> =
            self.client.post("api/role-groups", draft).await?;
        Ok(envelope.data)
    }

    async fn update_group(&self, id: RoleGroupId, draft: &RoleGroupDraft) -> AppResult<RoleGroup> {
        let envelope: DataEnvelope<RoleGroup> = self
            .client
            .put(&format!("api/role-groups/{}", id), draft)
            .await?;
        Ok(envelope.data)
    }

    async fn delete_group(&self, id: RoleGroupId) -> AppResult<()> {
        self.client.delete(&format!("api/role-groups/{}", id)).await
    }

    // 该接口直接返回数组，没有 data 包装
    async fn get_group_roles(&self, id: RoleGroupId) -> AppResult<Vec<Role>> {
        self.client.get(&format!("api/role-groups/{}/roles", id)).await
    }

    async fn replace_group_roles(&self, id: RoleGroupId, role_ids: &[RoleId]) -> AppResult<()> {
        self.client
            .post_unit(
                &format!("api/role-groups/{}/roles", id),
                &ReplaceRolesRequest { role_ids },
            )
            .await
    }
}
