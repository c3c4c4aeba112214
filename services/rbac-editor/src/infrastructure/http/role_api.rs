//! 角色与权限矩阵接口

use std::sync::Arc;

use async_trait::async_trait;
use campus_common::RoleId;
use campus_errors::AppResult;
use tracing::info;

use super::client::ApiClient;
use super::dto::{DataEnvelope, SavePermissionsRequest};
use crate::domain::PermissionMatrix;
use crate::domain::role::{Module, Role, RoleApi, RoleDraft, RolePermissionApi};

pub struct HttpRoleApi {
    client: Arc<ApiClient>,
}

impl HttpRoleApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleApi for HttpRoleApi {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let envelope: DataEnvelope<Vec<Role>> = self.client.get("api/roles").await?;
        Ok(envelope.data)
    }

    async fn create_role(&self, draft: &RoleDraft) -> AppResult<Role> {
        let envelope: DataEnvelope<Role> = self.client.post("api/roles", draft).await?;
        Ok(envelope.data)
    }

    async fn update_role(&self, id: RoleId, draft: &RoleDraft) -> AppResult<Role> {
        let envelope: DataEnvelope<Role> = self
            .client
            .put(&format!("api/roles/{}", id), draft)
            .await?;
        Ok(envelope.data)
    }

    async fn delete_role(&self, id: RoleId) -> AppResult<()> {
        self.client.delete(&format!("api/roles/{}", id)).await
    }
}

#[async_trait]
impl RolePermissionApi for HttpRoleApi {
    async fn get_permissions(&self, role_id: RoleId) -> AppResult<Vec<Module>> {
        let envelope: DataEnvelope<Vec<Module>> = self
            .client
            .get(&format!("api/roles/{}/permissions", role_id))
            .await?;
        PermissionMatrix::validate(&envelope.data)?;
        Ok(envelope.data)
    }

    async fn save_permissions(&self, role_id: RoleId, modules: &[Module]) -> AppResult<()> {
        self.client
            .post_unit(
                &format!("api/roles/{}/permissions", role_id),
                &SavePermissionsRequest { modules },
            )
            .await?;
        info!(%role_id, modules = modules.len(), "Permissions saved");
        Ok(())
    }
}
