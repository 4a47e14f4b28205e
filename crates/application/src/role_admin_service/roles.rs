use super::*;

use callops_domain::{Confirmation, Role, RoleFilter, RoleId, Schedule};

impl RoleAdminService {
    /// Lists roles matching the filter.
    pub async fn list_roles(&self, filter: &RoleFilter) -> Vec<Role> {
        self.collection
            .lock()
            .await
            .list(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns one role by identifier.
    pub async fn get_role(&self, role_id: RoleId) -> AppResult<Role> {
        self.collection
            .lock()
            .await
            .get(role_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    /// Lists schedules that can be assigned to roles.
    pub async fn list_schedules(&self) -> AppResult<Vec<Schedule>> {
        self.schedule_source.list_schedules().await
    }

    /// Activates or deactivates a role without opening an edit session.
    pub async fn set_role_active(&self, role_id: RoleId, active: bool) -> AppResult<Role> {
        let result = self
            .mutate(|collection| collection.set_active(role_id, active))
            .await;

        self.report(
            result,
            |role| {
                let status = if role.is_active() { "activated" } else { "deactivated" };
                format!("Role '{}' {status}", role.name())
            },
            "Role status could not be changed",
        )
        .await
    }

    /// Deletes a role. Callers must collect user confirmation first.
    pub async fn delete_role(
        &self,
        role_id: RoleId,
        confirmation: Confirmation,
    ) -> AppResult<Role> {
        let result = self
            .mutate(|collection| collection.delete(role_id, confirmation))
            .await;

        if let Ok(role) = &result {
            tracing::info!(role_id = %role.id(), "role deleted");
        }

        self.report(
            result,
            |role| format!("Role '{}' deleted", role.name()),
            "Role could not be deleted",
        )
        .await
    }
}
