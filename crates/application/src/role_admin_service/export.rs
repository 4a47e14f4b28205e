use super::*;

use callops_domain::RoleFilter;

use crate::role_admin_ports::RoleExportRow;

impl RoleAdminService {
    /// Projects the filtered role list into export rows.
    pub async fn export_rows(&self, filter: &RoleFilter) -> Vec<RoleExportRow> {
        self.collection
            .lock()
            .await
            .list(filter)
            .into_iter()
            .map(RoleExportRow::from)
            .collect()
    }
}
