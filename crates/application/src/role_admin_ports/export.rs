use callops_domain::Role;
use serde::{Deserialize, Serialize};

/// Tabular export projection of one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleExportRow {
    /// Role identifier.
    #[serde(rename = "ID")]
    pub id: u64,
    /// Role name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Role description.
    #[serde(rename = "Description")]
    pub description: String,
    /// Number of granted permissions.
    #[serde(rename = "PermissionCount")]
    pub permission_count: usize,
    /// Number of assigned schedules.
    #[serde(rename = "ScheduleCount")]
    pub schedule_count: usize,
    /// `Active` or `Inactive`.
    #[serde(rename = "Status")]
    pub status: String,
    /// Creation date as `YYYY-MM-DD`.
    #[serde(rename = "CreatedDate")]
    pub created_date: String,
}

impl From<&Role> for RoleExportRow {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id().as_u64(),
            name: role.name().as_str().to_owned(),
            description: role.description().to_owned(),
            permission_count: role.permission_count(),
            schedule_count: role.schedules().len(),
            status: if role.is_active() { "Active" } else { "Inactive" }.to_owned(),
            created_date: role.created_at().format("%Y-%m-%d").to_string(),
        }
    }
}
