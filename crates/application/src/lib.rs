//! Application services and ports.

#![forbid(unsafe_code)]

mod role_admin_ports;
mod role_admin_service;

pub use role_admin_ports::{
    Notification, NotificationKind, NotificationSink, RoleExportRow, RoleSnapshotStore,
    ScheduleSource,
};
pub use role_admin_service::{RoleAdminService, SubmitOutcome};
