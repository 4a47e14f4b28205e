mod export;
mod notifications;
mod repositories;

pub use export::RoleExportRow;
pub use notifications::{Notification, NotificationKind};
pub use repositories::{NotificationSink, RoleSnapshotStore, ScheduleSource};
