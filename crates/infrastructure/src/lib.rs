//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_role_snapshot_store;
mod in_memory_schedule_source;
mod tracing_notification_sink;

pub use in_memory_role_snapshot_store::InMemoryRoleSnapshotStore;
pub use in_memory_schedule_source::InMemoryScheduleSource;
pub use tracing_notification_sink::TracingNotificationSink;
