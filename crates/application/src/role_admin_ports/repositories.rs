use async_trait::async_trait;

use callops_core::AppResult;
use callops_domain::{RoleSnapshot, Schedule};

use super::notifications::Notification;

/// Persistence port holding the full role collection.
#[async_trait]
pub trait RoleSnapshotStore: Send + Sync {
    /// Loads the last saved snapshot, or an empty one.
    async fn load(&self) -> AppResult<RoleSnapshot>;

    /// Replaces the stored snapshot.
    async fn save(&self, snapshot: &RoleSnapshot) -> AppResult<()>;
}

/// Read-only port for assignable schedules.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Lists schedules in display order.
    async fn list_schedules(&self) -> AppResult<Vec<Schedule>>;
}

/// Advisory port receiving operation outcomes for the user.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers one notification. Delivery failures are not reported back.
    async fn notify(&self, notification: Notification);
}
