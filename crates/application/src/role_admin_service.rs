use std::sync::Arc;

use tokio::sync::Mutex;

use callops_core::{AppError, AppResult};
use callops_domain::{PermissionCatalog, RoleCollection};

use crate::role_admin_ports::{
    Notification, NotificationSink, RoleSnapshotStore, ScheduleSource,
};

mod export;
mod roles;
mod sessions;

#[cfg(test)]
mod tests;

pub use sessions::SubmitOutcome;

/// Application service for the roles screen.
///
/// Every mutation is applied to a copy of the collection, persisted, and only
/// then made visible.
#[derive(Clone)]
pub struct RoleAdminService {
    catalog: Arc<PermissionCatalog>,
    collection: Arc<Mutex<RoleCollection>>,
    snapshot_store: Arc<dyn RoleSnapshotStore>,
    schedule_source: Arc<dyn ScheduleSource>,
    notification_sink: Arc<dyn NotificationSink>,
}

impl RoleAdminService {
    /// Creates a service with an empty collection.
    #[must_use]
    pub fn new(
        catalog: Arc<PermissionCatalog>,
        snapshot_store: Arc<dyn RoleSnapshotStore>,
        schedule_source: Arc<dyn ScheduleSource>,
        notification_sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            catalog,
            collection: Arc::new(Mutex::new(RoleCollection::new())),
            snapshot_store,
            schedule_source,
            notification_sink,
        }
    }

    /// Returns the permission catalog roles are edited against.
    #[must_use]
    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// Replaces the in-memory collection with the stored snapshot.
    ///
    /// Returns the number of loaded roles.
    pub async fn reload(&self) -> AppResult<usize> {
        let snapshot = self.snapshot_store.load().await?;
        let restored = RoleCollection::from_snapshot(snapshot)?;
        let count = restored.len();

        *self.collection.lock().await = restored;
        tracing::info!(role_count = count, "role collection loaded");
        Ok(count)
    }

    async fn mutate<T>(
        &self,
        operation: impl FnOnce(&mut RoleCollection) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut collection = self.collection.lock().await;
        let mut next = collection.clone();
        let value = operation(&mut next)?;

        self.snapshot_store.save(&next.snapshot()).await?;
        *collection = next;
        Ok(value)
    }

    async fn report<T>(
        &self,
        result: AppResult<T>,
        success_message: impl FnOnce(&T) -> String,
        failure_context: &str,
    ) -> AppResult<T> {
        let notification = match &result {
            Ok(value) => Notification::success(success_message(value)),
            Err(error) => {
                tracing::warn!(error = %error, "{failure_context}");
                Notification::failure(format!("{failure_context}: {}", user_message(error)))
            }
        };

        self.notification_sink.notify(notification).await;
        result
    }
}

fn user_message(error: &AppError) -> &str {
    match error {
        AppError::Validation(message)
        | AppError::NotFound(message)
        | AppError::Conflict(message)
        | AppError::ConfirmationRequired(message)
        | AppError::Internal(message) => message.as_str(),
    }
}
