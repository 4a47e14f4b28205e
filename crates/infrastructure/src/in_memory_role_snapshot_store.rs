use async_trait::async_trait;
use callops_application::RoleSnapshotStore;
use callops_core::AppResult;
use callops_domain::RoleSnapshot;
use tokio::sync::RwLock;

/// In-memory role snapshot store implementation.
#[derive(Debug, Default)]
pub struct InMemoryRoleSnapshotStore {
    snapshot: RwLock<RoleSnapshot>,
}

impl InMemoryRoleSnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleSnapshotStore for InMemoryRoleSnapshotStore {
    async fn load(&self) -> AppResult<RoleSnapshot> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &RoleSnapshot) -> AppResult<()> {
        *self.snapshot.write().await = snapshot.clone();
        Ok(())
    }
}
