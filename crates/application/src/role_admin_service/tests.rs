use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveTime;
use tokio::sync::Mutex;

use callops_core::{AppError, AppResult};
use callops_domain::{
    Confirmation, PermissionCatalog, RoleFilter, RoleId, RoleSnapshot, RoleValidationError,
    Schedule, ScheduleId,
};

use crate::role_admin_ports::{
    Notification, NotificationKind, NotificationSink, RoleSnapshotStore, ScheduleSource,
};

use super::{RoleAdminService, SubmitOutcome};

#[derive(Default)]
struct FakeRoleSnapshotStore {
    snapshot: Mutex<RoleSnapshot>,
    saves: Mutex<usize>,
    fail_saves: bool,
}

#[async_trait]
impl RoleSnapshotStore for FakeRoleSnapshotStore {
    async fn load(&self) -> AppResult<RoleSnapshot> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save(&self, snapshot: &RoleSnapshot) -> AppResult<()> {
        if self.fail_saves {
            return Err(AppError::Internal("store offline".to_owned()));
        }

        *self.snapshot.lock().await = snapshot.clone();
        *self.saves.lock().await += 1;
        Ok(())
    }
}

struct FakeScheduleSource {
    schedules: Vec<Schedule>,
}

#[async_trait]
impl ScheduleSource for FakeScheduleSource {
    async fn list_schedules(&self) -> AppResult<Vec<Schedule>> {
        Ok(self.schedules.clone())
    }
}

#[derive(Default)]
struct FakeNotificationSink {
    notifications: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationSink for FakeNotificationSink {
    async fn notify(&self, notification: Notification) {
        self.notifications.lock().await.push(notification);
    }
}

struct Harness {
    service: RoleAdminService,
    store: Arc<FakeRoleSnapshotStore>,
    sink: Arc<FakeNotificationSink>,
}

fn harness_with_store(store: FakeRoleSnapshotStore) -> Harness {
    let store = Arc::new(store);
    let sink = Arc::new(FakeNotificationSink::default());
    let morning = Schedule::new(
        ScheduleId::new(1),
        "Morning",
        NaiveTime::from_hms_opt(8, 0, 0),
        NaiveTime::from_hms_opt(16, 0, 0),
    )
    .unwrap_or_else(|_| unreachable!());
    let evening = Schedule::new(ScheduleId::new(2), "Evening", None, None)
        .unwrap_or_else(|_| unreachable!());

    let service = RoleAdminService::new(
        PermissionCatalog::standard(),
        store.clone(),
        Arc::new(FakeScheduleSource {
            schedules: vec![morning, evening],
        }),
        sink.clone(),
    );

    Harness {
        service,
        store,
        sink,
    }
}

fn harness() -> Harness {
    harness_with_store(FakeRoleSnapshotStore::default())
}

async fn create_role(service: &RoleAdminService, name: &str) -> RoleId {
    let mut session = service.open_create_session();
    assert!(session.set_name(name).is_ok());
    assert!(session.toggle_permission("calls", "make_calls").is_ok());

    match service.submit_session(&mut session).await {
        Ok(SubmitOutcome::Committed(role)) => role.id(),
        _ => unreachable!(),
    }
}

#[tokio::test]
async fn submit_session_creates_role_and_persists_snapshot() {
    let harness = harness();
    let mut session = harness.service.open_create_session();
    assert!(session.set_name("Closer").is_ok());
    assert!(session.toggle_permission("calls", "make_calls").is_ok());
    assert!(session.toggle_schedule(ScheduleId::new(1)).is_ok());
    assert!(session.toggle_schedule(ScheduleId::new(2)).is_ok());

    let outcome = harness.service.submit_session(&mut session).await;
    let Ok(SubmitOutcome::Committed(role)) = outcome else {
        unreachable!()
    };

    assert!(role.is_active());
    assert_eq!(role.schedules().len(), 2);
    assert!(!session.is_open());
    assert_eq!(*harness.store.saves.lock().await, 1);
    assert_eq!(harness.store.snapshot.lock().await.roles.len(), 1);

    let notifications = harness.sink.notifications.lock().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
}

#[tokio::test]
async fn rejected_submit_keeps_session_open_and_notifies() {
    let harness = harness();
    let mut session = harness.service.open_create_session();
    assert!(session.set_name("   ").is_ok());

    let outcome = harness.service.submit_session(&mut session).await;

    assert!(matches!(
        outcome,
        Ok(SubmitOutcome::Rejected(RoleValidationError::NameRequired))
    ));
    assert!(session.is_open());
    assert_eq!(*harness.store.saves.lock().await, 0);
    assert_eq!(
        harness.sink.notifications.lock().await[0].kind,
        NotificationKind::Failure
    );
}

#[tokio::test]
async fn edit_session_updates_existing_role() {
    let harness = harness();
    let role_id = create_role(&harness.service, "Agent").await;

    let mut session = harness
        .service
        .open_edit_session(role_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(session.set_description("Inbound queue").is_ok());
    assert!(session.toggle_category("reports").is_ok());

    let outcome = harness.service.submit_session(&mut session).await;
    let Ok(SubmitOutcome::Committed(role)) = outcome else {
        unreachable!()
    };

    assert_eq!(role.id(), role_id);
    assert_eq!(role.description(), "Inbound queue");
    assert_eq!(role.permission_count(), 3);
}

#[tokio::test]
async fn edit_of_deleted_role_reports_not_found() {
    let harness = harness();
    let role_id = create_role(&harness.service, "Agent").await;
    let mut session = harness
        .service
        .open_edit_session(role_id)
        .await
        .unwrap_or_else(|_| unreachable!());

    let deleted = harness
        .service
        .delete_role(role_id, Confirmation::Confirmed)
        .await;
    assert!(deleted.is_ok());

    let outcome = harness.service.submit_session(&mut session).await;
    assert!(matches!(outcome, Err(AppError::NotFound(_))));
    assert!(session.is_open());
}

#[tokio::test]
async fn open_edit_session_for_missing_role_fails() {
    let harness = harness();
    let result = harness.service.open_edit_session(RoleId::new(9)).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn delete_without_confirmation_is_refused() {
    let harness = harness();
    let role_id = create_role(&harness.service, "Agent").await;

    let result = harness
        .service
        .delete_role(role_id, Confirmation::Unconfirmed)
        .await;

    assert!(matches!(result, Err(AppError::ConfirmationRequired(_))));
    assert!(harness.service.get_role(role_id).await.is_ok());
    let notifications = harness.sink.notifications.lock().await;
    assert_eq!(
        notifications.last().map(|notification| notification.kind),
        Some(NotificationKind::Failure)
    );
}

#[tokio::test]
async fn set_role_active_moves_role_between_views() {
    let harness = harness();
    let role_id = create_role(&harness.service, "Supervisor").await;

    let result = harness.service.set_role_active(role_id, false).await;
    assert!(matches!(result, Ok(ref role) if !role.is_active()));

    let active = harness.service.list_roles(&RoleFilter::default()).await;
    assert!(active.is_empty());

    let inactive = harness
        .service
        .list_roles(&RoleFilter {
            search_text: "SUPER".to_owned(),
            show_inactive: true,
        })
        .await;
    assert_eq!(inactive.len(), 1);
}

#[tokio::test]
async fn failed_save_leaves_collection_unchanged() {
    let harness = harness_with_store(FakeRoleSnapshotStore {
        fail_saves: true,
        ..FakeRoleSnapshotStore::default()
    });
    let mut session = harness.service.open_create_session();
    assert!(session.set_name("Agent").is_ok());
    assert!(session.toggle_category("calls").is_ok());

    let outcome = harness.service.submit_session(&mut session).await;

    assert!(matches!(outcome, Err(AppError::Internal(_))));
    assert!(harness.service.list_roles(&RoleFilter::default()).await.is_empty());
    assert!(session.is_open());
    assert_eq!(
        session.draft().map(|draft| draft.name.as_str()),
        Some("Agent")
    );
}

#[tokio::test]
async fn reload_restores_collection_from_store() {
    let first = harness();
    create_role(&first.service, "Agent").await;
    create_role(&first.service, "Closer").await;
    let snapshot = first.store.snapshot.lock().await.clone();

    let second = harness_with_store(FakeRoleSnapshotStore {
        snapshot: Mutex::new(snapshot),
        ..FakeRoleSnapshotStore::default()
    });
    let loaded = second.service.reload().await;
    assert!(matches!(loaded, Ok(2)));

    let created = create_role(&second.service, "Supervisor").await;
    assert_eq!(created, RoleId::new(3));
}

#[tokio::test]
async fn export_rows_project_counts_and_status() {
    let harness = harness();
    let role_id = create_role(&harness.service, "Agent").await;
    let mut session = harness
        .service
        .open_edit_session(role_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(session.toggle_schedule(ScheduleId::new(1)).is_ok());
    assert!(session.toggle_permission("users", "view_users").is_ok());
    assert!(harness.service.submit_session(&mut session).await.is_ok());
    assert!(harness.service.set_role_active(role_id, false).await.is_ok());

    let rows = harness
        .service
        .export_rows(&RoleFilter {
            search_text: String::new(),
            show_inactive: true,
        })
        .await;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, role_id.as_u64());
    assert_eq!(rows[0].permission_count, 2);
    assert_eq!(rows[0].schedule_count, 1);
    assert_eq!(rows[0].status, "Inactive");
    assert_eq!(rows[0].created_date.len(), 10);

    let json = serde_json::to_value(&rows[0]).unwrap_or_default();
    assert_eq!(json["PermissionCount"], 2);
    assert_eq!(json["Status"], "Inactive");
}

#[tokio::test]
async fn unknown_schedule_references_are_still_committed() {
    let harness = harness();
    let mut session = harness.service.open_create_session();
    assert!(session.set_name("Night crew").is_ok());
    assert!(session.toggle_permission("calls", "receive_calls").is_ok());
    assert!(session.toggle_schedule(ScheduleId::new(99)).is_ok());

    let outcome = harness.service.submit_session(&mut session).await;
    assert!(matches!(
        outcome,
        Ok(SubmitOutcome::Committed(ref role)) if role.schedules().contains(&ScheduleId::new(99))
    ));
}
