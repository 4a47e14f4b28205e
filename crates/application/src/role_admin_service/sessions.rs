use super::*;

use std::collections::BTreeSet;

use chrono::Utc;

use callops_domain::{
    Role, RoleEditSession, RoleId, RoleValidationError, ScheduleId, SessionMode,
    SessionSubmission,
};

/// Result of submitting an edit session through the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft was committed; the session is closed.
    Committed(Role),
    /// Draft failed validation; the session is still open.
    Rejected(RoleValidationError),
}

impl RoleAdminService {
    /// Opens a session with an empty draft.
    #[must_use]
    pub fn open_create_session(&self) -> RoleEditSession {
        let mut session = RoleEditSession::new(Arc::clone(&self.catalog));
        session.open_create();
        session
    }

    /// Opens a session seeded from an existing role.
    pub async fn open_edit_session(&self, role_id: RoleId) -> AppResult<RoleEditSession> {
        let role = self.get_role(role_id).await?;

        let mut session = RoleEditSession::new(Arc::clone(&self.catalog));
        session.open_edit(&role);
        Ok(session)
    }

    /// Validates the session draft and commits it when it passes.
    ///
    /// Validation failures are returned as [`SubmitOutcome::Rejected`] and
    /// leave the session open for correction. The session is closed only
    /// after the commit is persisted, so a failed commit keeps the draft.
    pub async fn submit_session(&self, session: &mut RoleEditSession) -> AppResult<SubmitOutcome> {
        let commit = match session.validate()? {
            SessionSubmission::Ready(commit) => commit,
            SessionSubmission::Rejected(reason) => {
                self.notification_sink
                    .notify(Notification::failure(format!(
                        "Role could not be saved: {reason}"
                    )))
                    .await;
                return Ok(SubmitOutcome::Rejected(reason));
            }
        };

        self.warn_on_unknown_schedules(commit.draft.schedules()).await;

        let mode = commit.mode;
        let now = Utc::now();
        let result = self
            .mutate(|collection| collection.apply(commit, now))
            .await;

        if let Ok(role) = &result {
            tracing::info!(role_id = %role.id(), mode = ?mode, "role saved");
        }

        let role = self
            .report(
                result,
                |role| match mode {
                    SessionMode::Create => format!("Role '{}' created", role.name()),
                    SessionMode::Edit(_) => format!("Role '{}' updated", role.name()),
                },
                "Role could not be saved",
            )
            .await?;

        session.close();
        Ok(SubmitOutcome::Committed(role))
    }

    // Dangling schedule references are reported, never rejected.
    async fn warn_on_unknown_schedules(&self, schedule_ids: &BTreeSet<ScheduleId>) {
        if schedule_ids.is_empty() {
            return;
        }

        let known = match self.schedule_source.list_schedules().await {
            Ok(schedules) => schedules
                .iter()
                .map(|schedule| schedule.id())
                .collect::<BTreeSet<_>>(),
            Err(error) => {
                tracing::warn!(error = %error, "schedule source unavailable, skipping reference check");
                return;
            }
        };

        for schedule_id in schedule_ids.difference(&known) {
            tracing::warn!(schedule_id = %schedule_id, "role references unknown schedule");
        }
    }
}
