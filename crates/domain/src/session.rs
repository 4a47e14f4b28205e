//! Transient create/edit form state wrapping one role draft.

use std::sync::Arc;

use callops_core::{AppError, AppResult};

use crate::catalog::{Category, PermissionCatalog};
use crate::permissions::{self, CategoryState};
use crate::role::{Role, RoleDraft, RoleId, RoleValidationError, ValidatedDraft};
use crate::schedule::ScheduleId;

/// What a submitted session writes to the role collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionMode {
    /// Insert a new role.
    Create,
    /// Replace the mutable fields of an existing role.
    Edit(RoleId),
}

/// Validated draft emitted by a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCommit {
    /// Insert or replace target.
    pub mode: SessionMode,
    /// Draft to commit.
    pub draft: ValidatedDraft,
}

/// Result of submitting an open session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSubmission {
    /// Draft passed validation; the session is now closed.
    Ready(SessionCommit),
    /// Draft failed validation; the session stays open.
    Rejected(RoleValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Closed,
    Open { mode: SessionMode, draft: RoleDraft },
}

/// Edit session for one role draft.
///
/// Starts closed. Opening an already open session replaces its draft.
#[derive(Debug, Clone)]
pub struct RoleEditSession {
    catalog: Arc<PermissionCatalog>,
    state: SessionState,
}

impl RoleEditSession {
    /// Creates a closed session against a permission catalog.
    #[must_use]
    pub fn new(catalog: Arc<PermissionCatalog>) -> Self {
        Self {
            catalog,
            state: SessionState::Closed,
        }
    }

    /// Opens the session with an empty draft for a new role.
    pub fn open_create(&mut self) {
        self.state = SessionState::Open {
            mode: SessionMode::Create,
            draft: RoleDraft::default(),
        };
    }

    /// Opens the session with a copy of an existing role.
    pub fn open_edit(&mut self, role: &Role) {
        self.state = SessionState::Open {
            mode: SessionMode::Edit(role.id()),
            draft: role.to_draft(),
        };
    }

    /// Returns whether a draft is being edited.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open { .. })
    }

    /// Returns the session mode while open.
    #[must_use]
    pub fn mode(&self) -> Option<SessionMode> {
        match &self.state {
            SessionState::Open { mode, .. } => Some(*mode),
            SessionState::Closed => None,
        }
    }

    /// Returns the current draft while open.
    #[must_use]
    pub fn draft(&self) -> Option<&RoleDraft> {
        match &self.state {
            SessionState::Open { draft, .. } => Some(draft),
            SessionState::Closed => None,
        }
    }

    /// Returns the catalog the session edits against.
    #[must_use]
    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// Replaces the draft name.
    pub fn set_name(&mut self, name: impl Into<String>) -> AppResult<()> {
        self.draft_mut()?.name = name.into();
        Ok(())
    }

    /// Replaces the draft description.
    pub fn set_description(&mut self, description: impl Into<String>) -> AppResult<()> {
        self.draft_mut()?.description = description.into();
        Ok(())
    }

    /// Flips one permission in the draft.
    pub fn toggle_permission(&mut self, category_key: &str, permission_key: &str) -> AppResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let draft = self.draft_mut()?;
        if !catalog.contains(category_key, permission_key) {
            return Err(AppError::NotFound(format!(
                "permission '{category_key}.{permission_key}' is not in the catalog"
            )));
        }

        draft.permissions =
            permissions::toggle_permission(&draft.permissions, category_key, permission_key);
        Ok(())
    }

    /// Applies the bulk category toggle to the draft.
    pub fn toggle_category(&mut self, category_key: &str) -> AppResult<CategoryState> {
        let catalog = Arc::clone(&self.catalog);
        let draft = self.draft_mut()?;
        let category = find_category(&catalog, category_key)?;

        draft.permissions = permissions::toggle_category(&draft.permissions, category);
        Ok(permissions::category_state(&draft.permissions, category))
    }

    /// Adds the schedule when absent, removes it otherwise.
    ///
    /// Returns whether the schedule is assigned after the toggle.
    pub fn toggle_schedule(&mut self, schedule_id: ScheduleId) -> AppResult<bool> {
        let schedules = &mut self.draft_mut()?.schedules;
        if schedules.remove(&schedule_id) {
            return Ok(false);
        }

        schedules.insert(schedule_id);
        Ok(true)
    }

    /// Reads the tri-state of a category in the current draft.
    pub fn category_state(&self, category_key: &str) -> AppResult<CategoryState> {
        let draft = self.draft().ok_or_else(closed_session_error)?;
        let category = find_category(&self.catalog, category_key)?;
        Ok(permissions::category_state(&draft.permissions, category))
    }

    /// Discards the draft and closes the session.
    pub fn cancel(&mut self) {
        self.state = SessionState::Closed;
    }

    /// Validates the draft without closing the session.
    ///
    /// Callers that commit the result elsewhere call [`Self::close`] once the
    /// commit succeeded, so a failed commit keeps the draft for a retry.
    pub fn validate(&self) -> AppResult<SessionSubmission> {
        let SessionState::Open { mode, draft } = &self.state else {
            return Err(closed_session_error());
        };

        Ok(match draft.validate() {
            Ok(validated) => SessionSubmission::Ready(SessionCommit {
                mode: *mode,
                draft: validated,
            }),
            Err(reason) => SessionSubmission::Rejected(reason),
        })
    }

    /// Closes the session after its draft was committed.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }

    /// Validates the draft and closes the session when it passes.
    pub fn submit(&mut self) -> AppResult<SessionSubmission> {
        let submission = self.validate()?;
        if matches!(submission, SessionSubmission::Ready(_)) {
            self.close();
        }

        Ok(submission)
    }

    fn draft_mut(&mut self) -> AppResult<&mut RoleDraft> {
        match &mut self.state {
            SessionState::Open { draft, .. } => Ok(draft),
            SessionState::Closed => Err(closed_session_error()),
        }
    }
}

fn find_category<'a>(catalog: &'a PermissionCatalog, category_key: &str) -> AppResult<&'a Category> {
    catalog.category(category_key).ok_or_else(|| {
        AppError::NotFound(format!("permission category '{category_key}' is not in the catalog"))
    })
}

fn closed_session_error() -> AppError {
    AppError::Conflict("role edit session is not open".to_owned())
}
