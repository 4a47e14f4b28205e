//! In-memory role list with filtering and lifecycle operations.

use std::collections::HashSet;

use callops_core::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::{Role, RoleId, ValidatedDraft};
use crate::session::{SessionCommit, SessionMode};

/// List filter for the roles screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleFilter {
    /// Case-insensitive substring matched against name and description.
    pub search_text: String,
    /// Selects inactive roles when `true`, active roles otherwise.
    pub show_inactive: bool,
}

impl RoleFilter {
    /// Returns whether the role belongs to this view.
    #[must_use]
    pub fn matches(&self, role: &Role) -> bool {
        if role.is_active() == self.show_inactive {
            return false;
        }

        let needle = self.search_text.to_lowercase();
        role.name().as_str().to_lowercase().contains(needle.as_str())
            || role.description().to_lowercase().contains(needle.as_str())
    }
}

/// Caller acknowledgement required before a destructive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confirmation {
    /// The user explicitly confirmed the operation.
    Confirmed,
    /// No confirmation was collected.
    Unconfirmed,
}

/// Full collection state handed to persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSnapshot {
    /// Roles in insertion order.
    pub roles: Vec<Role>,
    /// Next identifier to assign.
    pub next_role_id: u64,
}

impl Default for RoleSnapshot {
    fn default() -> Self {
        Self {
            roles: Vec::new(),
            next_role_id: 1,
        }
    }
}

/// Owner of every committed role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCollection {
    roles: Vec<Role>,
    next_role_id: u64,
}

impl Default for RoleCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roles: Vec::new(),
            next_role_id: 1,
        }
    }

    /// Restores a collection, rejecting duplicate identifiers and roles that
    /// would not pass draft validation.
    pub fn from_snapshot(snapshot: RoleSnapshot) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for role in &snapshot.roles {
            if !seen.insert(role.id()) {
                return Err(AppError::Validation(format!(
                    "duplicate role id '{}' in snapshot",
                    role.id()
                )));
            }

            if let Err(reason) = role.to_draft().validate() {
                return Err(AppError::Validation(format!(
                    "role '{}' in snapshot is invalid: {}",
                    role.id(),
                    reason.code()
                )));
            }
        }

        let highest = snapshot
            .roles
            .iter()
            .map(|role| role.id().as_u64())
            .max()
            .unwrap_or(0);
        let floor = highest.checked_add(1).ok_or_else(|| {
            AppError::Validation(format!("role id '{highest}' in snapshot is out of range"))
        })?;

        Ok(Self {
            next_role_id: snapshot.next_role_id.max(floor),
            roles: snapshot.roles,
        })
    }

    /// Captures the collection for persistence.
    #[must_use]
    pub fn snapshot(&self) -> RoleSnapshot {
        RoleSnapshot {
            roles: self.roles.clone(),
            next_role_id: self.next_role_id,
        }
    }

    /// Returns the number of stored roles, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Finds a role by identifier.
    #[must_use]
    pub fn get(&self, role_id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|role| role.id() == role_id)
    }

    /// Lists roles matching the filter in insertion order.
    #[must_use]
    pub fn list(&self, filter: &RoleFilter) -> Vec<&Role> {
        self.roles.iter().filter(|role| filter.matches(role)).collect()
    }

    /// Inserts a new active role with a fresh identifier.
    ///
    /// Fails with `Conflict` once the identifier space is used up.
    pub fn create(&mut self, draft: ValidatedDraft, created_at: DateTime<Utc>) -> AppResult<Role> {
        let next_role_id = self
            .next_role_id
            .checked_add(1)
            .ok_or_else(|| AppError::Conflict("role identifiers are exhausted".to_owned()))?;
        let role_id = RoleId::new(self.next_role_id);
        self.next_role_id = next_role_id;

        let role = Role::create(role_id, draft, created_at);
        self.roles.push(role.clone());
        Ok(role)
    }

    /// Replaces the mutable fields of an existing role.
    pub fn update(&mut self, role_id: RoleId, draft: ValidatedDraft) -> AppResult<Role> {
        let role = self.get_mut(role_id)?;
        role.apply_draft(draft);
        Ok(role.clone())
    }

    /// Sets the active flag of an existing role.
    pub fn set_active(&mut self, role_id: RoleId, active: bool) -> AppResult<Role> {
        let role = self.get_mut(role_id)?;
        role.set_active(active);
        Ok(role.clone())
    }

    /// Removes a role once the caller has confirmed the deletion.
    pub fn delete(&mut self, role_id: RoleId, confirmation: Confirmation) -> AppResult<Role> {
        if confirmation != Confirmation::Confirmed {
            return Err(AppError::ConfirmationRequired(format!(
                "deleting role '{role_id}' requires confirmation"
            )));
        }

        let index = self
            .roles
            .iter()
            .position(|role| role.id() == role_id)
            .ok_or_else(|| role_not_found(role_id))?;
        Ok(self.roles.remove(index))
    }

    /// Commits a submitted edit session.
    pub fn apply(&mut self, commit: SessionCommit, now: DateTime<Utc>) -> AppResult<Role> {
        match commit.mode {
            SessionMode::Create => self.create(commit.draft, now),
            SessionMode::Edit(role_id) => self.update(role_id, commit.draft),
        }
    }

    fn get_mut(&mut self, role_id: RoleId) -> AppResult<&mut Role> {
        self.roles
            .iter_mut()
            .find(|role| role.id() == role_id)
            .ok_or_else(|| role_not_found(role_id))
    }
}

fn role_not_found(role_id: RoleId) -> AppError {
    AppError::NotFound(format!("role '{role_id}' does not exist"))
}
