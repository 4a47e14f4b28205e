//! Role entity, editable draft, and submit-time validation.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use callops_core::{AppError, NonEmptyString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::permissions::PermissionMap;
use crate::schedule::ScheduleId;

/// Maximum role name length in characters, after trimming.
pub const ROLE_NAME_MAX_LENGTH: usize = 100;

/// Maximum role description length in characters, after trimming.
pub const ROLE_DESCRIPTION_MAX_LENGTH: usize = 300;

/// Stable role identifier assigned by the role collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(u64);

impl RoleId {
    /// Creates a role identifier from its raw value.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Reason a draft cannot be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RoleValidationError {
    /// Name is empty after trimming.
    #[error("role name is required")]
    NameRequired,
    /// Name exceeds the maximum length.
    #[error("role name must be at most {} characters", ROLE_NAME_MAX_LENGTH)]
    NameTooLong,
    /// Description exceeds the maximum length.
    #[error("role description must be at most {} characters", ROLE_DESCRIPTION_MAX_LENGTH)]
    DescriptionTooLong,
    /// No permission is granted.
    #[error("role must grant at least one permission")]
    NoPermissions,
}

impl RoleValidationError {
    /// Returns a stable reason code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NameRequired => "name_required",
            Self::NameTooLong => "name_too_long",
            Self::DescriptionTooLong => "description_too_long",
            Self::NoPermissions => "no_permissions",
        }
    }
}

impl From<RoleValidationError> for AppError {
    fn from(value: RoleValidationError) -> Self {
        AppError::Validation(value.code().to_owned())
    }
}

/// Editable working copy of a role's mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDraft {
    /// Role display name, trimmed on validation.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Sparse permission grants.
    pub permissions: PermissionMap,
    /// Assigned schedules.
    pub schedules: BTreeSet<ScheduleId>,
}

impl RoleDraft {
    /// Checks the draft in submit order: name, lengths, then grants.
    pub fn validate(&self) -> Result<ValidatedDraft, RoleValidationError> {
        let name = NonEmptyString::new(self.name.as_str())
            .map_err(|_| RoleValidationError::NameRequired)?;
        if name.as_str().chars().count() > ROLE_NAME_MAX_LENGTH {
            return Err(RoleValidationError::NameTooLong);
        }

        let description = self.description.trim();
        if description.chars().count() > ROLE_DESCRIPTION_MAX_LENGTH {
            return Err(RoleValidationError::DescriptionTooLong);
        }

        if !self.permissions.any_granted() {
            return Err(RoleValidationError::NoPermissions);
        }

        Ok(ValidatedDraft {
            name,
            description: description.to_owned(),
            permissions: self.permissions.clone(),
            schedules: self.schedules.clone(),
        })
    }
}

/// Draft that passed validation and may be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraft {
    name: NonEmptyString,
    description: String,
    permissions: PermissionMap,
    schedules: BTreeSet<ScheduleId>,
}

impl ValidatedDraft {
    /// Returns the trimmed name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the trimmed description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the permission grants.
    #[must_use]
    pub fn permissions(&self) -> &PermissionMap {
        &self.permissions
    }

    /// Returns the assigned schedules.
    #[must_use]
    pub fn schedules(&self) -> &BTreeSet<ScheduleId> {
        &self.schedules
    }
}

/// Committed role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: NonEmptyString,
    description: String,
    permissions: PermissionMap,
    schedules: BTreeSet<ScheduleId>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl Role {
    pub(crate) fn create(id: RoleId, draft: ValidatedDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            permissions: draft.permissions,
            schedules: draft.schedules,
            active: true,
            created_at,
        }
    }

    // id, active and created_at survive edits.
    pub(crate) fn apply_draft(&mut self, draft: ValidatedDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.permissions = draft.permissions;
        self.schedules = draft.schedules;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Returns the stable identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the permission grants.
    #[must_use]
    pub fn permissions(&self) -> &PermissionMap {
        &self.permissions
    }

    /// Returns the assigned schedules.
    #[must_use]
    pub fn schedules(&self) -> &BTreeSet<ScheduleId> {
        &self.schedules
    }

    /// Returns whether the role is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Counts granted permissions.
    #[must_use]
    pub fn permission_count(&self) -> usize {
        self.permissions.granted_count()
    }

    /// Returns a deep copy of the mutable fields for editing.
    #[must_use]
    pub fn to_draft(&self) -> RoleDraft {
        RoleDraft {
            name: self.name.as_str().to_owned(),
            description: self.description.clone(),
            permissions: self.permissions.clone(),
            schedules: self.schedules.clone(),
        }
    }
}
