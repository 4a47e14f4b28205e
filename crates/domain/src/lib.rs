//! Role, permission, and schedule assignment engine.

#![forbid(unsafe_code)]

mod catalog;
mod collection;
mod permissions;
mod role;
mod schedule;
mod session;

pub use catalog::{Category, PermissionCatalog, PermissionDefinition};
pub use collection::{Confirmation, RoleCollection, RoleFilter, RoleSnapshot};
pub use permissions::{
    CategoryState, PermissionMap, category_state, toggle_category, toggle_permission,
};
pub use role::{
    ROLE_DESCRIPTION_MAX_LENGTH, ROLE_NAME_MAX_LENGTH, Role, RoleDraft, RoleId,
    RoleValidationError, ValidatedDraft,
};
pub use schedule::{Schedule, ScheduleId};
pub use session::{RoleEditSession, SessionCommit, SessionMode, SessionSubmission};
