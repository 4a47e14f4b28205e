//! Sparse permission grants and tri-state category aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// Two-level grant map: category key to permission key to granted flag.
///
/// Entries are sparse. A missing category or permission reads as not granted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMap(BTreeMap<String, BTreeMap<String, bool>>);

impl PermissionMap {
    /// Creates an empty map with nothing granted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map with each `(category, permission)` pair granted.
    pub fn from_grants<'a>(grants: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut map = Self::new();
        for (category_key, permission_key) in grants {
            map.set(category_key, permission_key, true);
        }
        map
    }

    /// Returns whether the permission resolves to granted.
    #[must_use]
    pub fn is_granted(&self, category_key: &str, permission_key: &str) -> bool {
        self.0
            .get(category_key)
            .and_then(|permissions| permissions.get(permission_key))
            .copied()
            .unwrap_or(false)
    }

    /// Stores an explicit flag for one permission.
    pub fn set(&mut self, category_key: &str, permission_key: &str, granted: bool) {
        self.0
            .entry(category_key.to_owned())
            .or_default()
            .insert(permission_key.to_owned(), granted);
    }

    /// Counts granted leaves across all categories.
    #[must_use]
    pub fn granted_count(&self) -> usize {
        self.0
            .values()
            .flat_map(BTreeMap::values)
            .filter(|granted| **granted)
            .count()
    }

    /// Returns whether at least one permission is granted.
    #[must_use]
    pub fn any_granted(&self) -> bool {
        self.0
            .values()
            .flat_map(BTreeMap::values)
            .any(|granted| *granted)
    }
}

/// Aggregate check state of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryState {
    /// Every permission in the category is granted.
    Checked,
    /// Some, but not all, permissions are granted.
    Partial,
    /// No permission in the category is granted.
    Unchecked,
}

impl CategoryState {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checked => "checked",
            Self::Partial => "partial",
            Self::Unchecked => "unchecked",
        }
    }
}

/// Derives the category state from the catalog's permission keys.
///
/// Grants stored under keys the catalog does not declare are ignored. A
/// category without permissions is `Unchecked`.
#[must_use]
pub fn category_state(permissions: &PermissionMap, category: &Category) -> CategoryState {
    let total = category.permissions().len();
    let granted = category
        .permission_keys()
        .filter(|key| permissions.is_granted(category.key(), key))
        .count();

    match granted {
        0 => CategoryState::Unchecked,
        count if count == total => CategoryState::Checked,
        _ => CategoryState::Partial,
    }
}

/// Bulk toggle for a category.
///
/// A checked category is cleared. A partial or unchecked category has every
/// permission granted.
#[must_use]
pub fn toggle_category(permissions: &PermissionMap, category: &Category) -> PermissionMap {
    let grant = category_state(permissions, category) != CategoryState::Checked;

    let mut next = permissions.clone();
    for key in category.permission_keys() {
        next.set(category.key(), key, grant);
    }
    next
}

/// Flips exactly one permission leaf.
#[must_use]
pub fn toggle_permission(
    permissions: &PermissionMap,
    category_key: &str,
    permission_key: &str,
) -> PermissionMap {
    let mut next = permissions.clone();
    next.set(
        category_key,
        permission_key,
        !permissions.is_granted(category_key, permission_key),
    );
    next
}
