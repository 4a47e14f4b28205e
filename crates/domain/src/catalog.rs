//! Static permission catalog for the role administration screen.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use callops_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// One grantable capability inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPermissionDefinition")]
pub struct PermissionDefinition {
    key: String,
    label: String,
}

impl PermissionDefinition {
    /// Creates a permission definition with a validated key.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            key: NonEmptyString::new(key)?.into(),
            label: label.into(),
        })
    }

    /// Returns the stable permission key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }
}

/// Named group of related permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCategory")]
pub struct Category {
    key: String,
    label: String,
    permissions: Vec<PermissionDefinition>,
}

impl Category {
    /// Creates a category, rejecting duplicate permission keys.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        permissions: Vec<PermissionDefinition>,
    ) -> AppResult<Self> {
        let key: String = NonEmptyString::new(key)?.into();

        let mut seen = HashSet::new();
        for permission in &permissions {
            if !seen.insert(permission.key()) {
                return Err(AppError::Validation(format!(
                    "duplicate permission key '{}' in category '{}'",
                    permission.key(),
                    key
                )));
            }
        }

        Ok(Self {
            key,
            label: label.into(),
            permissions,
        })
    }

    /// Returns the stable category key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns member permissions in display order.
    #[must_use]
    pub fn permissions(&self) -> &[PermissionDefinition] {
        &self.permissions
    }

    /// Returns member permission keys in display order.
    pub fn permission_keys(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(PermissionDefinition::key)
    }

    /// Returns whether the category declares the permission key.
    #[must_use]
    pub fn contains(&self, permission_key: &str) -> bool {
        self.permission_keys().any(|key| key == permission_key)
    }
}

/// Ordered, immutable registry of permission categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPermissionCatalog")]
pub struct PermissionCatalog {
    categories: Vec<Category>,
}

// Deserialization goes through the validating constructors.
#[derive(Deserialize)]
struct RawPermissionDefinition {
    key: String,
    label: String,
}

impl TryFrom<RawPermissionDefinition> for PermissionDefinition {
    type Error = AppError;

    fn try_from(value: RawPermissionDefinition) -> Result<Self, Self::Error> {
        Self::new(value.key, value.label)
    }
}

#[derive(Deserialize)]
struct RawCategory {
    key: String,
    label: String,
    permissions: Vec<PermissionDefinition>,
}

impl TryFrom<RawCategory> for Category {
    type Error = AppError;

    fn try_from(value: RawCategory) -> Result<Self, Self::Error> {
        Self::new(value.key, value.label, value.permissions)
    }
}

#[derive(Deserialize)]
struct RawPermissionCatalog {
    categories: Vec<Category>,
}

impl TryFrom<RawPermissionCatalog> for PermissionCatalog {
    type Error = AppError;

    fn try_from(value: RawPermissionCatalog) -> Result<Self, Self::Error> {
        Self::new(value.categories)
    }
}

type CatalogTable = &'static [(&'static str, &'static str, &'static [(&'static str, &'static str)])];

const STANDARD_TABLE: CatalogTable = &[
    (
        "users",
        "User Management",
        &[
            ("view_users", "View users"),
            ("create_users", "Create users"),
            ("edit_users", "Edit users"),
            ("delete_users", "Delete users"),
        ],
    ),
    (
        "calls",
        "Calls",
        &[
            ("make_calls", "Make calls"),
            ("receive_calls", "Receive calls"),
            ("view_call_history", "View call history"),
            ("listen_recordings", "Listen to recordings"),
        ],
    ),
    (
        "campaigns",
        "Campaigns",
        &[
            ("view_campaigns", "View campaigns"),
            ("create_campaigns", "Create campaigns"),
            ("edit_campaigns", "Edit campaigns"),
            ("delete_campaigns", "Delete campaigns"),
        ],
    ),
    (
        "attendance",
        "Attendance",
        &[
            ("view_attendance", "View attendance"),
            ("manage_attendance", "Manage attendance"),
        ],
    ),
    (
        "announcements",
        "Announcements",
        &[
            ("view_announcements", "View announcements"),
            ("publish_announcements", "Publish announcements"),
        ],
    ),
    (
        "reports",
        "Reports",
        &[
            ("view_reports", "View reports"),
            ("export_reports", "Export reports"),
        ],
    ),
    (
        "settings",
        "Settings",
        &[
            ("manage_schedules", "Manage schedules"),
            ("manage_groups", "Manage groups"),
            ("manage_system", "Manage system settings"),
        ],
    ),
];

static STANDARD_CATALOG: LazyLock<Arc<PermissionCatalog>> =
    LazyLock::new(|| Arc::new(PermissionCatalog::from_table(STANDARD_TABLE)));

impl PermissionCatalog {
    /// Creates a catalog, rejecting duplicate category keys.
    pub fn new(categories: Vec<Category>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.key()) {
                return Err(AppError::Validation(format!(
                    "duplicate category key '{}'",
                    category.key()
                )));
            }
        }

        Ok(Self { categories })
    }

    /// Returns the process-wide call-center catalog.
    #[must_use]
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD_CATALOG)
    }

    // The static table is non-empty and duplicate-free; covered by tests.
    fn from_table(table: CatalogTable) -> Self {
        let categories = table
            .iter()
            .map(|(key, label, permissions)| Category {
                key: (*key).to_owned(),
                label: (*label).to_owned(),
                permissions: permissions
                    .iter()
                    .map(|(key, label)| PermissionDefinition {
                        key: (*key).to_owned(),
                        label: (*label).to_owned(),
                    })
                    .collect(),
            })
            .collect();

        Self { categories }
    }

    /// Returns categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Finds a category by key.
    #[must_use]
    pub fn category(&self, category_key: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.key() == category_key)
    }

    /// Returns the permission keys of a category, empty when unknown.
    #[must_use]
    pub fn permissions_of(&self, category_key: &str) -> Vec<&str> {
        self.category(category_key)
            .map(|category| category.permission_keys().collect())
            .unwrap_or_default()
    }

    /// Returns whether the catalog declares the permission.
    #[must_use]
    pub fn contains(&self, category_key: &str, permission_key: &str) -> bool {
        self.category(category_key)
            .is_some_and(|category| category.contains(permission_key))
    }
}

#[cfg(test)]
mod tests {
    use callops_core::AppError;

    use super::{Category, PermissionCatalog, PermissionDefinition};

    #[test]
    fn standard_catalog_satisfies_uniqueness_invariants() {
        let standard = PermissionCatalog::standard();
        let rebuilt = PermissionCatalog::new(standard.categories().to_vec());
        assert!(rebuilt.is_ok());

        for category in standard.categories() {
            let rebuilt_category = Category::new(
                category.key(),
                category.label(),
                category.permissions().to_vec(),
            );
            assert!(rebuilt_category.is_ok());
            assert!(!category.permissions().is_empty());
        }
    }

    #[test]
    fn permissions_of_preserves_declaration_order() {
        let catalog = PermissionCatalog::standard();
        assert_eq!(
            catalog.permissions_of("calls"),
            vec![
                "make_calls",
                "receive_calls",
                "view_call_history",
                "listen_recordings"
            ]
        );
        assert!(catalog.permissions_of("unknown").is_empty());
    }

    #[test]
    fn duplicate_permission_keys_are_rejected() {
        let permissions = vec![
            PermissionDefinition::new("make_calls", "Make calls"),
            PermissionDefinition::new("make_calls", "Make calls again"),
        ]
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|_| unreachable!());

        let result = Category::new("calls", "Calls", permissions);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn duplicate_category_keys_are_rejected() {
        let first = Category::new("calls", "Calls", Vec::new()).unwrap_or_else(|_| unreachable!());
        let second = first.clone();

        let result = PermissionCatalog::new(vec![first, second]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn deserialization_enforces_unique_keys() {
        let duplicate_categories = r#"{"categories":[
            {"key":"calls","label":"Calls","permissions":[]},
            {"key":"calls","label":"Calls again","permissions":[]}
        ]}"#;
        assert!(serde_json::from_str::<PermissionCatalog>(duplicate_categories).is_err());

        let duplicate_permissions = r#"{"categories":[
            {"key":"calls","label":"Calls","permissions":[
                {"key":"a","label":"A"},
                {"key":"a","label":"A again"}
            ]}
        ]}"#;
        assert!(serde_json::from_str::<PermissionCatalog>(duplicate_permissions).is_err());

        let blank_key = r#"{"key":"  ","label":"Blank"}"#;
        assert!(serde_json::from_str::<PermissionDefinition>(blank_key).is_err());
    }

    #[test]
    fn standard_catalog_survives_json_roundtrip() {
        let standard = PermissionCatalog::standard();
        let json = serde_json::to_string(&*standard).unwrap_or_default();
        let parsed = serde_json::from_str::<PermissionCatalog>(json.as_str());
        assert_eq!(parsed.ok().as_ref(), Some(&*standard));
    }

    #[test]
    fn contains_checks_category_membership() {
        let catalog = PermissionCatalog::standard();
        assert!(catalog.contains("users", "edit_users"));
        assert!(!catalog.contains("calls", "edit_users"));
        assert!(!catalog.contains("missing", "edit_users"));
    }
}
