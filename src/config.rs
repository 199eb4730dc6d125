//! Grid configuration.
//!
//! Every field has a default matching the access-review grid the engine was
//! built for, so hosts only need to send the values they want to change.

use std::collections::BTreeMap;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{Result, XlgridError};

/// Default short-date pattern used to render `createdAt` / `updatedAt`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Grid behaviour and column layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Whether selection and mutation gestures are enabled at all.
    pub can_edit: bool,
    /// Status-group columns placed before the caller's data columns.
    pub left_columns: Vec<String>,
    /// System-field columns placed after the caller's data columns.
    pub system_columns: Vec<String>,
    /// Columns that delete never clears.
    pub protected_columns: Vec<String>,
    /// `chrono` strftime pattern for timestamp columns.
    pub date_format: String,
    /// Dropdown options keyed by status column.
    pub status_options: BTreeMap<String, Vec<String>>,
    /// Options offered for a status column with no entry of its own.
    pub default_status_options: Vec<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        let default_status_options = strings(&[
            "Pending",
            "In Review",
            "Certified",
            "Rejected",
            "Open for Review",
            "Access Required",
        ]);

        let mut status_options = BTreeMap::new();
        status_options.insert(
            "ProcessOwnerStatus".to_string(),
            strings(&["Open for Review", "Review Completed", "Certified"]),
        );
        status_options.insert(
            "AreaOwnerStatus".to_string(),
            strings(&[
                "Access Required",
                "Access Retained",
                "Access Removed",
                "Open for Review",
            ]),
        );
        status_options.insert(
            "CertifierStatus".to_string(),
            strings(&["Open for Review", "Certified", "Rejected"]),
        );
        status_options.insert("status".to_string(), default_status_options.clone());

        Self {
            can_edit: true,
            left_columns: strings(&[
                "ProcessOwnerStatus",
                "ProcessOwnerComment",
                "AreaOwnerStatus",
                "AreaOwnerComment",
                "CertifierStatus",
                "CertifierComment",
            ]),
            system_columns: strings(&["id", "status", "comments", "createdAt", "updatedAt"]),
            protected_columns: strings(&["id", "createdAt"]),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            status_options,
            default_status_options,
        }
    }
}

impl GridConfig {
    /// Parse a configuration from JSON, filling unspecified fields with defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the date format is not a
    /// valid strftime pattern.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check on its own.
    ///
    /// # Errors
    /// Returns [`XlgridError::Config`] for an invalid date format.
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(XlgridError::Config(format!(
                "invalid date format {:?}",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Whether a column renders as a status dropdown.
    pub fn is_status_column(&self, column: &str) -> bool {
        self.status_options.contains_key(column)
    }

    /// Dropdown options for a status column.
    pub fn status_options_for(&self, column: &str) -> &[String] {
        self.status_options
            .get(column)
            .map_or(self.default_status_options.as_slice(), Vec::as_slice)
    }

    /// Whether delete must leave this column untouched.
    pub fn is_protected(&self, column: &str) -> bool {
        self.protected_columns.iter().any(|c| c == column)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
