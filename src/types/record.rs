use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the grid, owned by the host.
///
/// System fields are typed; user-defined columns live in `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifier_id: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl Record {
    /// Create a record with empty fields and epoch timestamps.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: String::new(),
            comments: None,
            certifier_id: None,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
            data: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(column.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    #[must_use]
    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = at;
        self
    }
}

/// A sparse update naming only the fields to change on a record.
///
/// `data`, when present, is the record's complete column map with the
/// edited entries merged in, so applying it never drops other columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifier_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.comments.is_none()
            && self.certifier_id.is_none()
            && self.data.is_none()
    }

    /// Fold `other` into `self`; fields set in `other` win, data maps accumulate.
    pub fn merge(&mut self, other: RecordPatch) {
        if other.status.is_some() {
            self.status = other.status;
        }
        if other.comments.is_some() {
            self.comments = other.comments;
        }
        if other.certifier_id.is_some() {
            self.certifier_id = other.certifier_id;
        }
        if let Some(data) = other.data {
            self.data.get_or_insert_with(BTreeMap::new).extend(data);
        }
    }

    /// Apply the patch to a record in place.
    pub fn apply_to(&self, record: &mut Record) {
        if let Some(status) = &self.status {
            record.status.clone_from(status);
        }
        if let Some(comments) = &self.comments {
            record.comments = Some(comments.clone());
        }
        if let Some(certifier_id) = &self.certifier_id {
            record.certifier_id = Some(certifier_id.clone());
        }
        if let Some(data) = &self.data {
            record
                .data
                .extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
}

/// One entry of a batched update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub id: String,
    #[serde(rename = "updates")]
    pub patch: RecordPatch,
}

impl RecordUpdate {
    pub fn new(id: impl Into<String>, patch: RecordPatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}
