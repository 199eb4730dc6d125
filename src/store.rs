//! Record mutation sinks.
//!
//! The engine never owns records; it hands patches to a [`RecordSink`] and
//! moves on. [`MemoryStore`] is a sink that applies them to records it holds.

use chrono::Utc;

use crate::error::{Result, XlgridError};
use crate::types::{Record, RecordPatch, RecordUpdate};

/// Receiver of record mutations.
///
/// Calls are fire-and-forget: the engine does not wait, retry or roll back.
pub trait RecordSink {
    /// A single-cell edit commit.
    fn update_one(&mut self, id: &str, patch: RecordPatch);

    /// Every record touched by one paste, delete or batch apply.
    fn update_many(&mut self, updates: Vec<RecordUpdate>);
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn update_one(&mut self, id: &str, patch: RecordPatch) {
        (**self).update_one(id, patch);
    }

    fn update_many(&mut self, updates: Vec<RecordUpdate>) {
        (**self).update_many(updates);
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn update_one(&mut self, id: &str, patch: RecordPatch) {
        (**self).update_one(id, patch);
    }

    fn update_many(&mut self, updates: Vec<RecordUpdate>) {
        (**self).update_many(updates);
    }
}

/// In-memory record set that applies patches as they arrive.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
}

impl MemoryStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Apply one patch and stamp `updatedAt`.
    ///
    /// # Errors
    /// Returns [`XlgridError::UnknownRecord`] if no record has `id`.
    pub fn apply(&mut self, id: &str, patch: &RecordPatch) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| XlgridError::UnknownRecord(id.to_string()))?;
        patch.apply_to(record);
        record.updated_at = Utc::now();
        Ok(())
    }
}

impl RecordSink for MemoryStore {
    fn update_one(&mut self, id: &str, patch: RecordPatch) {
        if let Err(e) = self.apply(id, &patch) {
            tracing::warn!(error = %e, "dropping record update");
        }
    }

    fn update_many(&mut self, updates: Vec<RecordUpdate>) {
        for update in updates {
            self.update_one(&update.id, update.patch);
        }
    }
}
