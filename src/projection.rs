//! Column-driven value projection.
//!
//! Maps a column name to how a record renders in that column (read) and how
//! a typed string turns back into a record patch (write). Display, edit,
//! copy, paste and delete all go through [`PROJECTIONS`]; there is no other
//! place that knows which columns are system fields.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::types::{Record, RecordPatch};

type Reader = fn(&Record, &str, &str) -> String;
type Writer = fn(&mut RecordPatch, &Record, &str, &str);

/// Read and write halves for one kind of column.
pub struct Projection {
    read: Reader,
    /// `None` for columns that cannot be written.
    write: Option<Writer>,
}

impl Projection {
    pub fn is_writable(&self) -> bool {
        self.write.is_some()
    }
}

/// System columns by name. Any other name is a `data` entry.
pub static PROJECTIONS: [(&str, Projection); 5] = [
    (
        "id",
        Projection {
            read: |record, _, _| record.id.clone(),
            write: None,
        },
    ),
    (
        "status",
        Projection {
            read: |record, _, _| record.status.clone(),
            write: Some(|patch, _, _, value| patch.status = Some(value.to_string())),
        },
    ),
    (
        "comments",
        Projection {
            read: |record, _, _| record.comments.clone().unwrap_or_default(),
            write: Some(|patch, _, _, value| patch.comments = Some(value.to_string())),
        },
    ),
    (
        "createdAt",
        Projection {
            read: |record, _, date_format| format_date(&record.created_at, date_format),
            write: None,
        },
    ),
    (
        "updatedAt",
        Projection {
            read: |record, _, date_format| format_date(&record.updated_at, date_format),
            write: None,
        },
    ),
];

/// Projection for user-defined columns stored in `Record::data`.
pub static DATA_PROJECTION: Projection = Projection {
    read: |record, column, _| record.data.get(column).cloned().unwrap_or_default(),
    write: Some(|patch, record, column, value| {
        patch
            .data
            .get_or_insert_with(|| record.data.clone())
            .insert(column.to_string(), value.to_string());
    }),
};

/// Look up the projection for a column name.
pub fn projection_for(column: &str) -> &'static Projection {
    PROJECTIONS
        .iter()
        .find(|(name, _)| *name == column)
        .map_or(&DATA_PROJECTION, |(_, projection)| projection)
}

/// Render a record's value in `column`.
pub fn read_cell(record: &Record, column: &str, date_format: &str) -> String {
    (projection_for(column).read)(record, column, date_format)
}

/// Write `value` into `column` of `patch`.
///
/// `record` seeds the data map the first time a data column is written, so
/// the patch carries the merged map. Returns `false` when the column is not
/// writable and the patch was left untouched.
pub fn write_cell(patch: &mut RecordPatch, record: &Record, column: &str, value: &str) -> bool {
    match projection_for(column).write {
        Some(write) => {
            write(patch, record, column, value);
            true
        }
        None => false,
    }
}

pub fn is_writable(column: &str) -> bool {
    projection_for(column).is_writable()
}

fn format_date(at: &DateTime<Utc>, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(date_format)).is_err() {
        // Invalid pattern; fall back to ISO date.
        out.clear();
        out.push_str(&at.date_naive().to_string());
    }
    out
}
