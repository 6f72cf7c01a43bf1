//! Change-data-capture metadata
//!
//! Columns appended to analytical rows by the CDC pipeline. Merging them
//! onto rows happens downstream; only the shape lives here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of change captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CdcOperation {
    Insert,
    Update,
    Delete,
}

/// CDC metadata columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cdc {
    pub cdc_id: String,
    pub cdc_operation: CdcOperation,
    pub cdc_timestamp: DateTime<Utc>,
    /// Log sequence number of the source change, when the source has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lsn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_table: Option<String>,
}

impl Cdc {
    /// True for tombstone rows
    pub fn is_delete(&self) -> bool {
        self.cdc_operation == CdcOperation::Delete
    }
}
