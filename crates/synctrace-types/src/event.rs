use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entry::LogEntry;
use crate::policy::PolicyExecution;

/// Which marker pair opened the event window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncEventKind {
    FullSync,
    RecurringPolicy,
    HealthPolicy,
}

/// A bounded (or still-open) window of sync activity.
///
/// `end_time` is absent while the window never saw its end marker, which
/// downstream consumers interpret as "still running". When present it is
/// never earlier than `start_time` for well-formed input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncEvent {
    /// Generated identifier, unique per reconstruction pass.
    pub id: Uuid,

    pub kind: SyncEventKind,

    pub start_time: NaiveDateTime,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,

    /// Policy executions found inside the window, sorted by start time.
    pub policies: Vec<PolicyExecution>,

    /// Full ordered entry list for the window, including entries that
    /// mapped to no policy.
    pub entries: Vec<LogEntry>,
}

impl SyncEvent {
    /// Whether the window never saw its end marker.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}
