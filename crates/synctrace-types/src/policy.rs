use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entry::LogEntry;

/// Inferred type of a policy execution, mapped from the component of the
/// first entry in its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    App,
    Script,
    Health,
    Unknown,
}

/// Heuristic outcome of a policy execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    Completed,
    Failed,
    Warning,
    Running,
}

impl std::fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyStatus::Completed => write!(f, "completed"),
            PolicyStatus::Failed => write!(f, "failed"),
            PolicyStatus::Warning => write!(f, "warning"),
            PolicyStatus::Running => write!(f, "running"),
        }
    }
}

/// Aggregated record of one policy's activity inside one sync event.
///
/// Every entry in the record shares the policy identifier and belongs to
/// exactly one event. Metadata fields hold the first non-null derived
/// value found across the time-sorted entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyExecution {
    /// Generated identifier, unique per reconstruction pass.
    pub id: Uuid,

    /// Policy identifier shared by every entry in the record.
    pub policy_id: String,

    /// Inferred type.
    pub kind: PolicyKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_intent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_context: Option<String>,

    /// Derived status, see the status determination rules in the engine.
    pub status: PolicyStatus,

    /// Timestamp of the first entry in the group.
    pub start_time: Option<NaiveDateTime>,

    /// Kind-dependent finish timestamp; absent while still in progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,

    /// Ordered entries that produced this record.
    pub entries: Vec<LogEntry>,
}
