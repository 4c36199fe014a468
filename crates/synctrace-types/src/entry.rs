use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::fields;

/// Severity level of a log entry, parsed from the one-letter wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Debug,
}

impl Severity {
    /// Map a wire code (`I`/`W`/`E`/`D`) to a severity.
    /// Returns None for anything else; the caller treats that as a
    /// malformed entry.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "I" => Some(Severity::Info),
            "W" => Some(Severity::Warning),
            "E" => Some(Severity::Error),
            "D" => Some(Severity::Debug),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Debug => write!(f, "debug"),
        }
    }
}

/// One structured log record, possibly spanning multiple raw lines.
///
/// Stored fields are fixed at construction time. Everything the message
/// body merely implies (policy id, bundle id, app metadata, error codes)
/// is derived on demand via the accessor methods below and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Entry timestamp, millisecond precision. The wire format carries no
    /// zone, so this stays naive.
    pub timestamp: NaiveDateTime,

    /// Originating process name (e.g. "IntuneMDM-Daemon").
    pub process: String,

    /// Severity level.
    pub level: Severity,

    /// Thread identifier as it appeared in the log.
    pub thread_id: String,

    /// Component that emitted the entry.
    pub component: String,

    /// Message body. Continuation lines are newline-joined here.
    pub message: String,

    /// Original raw text exactly as it appeared, continuation lines
    /// included.
    pub raw: String,
}

impl LogEntry {
    /// Policy identifier embedded in the message, if any.
    pub fn policy_id(&self) -> Option<String> {
        fields::policy_id(&self.message)
    }

    /// Bundle identifier embedded in the message, if any.
    pub fn bundle_id(&self) -> Option<String> {
        fields::bundle_id(&self.message)
    }

    /// Application display name embedded in the message, if any.
    pub fn app_name(&self) -> Option<String> {
        fields::app_name(&self.message)
    }

    /// Application type embedded in the message, if any.
    pub fn app_type(&self) -> Option<String> {
        fields::app_type(&self.message)
    }

    /// Application install intent embedded in the message, if any.
    pub fn app_intent(&self) -> Option<String> {
        fields::app_intent(&self.message)
    }

    /// Script type embedded in the message, if any.
    pub fn script_type(&self) -> Option<String> {
        fields::script_type(&self.message)
    }

    /// Script execution context embedded in the message, if any.
    pub fn execution_context(&self) -> Option<String> {
        fields::execution_context(&self.message)
    }

    /// App installation error code embedded in the message, if any.
    pub fn install_error_code(&self) -> Option<i64> {
        fields::install_error_code(&self.message)
    }
}
