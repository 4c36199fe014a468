use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entry::LogEntry;
use crate::event::SyncEvent;

/// Enrollment identity scraped from the raw log text.
///
/// Every field is best-effort: absent when the log never mentioned it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl EnrollmentInfo {
    /// True once every field of interest has been populated, so scanning
    /// can stop early.
    pub fn is_complete(&self) -> bool {
        self.environment.is_some()
            && self.region.is_some()
            && self.account_id.is_some()
            && self.tenant_id.is_some()
            && self.device_id.is_some()
            && self.os_version.is_some()
            && self.agent_version.is_some()
            && self.platform.is_some()
    }

    /// True when no field was ever populated.
    pub fn is_empty(&self) -> bool {
        *self == EnrollmentInfo::default()
    }
}

/// Connectivity-check statistics scraped from the raw log text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSummary {
    /// Total connectivity-check lines seen.
    pub checks: usize,

    /// How many of those reported no connection.
    pub no_connection: usize,

    /// Occurrence count per interface name on "connection available"
    /// lines. BTreeMap keeps serialized output deterministic.
    pub interfaces: BTreeMap<String, usize>,
}

/// The complete parse result for one input text.
///
/// Constructed once per parse invocation and immutable thereafter; the
/// caller owns it and re-derives summary statistics on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogAnalysis {
    /// Label identifying where the input came from (file name, "stdin").
    pub source: String,

    /// Reconstructed sync events, in input order.
    pub events: Vec<SyncEvent>,

    /// Flat filtered entry list, in arrival order. Includes entries that
    /// attached to no event.
    pub entries: Vec<LogEntry>,

    /// Non-fatal parse problems and soft warnings. Soft warnings carry a
    /// "warning:" prefix so callers can render them differently.
    pub issues: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<EnrollmentInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkSummary>,
}

impl LogAnalysis {
    /// Total number of structured entries recovered from the input.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_completeness() {
        let mut info = EnrollmentInfo::default();
        assert!(info.is_empty());
        assert!(!info.is_complete());

        info.environment = Some("PE".to_string());
        assert!(!info.is_empty());
        assert!(!info.is_complete());

        info.region = Some("ASKG".to_string());
        info.account_id = Some("acct".to_string());
        info.tenant_id = Some("tenant".to_string());
        info.device_id = Some("device".to_string());
        info.os_version = Some("14.5".to_string());
        info.agent_version = Some("2409.010".to_string());
        info.platform = Some("macOS".to_string());
        assert!(info.is_complete());
    }
}
