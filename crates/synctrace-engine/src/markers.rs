//! Single authority for the marker strings the engine keys on.
//!
//! Event boundaries, policy component mapping, status evidence, and the
//! metadata scrape phrases all live here so the heuristics stay in one
//! place when the agent's wording shifts between releases.

use synctrace_types::{LogEntry, PolicyKind, SyncEventKind};

/// Substring every agent process name carries (daemon and user agent).
pub const AGENT_PROCESS_MARKER: &str = "IntuneMDM";

/// The managing daemon itself. Its absence from an otherwise valid log is
/// reported as a soft warning.
pub const AGENT_DAEMON_PROCESS: &str = "IntuneMDM-Daemon";

/// Known chatty component, discarded post-parse without an issue.
pub const NOISE_COMPONENT: &str = "OpenSSLWrapper";

// Event boundary markers: (component, message substring) pairs.

pub const SYNC_COMPONENT: &str = "SyncManager";
pub const SYNC_START_MESSAGE: &str = "Starting app and policy sync";
pub const SYNC_END_MESSAGE: &str = "App and policy sync finished";

pub const SCHEDULER_COMPONENT: &str = "TaskScheduler";
pub const RECURRING_START_MESSAGE: &str = "Starting recurring policy execution";
pub const RECURRING_END_MESSAGE: &str = "Recurring policy execution finished";
pub const HEALTH_START_MESSAGE: &str = "Starting health check execution";
pub const HEALTH_END_MESSAGE: &str = "Health check execution finished";

// Policy handler components.

pub const APP_POLICY_COMPONENT: &str = "AppPolicyHandler";
pub const SCRIPT_POLICY_COMPONENT: &str = "ScriptPolicyHandler";
pub const HEALTH_SCRIPTS_COMPONENT: &str = "HealthScriptsHandler";

// Status evidence in message bodies.

pub const APP_POLICY_FINISHED: &str = "Handling app policy finished";
pub const SCRIPT_POLICY_RAN: &str = "Script policy ran";
pub const ALREADY_RUN_MARKER: &str = "already run, skipping";
pub const MGMT_SCRIPT_COMPLETED: &str = "Management script completed";
pub const FINISHED_SUCCESSFULLY: &str = "finished successfully";

/// Explicit success/finish markers for the status rules.
pub const SUCCESS_MARKERS: &[&str] = &[
    APP_POLICY_FINISHED,
    SCRIPT_POLICY_RAN,
    FINISHED_SUCCESSFULLY,
];

// Metadata scrape phrases.

pub const ENROLLMENT_INFO_MARKER: &str = "Enrollment info:";
pub const DEVICE_INFO_MARKER: &str = "Device info:";
pub const PLATFORM_MARKER: &str = "Platform:";
pub const CONNECTIVITY_CHECK_MARKER: &str = "Network connectivity check";
pub const NO_CONNECTION_MARKER: &str = "no connection";
pub const CONNECTION_AVAILABLE_MARKER: &str = "connection available";

/// Boundary role an entry plays in event reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Opens a window of the given kind.
    Start(SyncEventKind),
    /// Closes whatever window is open.
    End,
}

/// Classify an entry as an event boundary, if it is one.
///
/// The kind of a window always comes from its start marker; end markers
/// close whatever is open regardless of kind.
pub fn boundary(entry: &LogEntry) -> Option<Boundary> {
    if entry.component == SYNC_COMPONENT {
        if entry.message.contains(SYNC_START_MESSAGE) {
            return Some(Boundary::Start(SyncEventKind::FullSync));
        }
        if entry.message.contains(SYNC_END_MESSAGE) {
            return Some(Boundary::End);
        }
    }

    if entry.component == SCHEDULER_COMPONENT {
        if entry.message.contains(RECURRING_START_MESSAGE) {
            return Some(Boundary::Start(SyncEventKind::RecurringPolicy));
        }
        if entry.message.contains(HEALTH_START_MESSAGE) {
            return Some(Boundary::Start(SyncEventKind::HealthPolicy));
        }
        if entry.message.contains(RECURRING_END_MESSAGE)
            || entry.message.contains(HEALTH_END_MESSAGE)
        {
            return Some(Boundary::End);
        }
    }

    None
}

/// Fixed component -> policy type table. Unmapped components are Unknown.
pub fn policy_kind_for_component(component: &str) -> PolicyKind {
    match component {
        APP_POLICY_COMPONENT => PolicyKind::App,
        SCRIPT_POLICY_COMPONENT => PolicyKind::Script,
        HEALTH_SCRIPTS_COMPONENT => PolicyKind::Health,
        _ => PolicyKind::Unknown,
    }
}

/// Whether a message carries any explicit success/finish marker.
pub fn has_success_marker(message: &str) -> bool {
    SUCCESS_MARKERS.iter().any(|m| message.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use synctrace_types::Severity;

    fn entry(component: &str, message: &str) -> LogEntry {
        LogEntry {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_milli_opt(10, 0, 0, 0)
                .unwrap(),
            process: "IntuneMDM-Daemon".to_string(),
            level: Severity::Info,
            thread_id: "0x1".to_string(),
            component: component.to_string(),
            message: message.to_string(),
            raw: String::new(),
        }
    }

    #[test]
    fn test_full_sync_boundaries() {
        assert_eq!(
            boundary(&entry(SYNC_COMPONENT, "Starting app and policy sync.")),
            Some(Boundary::Start(SyncEventKind::FullSync))
        );
        assert_eq!(
            boundary(&entry(SYNC_COMPONENT, "App and policy sync finished.")),
            Some(Boundary::End)
        );
    }

    #[test]
    fn test_scheduler_boundaries() {
        assert_eq!(
            boundary(&entry(SCHEDULER_COMPONENT, "Starting recurring policy execution")),
            Some(Boundary::Start(SyncEventKind::RecurringPolicy))
        );
        assert_eq!(
            boundary(&entry(SCHEDULER_COMPONENT, "Starting health check execution")),
            Some(Boundary::Start(SyncEventKind::HealthPolicy))
        );
        assert_eq!(
            boundary(&entry(SCHEDULER_COMPONENT, "Health check execution finished")),
            Some(Boundary::End)
        );
    }

    #[test]
    fn test_marker_requires_matching_component() {
        // The message alone is not enough; the component must match too.
        assert_eq!(
            boundary(&entry("AppPolicyHandler", "Starting app and policy sync")),
            None
        );
        assert_eq!(boundary(&entry(SYNC_COMPONENT, "idle tick")), None);
    }

    #[test]
    fn test_component_kind_table() {
        assert_eq!(policy_kind_for_component("AppPolicyHandler"), PolicyKind::App);
        assert_eq!(
            policy_kind_for_component("ScriptPolicyHandler"),
            PolicyKind::Script
        );
        assert_eq!(
            policy_kind_for_component("HealthScriptsHandler"),
            PolicyKind::Health
        );
        assert_eq!(policy_kind_for_component("SomethingElse"), PolicyKind::Unknown);
    }
}
