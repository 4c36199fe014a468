//! Policy aggregation and status determination within one event window.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use uuid::Uuid;

use synctrace_types::{LogEntry, PolicyExecution, PolicyKind, PolicyStatus, Severity};

use crate::markers;

/// Group a window's entries by derived policy identifier and build one
/// execution record per group.
///
/// Entries without a policy identifier are skipped here but stay visible
/// in the window's raw entry list. Records come back sorted by start
/// time, records without one last.
pub fn aggregate_policies(entries: &[LogEntry], issues: &mut Vec<String>) -> Vec<PolicyExecution> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<LogEntry>> = HashMap::new();

    for entry in entries {
        if let Some(policy_id) = entry.policy_id() {
            if !groups.contains_key(&policy_id) {
                order.push(policy_id.clone());
            }
            groups.entry(policy_id).or_default().push(entry.clone());
        }
    }

    let mut executions: Vec<PolicyExecution> = order
        .into_iter()
        .filter_map(|policy_id| {
            let mut group = groups.remove(&policy_id)?;
            group.sort_by_key(|e| e.timestamp);
            Some(build_execution(policy_id, group, issues))
        })
        .collect();

    executions.sort_by_key(|e| (e.start_time.is_none(), e.start_time));
    executions
}

fn build_execution(
    policy_id: String,
    entries: Vec<LogEntry>,
    issues: &mut Vec<String>,
) -> PolicyExecution {
    // The group is never empty; the first entry's component decides the kind.
    let kind = entries
        .first()
        .map(|e| markers::policy_kind_for_component(&e.component))
        .unwrap_or(PolicyKind::Unknown);

    let start_time = entries.first().map(|e| e.timestamp);
    let end_time = end_time_for(kind, &entries);
    let status = determine_status(&entries, end_time, &policy_id, issues);

    if kind == PolicyKind::App
        && let Some(code) = entries
            .iter()
            .find_map(|e| e.install_error_code())
            .filter(|code| *code != 0)
    {
        issues.push(format!(
            "warning: app installation reported error code {} (policy {})",
            code, policy_id
        ));
    }

    PolicyExecution {
        id: Uuid::new_v4(),
        bundle_id: entries.iter().find_map(|e| e.bundle_id()),
        app_name: entries.iter().find_map(|e| e.app_name()),
        app_type: entries.iter().find_map(|e| e.app_type()),
        app_intent: entries.iter().find_map(|e| e.app_intent()),
        script_type: entries.iter().find_map(|e| e.script_type()),
        execution_context: entries.iter().find_map(|e| e.execution_context()),
        policy_id,
        kind,
        status,
        start_time,
        end_time,
        entries,
    }
}

/// Kind-dependent finish timestamp. App and script policies end at their
/// explicit finish line; everything else ends at the last entry seen.
fn end_time_for(kind: PolicyKind, entries: &[LogEntry]) -> Option<NaiveDateTime> {
    match kind {
        PolicyKind::App => entries
            .iter()
            .rev()
            .find(|e| e.message.contains(markers::APP_POLICY_FINISHED))
            .map(|e| e.timestamp),
        PolicyKind::Script => entries
            .iter()
            .rev()
            .find(|e| e.message.contains(markers::SCRIPT_POLICY_RAN))
            .map(|e| e.timestamp),
        PolicyKind::Health | PolicyKind::Unknown => entries.last().map(|e| e.timestamp),
    }
}

/// Evaluate the status rules in strict precedence order; the first match
/// wins. Classification is best-effort: when warning severity suppresses
/// an otherwise-successful record, the ambiguity is flagged as an issue
/// instead of silently picking one reading.
fn determine_status(
    entries: &[LogEntry],
    end_time: Option<NaiveDateTime>,
    policy_id: &str,
    issues: &mut Vec<String>,
) -> PolicyStatus {
    if entries.iter().any(|e| e.level == Severity::Error) {
        return PolicyStatus::Failed;
    }

    if entries.iter().any(|e| {
        e.message.contains(markers::ALREADY_RUN_MARKER)
            || e.message.contains(markers::MGMT_SCRIPT_COMPLETED)
    }) {
        return PolicyStatus::Completed;
    }

    let succeeded = entries.iter().any(|e| markers::has_success_marker(&e.message));

    if entries.iter().any(|e| e.level == Severity::Warning) {
        return if end_time.is_some() {
            if succeeded {
                issues.push(format!(
                    "warning: policy {} carries both warnings and a success marker; classified as warning",
                    policy_id
                ));
            }
            PolicyStatus::Warning
        } else {
            PolicyStatus::Running
        };
    }

    if end_time.is_some() {
        return if succeeded {
            PolicyStatus::Completed
        } else {
            PolicyStatus::Warning
        };
    }

    PolicyStatus::Running
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry_at(sec: u32, level: Severity, component: &str, message: &str) -> LogEntry {
        LogEntry {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_milli_opt(10, 0, sec, 0)
                .unwrap(),
            process: "IntuneMDM-Daemon".to_string(),
            level,
            thread_id: "0x1".to_string(),
            component: component.to_string(),
            message: message.to_string(),
            raw: String::new(),
        }
    }

    #[test]
    fn test_app_policy_completed() {
        let entries = vec![
            entry_at(5, Severity::Info, "AppPolicyHandler", "Handling app policy. PolicyID: p-1, BundleID: com.example.app"),
            entry_at(10, Severity::Info, "AppPolicyHandler", "Handling app policy finished. PolicyID: p-1"),
        ];
        let mut issues = Vec::new();
        let executions = aggregate_policies(&entries, &mut issues);

        assert!(issues.is_empty());
        assert_eq!(executions.len(), 1);
        let exec = &executions[0];
        assert_eq!(exec.policy_id, "p-1");
        assert_eq!(exec.kind, PolicyKind::App);
        assert_eq!(exec.status, PolicyStatus::Completed);
        assert_eq!(exec.bundle_id.as_deref(), Some("com.example.app"));
        assert_eq!(exec.start_time, Some(entries[0].timestamp));
        assert_eq!(exec.end_time, Some(entries[1].timestamp));
    }

    #[test]
    fn test_error_outranks_completion_marker() {
        let entries = vec![
            entry_at(5, Severity::Error, "AppPolicyHandler", "Install failed. PolicyID: p-1"),
            entry_at(10, Severity::Info, "AppPolicyHandler", "Handling app policy finished. PolicyID: p-1"),
        ];
        let mut issues = Vec::new();
        let executions = aggregate_policies(&entries, &mut issues);
        assert_eq!(executions[0].status, PolicyStatus::Failed);
    }

    #[test]
    fn test_already_run_is_completed() {
        let entries = vec![entry_at(
            5,
            Severity::Info,
            "ScriptPolicyHandler",
            "Script already run, skipping. PolicyID: p-2",
        )];
        let mut issues = Vec::new();
        let executions = aggregate_policies(&entries, &mut issues);
        assert_eq!(executions[0].status, PolicyStatus::Completed);
    }

    #[test]
    fn test_warning_without_end_is_running() {
        let entries = vec![entry_at(
            5,
            Severity::Warning,
            "AppPolicyHandler",
            "Download slow. PolicyID: p-3",
        )];
        let mut issues = Vec::new();
        let executions = aggregate_policies(&entries, &mut issues);
        assert_eq!(executions[0].status, PolicyStatus::Running);
        assert_eq!(executions[0].end_time, None);
    }

    #[test]
    fn test_warning_with_end_flags_ambiguity() {
        let entries = vec![
            entry_at(5, Severity::Warning, "AppPolicyHandler", "Retrying download. PolicyID: p-4"),
            entry_at(10, Severity::Info, "AppPolicyHandler", "Handling app policy finished. PolicyID: p-4"),
        ];
        let mut issues = Vec::new();
        let executions = aggregate_policies(&entries, &mut issues);
        assert_eq!(executions[0].status, PolicyStatus::Warning);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("warning:"));
        assert!(issues[0].contains("p-4"));
    }

    #[test]
    fn test_ended_without_success_marker_is_warning() {
        // Unknown kind: end time is the last entry, but nothing claims success.
        let entries = vec![entry_at(
            5,
            Severity::Info,
            "SomeOtherComponent",
            "Working on PolicyID: p-5",
        )];
        let mut issues = Vec::new();
        let executions = aggregate_policies(&entries, &mut issues);
        assert_eq!(executions[0].kind, PolicyKind::Unknown);
        assert_eq!(executions[0].status, PolicyStatus::Warning);
    }

    #[test]
    fn test_app_without_finish_line_is_running() {
        let entries = vec![entry_at(
            5,
            Severity::Info,
            "AppPolicyHandler",
            "Handling app policy. PolicyID: p-6",
        )];
        let mut issues = Vec::new();
        let executions = aggregate_policies(&entries, &mut issues);
        assert_eq!(executions[0].status, PolicyStatus::Running);
        assert_eq!(executions[0].end_time, None);
    }

    #[test]
    fn test_install_error_code_soft_warning() {
        let entries = vec![
            entry_at(5, Severity::Info, "AppPolicyHandler", "Installing. PolicyID: p-7, ErrorCode: 2016345612"),
            entry_at(10, Severity::Info, "AppPolicyHandler", "Handling app policy finished. PolicyID: p-7"),
        ];
        let mut issues = Vec::new();
        aggregate_policies(&entries, &mut issues);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("error code 2016345612"));
        assert!(issues[0].contains("p-7"));
    }

    #[test]
    fn test_entries_without_policy_id_are_skipped() {
        let entries = vec![
            entry_at(1, Severity::Info, "SyncManager", "idle tick"),
            entry_at(5, Severity::Info, "ScriptPolicyHandler", "Script policy ran. PolicyID: p-8"),
        ];
        let mut issues = Vec::new();
        let executions = aggregate_policies(&entries, &mut issues);
        assert_eq!(executions.len(), 1);
        assert_eq!(executions[0].entries.len(), 1);
    }

    #[test]
    fn test_records_sorted_by_start_time() {
        let entries = vec![
            entry_at(20, Severity::Info, "ScriptPolicyHandler", "Script policy ran. PolicyID: late"),
            entry_at(5, Severity::Info, "AppPolicyHandler", "Handling app policy. PolicyID: early"),
        ];
        let mut issues = Vec::new();
        let executions = aggregate_policies(&entries, &mut issues);
        assert_eq!(executions[0].policy_id, "early");
        assert_eq!(executions[1].policy_id, "late");
    }

    #[test]
    fn test_metadata_first_non_null_across_sorted_entries() {
        let entries = vec![
            entry_at(5, Severity::Info, "AppPolicyHandler", "Handling app policy. PolicyID: p-9"),
            entry_at(6, Severity::Info, "AppPolicyHandler", "Details. PolicyID: p-9, AppName: First Name"),
            entry_at(7, Severity::Info, "AppPolicyHandler", "Details. PolicyID: p-9, AppName: Second Name"),
        ];
        let mut issues = Vec::new();
        let executions = aggregate_policies(&entries, &mut issues);
        assert_eq!(executions[0].app_name.as_deref(), Some("First Name"));
    }
}
