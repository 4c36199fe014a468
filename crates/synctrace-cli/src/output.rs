use owo_colors::OwoColorize;

use synctrace_engine::status_counts;
use synctrace_types::{
    LogAnalysis, PolicyExecution, PolicyKind, PolicyStatus, SyncEvent, SyncEventKind,
};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn render_summary(analysis: &LogAnalysis) {
    println!("Source: {}", analysis.source);
    println!(
        "Entries: {}   Events: {}   Issues: {}",
        analysis.entry_count(),
        analysis.events.len(),
        analysis.issues.len()
    );

    if !analysis.events.is_empty() {
        println!();
        for event in &analysis.events {
            render_event(event);
        }
    }

    let counts = status_counts(analysis);
    if counts.total() > 0 {
        println!();
        println!(
            "Policies: {} completed, {} failed, {} warning, {} running",
            counts.completed.green(),
            counts.failed.red(),
            counts.warning.yellow(),
            counts.running.cyan()
        );
    }

    if let Some(enrollment) = &analysis.enrollment {
        println!();
        println!(
            "Enrollment: tenant {}, device {}, agent {}, platform {}",
            enrollment.tenant_id.as_deref().unwrap_or("-"),
            enrollment.device_id.as_deref().unwrap_or("-"),
            enrollment.agent_version.as_deref().unwrap_or("-"),
            enrollment.platform.as_deref().unwrap_or("-")
        );
    }

    if let Some(network) = &analysis.network {
        println!(
            "Network: {} connectivity checks, {} without connection",
            network.checks, network.no_connection
        );
    }

    if !analysis.issues.is_empty() {
        println!();
        println!("Issues:");
        for issue in &analysis.issues {
            if issue.starts_with("warning:") {
                println!("  {}", issue.yellow());
            } else {
                println!("  {}", issue.red());
            }
        }
    }
}

fn render_event(event: &SyncEvent) {
    let kind = match event.kind {
        SyncEventKind::FullSync => "full sync",
        SyncEventKind::RecurringPolicy => "recurring policies",
        SyncEventKind::HealthPolicy => "health checks",
    };

    let end = match event.end_time {
        Some(end) => end.format(TIME_FORMAT).to_string(),
        None => "still running".to_string(),
    };

    println!(
        "{}  {} -> {}  ({} policies)",
        kind.bold(),
        event.start_time.format(TIME_FORMAT),
        end,
        event.policies.len()
    );

    for policy in &event.policies {
        render_policy(policy);
    }
}

fn render_policy(policy: &PolicyExecution) {
    // Pad before coloring so the escape codes do not break alignment.
    let padded = format!("{:<9}", policy.status);
    let status = match policy.status {
        PolicyStatus::Completed => padded.green().to_string(),
        PolicyStatus::Failed => padded.red().to_string(),
        PolicyStatus::Warning => padded.yellow().to_string(),
        PolicyStatus::Running => padded.cyan().to_string(),
    };

    let kind = match policy.kind {
        PolicyKind::App => "app",
        PolicyKind::Script => "script",
        PolicyKind::Health => "health",
        PolicyKind::Unknown => "unknown",
    };

    let name = policy
        .app_name
        .as_deref()
        .or(policy.bundle_id.as_deref())
        .unwrap_or(&policy.policy_id);

    println!("  {}  {:<7}  {}", status, kind, name);
}
