use regex::Regex;
use std::sync::LazyLock;

use synctrace_types::EnrollmentInfo;

use crate::markers::{DEVICE_INFO_MARKER, ENROLLMENT_INFO_MARKER, PLATFORM_MARKER};

static ENVIRONMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Environment:\s*([^\s,;]+)").unwrap());
static REGION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Region:\s*([^\s,;]+)").unwrap());
static ACCOUNT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AccountId:\s*([^\s,;]+)").unwrap());
static TENANT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TenantId:\s*([^\s,;]+)").unwrap());
static DEVICE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"DeviceId:\s*([^\s,;]+)").unwrap());
static OS_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"OS version:\s*([^\s,;]+)").unwrap());
static AGENT_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Agent version:\s*([^\s,;]+)").unwrap());
static PLATFORM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Platform:\s*([^\s,;]+)").unwrap());

fn fill(slot: &mut Option<String>, re: &Regex, line: &str) {
    if slot.is_none()
        && let Some(caps) = re.captures(line)
    {
        *slot = caps.get(1).map(|m| m.as_str().to_string());
    }
}

/// Scrape enrollment identity from the raw text, first match wins per
/// field. Scanning stops early once every field has been seen. Returns
/// None when the log never mentioned any of them.
pub fn extract_enrollment(text: &str) -> Option<EnrollmentInfo> {
    let mut info = EnrollmentInfo::default();

    for line in text.lines() {
        if line.contains(ENROLLMENT_INFO_MARKER) {
            fill(&mut info.environment, &ENVIRONMENT_RE, line);
            fill(&mut info.region, &REGION_RE, line);
            fill(&mut info.account_id, &ACCOUNT_ID_RE, line);
            fill(&mut info.tenant_id, &TENANT_ID_RE, line);
        }

        if line.contains(DEVICE_INFO_MARKER) {
            fill(&mut info.device_id, &DEVICE_ID_RE, line);
            fill(&mut info.os_version, &OS_VERSION_RE, line);
            fill(&mut info.agent_version, &AGENT_VERSION_RE, line);
        }

        if line.contains(PLATFORM_MARKER) {
            fill(&mut info.platform, &PLATFORM_RE, line);
        }

        if info.is_complete() {
            break;
        }
    }

    if info.is_empty() { None } else { Some(info) }
}
