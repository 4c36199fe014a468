use regex::Regex;
use std::sync::LazyLock;

use synctrace_types::NetworkSummary;

use crate::markers::{
    CONNECTION_AVAILABLE_MARKER, CONNECTIVITY_CHECK_MARKER, NO_CONNECTION_MARKER,
};

/// Bracketed interface list on "connection available" lines, e.g.
/// `interfaces: [en0, utun4]`.
static INTERFACES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"interfaces:\s*\[([^\]]*)\]").unwrap());

/// Tally connectivity-check lines in the raw text. Returns None when no
/// check line was found at all.
pub fn extract_network(text: &str) -> Option<NetworkSummary> {
    let mut summary = NetworkSummary::default();

    for line in text.lines() {
        if !line.contains(CONNECTIVITY_CHECK_MARKER) {
            continue;
        }

        summary.checks += 1;

        if line.contains(NO_CONNECTION_MARKER) {
            summary.no_connection += 1;
        } else if line.contains(CONNECTION_AVAILABLE_MARKER)
            && let Some(caps) = INTERFACES_RE.captures(line)
        {
            for name in caps[1].split(',') {
                let name = name.trim();
                if !name.is_empty() {
                    *summary.interfaces.entry(name.to_string()).or_insert(0) += 1;
                }
            }
        }
    }

    if summary.checks == 0 { None } else { Some(summary) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_interfaces() {
        let text = "\
a | NetworkMonitor | Network connectivity check: connection available, interfaces: [en0, utun4]
b | NetworkMonitor | Network connectivity check: no connection
c | NetworkMonitor | Network connectivity check: connection available, interfaces: [en0]
";
        let summary = extract_network(text).unwrap();
        assert_eq!(summary.checks, 3);
        assert_eq!(summary.no_connection, 1);
        assert_eq!(summary.interfaces.get("en0"), Some(&2));
        assert_eq!(summary.interfaces.get("utun4"), Some(&1));
    }

    #[test]
    fn test_empty_interface_list() {
        let text = "x | Network connectivity check: connection available, interfaces: []\n";
        let summary = extract_network(text).unwrap();
        assert_eq!(summary.checks, 1);
        assert!(summary.interfaces.is_empty());
    }

    #[test]
    fn test_no_check_lines_yield_none() {
        assert_eq!(extract_network("nothing about the network\n"), None);
    }
}
