//! The parse facade: validate, tokenize, reconstruct, aggregate, extract
//! metadata, assemble. One invocation consumes one in-memory text and
//! produces one `LogAnalysis`; everything runs sequentially and is
//! deterministic for a given input apart from generated identifiers.

use synctrace_types::LogAnalysis;

use crate::error::{Error, Result};
use crate::markers::AGENT_DAEMON_PROCESS;
use crate::metadata;
use crate::reconstruct;
use crate::source::{self, LogSource};
use crate::tokenizer;
use crate::validator::{self, FormatCheck};

/// Analyze one raw text blob.
///
/// Format failures are terminal: no partial analysis is attempted for an
/// input that does not look like this log family. Entry-level problems
/// never abort; they land in the result's issue list. Zero recognizable
/// events is not an error.
pub fn analyze(text: &str, source: &str) -> Result<LogAnalysis> {
    match validator::check_format(text, source) {
        FormatCheck::Recognized => {}
        FormatCheck::WrongFormat(msg) => return Err(Error::UnrecognizedFormat(msg)),
        FormatCheck::WrongProduct(msg) => return Err(Error::WrongProduct(msg)),
    }

    let (entries, mut issues) = tokenizer::tokenize(text);
    let events = reconstruct::build_events(&entries, &mut issues);

    let enrollment = metadata::extract_enrollment(text);
    let network = metadata::extract_network(text);

    // The user agent alone can produce a valid-looking log; a missing
    // daemon is worth surfacing even though parsing succeeded.
    if !entries.is_empty() && !entries.iter().any(|e| e.process.contains(AGENT_DAEMON_PROCESS)) {
        issues.push(format!(
            "warning: no entries from {} found; the management daemon may not be running",
            AGENT_DAEMON_PROCESS
        ));
    }

    Ok(LogAnalysis {
        source: source.to_string(),
        events,
        entries,
        issues,
        enrollment,
        network,
    })
}

/// Analyze several raw sources as one input, ordered by each source's
/// first discoverable entry timestamp (oldest first).
pub fn analyze_sources(sources: Vec<LogSource>) -> Result<LogAnalysis> {
    let combined = source::combine(sources);
    analyze(&combined.text, &combined.label)
}
