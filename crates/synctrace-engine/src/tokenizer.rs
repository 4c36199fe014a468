//! Line tokenizer and entry builder.
//!
//! A physical line starts a new entry iff it leads with the timestamp
//! pattern; every other non-blank line is a continuation of the open
//! entry's message. Entries are finalized lazily, when the next entry
//! line arrives or the input ends.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

use synctrace_types::{LogEntry, Severity};

use crate::markers::NOISE_COMPONENT;

/// Leading timestamp pattern: `YYYY-MM-DD HH:MM:SS` with an optional
/// `:mmm` millisecond suffix.
static ENTRY_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(?::\d{3})?").unwrap());

/// Column delimiter of the entry header line.
const FIELD_DELIMITER: &str = " | ";

/// Whether a physical line opens a new entry.
pub fn is_entry_start(line: &str) -> bool {
    ENTRY_START.is_match(line)
}

/// Strict timestamp parse for finalization. The shape check above is
/// looser on purpose; an impossible date still invalidates the entry.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S:%3f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Timestamp of the first entry-start line in `text`, if any. Used as the
/// sort key when combining multiple source files.
pub fn first_timestamp(text: &str) -> Option<NaiveDateTime> {
    text.lines().find_map(|line| {
        let m = ENTRY_START.find(line)?;
        parse_timestamp(m.as_str())
    })
}

/// An entry that has seen its header line but not yet its terminator.
struct OpenEntry {
    line_no: usize,
    /// Header first, continuation lines after, all verbatim.
    lines: Vec<String>,
}

/// Tokenize raw text into structured entries plus non-fatal issues.
///
/// Malformed entries are excluded from the output and recorded by line
/// number; parsing always continues with the next line.
pub fn tokenize(text: &str) -> (Vec<LogEntry>, Vec<String>) {
    let mut entries = Vec::new();
    let mut issues = Vec::new();
    let mut open: Option<OpenEntry> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;

        if is_entry_start(line) {
            if let Some(prev) = open.take() {
                finalize(prev, &mut entries, &mut issues);
            }
            open = Some(OpenEntry {
                line_no,
                lines: vec![line.to_string()],
            });
        } else if line.trim().is_empty() {
            // Blank lines are neither entries nor continuations.
        } else if let Some(ref mut entry) = open {
            entry.lines.push(line.to_string());
        } else {
            issues.push(format!("line {}: orphaned continuation line", line_no));
        }
    }

    if let Some(prev) = open.take() {
        finalize(prev, &mut entries, &mut issues);
    }

    (entries, issues)
}

fn finalize(open: OpenEntry, entries: &mut Vec<LogEntry>, issues: &mut Vec<String>) {
    let header = &open.lines[0];
    let fields: Vec<&str> = header.splitn(6, FIELD_DELIMITER).collect();

    if fields.len() < 5 {
        issues.push(format!(
            "line {}: malformed entry header: expected at least 5 fields, found {}",
            open.line_no,
            fields.len()
        ));
        return;
    }

    let timestamp_field = fields[0].trim();
    let Some(timestamp) = parse_timestamp(timestamp_field) else {
        issues.push(format!(
            "line {}: unparseable timestamp '{}'",
            open.line_no, timestamp_field
        ));
        return;
    };

    let level_code = fields[2].trim();
    let Some(level) = Severity::from_code(level_code) else {
        issues.push(format!(
            "line {}: unrecognized severity code '{}'",
            open.line_no, level_code
        ));
        return;
    };

    // Message: the header's tail plus all continuation lines, newline-joined.
    let mut message_parts: Vec<&str> = vec![fields.get(5).copied().unwrap_or("")];
    message_parts.extend(open.lines[1..].iter().map(String::as_str));
    let message = message_parts.join("\n");

    let entry = LogEntry {
        timestamp,
        process: fields[1].trim().to_string(),
        level,
        thread_id: fields[3].trim().to_string(),
        component: fields[4].trim().to_string(),
        message,
        raw: open.lines.join("\n"),
    };

    // Known chatty source, dropped without an issue.
    if entry.component == NOISE_COMPONENT {
        return;
    }

    entries.push(entry);
}
