//! Raw input handling: reading log files and combining several of them
//! into one input text.

use std::path::Path;

use crate::error::Result;
use crate::tokenizer;

/// One raw input blob plus the label it will be reported under.
#[derive(Debug, Clone)]
pub struct LogSource {
    pub label: String,
    pub text: String,
}

impl LogSource {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Read a source from disk. A read failure aborts the invocation; no
    /// partial analysis is produced from an unreadable file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { label, text })
    }
}

/// Combine several sources into one input text.
///
/// The only ordering contract is the first discoverable entry timestamp
/// per source, oldest first; sources without one sort last, original
/// order preserved among ties. The texts are concatenated whole; there is
/// no line-level interleaving.
pub fn combine(mut sources: Vec<LogSource>) -> LogSource {
    sources.sort_by_key(|s| {
        let first = tokenizer::first_timestamp(&s.text);
        (first.is_none(), first)
    });

    let label = sources
        .iter()
        .map(|s| s.label.as_str())
        .collect::<Vec<_>>()
        .join("+");

    let text = sources
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    LogSource { label, text }
}
