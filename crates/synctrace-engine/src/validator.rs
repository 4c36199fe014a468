use crate::markers::AGENT_PROCESS_MARKER;
use crate::tokenizer;

/// How many leading content lines the pre-check is allowed to inspect.
const INSPECTION_WINDOW: usize = 50;

/// Verdict of the cheap format pre-check.
///
/// Advisory only: it runs before the expensive full parse and must never
/// panic on malformed input. Worst case it reports the input as invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCheck {
    /// Input plausibly is an agent diagnostic log.
    Recognized,
    /// Input does not look like this log family at all.
    WrongFormat(String),
    /// Right shape, but produced by some other program.
    WrongProduct(String),
}

impl FormatCheck {
    pub fn is_recognized(&self) -> bool {
        matches!(self, FormatCheck::Recognized)
    }

    /// Descriptive message for failed checks.
    pub fn message(&self) -> Option<&str> {
        match self {
            FormatCheck::Recognized => None,
            FormatCheck::WrongFormat(msg) | FormatCheck::WrongProduct(msg) => Some(msg),
        }
    }
}

/// Separator rules some tools prepend to captured logs.
fn is_banner(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3
        && (trimmed.chars().all(|c| c == '-') || trimmed.chars().all(|c| c == '='))
}

/// Inspect the first lines of `text` and judge whether it plausibly is an
/// agent diagnostic log from the right product.
pub fn check_format(text: &str, source: &str) -> FormatCheck {
    let mut saw_timestamp = false;
    let mut saw_columns = false;
    let mut saw_agent_process = false;

    let content_lines = text
        .lines()
        .filter(|l| !l.trim().is_empty() && !is_banner(l))
        .take(INSPECTION_WINDOW);

    for line in content_lines {
        if tokenizer::is_entry_start(line) {
            saw_timestamp = true;
        }

        let fields: Vec<&str> = line.split(" | ").collect();
        if fields.len() >= 5 {
            saw_columns = true;
            if fields[1].contains(AGENT_PROCESS_MARKER) {
                saw_agent_process = true;
            }
        }
    }

    if !saw_timestamp {
        return FormatCheck::WrongFormat(format!(
            "{}: no timestamped log lines found; this does not look like an agent diagnostic log",
            source
        ));
    }

    if !saw_columns {
        return FormatCheck::WrongFormat(format!(
            "{}: no pipe-delimited log lines found; this does not look like an agent diagnostic log",
            source
        ));
    }

    if !saw_agent_process {
        return FormatCheck::WrongProduct(format!(
            "{}: log lines have the right shape but the process column never names the management agent",
            source
        ));
    }

    FormatCheck::Recognized
}
