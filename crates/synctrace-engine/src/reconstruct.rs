//! Event reconstruction: a single-pass scan that folds the flat entry
//! sequence into bounded sync-event windows.

use chrono::NaiveDateTime;
use uuid::Uuid;

use synctrace_types::{LogEntry, SyncEvent, SyncEventKind};

use crate::aggregate::aggregate_policies;
use crate::markers::{self, Boundary};

/// An event window that has seen its start marker but not yet its end.
struct EventWindow {
    kind: SyncEventKind,
    start_time: NaiveDateTime,
    entries: Vec<LogEntry>,
}

impl EventWindow {
    fn open(kind: SyncEventKind, entry: &LogEntry) -> Self {
        Self {
            kind,
            start_time: entry.timestamp,
            entries: vec![entry.clone()],
        }
    }

    fn finalize(self, end_time: Option<NaiveDateTime>, issues: &mut Vec<String>) -> SyncEvent {
        let policies = aggregate_policies(&self.entries, issues);
        SyncEvent {
            id: Uuid::new_v4(),
            kind: self.kind,
            start_time: self.start_time,
            end_time,
            policies,
            entries: self.entries,
        }
    }
}

/// Group the ordered, filtered entry list into sync events.
///
/// Entries arriving while no window is open attach to no event; they stay
/// in the flat entry list for other consumers. A window still open at end
/// of input finalizes with an absent end time ("still running").
pub fn build_events(entries: &[LogEntry], issues: &mut Vec<String>) -> Vec<SyncEvent> {
    let mut events = Vec::new();
    let mut window: Option<EventWindow> = None;

    for entry in entries {
        match markers::boundary(entry) {
            Some(Boundary::Start(kind)) => {
                // A new start marker closes any window that never saw its
                // own end marker.
                if let Some(open) = window.take() {
                    events.push(open.finalize(None, issues));
                }
                window = Some(EventWindow::open(kind, entry));
            }

            Some(Boundary::End) => {
                if let Some(mut open) = window.take() {
                    open.entries.push(entry.clone());
                    events.push(open.finalize(Some(entry.timestamp), issues));
                }
                // An end marker with no open window attaches to nothing.
            }

            None => {
                if let Some(ref mut open) = window {
                    open.entries.push(entry.clone());
                }
            }
        }
    }

    if let Some(open) = window.take() {
        events.push(open.finalize(None, issues));
    }

    events
}
