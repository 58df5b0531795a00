//! Secondary-status change detection and rendering
//!
//! A job can keep the same coarse status while updating its secondary
//! message (e.g. "Downloading" -> "Training"). The poller uses these
//! helpers to avoid re-printing identical status lines on every describe.

use chrono::Local;
use vigil_core::domain::job::{JobStatusSnapshot, StatusTransition};

/// Whether the job's secondary status changed between two snapshots
///
/// Compares the latest transition's message text; a job can report the same
/// coarse status but update its secondary message, which counts as a
/// change. Returns false when `curr` carries no transition history.
pub fn status_changed(prev: Option<&JobStatusSnapshot>, curr: &JobStatusSnapshot) -> bool {
    let Some(current) = curr.secondary_transitions.last() else {
        return false;
    };

    let last_message = prev
        .and_then(|p| p.secondary_transitions.last())
        .map(|t| t.message.as_str())
        .unwrap_or("");

    current.message != last_message
}

/// Render the status line(s) for the transitions not yet reported
///
/// Each line is `"<local-timestamp> <status> - <message>"` with the
/// transition's timestamp converted to local wall-clock time and truncated
/// to whole seconds. When `prev` is `None` every transition is rendered;
/// when the transition count is unchanged only the latest one is. Display
/// only, never used for control decisions.
pub fn format_status_line(
    prev: Option<&JobStatusSnapshot>,
    curr: &JobStatusSnapshot,
) -> Option<String> {
    if curr.secondary_transitions.is_empty() {
        return None;
    }

    let to_print: &[StatusTransition] = match prev {
        Some(p) if p.secondary_transitions.len() < curr.secondary_transitions.len() => {
            &curr.secondary_transitions[p.secondary_transitions.len()..]
        }
        Some(_) => &curr.secondary_transitions[curr.secondary_transitions.len() - 1..],
        None => &curr.secondary_transitions[..],
    };

    let lines: Vec<String> = to_print
        .iter()
        .map(|t| {
            format!(
                "{} {} - {}",
                t.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
                t.status,
                t.message
            )
        })
        .collect();

    Some(lines.join("\n"))
}
