//! Turns view-model snapshots into terminal lines, printing only what changed.

use chrono::{TimeZone, Utc};
use podcast_core::{ClientViewModel, JobState, LogEntry, ProgressView};

#[derive(Debug, Default)]
pub struct TerminalRenderer {
    last_progress: Option<(JobState, ProgressView)>,
    last_error: Option<String>,
    printed_logs: Vec<LogEntry>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines to print for `view`, given everything printed so far.
    pub fn render(&mut self, view: &ClientViewModel) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(progress) = &view.progress {
            let current = (view.job_state, progress.clone());
            if self.last_progress.as_ref() != Some(&current) {
                lines.push(format!("[{}] {}", progress.caption, progress.label));
                self.last_progress = Some(current);
            }
        }

        // The backend resends the whole log each time; only print the new tail,
        // unless the history was rewritten.
        let fresh = if view.logs.starts_with(&self.printed_logs) {
            &view.logs[self.printed_logs.len()..]
        } else {
            lines.push("-- log history changed, reprinting --".to_string());
            &view.logs[..]
        };
        lines.extend(fresh.iter().map(format_log_line));
        self.printed_logs = view.logs.clone();

        if view.last_error != self.last_error {
            if let Some(error) = &view.last_error {
                lines.push(format!("Error: {error}"));
            }
            self.last_error = view.last_error.clone();
        }

        lines
    }
}

fn format_log_line(entry: &LogEntry) -> String {
    let time = entry
        .time_ms
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    format!("  {time} {:<7} {}", entry.level, entry.message)
}
