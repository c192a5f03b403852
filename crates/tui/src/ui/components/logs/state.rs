use chrono::{DateTime, Local};
use yousmala_types::Severity;

/// Retained activity log lines; older lines are dropped first.
const MAX_LOG_ENTRIES: usize = 500;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
    pub message: String,
}

/// Activity log shown under the header of the main screen.
#[derive(Debug)]
pub struct LogsState {
    entries: Vec<LogEntry>,
}

impl Default for LogsState {
    fn default() -> Self {
        let mut state = Self { entries: Vec::new() };
        state.push(Severity::Info, "Bienvenue dans le back office Yousmala");
        state
    }
}

impl LogsState {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        if self.entries.len() == MAX_LOG_ENTRIES {
            self.entries.remove(0);
        }
        self.entries.push(LogEntry {
            timestamp: Local::now(),
            severity,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_entries_are_dropped_at_capacity() {
        let mut logs = LogsState::default();
        for index in 0..MAX_LOG_ENTRIES {
            logs.push(Severity::Info, format!("ligne {index}"));
        }
        assert_eq!(logs.entries().len(), MAX_LOG_ENTRIES);
        assert_eq!(logs.entries()[0].message, "ligne 0");
        assert_eq!(logs.last().map(|entry| entry.message.as_str()), Some("ligne 499"));
    }
}
