use chrono::{DateTime, Local, Utc};

pub const HISTORY_LIMIT: usize = 10;

/// A completed generation, as shown under "Recent Topics".
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub topic: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub response_time_seconds: f64,
}

impl HistoryEntry {
    pub fn local_time(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
    }

    pub fn response_time_label(&self) -> String {
        format!("{:.1}s", self.response_time_seconds)
    }
}

/// Newest-first list capped at [`HISTORY_LIMIT`] entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandHistory {
    entries: Vec<HistoryEntry>,
}

impl CommandHistory {
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
