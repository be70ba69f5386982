//! View-side state for a single article generator.
//!
//! Everything the page renders lives in [`GeneratorSession`]. The component
//! holds one in a signal and drives it through
//! `begin → start_streaming → push_chunk* → complete | fail`.

pub mod decoder;
pub mod history;

use chrono::{DateTime, Utc};
use log::debug;

pub use decoder::Utf8StreamDecoder;
pub use history::{CommandHistory, HistoryEntry, HISTORY_LIMIT};

pub const EXAMPLE_TOPICS: [&str; 5] = [
    "Future of AI in Healthcare",
    "Space colonization by 2050",
    "Impact of climate change on agriculture",
    "The next big cryptocurrency",
    "AI-generated art revolution",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    /// Request issued, waiting on response headers.
    Sending,
    /// Body is being read.
    Streaming,
    Settled(Outcome),
}

impl RequestPhase {
    pub fn is_processing(self) -> bool {
        matches!(self, RequestPhase::Sending | RequestPhase::Streaming)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneratorSession {
    phase: RequestPhase,
    topic: String,
    article: String,
    error: Option<String>,
    started_at: Option<DateTime<Utc>>,
    decoder: Utf8StreamDecoder,
    history: CommandHistory,
}

impl GeneratorSession {
    /// Starts a request for `topic`. Returns the trimmed topic to send, or
    /// `None` when the topic is blank or another request is still in flight.
    pub fn begin(&mut self, topic: &str, now: DateTime<Utc>) -> Option<String> {
        if self.phase.is_processing() {
            debug!("Ignoring submission while a generation is in flight");
            return None;
        }
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }

        self.phase = RequestPhase::Sending;
        self.topic = topic.to_string();
        self.article.clear();
        self.error = None;
        self.started_at = Some(now);
        self.decoder = Utf8StreamDecoder::new();
        Some(self.topic.clone())
    }

    pub fn start_streaming(&mut self) {
        if self.phase == RequestPhase::Sending {
            self.phase = RequestPhase::Streaming;
        }
    }

    pub fn push_chunk(&mut self, chunk: &[u8]) {
        if self.phase != RequestPhase::Streaming {
            debug!("Dropping {} bytes received outside of streaming", chunk.len());
            return;
        }
        let text = self.decoder.decode(chunk);
        self.article.push_str(&text);
    }

    /// Settles the request successfully and records it in the history. The
    /// entry holds the article exactly as displayed after the last chunk.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        if !self.phase.is_processing() {
            return;
        }
        let tail = self.decoder.finish();
        self.article.push_str(&tail);

        let response_time_seconds = self
            .started_at
            .map(|started| (now - started).num_milliseconds().max(0) as f64 / 1000.0)
            .unwrap_or_default();

        self.history.record(HistoryEntry {
            topic: self.topic.clone(),
            content: self.article.clone(),
            timestamp: now,
            response_time_seconds,
        });
        self.phase = RequestPhase::Settled(Outcome::Success);
    }

    /// Settles the request with a user-visible error. Partial output stays.
    pub fn fail(&mut self, message: impl Into<String>) {
        if !self.phase.is_processing() {
            return;
        }
        let tail = self.decoder.finish();
        self.article.push_str(&tail);
        self.error = Some(message.into());
        self.phase = RequestPhase::Settled(Outcome::Error);
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    pub fn is_processing(&self) -> bool {
        self.phase.is_processing()
    }

    pub fn article(&self) -> &str {
        &self.article
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn word_count(&self) -> usize {
        self.article.split_whitespace().count()
    }

    pub fn char_count(&self) -> usize {
        self.article.chars().count()
    }
}
