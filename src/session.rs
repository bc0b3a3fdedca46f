use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

/// How many history entries a UI shows at once. The underlying record
/// grows unbounded for the life of the session.
pub const VISIBLE_HISTORY: usize = 5;

/// One successful generation, as remembered by the session.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// The user's prompt as typed, before the style suffix was appended.
    pub prompt: String,
    /// Style name selected for this generation.
    pub style: String,
    /// Where the image was written. Points at a file that existed when
    /// the entry was appended; entries are never created on failure.
    pub path: PathBuf,
    pub timestamp: DateTime<Local>,
}

/// Session-scoped state for one user's generation flow.
///
/// Created on session start and dropped on session end; request handlers
/// receive it explicitly instead of reaching for process-wide state. Only
/// one request/response cycle touches it at a time, so no synchronization
/// is needed.
#[derive(Debug, Default)]
pub struct Session {
    history: Vec<HistoryEntry>,
    advanced_options: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a history entry for a completed generation. Callers only
    /// invoke this after the image file has been written.
    pub fn record(
        &mut self,
        prompt: impl Into<String>,
        style: impl Into<String>,
        path: impl Into<PathBuf>,
    ) {
        self.history.push(HistoryEntry {
            prompt: prompt.into(),
            style: style.into(),
            path: path.into(),
            timestamp: Local::now(),
        });
    }

    /// The most recent entries, newest first, capped at
    /// [`VISIBLE_HISTORY`].
    pub fn recent(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter().rev().take(VISIBLE_HISTORY)
    }

    /// Total number of recorded generations, including ones no longer
    /// visible through [`Session::recent`].
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Whether the advanced-options panel has been opened. While false,
    /// submissions ignore caller overrides and use the defaults.
    pub fn advanced_options(&self) -> bool {
        self.advanced_options
    }

    pub fn set_advanced_options(&mut self, shown: bool) {
        self.advanced_options = shown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert!(session.is_empty());
        assert_eq!(session.len(), 0);
        assert!(!session.advanced_options());
    }

    #[test]
    fn test_record_appends_in_order() {
        let mut session = Session::new();
        session.record("first", "Paisajes", "out/a.png");
        session.record("second", "Retratos", "out/b.png");

        assert_eq!(session.len(), 2);
        let recent: Vec<_> = session.recent().collect();
        assert_eq!(recent[0].prompt, "second");
        assert_eq!(recent[1].prompt, "first");
    }

    #[test]
    fn test_recent_caps_at_five_newest_first() {
        let mut session = Session::new();
        for i in 0..7 {
            session.record(format!("prompt {}", i), "Monstruos", format!("out/{}.png", i));
        }

        assert_eq!(session.len(), 7);
        let recent: Vec<_> = session.recent().collect();
        assert_eq!(recent.len(), VISIBLE_HISTORY);
        assert_eq!(recent[0].prompt, "prompt 6");
        assert_eq!(recent[4].prompt, "prompt 2");
    }

    #[test]
    fn test_advanced_options_flag() {
        let mut session = Session::new();
        session.set_advanced_options(true);
        assert!(session.advanced_options());
        session.set_advanced_options(false);
        assert!(!session.advanced_options());
    }
}
