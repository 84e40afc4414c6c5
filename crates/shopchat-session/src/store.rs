use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::message::ChatMessage;

/// Sessions keep only this many of their most recent messages.
pub const HISTORY_LIMIT: usize = 10;

/// File-backed mapping from session id to a rolling chat history.
///
/// The whole mapping is rewritten on every `persist`; there is no atomic
/// rename and no partial-write protection. Concurrent writers touching the
/// same session id race with last-write-wins semantics.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    sessions: HashMap<String, Vec<ChatMessage>>,
}

impl SessionStore {
    /// Load the store from `path`. A missing or unparseable file starts the
    /// store empty; neither case surfaces an error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let sessions = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(sessions) => sessions,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Session file unparseable, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self { path, sessions }
    }

    /// Messages for `session_id`, oldest first. Unknown ids read as empty.
    pub fn history(&self, session_id: &str) -> &[ChatMessage] {
        self.sessions
            .get(session_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Append a message, creating the session on first reference, then drop
    /// everything but the `HISTORY_LIMIT` most recent entries.
    pub fn append(&mut self, session_id: &str, message: ChatMessage) {
        let history = self.sessions.entry(session_id.to_string()).or_default();
        history.push(message);
        if history.len() > HISTORY_LIMIT {
            let excess = history.len() - HISTORY_LIMIT;
            history.drain(..excess);
        }
    }

    /// Overwrite the backing file with the full mapping, synchronously.
    pub fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.sessions)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::load(dir.path().join("sessions.json"))
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.history("s1").is_empty());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        fs::write(&path, "{not json").unwrap();

        let store = SessionStore::load(&path);
        assert!(store.history("s1").is_empty());
    }

    #[test]
    fn test_append_creates_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.append("s1", ChatMessage::user("hi"));
        assert_eq!(store.history("s1").len(), 1);
        assert_eq!(store.history("s1")[0].text(), "hi");
    }

    #[test]
    fn test_history_capped_at_limit_keeping_most_recent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        for i in 0..25 {
            store.append("s1", ChatMessage::user(format!("m{}", i)));
        }

        let history = store.history("s1");
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].text(), "m15");
        assert_eq!(history[9].text(), "m24");
    }

    #[test]
    fn test_persist_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");

        let mut store = SessionStore::load(&path);
        store.append("s1", ChatMessage::user("hi"));
        store.append("s1", ChatMessage::assistant("hello"));
        store.persist().unwrap();

        let reloaded = SessionStore::load(&path);
        let history = reloaded.history("s1");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role(), "user");
        assert_eq!(history[1].role(), "assistant");
        assert_eq!(history[1].text(), "hello");
    }

    #[test]
    fn test_persist_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");

        let mut store = SessionStore::load(&path);
        store.append("old", ChatMessage::user("stale"));
        store.persist().unwrap();

        let mut fresh = SessionStore::load(&path);
        fresh.append("new", ChatMessage::user("current"));
        fresh.persist().unwrap();

        let reloaded = SessionStore::load(&path);
        assert_eq!(reloaded.history("old").len(), 1);
        assert_eq!(reloaded.history("new").len(), 1);
    }
}
