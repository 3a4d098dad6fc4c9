//! Session Store
//!
//! Identifiers chosen earlier in the user flow (player names, subject
//! edition) live in a key-value store owned by the host: browser
//! `localStorage` in the web UI, a JSON file for the CLI. Views only read it.

#[cfg(feature = "native")]
mod file;

#[cfg(feature = "native")]
pub use file::FileSessionStore;

use std::collections::BTreeMap;
use thiserror::Error;

/// Well-known session keys
pub mod keys {
    pub const INDIVIDUAL_PLAYER: &str = "individualPlayername";
    pub const TEAM_PLAYER: &str = "teamPlayername";
    pub const SUBJECT_ACRONYM: &str = "gameSubjectAcronym";
    pub const COURSE: &str = "gameCourse";
    pub const PERIOD: &str = "gamePeriod";

    pub const ALL: [&str; 5] = [INDIVIDUAL_PLAYER, TEAM_PLAYER, SUBJECT_ACRONYM, COURSE, PERIOD];
}

/// Key-value store holding session identifiers
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;

    fn remove(&mut self, key: &str) -> Result<(), SessionError>;

    /// Every stored identifier, sorted by key
    fn entries(&self) -> BTreeMap<String, String>;
}

/// Errors raised by persistent session stores
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// In-memory store, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: BTreeMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }

    fn entries(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }
}

/// Subject edition a player's game belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameScope {
    pub subject_acronym: String,
    pub course: i32,
    pub period: String,
}

impl GameScope {
    /// Read the scope; `None` if a key is missing or the course is not a number
    pub fn read<S: SessionStore + ?Sized>(store: &S) -> Option<Self> {
        let subject_acronym = store.get(keys::SUBJECT_ACRONYM)?;
        let course = store.get(keys::COURSE)?;
        let period = store.get(keys::PERIOD)?;

        let course = match course.trim().parse::<i32>() {
            Ok(c) => c,
            Err(_) => {
                tracing::warn!(course = %course, "Session course is not a number");
                return None;
            }
        };

        Some(Self {
            subject_acronym,
            course,
            period,
        })
    }
}

/// Identifiers the team gamification view needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSession {
    pub individual_player: String,
    pub team_player: String,
    /// Absent scope only disables the leaderboard fetch
    pub scope: Option<GameScope>,
}

impl TeamSession {
    /// Read the session; `None` unless both player names are present
    pub fn read<S: SessionStore + ?Sized>(store: &S) -> Option<Self> {
        let individual_player = store.get(keys::INDIVIDUAL_PLAYER)?;
        let team_player = store.get(keys::TEAM_PLAYER)?;

        Some(Self {
            individual_player,
            team_player,
            scope: GameScope::read(store),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_store() -> MemorySessionStore {
        MemorySessionStore::new()
            .with(keys::INDIVIDUAL_PLAYER, "alice")
            .with(keys::TEAM_PLAYER, "pes11a")
            .with(keys::SUBJECT_ACRONYM, "PES")
            .with(keys::COURSE, "2024")
            .with(keys::PERIOD, "Q1")
    }

    #[test]
    fn test_full_session() {
        let session = TeamSession::read(&full_store()).unwrap();
        assert_eq!(session.individual_player, "alice");
        assert_eq!(session.team_player, "pes11a");
        assert_eq!(
            session.scope,
            Some(GameScope {
                subject_acronym: "PES".to_string(),
                course: 2024,
                period: "Q1".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_player_disables_session() {
        let mut store = full_store();
        store.remove(keys::TEAM_PLAYER).unwrap();
        assert_eq!(TeamSession::read(&store), None);

        let mut store = full_store();
        store.remove(keys::INDIVIDUAL_PLAYER).unwrap();
        assert_eq!(TeamSession::read(&store), None);
    }

    #[test]
    fn test_entries_lists_every_key_in_order() {
        let mut store = full_store().with("theme", "dark");
        store.remove(keys::PERIOD).unwrap();

        let entries = store.entries();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries.get("theme").map(String::as_str), Some("dark"));
        assert!(!entries.contains_key(keys::PERIOD));
        let names: Vec<&str> = entries.keys().map(String::as_str).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_invalid_course_drops_scope_only() {
        let mut store = full_store();
        store.set(keys::COURSE, "second").unwrap();

        let session = TeamSession::read(&store).unwrap();
        assert_eq!(session.scope, None);
        assert_eq!(session.team_player, "pes11a");
    }
}
