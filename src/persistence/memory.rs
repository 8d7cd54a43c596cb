//! In-memory store for headless runs and tests

use super::{PersistError, PlayerPrefs, PrefsStore};

/// Keeps the serialized record in memory, exactly as a real backend would
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    /// Make every save fail (simulates a full or read-only disk)
    pub fail_saves: bool,
    /// Number of successful saves
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary stored document (possibly malformed)
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            ..Self::default()
        }
    }

    /// Start with a stored record
    pub fn with_prefs(prefs: &PlayerPrefs) -> Self {
        Self {
            raw: prefs.to_json().ok(),
            ..Self::default()
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl PrefsStore for MemoryStore {
    fn load(&self) -> Result<Option<PlayerPrefs>, PersistError> {
        self.raw.as_deref().map(PlayerPrefs::from_json).transpose()
    }

    fn save(&mut self, prefs: &PlayerPrefs) -> Result<(), PersistError> {
        if self.fail_saves {
            return Err(PersistError::Unavailable("memory store is read-only".to_string()));
        }
        self.raw = Some(prefs.to_json()?);
        self.saves += 1;
        Ok(())
    }
}
