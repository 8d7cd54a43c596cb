//! Player preferences persistence
//!
//! The record is a flat key-value document:
//! - equipped skin and trail ids
//! - coin total
//! - owned skin and trail ids
//!
//! Saves are full overwrites. A missing record loads as `None`; callers treat
//! that (and any error) as "use defaults".

pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod memory;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

use crate::shop::{SkinId, TrailKind};

/// Storage key / file stem shared by all backends
pub const STORAGE_KEY: &str = "dontlookdown_prefs";

/// The persisted preferences record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerPrefs {
    pub skin: String,
    pub trail: String,
    pub coins: u64,
    pub owned_skins: Vec<String>,
    pub owned_trails: Vec<String>,
}

impl Default for PlayerPrefs {
    fn default() -> Self {
        Self {
            skin: SkinId::default().as_str().to_string(),
            trail: TrailKind::default().as_str().to_string(),
            coins: 0,
            owned_skins: Vec::new(),
            owned_trails: Vec::new(),
        }
    }
}

impl PlayerPrefs {
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Why a load or save failed
#[derive(Debug)]
pub enum PersistError {
    /// Underlying storage read/write failed
    Io(std::io::Error),
    /// Stored record could not be parsed (or encoded)
    Malformed(serde_json::Error),
    /// No storage backend on this platform/session
    Unavailable(String),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage io error: {e}"),
            Self::Malformed(e) => write!(f, "malformed preferences record: {e}"),
            Self::Unavailable(m) => write!(f, "storage unavailable: {m}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Malformed(e) => Some(e),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e)
    }
}

/// A place preferences can be loaded from and saved to
pub trait PrefsStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<PlayerPrefs>, PersistError>;

    /// Overwrite the stored record
    fn save(&mut self, prefs: &PlayerPrefs) -> Result<(), PersistError>;
}

/// Load preferences, falling back to defaults on absence or failure
pub fn load_or_default(store: &impl PrefsStore) -> PlayerPrefs {
    match store.load() {
        Ok(Some(prefs)) => {
            log::info!("Loaded preferences ({} coins)", prefs.coins);
            prefs
        }
        Ok(None) => {
            log::info!("No saved preferences, starting fresh");
            PlayerPrefs::default()
        }
        Err(e) => {
            log::warn!("Could not load preferences, using defaults: {e}");
            PlayerPrefs::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let prefs = PlayerPrefs::from_json(r#"{ "coins": 42 }"#).unwrap();
        assert_eq!(prefs.coins, 42);
        assert_eq!(prefs.skin, "bach");
        assert_eq!(prefs.trail, "none");
        assert!(prefs.owned_skins.is_empty());
    }

    #[test]
    fn test_original_record_layout() {
        let json = r#"{"skin": "ninja", "trail": "fire", "coins": 12,
            "owned_skins": ["bach", "ninja"], "owned_trails": ["none", "fire"]}"#;
        let prefs = PlayerPrefs::from_json(json).unwrap();
        assert_eq!(prefs.skin, "ninja");
        assert_eq!(prefs.owned_trails, vec!["none", "fire"]);
    }

    #[test]
    fn test_negative_coins_malformed() {
        let err = PlayerPrefs::from_json(r#"{ "coins": -3 }"#).unwrap_err();
        assert!(matches!(err, PersistError::Malformed(_)));
    }

    #[test]
    fn test_load_or_default_swallows_errors() {
        let store = MemoryStore::with_raw("{ definitely not json");
        assert_eq!(load_or_default(&store), PlayerPrefs::default());

        let empty = MemoryStore::new();
        assert_eq!(load_or_default(&empty), PlayerPrefs::default());
    }
}
