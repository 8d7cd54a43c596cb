//! JSON file store for native builds

use std::path::{Path, PathBuf};

use super::{PersistError, PlayerPrefs, PrefsStore, STORAGE_KEY};

/// Stores the record as pretty JSON in a single file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `dontlookdown_prefs.json` in the working directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(format!("{STORAGE_KEY}.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrefsStore for FileStore {
    fn load(&self) -> Result<Option<PlayerPrefs>, PersistError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        PlayerPrefs::from_json(&json).map(Some)
    }

    fn save(&mut self, prefs: &PlayerPrefs) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(prefs)?;
        // Write-then-rename so a crash never leaves a half-written record
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::debug!("Preferences written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dld_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_none() {
        let store = FileStore::new(temp_path("missing"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_round_trip_on_disk() {
        let path = temp_path("round_trip");
        let mut store = FileStore::new(&path);
        let prefs = PlayerPrefs {
            skin: "robot".to_string(),
            coins: 1234,
            owned_skins: vec!["bach".to_string(), "robot".to_string()],
            ..PlayerPrefs::default()
        };
        store.save(&prefs).unwrap();
        assert_eq!(store.load().unwrap(), Some(prefs));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_malformed() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{ \"coins\": ").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistError::Malformed(_))));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let mut store = FileStore::new(temp_path("no_such_dir").join("prefs.json"));
        assert!(matches!(
            store.save(&PlayerPrefs::default()),
            Err(PersistError::Io(_))
        ));
    }
}
