//! Browser LocalStorage store (wasm32 only)

use super::{PersistError, PlayerPrefs, PrefsStore, STORAGE_KEY};

/// Stores the record under [`STORAGE_KEY`] in `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistError::Unavailable("no localStorage".to_string()))
    }
}

impl PrefsStore for LocalStorageStore {
    fn load(&self) -> Result<Option<PlayerPrefs>, PersistError> {
        let storage = Self::storage()?;
        match storage.get_item(STORAGE_KEY) {
            Ok(Some(json)) => PlayerPrefs::from_json(&json).map(Some),
            Ok(None) => Ok(None),
            Err(_) => Err(PersistError::Unavailable("localStorage read denied".to_string())),
        }
    }

    fn save(&mut self, prefs: &PlayerPrefs) -> Result<(), PersistError> {
        let storage = Self::storage()?;
        let json = prefs.to_json()?;
        storage
            .set_item(STORAGE_KEY, &json)
            .map_err(|_| PersistError::Unavailable("localStorage write denied".to_string()))?;
        log::debug!("Preferences written to localStorage");
        Ok(())
    }
}
