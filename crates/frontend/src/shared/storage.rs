use contracts::shared::error::StateError;
use contracts::shared::storage::KeyValueStore;
use web_sys::window;

/// `window.sessionStorage` / `window.localStorage` behind [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

impl BrowserStorage {
    /// Tab-scoped storage, cleared when the browsing session ends
    pub fn session() -> Option<Self> {
        let inner = window()?.session_storage().ok()??;
        Some(Self { inner })
    }

    /// Persistent storage
    pub fn local() -> Option<Self> {
        let inner = window()?.local_storage().ok()??;
        Some(Self { inner })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StateError> {
        self.inner
            .get_item(key)
            .map_err(|e| StateError::ReadFailed {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        // quota errors and private-mode restrictions surface here
        self.inner
            .set_item(key, value)
            .map_err(|e| StateError::WriteRejected {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
