//! `localStorage` backing for the favorites store.

use cp_core::StoreError;
use cp_core::favorites::{FavoritesStore, KeyValueStore};

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[derive(Clone, Copy, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        storage()
            .ok_or(StoreError::Unavailable)?
            .set_item(key, value)
            .map_err(|err| StoreError::Write(format!("{err:?}")))
    }
}

pub fn favorites(key: &str) -> FavoritesStore<LocalStore> {
    FavoritesStore::new(LocalStore, key)
}
