//! Favorites persisted in browser-local storage.
//!
//! The whole list lives under one key as a JSON array of
//! `{ "imageSrc", "rarity" }`. Identity is `imageSrc` equality.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::warn;

use crate::error::StoreError;

/// Synchronous string key/value storage (the `localStorage` shape).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct InMemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    #[serde(rename = "imageSrc")]
    pub image_src: String,
    pub rarity: String,
}

impl FavoriteEntry {
    pub fn new(image_src: impl Into<String>, rarity: impl Into<String>) -> Self {
        Self {
            image_src: image_src.into(),
            rarity: rarity.into(),
        }
    }
}

/// Result of a toggle: the new state of the entry and the full list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub favorited: bool,
    pub entries: Vec<FavoriteEntry>,
}

pub struct FavoritesStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Missing or unreadable contents load as an empty list.
    pub fn load(&self) -> Vec<FavoriteEntry> {
        let Some(raw) = self.store.get(&self.key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Option<Vec<FavoriteEntry>>>(&raw) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(err) => {
                warn!(key = %self.key, "discarding corrupt favorites: {err}");
                Vec::new()
            }
        }
    }

    pub fn is_favorite(&self, image_src: &str) -> bool {
        self.load().iter().any(|f| f.image_src == image_src)
    }

    /// Remove the entry with the same `image_src`, or append `entry`.
    pub fn toggle(&self, entry: FavoriteEntry) -> Toggle {
        let mut entries = self.load();
        let favorited = match entries.iter().position(|f| f.image_src == entry.image_src) {
            Some(index) => {
                entries.remove(index);
                false
            }
            None => {
                entries.push(entry);
                true
            }
        };
        self.save(&entries);
        Toggle { favorited, entries }
    }

    fn save(&self, entries: &[FavoriteEntry]) {
        let json = serde_json::to_string(entries).unwrap_or_else(|_| "[]".into());
        if let Err(err) = self.store.set(&self.key, &json) {
            warn!(key = %self.key, "failed to persist favorites: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn store() -> FavoritesStore<InMemoryStore> {
        FavoritesStore::new(InMemoryStore::new(), "favorites")
    }

    #[test]
    fn absent_key_is_empty() {
        assert!(store().load().is_empty());
    }

    #[test]
    fn corrupt_contents_degrade_to_empty() {
        let favorites = store();
        favorites.store.set("favorites", "{not json").unwrap();
        assert!(favorites.load().is_empty());

        favorites.store.set("favorites", "null").unwrap();
        assert!(favorites.load().is_empty());
    }

    #[test]
    fn toggle_twice_restores_original() {
        let favorites = store();
        favorites.toggle(FavoriteEntry::new("a.png", "rare"));
        let before = favorites.load();

        let first = favorites.toggle(FavoriteEntry::new("b.png", "epic"));
        assert!(first.favorited);
        let second = favorites.toggle(FavoriteEntry::new("b.png", "epic"));
        assert!(!second.favorited);

        assert_eq!(favorites.load(), before);
    }

    #[test]
    fn identity_is_image_src_only() {
        let favorites = store();
        favorites.toggle(FavoriteEntry::new("a.png", "common"));
        favorites.toggle(FavoriteEntry::new("b.png", "common"));
        assert_eq!(favorites.load().len(), 2);

        // Same image with a different rarity still removes the entry.
        let toggle = favorites.toggle(FavoriteEntry::new("a.png", "legendary"));
        assert!(!toggle.favorited);
        assert_eq!(toggle.entries, vec![FavoriteEntry::new("b.png", "common")]);
    }

    #[test]
    fn persists_wire_field_names_in_order() {
        let favorites = store();
        favorites.toggle(FavoriteEntry::new("x.png", "uncommon"));
        favorites.toggle(FavoriteEntry::new("y.png", "rare"));
        assert_eq!(
            favorites.store.get("favorites").unwrap(),
            r#"[{"imageSrc":"x.png","rarity":"uncommon"},{"imageSrc":"y.png","rarity":"rare"}]"#
        );
        assert!(favorites.is_favorite("y.png"));
        assert!(!favorites.is_favorite("z.png"));
    }

    #[test]
    fn failed_write_still_reports_toggle() {
        struct ReadOnly;
        impl KeyValueStore for ReadOnly {
            fn get(&self, _key: &str) -> Option<String> {
                None
            }
            fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
                Err(StoreError::Unavailable)
            }
        }

        let favorites = FavoritesStore::new(ReadOnly, "favorites");
        let toggle = favorites.toggle(FavoriteEntry::new("a.png", "rare"));
        assert!(toggle.favorited);
        assert_eq!(toggle.entries.len(), 1);
    }

    proptest! {
        #[test]
        fn even_toggles_are_identity(
            seed in proptest::collection::vec("[a-e]\\.png", 0..8),
            probe in "[a-g]\\.png",
            times in 1usize..4,
        ) {
            let favorites = store();
            for src in &seed {
                if !favorites.is_favorite(src) {
                    favorites.toggle(FavoriteEntry::new(src.clone(), "common"));
                }
            }
            let before = favorites.load();
            for _ in 0..(times * 2) {
                favorites.toggle(FavoriteEntry::new(probe.clone(), "rare"));
            }
            let after = favorites.load();
            let mut before_srcs: Vec<_> = before.iter().map(|f| f.image_src.clone()).collect();
            let mut after_srcs: Vec<_> = after.iter().map(|f| f.image_src.clone()).collect();
            before_srcs.sort();
            after_srcs.sort();
            prop_assert_eq!(before_srcs, after_srcs);
        }
    }
}
