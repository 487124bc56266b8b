use std::fs;
use std::path::PathBuf;

/// The Favorites store manages the persisted set of favorited character ids.
///
/// The set is an ordered list without duplicates, kept in insertion order
/// and written out in full as a JSON array after every mutation. The file
/// lives in the user's data directory:
/// - Linux: ~/.local/share/character-browser/favorites.json
/// - macOS: ~/Library/Application Support/character-browser/favorites.json
/// - Windows: %APPDATA%\character-browser\favorites.json
pub struct Favorites {
    ids: Vec<u32>,
    file_path: PathBuf,
}

impl Favorites {
    /// Load the favorites set from the default location.
    ///
    /// A missing or unparsable file loads as an empty set; this never fails.
    pub fn load() -> Self {
        Self::load_from(Self::get_file_path())
    }

    /// Load the favorites set from an explicit file path
    pub fn load_from(file_path: PathBuf) -> Self {
        let ids = fs::read_to_string(&file_path)
            .ok()
            .and_then(|contents| serde_json::from_str::<Vec<u32>>(&contents).ok())
            .unwrap_or_default();

        Favorites { ids, file_path }
    }

    /// Get the path where the favorites file should be stored
    fn get_file_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(|| dirs::home_dir())
            .expect("Could not determine user data directory");

        path.push("character-browser");
        path.push("favorites.json");
        path
    }

    /// Check whether a character id is currently favorited
    pub fn is_favorite(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Add a character id to the set.
    ///
    /// Idempotent: a duplicate add is a no-op and does not rewrite the file.
    pub fn add(&mut self, id: u32) {
        if self.ids.contains(&id) {
            return;
        }
        self.ids.push(id);
        self.persist();
    }

    /// Remove a character id from the set.
    ///
    /// Idempotent: removing an absent id leaves the set unchanged but still
    /// rewrites the file, matching the last-write-wins persistence model.
    pub fn remove(&mut self, id: u32) {
        self.ids.retain(|&fav| fav != id);
        self.persist();
    }

    /// Current set size, used for the favorites badge
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// The favorited ids in insertion order
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Rewrite the whole persisted set.
    ///
    /// A write failure leaves the in-memory set intact and is only logged;
    /// the next mutation retries the full write.
    fn persist(&self) {
        if let Some(parent) = self.file_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("⚠️  Failed to create data directory: {}", e);
                return;
            }
        }

        let json = match serde_json::to_string(&self.ids) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("⚠️  Failed to encode favorites: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.file_path, json) {
            eprintln!("⚠️  Failed to write {}: {}", self.file_path.display(), e);
        }
    }
}

impl std::fmt::Debug for Favorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Favorites")
            .field("ids", &self.ids)
            .field("file_path", &self.file_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A store backed by a unique temp file that starts out absent
    fn fresh_store(name: &str) -> Favorites {
        let path = std::env::temp_dir().join(format!(
            "character-browser-test-{}-{}.json",
            std::process::id(),
            name
        ));
        let _ = fs::remove_file(&path);
        Favorites::load_from(path)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = fresh_store("missing");
        assert_eq!(store.count(), 0);
        assert!(store.ids().is_empty());
    }

    #[test]
    fn test_unparsable_file_loads_empty() {
        let store = fresh_store("corrupt");
        fs::write(&store.file_path, "not json at all").unwrap();

        let reloaded = Favorites::load_from(store.file_path.clone());
        assert_eq!(reloaded.count(), 0);

        let _ = fs::remove_file(&store.file_path);
    }

    #[test]
    fn test_add_then_remove_reflects_membership() {
        let mut store = fresh_store("membership");

        store.add(1);
        assert!(store.is_favorite(1));

        store.remove(1);
        assert!(!store.is_favorite(1));

        let _ = fs::remove_file(&store.file_path);
    }

    #[test]
    fn test_duplicate_add_keeps_set_unique() {
        let mut store = fresh_store("unique");

        store.add(5);
        store.add(5);
        store.add(5);

        assert_eq!(store.count(), 1);
        assert_eq!(store.ids(), &[5]);

        let _ = fs::remove_file(&store.file_path);
    }

    #[test]
    fn test_remove_absent_id_is_a_noop() {
        let mut store = fresh_store("absent");

        store.add(1);
        store.add(2);
        store.remove(99);

        assert_eq!(store.ids(), &[1, 2]);

        let _ = fs::remove_file(&store.file_path);
    }

    #[test]
    fn test_insertion_order_survives_mutations() {
        let mut store = fresh_store("order");

        store.add(3);
        store.add(1);
        store.add(2);
        store.remove(1);
        store.add(1);

        assert_eq!(store.ids(), &[3, 2, 1]);

        let _ = fs::remove_file(&store.file_path);
    }

    #[test]
    fn test_mutations_round_trip_through_disk() {
        let mut store = fresh_store("roundtrip");

        store.add(10);
        store.add(20);
        store.remove(10);

        let reloaded = Favorites::load_from(store.file_path.clone());
        assert_eq!(reloaded.ids(), &[20]);

        let _ = fs::remove_file(&store.file_path);
    }
}
