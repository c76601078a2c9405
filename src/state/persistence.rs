use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{DietError, Result};

/// Durable string key-value storage.
///
/// Values are JSON text. `load` on a missing key is `Ok(None)`, never an error.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
    fn clear_all(&mut self) -> Result<()>;
}

/// Result of a write-through mutation.
///
/// The in-memory change has always been applied. `persist_error` is set when
/// the durable copy could not be written and now lags the in-memory state.
#[derive(Debug)]
#[must_use]
pub struct Mutation<T> {
    pub value: T,
    pub persist_error: Option<DietError>,
}

impl<T> Mutation<T> {
    pub fn new(value: T, flushed: Result<()>) -> Self {
        Self {
            value,
            persist_error: flushed.err(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}

/// Load and decode a stored value.
///
/// Unreadable or undecodable values are logged and treated as absent.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored value");
            return None;
        }
        Err(err) => {
            warn!(key, error = %err, "stored value unreadable, using empty state");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            let err = DietError::read_failure(key, err);
            warn!(key, error = %err, "stored value corrupt, using empty state");
            None
        }
    }
}

/// Encode a value and write it through, mapping any failure to `PersistenceWrite`.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|e| DietError::write_failure(key, e))?;
    let result = store.save(key, &json).map_err(|e| match e {
        DietError::PersistenceWrite { .. } => e,
        other => DietError::write_failure(key, other),
    });

    match &result {
        Ok(()) => debug!(key, bytes = json.len(), "persisted"),
        Err(err) => warn!(key, error = %err, "write-through failed; in-memory state kept"),
    }
    result
}

/// Remove a stored key, mapping any failure to `PersistenceWrite`.
pub fn remove_key<S>(store: &mut S, key: &str) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    let result = store
        .remove(key)
        .map_err(|e| DietError::write_failure(key, e));
    if let Err(err) = &result {
        warn!(key, error = %err, "failed to remove stored key");
    }
    result
}

/// Prefix marking the files a [`JsonDirStore`] owns.
pub const STATE_FILE_PREFIX: &str = "wd-";

/// Directory-backed store: one `wd-<key>.json` file per key.
///
/// The directory may be shared. Only files carrying the store prefix are
/// ever touched.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(DietError::InvalidInput(format!(
                "storage key '{}' must be a plain identifier",
                key
            )));
        }
        Ok(self.dir.join(format!("{}{}.json", STATE_FILE_PREFIX, key)))
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}{}.json.tmp", STATE_FILE_PREFIX, key))
    }

    /// Whether `name` is a value or temp file written by this store.
    fn is_owned_file(name: &str) -> bool {
        let name = name.strip_prefix('.').unwrap_or(name);
        let Some(rest) = name.strip_prefix(STATE_FILE_PREFIX) else {
            return false;
        };
        rest.strip_suffix(".json")
            .or_else(|| rest.strip_suffix(".json.tmp"))
            .is_some_and(|key| !key.is_empty())
    }
}

impl KeyValueStore for JsonDirStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DietError::read_failure(key, e)),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        // Write beside the target and rename so a torn write never replaces
        // the previous value.
        let tmp = self.tmp_path_for(key);
        fs::write(&tmp, value).map_err(|e| DietError::write_failure(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| DietError::write_failure(key, e))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DietError::write_failure(key, e)),
        }
    }

    fn clear_all(&mut self) -> Result<()> {
        let mut removed = 0usize;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let owned = entry
                .file_name()
                .to_str()
                .is_some_and(Self::is_owned_file);
            if owned && entry.file_type()?.is_file() {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        debug!(dir = %self.dir.display(), removed, "cleared stored state");
        Ok(())
    }
}

/// In-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_is_absent() {
        let tmp = TempDir::new().unwrap();
        let store = JsonDirStore::open(tmp.path()).unwrap();
        assert!(store.load("selectedMeals").unwrap().is_none());
        assert!(load_json::<Vec<String>, _>(&store, "selectedMeals").is_none());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let mut store = JsonDirStore::open(tmp.path()).unwrap();

        let mut map = BTreeMap::new();
        map.insert("Monday-breakfast".to_string(), true);
        save_json(&mut store, "eatenMeals", &map).unwrap();

        let loaded: BTreeMap<String, bool> = load_json(&store, "eatenMeals").unwrap();
        assert_eq!(loaded, map);

        let empty: BTreeMap<String, bool> = BTreeMap::new();
        save_json(&mut store, "eatenMeals", &empty).unwrap();
        let loaded: BTreeMap<String, bool> = load_json(&store, "eatenMeals").unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_corrupt_value_is_absent() {
        let tmp = TempDir::new().unwrap();
        let mut store = JsonDirStore::open(tmp.path()).unwrap();
        store.save("selectedSoups", "{not json").unwrap();

        let loaded: Option<BTreeMap<String, String>> = load_json(&store, "selectedSoups");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_keys_stored_independently() {
        let tmp = TempDir::new().unwrap();
        let mut store = JsonDirStore::open(tmp.path()).unwrap();
        store.save("selectedSoups", "{}").unwrap();
        store.save("eatenMeals", "{}").unwrap();

        store.remove("selectedSoups").unwrap();
        assert!(store.load("selectedSoups").unwrap().is_none());
        assert_eq!(store.load("eatenMeals").unwrap().as_deref(), Some("{}"));

        // Removing twice is fine.
        store.remove("selectedSoups").unwrap();
    }

    #[test]
    fn test_clear_all_removes_every_key() {
        let tmp = TempDir::new().unwrap();
        let mut store = JsonDirStore::open(tmp.path()).unwrap();
        store.save("selectedMeals", "[]").unwrap();
        store.save("cupsDrunk", "3").unwrap();

        store.clear_all().unwrap();
        assert!(store.load("selectedMeals").unwrap().is_none());
        assert!(store.load("cupsDrunk").unwrap().is_none());
    }

    #[test]
    fn test_clear_all_leaves_foreign_files() {
        let tmp = TempDir::new().unwrap();
        let catalog = tmp.path().join("catalog.json");
        let package = tmp.path().join("package.json");
        fs::write(&catalog, "{}").unwrap();
        fs::write(&package, "{}").unwrap();

        let mut store = JsonDirStore::open(tmp.path()).unwrap();
        store.save("selectedMeals", "[]").unwrap();
        // Left behind by an interrupted write.
        let stale = tmp.path().join(".wd-eatenMeals.json.tmp");
        fs::write(&stale, "{").unwrap();

        store.clear_all().unwrap();
        assert!(store.load("selectedMeals").unwrap().is_none());
        assert!(!stale.exists());
        assert!(catalog.exists());
        assert!(package.exists());
    }

    #[test]
    fn test_owned_file_names() {
        assert!(JsonDirStore::is_owned_file("wd-cupsDrunk.json"));
        assert!(JsonDirStore::is_owned_file(".wd-cupsDrunk.json.tmp"));
        assert!(!JsonDirStore::is_owned_file("cupsDrunk.json"));
        assert!(!JsonDirStore::is_owned_file("wd-.json"));
        assert!(!JsonDirStore::is_owned_file("wd-notes.txt"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let tmp = TempDir::new().unwrap();
        let mut store = JsonDirStore::open(tmp.path()).unwrap();
        assert!(store.save("../escape", "1").is_err());
        assert!(store.load("").is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.save("cupsDrunk", "2").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load("cupsDrunk").unwrap().as_deref(), Some("2"));
        store.clear_all().unwrap();
        assert!(store.is_empty());
    }
}
