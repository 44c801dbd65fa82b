//! Backing-store abstraction and the concrete stores shipped with the
//! crate.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::PrefsError;

const PREFERENCES_FILENAME: &str = "preferences.toml";

/// A single persisted preference value.
///
/// Numeric and enum preferences are stored as their string encoding;
/// booleans are stored natively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Str(String),
}

/// Storage abstraction trait for the persisted key-value store.
pub trait BackingStore: Send + Sync + Debug {
    /// String stored under `key`, or `None` if the key is unset or
    /// holds a non-string value.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Boolean stored under `key`, or `default` if the key is unset or
    /// holds a non-boolean value.
    fn get_bool(&self, key: &str, default: bool) -> bool;

    fn contains(&self, key: &str) -> bool;

    /// Write a batch of values in one step.
    fn apply(&mut self, batch: &[(String, PrefValue)]) -> Result<(), std::io::Error>;
}

/// Batches writes and applies them when dropped.
///
/// Apply failures are logged, not returned; a lost settings write is
/// corrected by the next one.
pub struct Editor<'a> {
    store: &'a mut dyn BackingStore,
    pending: Vec<(String, PrefValue)>,
}

impl<'a> Editor<'a> {
    pub fn new(store: &'a mut dyn BackingStore) -> Self {
        Self {
            store,
            pending: Vec::new(),
        }
    }

    pub fn put(&mut self, key: &str, value: PrefValue) -> &mut Self {
        self.pending.push((key.to_string(), value));
        self
    }

    pub fn put_string(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.put(key, PrefValue::Str(value.into()))
    }

    pub fn put_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.put(key, PrefValue::Bool(value))
    }
}

impl Drop for Editor<'_> {
    fn drop(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        if let Err(e) = self.store.apply(&self.pending) {
            warn!("failed to persist preferences: {}", e);
        }
    }
}

/// File-backed store holding all preferences in a single TOML table.
#[derive(Debug)]
pub struct TomlStore {
    path: PathBuf,
    values: BTreeMap<String, PrefValue>,
}

impl TomlStore {
    /// Opens the store in the platform configuration directory for
    /// `namespace`, e.g. `"com.example.App"`.
    pub fn open(namespace: &str) -> Result<Self, PrefsError> {
        let project = directories::ProjectDirs::from(namespace, "", "").ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no home directory")
        })?;
        let path = project.config_dir().join(PREFERENCES_FILENAME);
        info!("loading preferences from {}", path.display());
        Self::open_path(path)
    }

    /// Opens the store under an explicit directory, creating the file
    /// on first write.
    pub fn open_in(dir: impl AsRef<Path>) -> Result<Self, PrefsError> {
        Self::open_path(dir.as_ref().join(PREFERENCES_FILENAME))
    }

    fn open_path(path: PathBuf) -> Result<Self, PrefsError> {
        let values = if path.exists() {
            let mut contents = String::new();
            std::fs::File::open(&path)?.read_to_string(&mut contents)?;
            toml::from_str(&contents).map_err(|source| PrefsError::Malformed {
                path: path.display().to_string(),
                source,
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    /// Full path of the preferences file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // Serializes to a temp file in the target directory, then renames
    // it into place; a crash mid-write leaves the old file intact.
    fn persist(&self) -> Result<(), std::io::Error> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)?;
        let body = toml::to_string(&self.values)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(body.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl BackingStore for TomlStore {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(PrefValue::Str(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(PrefValue::Bool(b)) => *b,
            _ => default,
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn apply(&mut self, batch: &[(String, PrefValue)]) -> Result<(), std::io::Error> {
        for (key, value) in batch {
            self.values.insert(key.clone(), value.clone());
        }
        self.persist()
    }
}

/// In-memory store; nothing is persisted. Serves tests and headless
/// use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, PrefValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BackingStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(PrefValue::Str(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(PrefValue::Bool(b)) => *b,
            _ => default,
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn apply(&mut self, batch: &[(String, PrefValue)]) -> Result<(), std::io::Error> {
        for (key, value) in batch {
            self.values.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}
