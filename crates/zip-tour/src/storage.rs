#![forbid(unsafe_code)]

//! Durable key/value storage for the tour's "seen" flag.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ TutorialStore                                │
//! │   reads the flag once, writes it on finish   │
//! └──────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌──────────────────────────────────────────────┐
//! │ KeyValueStore                                │
//! │   - MemoryStorage: in-memory (tests, --memory-state)
//! │   - FileStorage: JSON file (requires `persistence`)
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Io` | File I/O failure | Returned; the store logs and carries on |
//! | `StorageError::Serialization` | Malformed JSON | Returned; flag reads as "not seen" |
//! | `StorageError::Corruption` | Poisoned lock | Returned |
//! | Missing key | First run | `Ok(None)` |

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Storage key of the "tour seen" flag.
pub const SEEN_KEY: &str = "zip-tutorial-seen";

/// Value written under [`SEEN_KEY`] once the tour is completed or skipped.
pub const SEEN_VALUE: &str = "true";

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Serialization or deserialization error.
    #[cfg(feature = "persistence")]
    Serialization(String),
    /// Storage is corrupted or its lock was poisoned.
    Corruption(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "persistence")]
            StorageError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StorageError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            #[cfg(feature = "persistence")]
            StorageError::Serialization(_) => None,
            StorageError::Corruption(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A small string key/value store that survives restarts.
pub trait KeyValueStore: Send + Sync {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Read the "seen" flag. Anything other than `"true"` means not seen.
pub fn read_seen(store: &dyn KeyValueStore) -> StorageResult<bool> {
    Ok(store.get(SEEN_KEY)?.as_deref() == Some(SEEN_VALUE))
}

pub fn write_seen(store: &dyn KeyValueStore) -> StorageResult<()> {
    store.set(SEEN_KEY, SEEN_VALUE)
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Storage (always available)
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory backend.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the store wrote.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create memory storage pre-populated with entries.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: Arc::new(RwLock::new(map)),
        }
    }
}

impl KeyValueStore for MemoryStorage {
    fn name(&self) -> &str {
        "MemoryStorage"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let guard = self
            .data
            .read()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        guard.remove(key);
        Ok(())
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.data.read().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("MemoryStorage")
            .field("entries", &count)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Storage (requires persistence feature)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "persistence")]
mod file_storage {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::fs::{self, File};
    use std::io::{BufReader, BufWriter, Write};
    use std::path::{Path, PathBuf};

    #[derive(Serialize, Deserialize)]
    struct StateFile {
        format_version: u32,
        entries: HashMap<String, String>,
    }

    impl StateFile {
        const FORMAT_VERSION: u32 = 1;

        fn new() -> Self {
            Self {
                format_version: Self::FORMAT_VERSION,
                entries: HashMap::new(),
            }
        }
    }

    /// JSON file backend.
    ///
    /// # File Format
    ///
    /// ```json
    /// {
    ///   "format_version": 1,
    ///   "entries": {
    ///     "zip-tutorial-seen": "true"
    ///   }
    /// }
    /// ```
    ///
    /// Writes go to `{path}.tmp`, are synced, then renamed over `{path}`.
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        /// The file does not need to exist; it is created on first write.
        #[must_use]
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        /// Storage at `$XDG_STATE_HOME/zip/state.json`, falling back to
        /// `~/.local/state/zip/state.json`.
        #[must_use]
        pub fn default_location() -> Self {
            Self {
                path: state_dir().join("zip").join("state.json"),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn temp_path(&self) -> PathBuf {
            let mut tmp = self.path.clone();
            tmp.set_extension("json.tmp");
            tmp
        }

        fn load(&self) -> StorageResult<StateFile> {
            if !self.path.exists() {
                return Ok(StateFile::new());
            }

            let reader = BufReader::new(File::open(&self.path)?);
            let state_file: StateFile = serde_json::from_reader(reader).map_err(|e| {
                StorageError::Serialization(format!("failed to parse state file: {e}"))
            })?;

            if state_file.format_version != StateFile::FORMAT_VERSION {
                tracing::warn!(
                    stored = state_file.format_version,
                    expected = StateFile::FORMAT_VERSION,
                    "state file format version mismatch, ignoring stored state"
                );
                return Ok(StateFile::new());
            }
            Ok(state_file)
        }

        fn save(&self, state_file: &StateFile) -> StorageResult<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }

            let tmp_path = self.temp_path();
            {
                let mut writer = BufWriter::new(File::create(&tmp_path)?);
                serde_json::to_writer_pretty(&mut writer, state_file).map_err(|e| {
                    StorageError::Serialization(format!("failed to serialize state: {e}"))
                })?;
                writer.flush()?;
                writer.get_ref().sync_all()?;
            }
            fs::rename(&tmp_path, &self.path)?;

            tracing::debug!(
                path = %self.path.display(),
                entries = state_file.entries.len(),
                "saved tour state"
            );
            Ok(())
        }
    }

    fn state_dir() -> PathBuf {
        if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
            return PathBuf::from(state_home);
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".local").join("state");
        }
        PathBuf::from(".")
    }

    impl KeyValueStore for FileStorage {
        fn name(&self) -> &str {
            "FileStorage"
        }

        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            Ok(self.load()?.entries.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            // A corrupt file is replaced rather than blocking every write.
            let mut state_file = match self.load() {
                Ok(state_file) => state_file,
                Err(StorageError::Serialization(msg)) => {
                    tracing::warn!(error = %msg, "discarding unreadable state file");
                    StateFile::new()
                }
                Err(e) => return Err(e),
            };
            state_file.entries.insert(key.to_owned(), value.to_owned());
            self.save(&state_file)
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            let mut state_file = self.load()?;
            if state_file.entries.remove(key).is_some() {
                self.save(&state_file)?;
            }
            Ok(())
        }
    }

    impl fmt::Debug for FileStorage {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("FileStorage")
                .field("path", &self.path)
                .finish()
        }
    }
}

#[cfg(feature = "persistence")]
pub use file_storage::FileStorage;
