//! Key-value persistence port and the state persisted through it.
//!
//! The core only talks to [`KeyValueStore`]. Backends:
//! - [`MemoryStore`] - process-local, used by tests and one-shot runs
//! - [`JsonFileStore`] - a JSON object on disk (native builds)
//! - [`LocalStore`] - browser `localStorage` (wasm32 builds)

use std::cell::RefCell;
use std::collections::BTreeMap;

use log::warn;

use crate::config::keys;
use crate::core::error::StorageError;
use crate::models::Settings;
use crate::utils::RingBuffer;

/// String key-value persistence.
///
/// Methods take `&self`; backends use interior mutability, matching the
/// browser storage API they stand in for.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// MemoryStore
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// JsonFileStore
// =============================================================================

/// Stores every key in one JSON object file, rewritten on each `set`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    /// Open a store file; a missing file starts empty.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.borrow_mut();
        entries.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&*entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

// =============================================================================
// LocalStore
// =============================================================================

/// Browser `localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::WriteFailed(key.to_string()))
    }
}

// =============================================================================
// Command History
// =============================================================================

/// Bounded command history, persisted most-recent-first as a JSON array.
#[derive(Clone, Debug)]
pub struct CommandHistory {
    entries: RingBuffer<String>,
}

impl CommandHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: RingBuffer::new(limit),
        }
    }

    /// Load history from the store, keeping the newest `limit` entries.
    ///
    /// A missing or corrupt value yields an empty history.
    pub fn load(store: &dyn KeyValueStore, limit: usize) -> Self {
        let mut history = Self::new(limit);
        // Stored newest first; the buffer wants oldest first.
        history
            .entries
            .extend(Self::read(store).into_iter().take(limit).rev());
        history
    }

    /// Raw persisted entries, most recent first.
    pub fn read(store: &dyn KeyValueStore) -> Vec<String> {
        let Some(json) = store.get(keys::HISTORY) else {
            return Vec::new();
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("discarding unreadable command history: {}", e);
            Vec::new()
        })
    }

    /// Record a command. Blank input is ignored.
    pub fn push(&mut self, command: &str) {
        let command = command.trim();
        if !command.is_empty() {
            self.entries.push(command.to_string());
        }
    }

    /// Entries, most recent first.
    pub fn recent(&self) -> Vec<String> {
        self.entries.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.recent())?;
        store.set(keys::HISTORY, &json)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Read persisted settings, falling back to `defaults` per key.
pub fn load_settings(store: &dyn KeyValueStore, defaults: Settings) -> Settings {
    Settings {
        theme: store
            .get(keys::THEME)
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.theme),
        language: store
            .get(keys::LANGUAGE)
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.language),
        sound_enabled: store
            .get(keys::SOUND)
            .map(|v| v != "off")
            .unwrap_or(defaults.sound_enabled),
        username: store
            .get(keys::USERNAME)
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.username),
        hostname: defaults.hostname,
    }
}
