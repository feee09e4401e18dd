use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use crate::common::SettingsError;

pub const CACHE_FILE: &str = "site-settings.json";
pub const THEME_SLOT: &str = "site-theme";
pub const UI_SLOT: &str = "ui-settings";

/// Last known theme and UI settings, kept on disk so a restart paints the
/// site with the previous values while the backend is still unreachable.
#[derive(Debug)]
pub struct LocalSettingsCache {
    path: PathBuf,
    slots: RwLock<Map<String, Value>>,
    // Held from the in-memory update until the rename, so the file on disk
    // always ends up with the newest snapshot.
    writer: Mutex<()>,
}

impl LocalSettingsCache {
    /// Loads `site-settings.json` from `dir`. A missing or unreadable file
    /// starts the cache empty.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(CACHE_FILE);
        let slots = load(&path);
        Self {
            path,
            slots: RwLock::new(slots),
            writer: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, slot: &str) -> Option<Value> {
        self.slots.read().get(slot).cloned()
    }

    /// Stores `value` in `slot` and rewrites the file.
    pub async fn set(&self, slot: &str, value: Value) -> Result<(), SettingsError> {
        let _writer = self.writer.lock().await;
        let snapshot = {
            let mut slots = self.slots.write();
            if slots.get(slot) == Some(&value) {
                return Ok(());
            }
            slots.insert(slot.to_string(), value);
            slots.clone()
        };
        self.persist(snapshot).await
    }

    pub async fn remove(&self, slot: &str) -> Result<(), SettingsError> {
        let _writer = self.writer.lock().await;
        let snapshot = {
            let mut slots = self.slots.write();
            if slots.remove(slot).is_none() {
                return Ok(());
            }
            slots.clone()
        };
        self.persist(snapshot).await
    }

    async fn persist(&self, slots: Map<String, Value>) -> Result<(), SettingsError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &slots))
            .await
            .map_err(io::Error::from)?
    }
}

/// Writes through a uniquely named sibling file, then renames it into place.
fn write_atomic(path: &Path, slots: &Map<String, Value>) -> Result<(), SettingsError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let body = serde_json::to_vec_pretty(slots)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&body)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn load(path: &Path) -> Map<String, Value> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            return Map::new();
        }
    };
    match serde_json::from_slice::<Value>(&raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            log::warn!("Ignoring {}: not a JSON object", path.display());
            Map::new()
        }
        Err(e) => {
            log::warn!("Ignoring corrupt {}: {}", path.display(), e);
            Map::new()
        }
    }
}
