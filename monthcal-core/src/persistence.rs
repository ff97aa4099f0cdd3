//! Loading and saving the event store to a durable slot.
//!
//! A slot holds the entire store as one JSON document. Every save is a full
//! overwrite; there is no incremental persistence.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::{CalendarError, CalendarResult};
use crate::store::EventStore;

/// Name of the slot holding the store when none is configured.
pub const DEFAULT_SLOT_NAME: &str = "calendarEvents";

/// A single named location holding serialized text.
pub trait Slot {
    /// Current contents, or `None` if nothing has been written yet.
    fn read(&self) -> CalendarResult<Option<String>>;

    /// Replace the contents. Either all of `contents` is stored or the
    /// previous contents remain.
    fn write(&self, contents: &str) -> CalendarResult<()>;
}

/// A slot backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSlot { path: path.into() }
    }

    /// `<dir>/<name>.json`
    pub fn in_dir(dir: &Path, name: &str) -> Self {
        FileSlot::new(dir.join(format!("{}.json", name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Slot for FileSlot {
    fn read(&self) -> CalendarResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &str) -> CalendarResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write beside the target then rename, so readers never see half a file
        let temp = self.temp_path();
        std::fs::write(&temp, contents)?;
        if let Err(e) = std::fs::rename(&temp, &self.path) {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// An in-process slot, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySlot {
    contents: RefCell<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: &str) -> Self {
        MemorySlot {
            contents: RefCell::new(Some(contents.to_string())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Slot for MemorySlot {
    fn read(&self) -> CalendarResult<Option<String>> {
        Ok(self.contents.borrow().clone())
    }

    fn write(&self, contents: &str) -> CalendarResult<()> {
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}

impl<S: Slot + ?Sized> Slot for &S {
    fn read(&self) -> CalendarResult<Option<String>> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> CalendarResult<()> {
        (**self).write(contents)
    }
}

/// Read the store from the slot.
///
/// Never fails: a missing, unreadable or corrupt slot yields an empty store.
pub fn load<S: Slot + ?Sized>(slot: &S) -> EventStore {
    let content = match slot.read() {
        Ok(Some(content)) => content,
        Ok(None) => {
            log::debug!("No saved events, starting with an empty calendar");
            return EventStore::new();
        }
        Err(e) => {
            log::warn!("Could not read saved events, starting empty: {}", e);
            return EventStore::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("Saved events are not valid, starting empty: {}", e);
            EventStore::new()
        }
    }
}

/// Overwrite the slot with the full store.
pub fn save<S: Slot + ?Sized>(slot: &S, store: &EventStore) -> CalendarResult<()> {
    let content =
        serde_json::to_string(store).map_err(|e| CalendarError::Serialization(e.to_string()))?;

    slot.write(&content)
        .map_err(|e| CalendarError::Persistence(e.to_string()))?;

    log::debug!("Saved {} events", store.len());
    Ok(())
}
