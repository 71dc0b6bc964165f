pub mod code;
pub mod entry;

pub use code::ShareCode;
pub use entry::ShareEntry;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory map from share code to stored upload.
///
/// Lives for the whole process and is handed to Rocket as managed state. Lock guards
/// never outlive a single map access, so no file I/O or RNG call ever runs under the
/// lock.
#[derive(Debug, Default)]
pub struct ShareRegistry {
    entries: RwLock<HashMap<String, ShareEntry>>,
}

impl ShareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the mapping for `code`.
    pub fn put(&self, code: impl Into<String>, entry: ShareEntry) {
        self.write().insert(code.into(), entry);
    }

    pub fn get(&self, code: &str) -> Option<ShareEntry> {
        self.read().get(code).cloned()
    }

    /// Inserts only if `code` is vacant. On collision the entry is handed back so the
    /// caller can retry with a fresh code.
    pub fn try_insert(&self, code: impl Into<String>, entry: ShareEntry) -> Result<(), ShareEntry> {
        match self.write().entry(code.into()) {
            Entry::Occupied(_) => Err(entry),
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panicking writer cannot leave the map half-updated, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ShareEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ShareEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
