use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use anyhow::Result;

use super::model::Table;

// ---------------------------------------------------------------------------
// Process-wide table cache
// ---------------------------------------------------------------------------

/// Lazily-populated table store, keyed by source URL. Owned by the app
/// state and passed down explicitly; entries live for the process
/// lifetime and are treated as immutable once inserted.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: BTreeMap<String, Table>,
}

impl TableCache {
    /// Look up `key`, running `load` to populate the entry on first use.
    pub fn get_or_load<F>(&mut self, key: &str, load: F) -> Result<&Table>
    where
        F: FnOnce() -> Result<Table>,
    {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(slot) => {
                let table = load()?;
                log::info!(
                    "cached {key}: {} rows, {} columns",
                    table.row_count(),
                    table.column_count()
                );
                Ok(slot.insert(table))
            }
        }
    }

    /// Read-only lookup without triggering a load.
    pub fn get(&self, key: &str) -> Option<&Table> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
