/*!
 * Block Registry
 * Unordered record of every outstanding block
 */

use crate::core::types::{Address, Size};
use crate::memory::types::BlockRecord;

/// Outstanding blocks, unique by address
///
/// Lookups scan from the newest record, so freeing the most recent block
/// (the LIFO case) is O(1). Removal swaps the last record into the freed
/// slot, so iteration order carries no meaning.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    records: Vec<BlockRecord>,
}

impl Registry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Append a record; the system allocator never returns a live address twice
    pub fn insert(&mut self, record: BlockRecord) {
        self.records.push(record);
    }

    /// Remove and return the record for `address`
    pub fn remove(&mut self, address: Address) -> Option<BlockRecord> {
        let index = self.records.iter().rposition(|r| r.address == address)?;
        Some(self.records.swap_remove(index))
    }

    pub fn find(&self, address: Address) -> Option<&BlockRecord> {
        self.records.iter().rev().find(|r| r.address == address)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn total_bytes(&self) -> Size {
        self.records.iter().map(|r| r.size).sum()
    }

    pub fn snapshot(&self) -> Vec<BlockRecord> {
        self.records.clone()
    }

    /// Take every record, leaving the registry empty
    pub fn drain(&mut self) -> Vec<BlockRecord> {
        std::mem::take(&mut self.records)
    }
}
