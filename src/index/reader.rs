//! Range index reader with memory-mapping support.

use memmap2::Mmap;
use std::cmp::Ordering;
use std::fs::File;
use std::path::Path;

use super::format::*;
use crate::{Error, Result};

/// Memory-mapped range index.
///
/// Entries are sorted by `range_start`; lookups are O(log n) over the
/// mapped bytes.
pub struct RangeIndex {
    mmap: Mmap,
    len: usize,
}

impl RangeIndex {
    /// Open a range index file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let len = validate_index_size(file.metadata()?.len())?;

        // The index is read-only for the lifetime of the mapping
        let mmap = unsafe { Mmap::map(&file)? };

        log::debug!("Opened range index {:?} ({} entries)", path, len);
        Ok(Self { mmap, len })
    }

    /// Open a range index from bytes.
    ///
    /// This writes the data to a temp file and then memory-maps it.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        use std::io::Write;

        let len = validate_index_size(data.len() as u64)?;

        let mut temp_file = tempfile::tempfile()?;
        temp_file.write_all(&data)?;

        let mmap = unsafe { Mmap::map(&temp_file)? };

        Ok(Self { mmap, len })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// An opened index always holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the entry at position `n`.
    pub fn entry_at(&self, n: usize) -> Result<IndexEntry> {
        if n >= self.len {
            return Err(Error::EntryOutOfRange {
                index: n,
                len: self.len,
            });
        }

        let start = n * ENTRY_SIZE;
        let mut bytes = [0u8; ENTRY_SIZE];
        bytes.copy_from_slice(&self.mmap[start..start + ENTRY_SIZE]);
        Ok(IndexEntry::from_be_bytes(bytes))
    }

    /// First (lowest) breakpoint.
    pub fn first(&self) -> Result<IndexEntry> {
        self.entry_at(0)
    }

    /// Last (highest) breakpoint.
    pub fn last(&self) -> Result<IndexEntry> {
        self.entry_at(self.len.saturating_sub(1))
    }

    /// Iterate over all entries in ascending order.
    pub fn entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        self.mmap[..self.len * ENTRY_SIZE]
            .chunks_exact(ENTRY_SIZE)
            .map(|chunk| {
                let mut bytes = [0u8; ENTRY_SIZE];
                bytes.copy_from_slice(chunk);
                IndexEntry::from_be_bytes(bytes)
            })
    }

    /// Find the data offset of the range containing `target`.
    ///
    /// Returns the entry with the largest `range_start <= target`. Targets
    /// below the first breakpoint or above the last breakpoint are not
    /// found; the last range therefore only matches its own breakpoint.
    pub fn locate(&self, target: u32) -> Result<Option<u32>> {
        let first = self.first()?;
        let last = self.last()?;
        if target < first.range_start || target > last.range_start {
            return Ok(None);
        }

        let mut lo = 0usize;
        let mut hi = self.len - 1;
        let mut mid = 0usize;
        let mut examined = first;

        while lo <= hi {
            mid = (lo + hi) / 2;
            examined = self.entry_at(mid)?;

            match target.cmp(&examined.range_start) {
                Ordering::Less => {
                    // Unreachable at mid == 0: target >= first.range_start
                    hi = match mid.checked_sub(1) {
                        Some(hi) => hi,
                        None => return Ok(None),
                    };
                }
                Ordering::Greater => lo = mid + 1,
                Ordering::Equal => return Ok(Some(examined.data_offset)),
            }
        }

        let entry = if examined.range_start > target {
            self.entry_at(mid - 1)?
        } else {
            examined
        };

        Ok(Some(entry.data_offset))
    }
}

impl std::fmt::Debug for RangeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeIndex").field("len", &self.len).finish()
    }
}
