//! Range index writer.

use std::fs;
use std::path::Path;

use super::format::*;
use crate::record::CityRecord;
use crate::store::{RecordRead, RecordStore};
use crate::{Error, ResolverConfig, Result};

/// Range index writer.
///
/// Collects breakpoints in any order and serializes them sorted.
#[derive(Debug, Default)]
pub struct RangeIndexWriter {
    entries: Vec<IndexEntry>,
    skipped: usize,
}

impl RangeIndexWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a data file and add one entry per well-formed row.
    ///
    /// Header lines and malformed rows are skipped and counted.
    pub fn from_data_file(path: &Path, config: ResolverConfig) -> Result<Self> {
        let mut store = RecordStore::open(path, config)?;
        Self::from_store(&mut store)
    }

    /// Scan an opened record store and add one entry per well-formed row.
    pub fn from_store(store: &mut RecordStore) -> Result<Self> {
        let mut writer = Self::new();

        for item in store.records()? {
            let (offset, read) = item?;
            match read {
                RecordRead::Record(record) => writer.add_record(offset, &record)?,
                RecordRead::Malformed(reason) => {
                    log::debug!("Skipping row at offset {}: {}", offset, reason);
                    writer.skipped += 1;
                }
                RecordRead::EndOfStream => break,
            }
        }

        if writer.skipped > 0 {
            log::warn!(
                "Skipped {} unparseable rows while building the range index",
                writer.skipped
            );
        }

        Ok(writer)
    }

    /// Add a breakpoint.
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.push(entry);
    }

    /// Add the breakpoint for a record stored at `offset`.
    pub fn add_record(&mut self, offset: u64, record: &CityRecord) -> Result<()> {
        let data_offset = u32::try_from(offset).map_err(|_| Error::OffsetOverflow(offset))?;
        self.add(IndexEntry::new(record.range_start, data_offset));
        Ok(())
    }

    /// Number of entries added so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rows skipped by the last data file scan.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Serialize the index.
    ///
    /// Entries are sorted by `range_start`; duplicate breakpoints are
    /// rejected.
    pub fn build(&self) -> Result<Vec<u8>> {
        if self.entries.is_empty() {
            return Err(Error::EmptyIndex);
        }

        let mut sorted = self.entries.clone();
        sorted.sort_unstable_by_key(|e| e.range_start);

        if let Some(pair) = sorted
            .windows(2)
            .find(|pair| pair[0].range_start == pair[1].range_start)
        {
            return Err(Error::DuplicateBreakpoint(pair[1].range_start));
        }

        let mut buffer = Vec::with_capacity(sorted.len() * ENTRY_SIZE);
        for entry in &sorted {
            buffer.extend_from_slice(&entry.to_be_bytes());
        }

        Ok(buffer)
    }

    /// Serialize the index and write it to `path`.
    pub fn write_to(&self, path: &Path) -> Result<usize> {
        let data = self.build()?;
        fs::write(path, &data)?;
        log::info!(
            "Wrote range index {:?} ({} entries, {} bytes)",
            path,
            self.entries.len(),
            data.len()
        );
        Ok(self.entries.len())
    }
}
