//! CEP resolution over a range index and its data file.

mod cached;

pub use cached::{CacheStats, CachedResolver, CachedResolverConfig};

use std::collections::HashMap;
use std::path::Path;

use crate::index::RangeIndex;
use crate::record::{CityRecord, ResolvedCity};
use crate::store::{RecordRead, RecordStore};
use crate::{ResolverConfig, Result};

/// Number of digits in a CEP.
pub const CEP_DIGITS: usize = 8;

/// Reduce a raw postal code to its numeric value.
///
/// Every non-digit character is dropped and only the first eight digits
/// are kept. Returns `None` when no digit is left.
pub fn normalize_code(raw: &str) -> Option<u32> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CEP_DIGITS)
        .collect();

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// All records of a dataset keyed by `"<city>/<state>"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    /// One entry per distinct city and state pair
    pub cities: HashMap<String, ResolvedCity, ahash::RandomState>,
    /// Data offsets of index entries whose record could not be read
    pub malformed: Vec<u32>,
}

impl Listing {
    /// Number of distinct city and state pairs.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Look up a city by `city` and `state` code.
    pub fn get(&self, city: &str, state: &str) -> Option<&ResolvedCity> {
        self.cities.get(&format!("{}/{}", city, state))
    }

    /// Entries sorted by key.
    pub fn sorted(&self) -> Vec<(&String, &ResolvedCity)> {
        let mut entries: Vec<_> = self.cities.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Resolves postal codes to city records.
///
/// The resolver owns the memory-mapped index and the data file handle for
/// its whole lifetime. Lookups move the data file's seek position, so they
/// need `&mut self`; give each thread its own resolver.
///
/// # Example
///
/// ```ignore
/// use brcep::Resolver;
/// use std::path::Path;
///
/// let mut resolver = Resolver::open(Path::new("cities.csv"), Path::new("cities.idx"))?;
///
/// if let Some(city) = resolver.find("12420-010")? {
///     println!("{} / {}", city.city(), city.state());
/// }
/// ```
pub struct Resolver {
    index: RangeIndex,
    store: RecordStore,
}

impl Resolver {
    /// Open a data file and its range index with default configuration.
    pub fn open(data_path: &Path, index_path: &Path) -> Result<Self> {
        Self::open_with_config(data_path, index_path, ResolverConfig::default())
    }

    /// Open a data file and its range index with custom configuration.
    pub fn open_with_config(
        data_path: &Path,
        index_path: &Path,
        config: ResolverConfig,
    ) -> Result<Self> {
        let store = RecordStore::open(data_path, config)?;
        let index = RangeIndex::open(index_path)?;

        log::info!(
            "Loaded {} ranges from {:?} over {:?}",
            index.len(),
            index_path,
            data_path
        );
        Ok(Self { index, store })
    }

    /// Create a resolver from in-memory data and index bytes.
    pub fn from_bytes(data: &[u8], index: Vec<u8>, config: ResolverConfig) -> Result<Self> {
        let index = RangeIndex::from_bytes(index)?;
        let store = RecordStore::from_bytes(data, config)?;
        Ok(Self { index, store })
    }

    /// Number of ranges in the index.
    pub fn entry_count(&self) -> usize {
        self.index.len()
    }

    /// Get the data file configuration.
    pub fn config(&self) -> &ResolverConfig {
        self.store.config()
    }

    /// Resolve a raw postal code.
    ///
    /// Punctuation is ignored and digits past the eighth are dropped. A
    /// code outside every range, or whose record cannot be parsed, is
    /// `Ok(None)`; errors are reserved for IO failures.
    pub fn find(&mut self, raw_code: &str) -> Result<Option<ResolvedCity>> {
        match normalize_code(raw_code) {
            Some(code) => self.find_code(code),
            None => Ok(None),
        }
    }

    /// Resolve a numeric postal code.
    pub fn find_code(&mut self, code: u32) -> Result<Option<ResolvedCity>> {
        let offset = match self.index.locate(code)? {
            Some(offset) => offset,
            None => return Ok(None),
        };

        let record = self.store.read_record_at(u64::from(offset))?;
        Ok(record.map(CityRecord::resolve))
    }

    /// Read every record referenced by the index.
    ///
    /// Records are keyed by `"<city>/<state>"`; a later record with the same
    /// key replaces an earlier one. Entries whose record cannot be parsed
    /// are collected and reported once the scan completes.
    pub fn list(&mut self) -> Result<Listing> {
        let mut listing = Listing::default();

        for entry in self.index.entries() {
            match self.store.read_at(u64::from(entry.data_offset))? {
                RecordRead::Record(record) => {
                    let resolved = record.resolve();
                    listing.cities.insert(resolved.key(), resolved);
                }
                RecordRead::Malformed(reason) => {
                    log::debug!(
                        "Malformed record for range {} at offset {}: {}",
                        entry.range_start,
                        entry.data_offset,
                        reason
                    );
                    listing.malformed.push(entry.data_offset);
                }
                RecordRead::EndOfStream => {
                    log::debug!(
                        "Range {} points past the end of the data file (offset {})",
                        entry.range_start,
                        entry.data_offset
                    );
                    listing.malformed.push(entry.data_offset);
                }
            }
        }

        if !listing.malformed.is_empty() {
            log::warn!(
                "{} of {} index entries point at unreadable records",
                listing.malformed.len(),
                self.index.len()
            );
        }

        Ok(listing)
    }

    /// Release both file handles.
    pub fn close(self) {
        drop(self);
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("index", &self.index)
            .field("config", self.store.config())
            .finish()
    }
}
