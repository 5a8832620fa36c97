//! Range index entry layout.

/// Size of one index entry in bytes.
pub const ENTRY_SIZE: usize = 8;

/// One range breakpoint (8 bytes on disk).
///
/// ```text
/// +-------------------+-------------------+
/// | range_start u32BE | data_offset u32BE |
/// +-------------------+-------------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexEntry {
    /// First CEP covered by the record at `data_offset`
    pub range_start: u32,
    /// Byte offset of the record in the data file
    pub data_offset: u32,
}

impl IndexEntry {
    pub fn new(range_start: u32, data_offset: u32) -> Self {
        Self {
            range_start,
            data_offset,
        }
    }

    /// Decode an entry from its on-disk form.
    pub fn from_be_bytes(bytes: [u8; ENTRY_SIZE]) -> Self {
        Self {
            range_start: u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            data_offset: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }

    /// Encode an entry to its on-disk form.
    pub fn to_be_bytes(&self) -> [u8; ENTRY_SIZE] {
        let mut bytes = [0u8; ENTRY_SIZE];
        bytes[..4].copy_from_slice(&self.range_start.to_be_bytes());
        bytes[4..].copy_from_slice(&self.data_offset.to_be_bytes());
        bytes
    }
}

/// Check that an index of `size` bytes holds a whole, non-zero number of
/// entries.
pub fn validate_index_size(size: u64) -> crate::Result<usize> {
    if size == 0 || size % ENTRY_SIZE as u64 != 0 {
        return Err(crate::Error::InvalidIndexSize {
            size,
            entry_size: ENTRY_SIZE,
        });
    }
    Ok((size / ENTRY_SIZE as u64) as usize)
}
