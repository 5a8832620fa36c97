//! Error types for brcep.

use thiserror::Error;

/// Error type for brcep operations.
///
/// A postal code that falls outside every range is not an error: lookups
/// report it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while opening, seeking or reading the data or index file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Index file size is zero or not a multiple of the entry size
    #[error("invalid index size: {size} bytes is not a positive multiple of {entry_size}")]
    InvalidIndexSize { size: u64, entry_size: usize },

    /// Index entry requested past the end of the index
    #[error("index entry {index} out of range (index has {len} entries)")]
    EntryOutOfRange { index: usize, len: usize },

    /// Two records share the same range start
    #[error("duplicate range breakpoint: {0}")]
    DuplicateBreakpoint(u32),

    /// Index writer was asked to build an index with no entries
    #[error("range index has no entries")]
    EmptyIndex,

    /// Record offset does not fit the 32-bit offset field
    #[error("data offset {0} does not fit in 32 bits")]
    OffsetOverflow(u64),

    /// Unknown text encoding name
    #[error("invalid text encoding: {0}")]
    InvalidEncoding(String),

    /// Delimiter is not a single ASCII character
    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),
}

/// Result type alias for brcep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reason a data file row could not be turned into a record.
///
/// These never abort a lookup or a scan; they are reported as misses and
/// collected for diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Row is not valid in the configured encoding
    #[error("row is not valid {0}")]
    Encoding(crate::TextEncoding),

    /// Row does not have the expected number of columns
    #[error("expected {expected} fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    /// CEP bound is not an unsigned integer
    #[error("invalid CEP bound: {0:?}")]
    InvalidCep(String),

    /// Range end is below range start
    #[error("range end {end} is below range start {start}")]
    InvertedRange { start: u32, end: u32 },

    /// State code is not two ASCII letters
    #[error("invalid state code: {0:?}")]
    InvalidState(String),

    /// Latitude or longitude is present but not a decimal number
    #[error("invalid coordinate: {0:?}")]
    InvalidCoordinate(String),

    /// Delimited row could not be split
    #[error("unreadable row: {0}")]
    Unreadable(String),
}
