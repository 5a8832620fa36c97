//! Sorted range index over the data file.
//!
//! The index is a flat array of fixed-size entries with no header. Each
//! entry marks where a CEP range begins and where its record lives in the
//! data file; the next entry's start is the exclusive end of the range.
//!
//! # File Structure
//!
//! ```text
//! +---------------------------+
//! | range_start | data_offset |  entry 0  (8 bytes, big-endian)
//! +---------------------------+
//! | range_start | data_offset |  entry 1
//! +---------------------------+
//! |           ...             |
//! +---------------------------+
//! ```
//!
//! The file size must be a positive multiple of 8.

mod format;
mod reader;
pub mod writer;

#[cfg(test)]
mod tests;

pub use format::*;
pub use reader::RangeIndex;
pub use writer::RangeIndexWriter;
