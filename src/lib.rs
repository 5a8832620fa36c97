//! brcep - Offline Brazilian postal code (CEP) resolution.
//!
//! This crate resolves a CEP to the city whose numeric range contains it,
//! using two static files:
//!
//! - a **data file** with one delimited city record per line, and
//! - a **range index** of sorted `(range_start, data_offset)` pairs pointing
//!   into the data file.
//!
//! # Features
//!
//! - **Range search**: O(log n) floor search over a memory-mapped index
//! - **Typed records**: state, city, DDD and coordinates parsed once per lookup
//! - **State names**: every record is enriched with the full state name
//! - **Explicit encodings**: UTF-8 or Latin-1 data files
//! - **Optional cache**: memoized lookups for large batches
//! - **Index builder**: generate the range index from a data file
//!
//! # Quick Start
//!
//! ```ignore
//! use brcep::Resolver;
//! use std::path::Path;
//!
//! let mut resolver = Resolver::open(Path::new("cities.csv"), Path::new("cities.idx"))?;
//!
//! let city = resolver.find("12420-010")?.unwrap();
//! assert_eq!(city.city(), "Pindamonhangaba");
//! assert_eq!(city.state_long(), Some("São Paulo"));
//! ```
//!
//! # Data File Columns
//!
//! `cep_initial, cep_final, state, city, ddd, lat, lon`
//!
//! Empty `ddd`, `lat` and `lon` fields are read as absent values.
//!
//! # Lookup Results
//!
//! - `Ok(Some(city))`: the code falls in a known range
//! - `Ok(None)`: the code is outside every range, or its record is unreadable
//! - `Err(_)`: the data or index file could not be read

mod config;
mod encoding;
mod error;
mod state;

pub mod index;
pub mod record;
pub mod resolver;
pub mod store;

// Re-export core types
pub use config::{Delimiter, ResolverConfig, DEFAULT_DELIMITER};
pub use encoding::TextEncoding;
pub use error::{Error, RecordError, Result};
pub use record::{CityRecord, ResolvedCity};
pub use rust_decimal::Decimal;

// Re-export resolver types
pub use resolver::{
    normalize_code, CacheStats, CachedResolver, CachedResolverConfig, Listing, Resolver,
};

// Re-export index types for building and inspecting range indexes
pub use index::{IndexEntry, RangeIndex, RangeIndexWriter};

// Re-export the state name table
pub use state::{all_states, state_name, STATES};
