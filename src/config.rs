//! Resolver configuration.

use crate::{Error, TextEncoding};
use std::fmt;
use std::str::FromStr;

/// Default column delimiter of the data file.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Single-byte column delimiter parsed from a command line or environment
/// value.
///
/// Accepts one ASCII character, or `\t` / `tab` for a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter(u8);

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        self.0
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter(DEFAULT_DELIMITER)
    }
}

impl FromStr for Delimiter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [b] if b.is_ascii() => Ok(Delimiter(*b)),
            _ if s == "\\t" || s.eq_ignore_ascii_case("tab") => Ok(Delimiter(b'\t')),
            _ => Err(Error::InvalidDelimiter(s.to_string())),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            b'\t' => write!(f, "tab"),
            b => write!(f, "{}", b as char),
        }
    }
}

/// How the data file is encoded and split into columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Text encoding of the data file
    pub encoding: TextEncoding,
    /// Column delimiter (single byte)
    pub delimiter: u8,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::Utf8,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl ResolverConfig {
    /// Create a configuration for the given encoding with the default
    /// delimiter.
    pub fn with_encoding(encoding: TextEncoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    /// Set the column delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl From<Delimiter> for u8 {
    fn from(delimiter: Delimiter) -> Self {
        delimiter.0
    }
}
