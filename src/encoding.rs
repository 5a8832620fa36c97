//! Text encodings accepted for the data file.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::Error;

/// Encoding of the data file.
///
/// The encoding is always explicit; it is never sniffed from the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// UTF-8
    #[default]
    Utf8,
    /// ISO-8859-1
    Latin1,
}

impl TextEncoding {
    /// Decode one raw line.
    ///
    /// Returns `None` when the bytes are not valid in this encoding.
    /// Latin-1 maps every byte to the code point of the same value, so it
    /// never fails.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            TextEncoding::Latin1 => {
                if bytes.is_ascii() {
                    // ASCII is valid UTF-8
                    std::str::from_utf8(bytes).ok().map(Cow::Borrowed)
                } else {
                    Some(Cow::Owned(bytes.iter().map(|&b| b as char).collect()))
                }
            }
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(TextEncoding::Latin1),
            _ => Err(Error::InvalidEncoding(s.to_string())),
        }
    }
}
