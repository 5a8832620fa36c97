//! City records as stored in the data file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RecordError;
use crate::state::state_name;

/// Number of columns in a data file row.
pub const FIELD_COUNT: usize = 7;

/// One row of the data file: the CEP range assigned to a city.
///
/// Field order in the file is `cep_initial, cep_final, state, city, ddd,
/// lat, lon`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    /// First CEP of the range (inclusive)
    #[serde(rename = "cep_initial")]
    pub range_start: u32,
    /// Last CEP of the range (inclusive)
    #[serde(rename = "cep_final")]
    pub range_end: u32,
    /// Two-letter state code
    pub state: String,
    /// City name
    pub city: String,
    /// Telephone area code
    pub ddd: Option<String>,
    /// Latitude in decimal degrees, at the scale written in the file
    pub lat: Option<Decimal>,
    /// Longitude in decimal degrees, at the scale written in the file
    pub lon: Option<Decimal>,
}

impl CityRecord {
    /// Build a record from the columns of one row.
    pub fn from_fields<'a, I>(fields: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().map(str::trim).collect();
        if fields.len() != FIELD_COUNT {
            return Err(RecordError::FieldCount {
                expected: FIELD_COUNT,
                actual: fields.len(),
            });
        }

        let range_start = parse_cep(fields[0])?;
        let range_end = parse_cep(fields[1])?;
        if range_end < range_start {
            return Err(RecordError::InvertedRange {
                start: range_start,
                end: range_end,
            });
        }

        let state = fields[2];
        if state.len() != 2 || !state.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(RecordError::InvalidState(state.to_string()));
        }

        Ok(Self {
            range_start,
            range_end,
            state: state.to_string(),
            city: fields[3].to_string(),
            ddd: non_empty(fields[4]).map(str::to_string),
            lat: parse_coordinate(fields[5])?,
            lon: parse_coordinate(fields[6])?,
        })
    }

    /// Check whether a CEP falls inside this record's own range.
    pub fn contains(&self, cep: u32) -> bool {
        (self.range_start..=self.range_end).contains(&cep)
    }

    /// Key used by listings: `"<city>/<state>"`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.city, self.state)
    }

    /// Attach the full state name.
    pub fn resolve(self) -> ResolvedCity {
        let state_long = state_name(&self.state).map(str::to_string);
        ResolvedCity {
            record: self,
            state_long,
        }
    }
}

/// A city record enriched with the full state name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCity {
    #[serde(flatten)]
    pub record: CityRecord,
    /// Full state name, absent when the state code is unknown
    pub state_long: Option<String>,
}

impl ResolvedCity {
    pub fn state(&self) -> &str {
        &self.record.state
    }

    pub fn city(&self) -> &str {
        &self.record.city
    }

    pub fn ddd(&self) -> Option<&str> {
        self.record.ddd.as_deref()
    }

    pub fn lat(&self) -> Option<Decimal> {
        self.record.lat
    }

    pub fn lon(&self) -> Option<Decimal> {
        self.record.lon
    }

    pub fn state_long(&self) -> Option<&str> {
        self.state_long.as_deref()
    }

    /// Key used by listings: `"<city>/<state>"`.
    pub fn key(&self) -> String {
        self.record.key()
    }
}

fn non_empty(field: &str) -> Option<&str> {
    if field.is_empty() {
        None
    } else {
        Some(field)
    }
}

fn parse_cep(field: &str) -> Result<u32, RecordError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecordError::InvalidCep(field.to_string()));
    }
    field
        .parse()
        .map_err(|_| RecordError::InvalidCep(field.to_string()))
}

fn parse_coordinate(field: &str) -> Result<Option<Decimal>, RecordError> {
    match non_empty(field) {
        None => Ok(None),
        Some(value) => Decimal::from_str(value)
            .map(Some)
            .map_err(|_| RecordError::InvalidCoordinate(value.to_string())),
    }
}
