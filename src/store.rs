//! Record store: the delimited data file.
//!
//! Each line holds one city record. Records are addressed by the byte
//! offset of their line, which is what the range index stores.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use crate::error::RecordError;
use crate::record::CityRecord;
use crate::{ResolverConfig, Result};

/// Outcome of reading one line of the data file.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordRead {
    /// A well-formed record
    Record(CityRecord),
    /// No more bytes at this position
    EndOfStream,
    /// The line exists but could not be parsed
    Malformed(RecordError),
}

impl RecordRead {
    /// Convert into the record, treating both kinds of miss as `None`.
    pub fn into_record(self) -> Option<CityRecord> {
        match self {
            RecordRead::Record(record) => Some(record),
            RecordRead::EndOfStream | RecordRead::Malformed(_) => None,
        }
    }
}

/// Reader over the data file.
///
/// Holds a single file handle with a seek position, so reads take
/// `&mut self`.
pub struct RecordStore {
    reader: BufReader<File>,
    config: ResolverConfig,
    line: Vec<u8>,
}

impl RecordStore {
    /// Open a data file.
    pub fn open(path: &Path, config: ResolverConfig) -> Result<Self> {
        let file = File::open(path)?;
        log::debug!("Opened data file {:?} ({})", path, config.encoding);
        Ok(Self::from_file(file, config))
    }

    /// Wrap an already opened data file.
    pub fn from_file(file: File, config: ResolverConfig) -> Self {
        Self {
            reader: BufReader::new(file),
            config,
            line: Vec::with_capacity(256),
        }
    }

    /// Create a store from bytes.
    ///
    /// This writes the data to a temp file so that reads go through a
    /// seekable handle like any other store.
    pub fn from_bytes(data: &[u8], config: ResolverConfig) -> Result<Self> {
        use std::io::Write;

        let mut temp_file = tempfile::tempfile()?;
        temp_file.write_all(data)?;
        Ok(Self::from_file(temp_file, config))
    }

    /// Get the store configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Seek to `offset` and read the record starting there.
    pub fn read_at(&mut self, offset: u64) -> Result<RecordRead> {
        self.reader.seek(SeekFrom::Start(offset))?;
        let (_, read) = self.read_next()?;
        Ok(read)
    }

    /// Seek to `offset` and parse one record.
    ///
    /// End of stream and malformed lines are both reported as `None`; IO
    /// failures are errors.
    pub fn read_record_at(&mut self, offset: u64) -> Result<Option<CityRecord>> {
        match self.read_at(offset)? {
            RecordRead::Malformed(reason) => {
                log::debug!("Malformed record at offset {}: {}", offset, reason);
                Ok(None)
            }
            read => Ok(read.into_record()),
        }
    }

    /// Scan the whole file from the beginning.
    ///
    /// Yields the byte offset of every line together with its parse
    /// outcome.
    pub fn records(&mut self) -> Result<Records<'_>> {
        self.reader.seek(SeekFrom::Start(0))?;
        Ok(Records {
            store: self,
            position: 0,
        })
    }

    /// Read one line from the current position.
    ///
    /// Returns the number of bytes consumed.
    fn read_next(&mut self) -> Result<(usize, RecordRead)> {
        self.line.clear();
        let consumed = self.reader.read_until(b'\n', &mut self.line)?;
        if consumed == 0 {
            return Ok((0, RecordRead::EndOfStream));
        }

        let read = match parse_line(&self.line, &self.config) {
            Ok(record) => RecordRead::Record(record),
            Err(reason) => RecordRead::Malformed(reason),
        };
        Ok((consumed, read))
    }
}

/// Sequential scan over a [`RecordStore`].
pub struct Records<'a> {
    store: &'a mut RecordStore,
    position: u64,
}

impl Iterator for Records<'_> {
    type Item = Result<(u64, RecordRead)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.store.read_next() {
            Ok((_, RecordRead::EndOfStream)) => None,
            Ok((consumed, read)) => {
                let offset = self.position;
                self.position += consumed as u64;
                Some(Ok((offset, read)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Parse one raw line (with or without its line terminator).
pub fn parse_line(
    raw: &[u8],
    config: &ResolverConfig,
) -> std::result::Result<CityRecord, RecordError> {
    let raw = trim_line_end(raw);
    let text = config
        .encoding
        .decode(raw)
        .ok_or(RecordError::Encoding(config.encoding))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(config.delimiter)
        .from_reader(text.as_bytes());

    let mut row = csv::StringRecord::new();
    match reader.read_record(&mut row) {
        Ok(true) => CityRecord::from_fields(row.iter()),
        Ok(false) => Err(RecordError::FieldCount {
            expected: crate::record::FIELD_COUNT,
            actual: 0,
        }),
        Err(e) => Err(RecordError::Unreadable(e.to_string())),
    }
}

fn trim_line_end(mut raw: &[u8]) -> &[u8] {
    while let [rest @ .., b'\n' | b'\r'] = raw {
        raw = rest;
    }
    raw
}
