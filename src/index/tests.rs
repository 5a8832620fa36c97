//! Tests for the range index format, search and writer.

use super::format::*;
use super::reader::RangeIndex;
use super::writer::RangeIndexWriter;
use crate::record::CityRecord;
use crate::store::RecordStore;
use crate::{Error, ResolverConfig};

/// Helper to build an index whose entry `i` points at offset `i * 100`.
fn build_index(starts: &[u32]) -> RangeIndex {
    let mut writer = RangeIndexWriter::new();
    for (i, &start) in starts.iter().enumerate() {
        writer.add(IndexEntry::new(start, i as u32 * 100));
    }
    let data = writer.build().expect("Failed to build index");
    RangeIndex::from_bytes(data).expect("Failed to read index")
}

/// Reference floor search over sorted breakpoints, with the same
/// upper-bound rejection as `locate`.
fn reference_locate(starts: &[u32], target: u32) -> Option<u32> {
    let last = *starts.last()?;
    if target < starts[0] || target > last {
        return None;
    }
    starts
        .iter()
        .rposition(|&start| start <= target)
        .map(|i| i as u32 * 100)
}

// ============================================================================
// Reader Tests
// ============================================================================

#[test]
fn test_entry_at_reads_sorted_entries() {
    let index = build_index(&[30, 10, 20]);

    assert_eq!(index.len(), 3);
    assert!(!index.is_empty());

    // Sorted on build; offsets follow insertion order
    assert_eq!(index.entry_at(0).unwrap(), IndexEntry::new(10, 100));
    assert_eq!(index.entry_at(1).unwrap(), IndexEntry::new(20, 200));
    assert_eq!(index.entry_at(2).unwrap(), IndexEntry::new(30, 0));
    assert_eq!(index.first().unwrap().range_start, 10);
    assert_eq!(index.last().unwrap().range_start, 30);
}

#[test]
fn test_entry_at_out_of_range() {
    let index = build_index(&[10, 20]);

    match index.entry_at(2) {
        Err(Error::EntryOutOfRange { index, len }) => {
            assert_eq!(index, 2);
            assert_eq!(len, 2);
        }
        other => panic!("expected EntryOutOfRange, got {:?}", other),
    }
}

#[test]
fn test_entries_iterates_in_order() {
    let index = build_index(&[5, 1, 3]);
    let starts: Vec<u32> = index.entries().map(|e| e.range_start).collect();
    assert_eq!(starts, vec![1, 3, 5]);
}

#[test]
fn test_invalid_index_sizes() {
    assert!(matches!(
        RangeIndex::from_bytes(Vec::new()),
        Err(Error::InvalidIndexSize { size: 0, .. })
    ));
    assert!(matches!(
        RangeIndex::from_bytes(vec![0u8; 12]),
        Err(Error::InvalidIndexSize { size: 12, .. })
    ));
    assert!(RangeIndex::from_bytes(vec![0u8; 16]).is_ok());
}

#[test]
fn test_open_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cities.idx");

    let mut writer = RangeIndexWriter::new();
    writer.add(IndexEntry::new(1000000, 0));
    writer.add(IndexEntry::new(2000000, 64));
    assert_eq!(writer.write_to(&path).unwrap(), 2);

    let index = RangeIndex::open(&path).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.locate(1500000).unwrap(), Some(0));

    // Truncated copy is rejected at open time
    let truncated = dir.path().join("truncated.idx");
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&truncated, &bytes[..bytes.len() - 3]).unwrap();
    assert!(matches!(
        RangeIndex::open(&truncated),
        Err(Error::InvalidIndexSize { size: 13, .. })
    ));

    // Missing file is an IO error
    assert!(matches!(
        RangeIndex::open(&dir.path().join("missing.idx")),
        Err(Error::Io(_))
    ));
}

// ============================================================================
// Range Search Tests
// ============================================================================

#[test]
fn test_locate_exact_breakpoints() {
    let index = build_index(&[10, 20, 30, 40]);

    assert_eq!(index.locate(10).unwrap(), Some(0));
    assert_eq!(index.locate(20).unwrap(), Some(100));
    assert_eq!(index.locate(30).unwrap(), Some(200));
    assert_eq!(index.locate(40).unwrap(), Some(300));
}

#[test]
fn test_locate_between_breakpoints_uses_floor() {
    let index = build_index(&[10, 20, 30, 40]);

    assert_eq!(index.locate(11).unwrap(), Some(0));
    assert_eq!(index.locate(19).unwrap(), Some(0));
    assert_eq!(index.locate(21).unwrap(), Some(100));
    assert_eq!(index.locate(39).unwrap(), Some(200));
}

#[test]
fn test_locate_outside_domain() {
    let index = build_index(&[10, 20, 30, 40]);

    assert_eq!(index.locate(0).unwrap(), None);
    assert_eq!(index.locate(9).unwrap(), None);
    assert_eq!(index.locate(u32::MAX).unwrap(), None);
}

#[test]
fn test_locate_rejects_above_last_breakpoint() {
    // The last range only matches at its own breakpoint
    let index = build_index(&[10, 20, 30, 40]);

    assert_eq!(index.locate(40).unwrap(), Some(300));
    assert_eq!(index.locate(41).unwrap(), None);
}

#[test]
fn test_locate_single_entry() {
    let index = build_index(&[500]);

    assert_eq!(index.locate(500).unwrap(), Some(0));
    assert_eq!(index.locate(499).unwrap(), None);
    assert_eq!(index.locate(501).unwrap(), None);
}

#[test]
fn test_locate_two_entries() {
    let index = build_index(&[100, 200]);

    assert_eq!(index.locate(100).unwrap(), Some(0));
    assert_eq!(index.locate(150).unwrap(), Some(0));
    assert_eq!(index.locate(199).unwrap(), Some(0));
    assert_eq!(index.locate(200).unwrap(), Some(100));
}

#[test]
fn test_locate_matches_reference_search() {
    let sets: [&[u32]; 5] = [
        &[10, 20, 35, 50, 51, 90],
        &[0, 1, 2, 3],
        &[7, 1000],
        &[1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21],
        &[42],
    ];

    for starts in sets {
        let index = build_index(starts);
        let max = *starts.last().unwrap() + 5;
        for target in 0..=max {
            assert_eq!(
                index.locate(target).unwrap(),
                reference_locate(starts, target),
                "starts {:?}, target {}",
                starts,
                target
            );
        }
    }
}

#[test]
fn test_locate_large_index() {
    // 10_000 ranges of width 1000 starting at 1_000_000
    let starts: Vec<u32> = (0..10_000).map(|i| 1_000_000 + i * 1000).collect();
    let index = build_index(&starts);

    assert_eq!(index.locate(1_000_000).unwrap(), Some(0));
    assert_eq!(index.locate(1_000_999).unwrap(), Some(0));
    assert_eq!(index.locate(1_001_000).unwrap(), Some(100));
    assert_eq!(index.locate(5_432_100).unwrap(), Some(4432 * 100));
    assert_eq!(index.locate(10_998_999).unwrap(), Some(9998 * 100));
    assert_eq!(index.locate(10_999_000).unwrap(), Some(9999 * 100));
    assert_eq!(index.locate(10_999_001).unwrap(), None);
}

// ============================================================================
// Writer Tests
// ============================================================================

#[test]
fn test_writer_output_layout() {
    let mut writer = RangeIndexWriter::new();
    writer.add(IndexEntry::new(0x0102_0304, 0x0A0B_0C0D));
    let data = writer.build().unwrap();

    assert_eq!(data, vec![0x01, 0x02, 0x03, 0x04, 0x0A, 0x0B, 0x0C, 0x0D]);
}

#[test]
fn test_writer_rejects_duplicates() {
    let mut writer = RangeIndexWriter::new();
    writer.add(IndexEntry::new(20, 0));
    writer.add(IndexEntry::new(10, 8));
    writer.add(IndexEntry::new(20, 16));

    assert!(matches!(
        writer.build(),
        Err(Error::DuplicateBreakpoint(20))
    ));
}

#[test]
fn test_writer_rejects_empty_index() {
    let writer = RangeIndexWriter::new();
    assert!(writer.is_empty());
    assert!(matches!(writer.build(), Err(Error::EmptyIndex)));
}

#[test]
fn test_writer_rejects_wide_offsets() {
    let record = CityRecord::from_fields([
        "12400000",
        "12449999",
        "SP",
        "Pindamonhangaba",
        "12",
        "",
        "",
    ])
    .unwrap();

    let mut writer = RangeIndexWriter::new();
    assert!(writer.add_record(u32::MAX as u64, &record).is_ok());
    assert!(matches!(
        writer.add_record(u32::MAX as u64 + 1, &record),
        Err(Error::OffsetOverflow(_))
    ));
    assert_eq!(writer.len(), 1);
}

#[test]
fn test_writer_from_store() {
    let data = "\
cep_initial,cep_final,state,city,ddd,lat,lon
12400000,12449999,SP,Pindamonhangaba,12,-22.9166667,-45.4666667
01000000,05999999,SP,São Paulo,11,-23.5475000,-46.6361100
garbage
";
    let mut store = RecordStore::from_bytes(data.as_bytes(), ResolverConfig::default()).unwrap();
    let writer = RangeIndexWriter::from_store(&mut store).unwrap();

    assert_eq!(writer.len(), 2);
    assert_eq!(writer.skipped(), 2);

    let index = RangeIndex::from_bytes(writer.build().unwrap()).unwrap();
    let sao_paulo = data.find("01000000").unwrap() as u32;
    let pinda = data.find("12400000").unwrap() as u32;

    assert_eq!(index.entry_at(0).unwrap(), IndexEntry::new(1000000, sao_paulo));
    assert_eq!(index.entry_at(1).unwrap(), IndexEntry::new(12400000, pinda));
}
