//! ABIF writer module
//!
//! The file is assembled in memory in two passes:
//!
//! 1. Data values: every record is rendered and checked against its declared size.
//!    Payloads larger than 4 bytes are appended to the data section and the record is
//!    pointed at their absolute offset; smaller payloads are stored inline in the
//!    directory entry instead.
//! 2. Directory: one 28-byte entry per record, in input order, placed right after the
//!    last data byte.
//!
//! The header's own directory pointer is then finalized and the pieces concatenated:
//! header, data values, directory.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::{debug, trace};

use crate::{
    error::{Result, WriteError},
    header::{AbifHeader, DirEntry, SIZE_DIR_ENTRY, SIZE_HEADER},
    record::{AbifData, DataLocation},
};

/// Builds a complete ABIF file from a list of records
///
/// Each record's location is resolved as a side effect of the layout pass.
/// The function performs no I/O.
///
/// # Errors
///
/// Returns an error if any record renders to a size other than
/// `element_size * element_count`, or if the file outgrows 32-bit offsets.
pub fn build_abif(records: &mut [AbifData]) -> Result<Vec<u8>> {
    let data_values = layout_data_values(records)?;
    let directory = build_directory(records)?;

    let dir_start = SIZE_HEADER + data_values.len();
    let header = AbifHeader::new(records.len(), to_offset(dir_start)?)?;
    debug!(
        "Built ABIF with {} records: {} data bytes, directory at {}",
        records.len(),
        data_values.len(),
        dir_start
    );

    let mut buffer = Vec::with_capacity(dir_start + directory.len());
    header.write_bytes(&mut buffer)?;
    buffer.extend_from_slice(&data_values);
    buffer.extend_from_slice(&directory);
    Ok(buffer)
}

/// Builds the ABIF file and writes it to `writer`
pub fn write_abif<W: Write>(writer: &mut W, records: &mut [AbifData]) -> Result<()> {
    let buffer = build_abif(records)?;
    writer.write_all(&buffer)?;
    Ok(())
}

/// Builds the ABIF file and writes it to a new file at `path`
///
/// The whole buffer is built before the file is created, so a failing record never
/// leaves a partial file behind.
pub fn write_abif_path<P: AsRef<Path>>(path: P, records: &mut [AbifData]) -> Result<()> {
    let buffer = build_abif(records)?;
    let mut handle = File::create(path.as_ref()).map(BufWriter::new)?;
    handle.write_all(&buffer)?;
    handle.flush()?;
    Ok(())
}

/// First pass: renders every payload and resolves record locations
fn layout_data_values(records: &mut [AbifData]) -> Result<Vec<u8>> {
    let mut data_values = Vec::new();
    let mut offset = SIZE_HEADER;

    for record in records.iter_mut() {
        let raw = record.render()?;
        let expected = record.data_size();
        if raw.len() != expected {
            return Err(WriteError::SizeMismatch {
                name: record.name().to_string(),
                got: raw.len(),
                expected,
            }
            .into());
        }

        // Small payloads live in the directory entry's offset field
        if let Some(inline) = DataLocation::inline(&raw) {
            trace!("{}:{} inline ({} bytes)", record.name(), record.tag_number(), raw.len());
            record.resolve(inline);
        } else {
            trace!("{}:{} at offset {}", record.name(), record.tag_number(), offset);
            record.resolve(DataLocation::Offset(to_offset(offset)?));
            offset += raw.len();
            data_values.extend_from_slice(&raw);
        }
    }

    Ok(data_values)
}

/// Second pass: one directory entry per record, in input order
fn build_directory(records: &[AbifData]) -> Result<Vec<u8>> {
    let mut directory = Vec::with_capacity(records.len() * SIZE_DIR_ENTRY);
    for record in records {
        DirEntry::from_record(record)?.write_bytes(&mut directory)?;
    }
    Ok(directory)
}

fn to_offset(offset: usize) -> Result<u32> {
    u32::try_from(offset).map_err(|_| WriteError::DataTooLarge(offset).into())
}

#[cfg(test)]
mod testing {
    use byteorder::{BigEndian, ByteOrder};

    use super::*;
    use crate::{record::Payload, Error};
    use anyhow::Result;

    fn entry(buf: &[u8], dir_start: usize, ix: usize) -> &[u8] {
        let start = dir_start + ix * SIZE_DIR_ENTRY;
        &buf[start..start + SIZE_DIR_ENTRY]
    }

    #[test]
    fn test_empty_record_list() -> Result<()> {
        let buf = build_abif(&mut [])?;
        assert_eq!(buf.len(), SIZE_HEADER);
        assert_eq!(BigEndian::read_i32(&buf[18..22]), 0);
        assert_eq!(BigEndian::read_u32(&buf[26..30]), 128);
        Ok(())
    }

    #[test]
    fn test_demo_layout() -> Result<()> {
        let mut records = vec![
            AbifData::data_byte("dat1", 1, &[1, 2, 3, 4]),
            AbifData::data_char("dat2", 1, "ABc"),
            AbifData::data_char("dat3", 1, "ABcdef!!"),
        ];
        let buf = build_abif(&mut records)?;

        // only dat3 goes into the data section
        assert_eq!(records[0].location(), DataLocation::Inline([1, 2, 3, 4]));
        assert_eq!(records[1].location(), DataLocation::Inline(*b"ABc\0"));
        assert_eq!(records[2].location(), DataLocation::Offset(128));
        assert_eq!(&buf[128..136], b"ABcdef!!");

        let dir_start = 136;
        assert_eq!(buf.len(), dir_start + 3 * SIZE_DIR_ENTRY);
        assert_eq!(BigEndian::read_u32(&buf[26..30]), dir_start as u32);
        assert_eq!(BigEndian::read_i32(&buf[18..22]), 3);

        let e0 = entry(&buf, dir_start, 0);
        assert_eq!(&e0[0..4], b"dat1");
        assert_eq!(BigEndian::read_i16(&e0[8..10]), 1);
        assert_eq!(BigEndian::read_i32(&e0[12..16]), 4);
        assert_eq!(&e0[20..24], &[1, 2, 3, 4]);

        let e1 = entry(&buf, dir_start, 1);
        assert_eq!(BigEndian::read_i32(&e1[16..20]), 3);
        assert_eq!(&e1[20..24], b"ABc\0");

        let e2 = entry(&buf, dir_start, 2);
        assert_eq!(BigEndian::read_i16(&e2[8..10]), 2);
        assert_eq!(BigEndian::read_i32(&e2[16..20]), 8);
        assert_eq!(BigEndian::read_i32(&e2[20..24]), 128);
        assert_eq!(BigEndian::read_i32(&e2[24..28]), 0);
        Ok(())
    }

    #[test]
    fn test_offsets_are_cumulative() -> Result<()> {
        let mut records = vec![
            AbifData::data_short("DATA", 9, &[1, 2, 3]),
            AbifData::data_short("LANE", 1, &[1]),
            AbifData::data_long("LONG", 1, &[1, 2]),
            AbifData::data_char("PBAS", 1, "ACGTA"),
        ];
        let buf = build_abif(&mut records)?;
        assert_eq!(records[0].location(), DataLocation::Offset(128));
        assert_eq!(records[1].location(), DataLocation::Inline([0, 1, 0, 0]));
        assert_eq!(records[2].location(), DataLocation::Offset(134));
        assert_eq!(records[3].location(), DataLocation::Offset(142));
        assert_eq!(BigEndian::read_u32(&buf[26..30]), 147);
        assert_eq!(buf.len(), 147 + 4 * SIZE_DIR_ENTRY);
        Ok(())
    }

    #[test]
    fn test_size_mismatch_is_fatal() {
        let mut bad = AbifData::data_short("PLOC", 2, &[1, 2, 3]);
        bad.element_count = 4;
        let mut records = vec![AbifData::data_char("PBAS", 1, "ACGTA"), bad];
        let err = build_abif(&mut records).unwrap_err();
        match err {
            Error::WriteError(WriteError::SizeMismatch {
                name,
                got,
                expected,
            }) => {
                assert_eq!(name, "PLOC");
                assert_eq!(got, 6);
                assert_eq!(expected, 8);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_oversized_pstring_payload_is_fatal() {
        // bypass the checked constructor
        let mut records = vec![AbifData::new("CMNT", 1, Payload::PString("x".repeat(300)))];
        assert!(build_abif(&mut records).is_err());
    }

    #[test]
    fn test_build_is_deterministic() -> Result<()> {
        let records = vec![
            AbifData::data_char("FWO_", 1, "GATC"),
            AbifData::data_pstring("SMPL", 1, "sample")?,
            AbifData::data_short("DATA", 9, &[0, 128, 512]),
        ];
        let a = build_abif(&mut records.clone())?;
        let b = build_abif(&mut records.clone())?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_write_abif() -> Result<()> {
        let mut records = vec![AbifData::data_char("PBAS", 1, "ACGTACGT")];
        let mut out = Vec::new();
        write_abif(&mut out, &mut records)?;
        assert_eq!(out, build_abif(&mut records)?);
        Ok(())
    }
}
