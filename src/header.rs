//! Header module for the ABIF container
//!
//! This module provides the fixed 128-byte file header and the 28-byte directory entry.
//! The header embeds a directory entry of its own whose offset field points at the
//! directory section at the end of the file.

use byteorder::{BigEndian, ByteOrder};
use std::io::Write;

use crate::{
    error::{Result, WriteError},
    record::{AbifData, ElementType},
    utils::tag_name,
};

/// Magic number: "ABIF" in ASCII
///
/// This is used to identify ABIF files.
pub const MAGIC: [u8; 4] = *b"ABIF";

/// Format version written into the header (1.01)
pub const VERSION: u16 = 101;

/// Size of the header in bytes
///
/// Data values start immediately after it.
pub const SIZE_HEADER: usize = 128;

/// Size of a directory entry in bytes
pub const SIZE_DIR_ENTRY: usize = 28;

/// Zero padding that fills the header up to [`SIZE_HEADER`]
///
/// 47 two-byte words.
pub const SIZE_RESERVED: usize = SIZE_HEADER - 4 - 2 - SIZE_DIR_ENTRY;

/// Tag name of the header's directory pointer
const DIRECTORY_NAME: &str = "tdir";

/// Tag number of the header's directory pointer
const DIRECTORY_TAG: i32 = 1;

/// One entry of the ABIF directory
///
/// The layout is fixed at 28 bytes, all integers big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    /// Tag name, space padded
    ///
    /// 4 bytes
    pub name: [u8; 4],

    /// Tag number
    ///
    /// 4 bytes
    pub tag_number: i32,

    /// Element type code
    ///
    /// 2 bytes
    pub element_type: i16,

    /// Size of one element in bytes
    ///
    /// 2 bytes
    pub element_size: i16,

    /// Number of elements
    ///
    /// 4 bytes
    pub element_count: i32,

    /// Total payload size in bytes
    ///
    /// 4 bytes
    pub data_size: i32,

    /// Absolute offset of the payload, or the payload itself when it fits
    ///
    /// 4 bytes
    pub data_offset: [u8; 4],

    /// Data handle, always zero
    ///
    /// 4 bytes
    pub data_handle: i32,
}
impl DirEntry {
    /// Builds the directory entry of a laid out record
    ///
    /// # Errors
    ///
    /// Returns an error if the record location is still unresolved or a count does not
    /// fit its 32-bit field.
    pub fn from_record(data: &AbifData) -> Result<Self> {
        let Some(data_offset) = data.location().to_bytes() else {
            return Err(WriteError::UnresolvedLocation(data.name().to_string()).into());
        };
        Ok(Self {
            name: tag_name(data.name()),
            tag_number: data.tag_number(),
            element_type: data.element_type().code(),
            element_size: data.element_size(),
            element_count: to_i32(data.element_count())?,
            data_size: to_i32(data.data_size())?,
            data_offset,
            data_handle: 0,
        })
    }

    /// Builds the header's pointer to the directory section
    ///
    /// # Arguments
    ///
    /// * `num_entries` - Number of entries in the directory
    /// * `offset` - Absolute offset of the first directory entry
    pub fn directory_pointer(num_entries: usize, offset: u32) -> Result<Self> {
        let etype = ElementType::Directory;
        let element_count = to_i32(num_entries)?;
        let data_size = to_i32(num_entries * SIZE_DIR_ENTRY)?;
        Ok(Self {
            name: tag_name(DIRECTORY_NAME),
            tag_number: DIRECTORY_TAG,
            element_type: etype.code(),
            element_size: etype.element_size(),
            element_count,
            data_size,
            data_offset: offset.to_be_bytes(),
            data_handle: 0,
        })
    }

    /// Serializes the entry into its 28-byte representation
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIZE_DIR_ENTRY] {
        let mut buffer = [0u8; SIZE_DIR_ENTRY];
        buffer[0..4].copy_from_slice(&self.name);
        BigEndian::write_i32(&mut buffer[4..8], self.tag_number);
        BigEndian::write_i16(&mut buffer[8..10], self.element_type);
        BigEndian::write_i16(&mut buffer[10..12], self.element_size);
        BigEndian::write_i32(&mut buffer[12..16], self.element_count);
        BigEndian::write_i32(&mut buffer[16..20], self.data_size);
        buffer[20..24].copy_from_slice(&self.data_offset);
        BigEndian::write_i32(&mut buffer[24..28], self.data_handle);
        buffer
    }

    /// Writes the entry to a writer
    pub fn write_bytes<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }
}

/// Header structure for ABIF files
///
/// The total size of the serialized header is 128 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbifHeader {
    /// Magic number to identify the file format
    ///
    /// 4 bytes
    pub magic: [u8; 4],

    /// Version of the file format
    ///
    /// 2 bytes
    pub version: u16,

    /// Pointer to the directory section
    ///
    /// 28 bytes
    pub directory: DirEntry,

    /// Reserved space, zero filled
    ///
    /// 94 bytes
    pub reserved: [u8; SIZE_RESERVED],
}
impl AbifHeader {
    /// Creates a header pointing at a directory of `num_entries` entries at `offset`
    pub fn new(num_entries: usize, offset: u32) -> Result<Self> {
        Ok(Self {
            magic: MAGIC,
            version: VERSION,
            directory: DirEntry::directory_pointer(num_entries, offset)?,
            reserved: [0; SIZE_RESERVED],
        })
    }

    /// Serializes the header into its 128-byte representation
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIZE_HEADER] {
        let mut buffer = [0u8; SIZE_HEADER];
        buffer[0..4].copy_from_slice(&self.magic);
        BigEndian::write_u16(&mut buffer[4..6], self.version);
        buffer[6..6 + SIZE_DIR_ENTRY].copy_from_slice(&self.directory.to_bytes());
        buffer[6 + SIZE_DIR_ENTRY..].copy_from_slice(&self.reserved);
        buffer
    }

    /// Writes the header to a writer
    pub fn write_bytes<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }
}

fn to_i32(v: usize) -> Result<i32> {
    i32::try_from(v).map_err(|_| WriteError::DataTooLarge(v).into())
}
