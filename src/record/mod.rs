//! Typed data records
//!
//! An [`AbifData`] describes one named, tagged element of an ABIF file: enough to render
//! its payload and to write its directory entry once the payload has been placed.

mod location;
mod payload;

pub use location::{DataLocation, INLINE_LIMIT};
pub use payload::{ElementType, Payload};

use crate::{
    error::{RecordError, Result},
    utils::{mk_i16, mk_i32, mk_u16, mk_u8},
};

/// Maximum number of bytes a pString can hold behind its single length byte
pub const MAX_PSTRING_LEN: usize = u8::MAX as usize;

/// A single named and tagged data element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbifData {
    /// Tag name, written as exactly 4 bytes
    pub(crate) name: String,
    pub(crate) tag_number: i32,
    pub(crate) element_type: ElementType,
    pub(crate) element_size: i16,
    /// Declared element count; checked against the rendered payload at layout time
    pub(crate) element_count: usize,
    pub(crate) payload: Payload,
    pub(crate) location: DataLocation,
}
impl AbifData {
    /// Creates a record whose type, size and count are derived from the payload
    #[must_use]
    pub fn new(name: &str, tag_number: i32, payload: Payload) -> Self {
        let element_type = payload.element_type();
        Self {
            name: name.to_string(),
            tag_number,
            element_type,
            element_size: element_type.element_size(),
            element_count: payload.element_count(),
            payload,
            location: DataLocation::Unresolved,
        }
    }

    #[must_use]
    pub fn data_byte(name: &str, tag_number: i32, vs: &[u8]) -> Self {
        Self::new(name, tag_number, Payload::Byte(vs.to_vec()))
    }

    #[must_use]
    pub fn data_char(name: &str, tag_number: i32, s: &str) -> Self {
        Self::new(name, tag_number, Payload::Char(s.to_string()))
    }

    #[must_use]
    pub fn data_word(name: &str, tag_number: i32, vs: &[u16]) -> Self {
        Self::new(name, tag_number, Payload::Word(vs.to_vec()))
    }

    #[must_use]
    pub fn data_short(name: &str, tag_number: i32, vs: &[i16]) -> Self {
        Self::new(name, tag_number, Payload::Short(vs.to_vec()))
    }

    #[must_use]
    pub fn data_long(name: &str, tag_number: i32, vs: &[i32]) -> Self {
        Self::new(name, tag_number, Payload::Long(vs.to_vec()))
    }

    /// Creates a length-prefixed string record
    ///
    /// # Errors
    ///
    /// Fails if the UTF-8 encoding of `s` is longer than 255 bytes.
    pub fn data_pstring(name: &str, tag_number: i32, s: &str) -> Result<Self> {
        check_pstring(name, s)?;
        Ok(Self::new(name, tag_number, Payload::PString(s.to_string())))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tag_number(&self) -> i32 {
        self.tag_number
    }

    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    #[must_use]
    pub fn element_size(&self) -> i16 {
        self.element_size
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[must_use]
    pub fn location(&self) -> DataLocation {
        self.location
    }

    /// Declared payload size in bytes (`element_size * element_count`)
    #[must_use]
    pub fn data_size(&self) -> usize {
        self.element_size as usize * self.element_count
    }

    /// Renders the payload in its on-disk byte representation
    pub fn render(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.data_size());
        match &self.payload {
            Payload::Byte(vs) => vs.iter().for_each(|&v| buf.extend(mk_u8(v))),
            Payload::Char(s) => buf.extend_from_slice(s.as_bytes()),
            Payload::Word(vs) => vs.iter().for_each(|&v| buf.extend(mk_u16(v))),
            Payload::Short(vs) => vs.iter().for_each(|&v| buf.extend(mk_i16(v))),
            Payload::Long(vs) => vs.iter().for_each(|&v| buf.extend(mk_i32(v))),
            Payload::PString(s) => {
                let len = check_pstring(&self.name, s)?;
                buf.extend(mk_u8(len));
                buf.extend_from_slice(s.as_bytes());
            }
        }
        Ok(buf)
    }

    /// Records where the payload was placed
    pub(crate) fn resolve(&mut self, location: DataLocation) {
        self.location = location;
    }
}

fn check_pstring(name: &str, s: &str) -> Result<u8> {
    match u8::try_from(s.len()) {
        Ok(len) => Ok(len),
        Err(_) => Err(RecordError::PStringTooLong {
            name: name.to_string(),
            len: s.len(),
        }
        .into()),
    }
}
