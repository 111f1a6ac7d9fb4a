/// ABIF element types supported by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum ElementType {
    /// Unsigned 8-bit integer
    Byte = 1,
    /// 8-bit ASCII character
    Char = 2,
    /// Unsigned 16-bit integer
    Word = 3,
    /// Signed 16-bit integer
    Short = 4,
    /// Signed 32-bit integer
    Long = 5,
    /// Pascal string: one length byte followed by the characters
    PString = 18,
    /// Directory entry (only used by the header's directory pointer)
    Directory = 1023,
}
impl ElementType {
    /// Numeric code stored in the directory entry
    #[must_use]
    pub fn code(self) -> i16 {
        self as i16
    }

    /// Size in bytes of a single element
    #[must_use]
    pub fn element_size(self) -> i16 {
        match self {
            Self::Byte | Self::Char | Self::PString => 1,
            Self::Word | Self::Short => 2,
            Self::Long => 4,
            Self::Directory => 28,
        }
    }
}

/// Values carried by a typed data record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Byte(Vec<u8>),
    Char(String),
    Word(Vec<u16>),
    Short(Vec<i16>),
    Long(Vec<i32>),
    PString(String),
}
impl Payload {
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Byte(_) => ElementType::Byte,
            Self::Char(_) => ElementType::Char,
            Self::Word(_) => ElementType::Word,
            Self::Short(_) => ElementType::Short,
            Self::Long(_) => ElementType::Long,
            Self::PString(_) => ElementType::PString,
        }
    }

    /// Number of elements, counting the length byte of a pString
    #[must_use]
    pub fn element_count(&self) -> usize {
        match self {
            Self::Byte(vs) => vs.len(),
            Self::Char(s) => s.len(),
            Self::Word(vs) => vs.len(),
            Self::Short(vs) => vs.len(),
            Self::Long(vs) => vs.len(),
            Self::PString(s) => s.len() + 1,
        }
    }
}
