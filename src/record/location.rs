use crate::utils::mk_u32;

/// Payloads up to this many bytes are stored in the directory entry itself
pub const INLINE_LIMIT: usize = 4;

/// Where the payload of a record ends up in the file
///
/// A record starts out [`Unresolved`](DataLocation::Unresolved) and is resolved exactly
/// once while the data section is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataLocation {
    #[default]
    Unresolved,
    /// Absolute byte offset of the payload in the data section
    Offset(u32),
    /// Payload bytes stored in the offset field, zero-padded on the right
    Inline([u8; INLINE_LIMIT]),
}
impl DataLocation {
    /// Packs a small payload into an inline location
    ///
    /// Returns `None` if the payload does not fit.
    #[must_use]
    pub fn inline(raw: &[u8]) -> Option<Self> {
        if raw.len() > INLINE_LIMIT {
            return None;
        }
        let mut buf = [0u8; INLINE_LIMIT];
        buf[..raw.len()].copy_from_slice(raw);
        Some(Self::Inline(buf))
    }

    /// The 4 bytes written into the offset field of a directory entry
    ///
    /// Returns `None` while the location is unresolved.
    #[must_use]
    pub fn to_bytes(self) -> Option<[u8; INLINE_LIMIT]> {
        match self {
            Self::Unresolved => None,
            Self::Offset(offset) => Some(mk_u32(offset)),
            Self::Inline(raw) => Some(raw),
        }
    }

    #[must_use]
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}
