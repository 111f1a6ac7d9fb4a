/// Custom Result type for abifgen operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the abifgen library, encompassing all possible error cases
/// that can occur while parsing, synthesizing and encoding trace files.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// Errors raised while parsing weighted FASTA text
    ParseError(#[from] ParseError),
    /// Errors raised while constructing typed data records
    RecordError(#[from] RecordError),
    /// Errors raised while laying out and encoding the ABIF buffer
    WriteError(#[from] WriteError),
    /// Errors raised while validating a generator configuration
    BuilderError(#[from] BuilderError),
    /// Standard I/O errors from the Rust standard library
    IoError(#[from] std::io::Error),
    /// Generic errors that can occur in any part of the system
    AnyhowError(#[from] anyhow::Error),
}

/// Errors that can occur while parsing weighted FASTA text
///
/// Every variant carries the 0-based index of the offending line and its raw content.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ParseError {
    /// A header line was expected but the line does not start with `>` or has nothing after it
    #[error("Expecting header starting with a '>' on line {line} got: {content}")]
    InvalidHeader { line: usize, content: String },

    /// The `{...}` weight token could not be read as a non-negative float
    #[error("Invalid weight on line {line}. Expecting a float, got '{token}' in: {content}")]
    InvalidWeight {
        line: usize,
        content: String,
        token: String,
    },
}

/// Errors that can occur while constructing typed data records
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RecordError {
    /// A length-prefixed string does not fit its single length byte
    ///
    /// # Fields
    /// * `name` - The tag name of the record
    /// * `len` - The UTF-8 byte length of the string
    #[error("String too large for a pString in {name}, max is 255, got {len}")]
    PStringTooLong { name: String, len: usize },
}

/// Errors that can occur while laying out the ABIF buffer
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WriteError {
    /// The rendered payload disagrees with the declared element size and count
    ///
    /// # Fields
    /// * `name` - The tag name of the offending record
    /// * `got` - The number of bytes rendered
    /// * `expected` - `element_size * element_count`
    #[error("Invalid data size in {name}. Got {got}, expected {expected}")]
    SizeMismatch {
        name: String,
        got: usize,
        expected: usize,
    },

    /// A directory entry was emitted for a record whose location was never laid out
    #[error("Data location of {0} was not resolved before building the directory")]
    UnresolvedLocation(String),

    /// A size or offset does not fit the 32-bit fields of a directory entry
    #[error("Value too large for a 32-bit directory field: {0}")]
    DataTooLarge(usize),
}

/// Errors that can occur while building a generator configuration
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum BuilderError {
    /// The intensity curve has no samples
    #[error("Intensity curve must contain at least one value")]
    EmptyCurve,

    /// The intensity curve contains a negative or non-finite value
    #[error("Invalid intensity curve value: {0}")]
    InvalidCurveValue(f64),
}
