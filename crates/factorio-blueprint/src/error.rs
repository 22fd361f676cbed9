//! Error types for blueprint string decoding, encoding and validation.

use std::io;

use thiserror::Error;

/// Coarse error classes, one per layer of the blueprint string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Input ended early
    UnexpectedEof,
    /// E002: Malformed zlib header
    Header,
    /// E003: Corrupt deflate stream
    CorruptInput,
    /// E004: Invalid base64
    Transcoding,
    /// E005: JSON payload does not match the schema
    Schema,
    /// E006: Size limit exceeded
    Limit,
    /// E007: Error from the underlying reader/writer
    Io,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedEof => "E001",
            ErrorCode::Header => "E002",
            ErrorCode::CorruptInput => "E003",
            ErrorCode::Transcoding => "E004",
            ErrorCode::Schema => "E005",
            ErrorCode::Limit => "E006",
            ErrorCode::Io => "E007",
        }
    }
}

/// Error while decoding a blueprint string or its JSON payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    // === E001 ===
    #[error("[E001] unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    // === E002 ===
    #[error("[E002] invalid zlib header {header:02x?}")]
    InvalidZlibHeader { header: [u8; 2] },

    // === E003 ===
    #[error("[E003] corrupt deflate stream after {offset} compressed bytes")]
    CorruptInput { offset: u64 },

    // === E004 ===
    #[error("[E004] invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    // === E005 ===
    #[error("[E005] malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("[E005] document does not contain a blueprint/book")]
    MissingDocument,

    #[error("[E005] document contains both a blueprint and a blueprint book")]
    AmbiguousDocument,

    #[error("[E005] expected a {expected}, found a {found}")]
    UnexpectedDocument {
        expected: &'static str,
        found: &'static str,
    },

    // === E006 ===
    #[error("[E006] {field} length exceeds maximum {max}")]
    LengthExceedsLimit { field: &'static str, max: u64 },

    // === E007 ===
    #[error("[E007] i/o error: {0}")]
    Io(io::Error),
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::UnexpectedEof { .. } => ErrorCode::UnexpectedEof,
            DecodeError::InvalidZlibHeader { .. } => ErrorCode::Header,
            DecodeError::CorruptInput { .. } => ErrorCode::CorruptInput,
            DecodeError::Base64(_) => ErrorCode::Transcoding,
            DecodeError::Json(_)
            | DecodeError::MissingDocument
            | DecodeError::AmbiguousDocument
            | DecodeError::UnexpectedDocument { .. } => ErrorCode::Schema,
            DecodeError::LengthExceedsLimit { .. } => ErrorCode::Limit,
            DecodeError::Io(_) => ErrorCode::Io,
        }
    }

    /// Wraps this error so it can travel through `std::io::Read`.
    pub(crate) fn into_io(self) -> io::Error {
        let kind = match self {
            DecodeError::UnexpectedEof { .. } => io::ErrorKind::UnexpectedEof,
            DecodeError::Io(e) => return e,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, self)
    }
}

/// Recovers the typed error from an `io::Error` produced by the codec
/// readers. Errors from the caller's own reader stay `Io`, except base64
/// failures, which the transcoder reports through `io::Error` as well.
impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        let kind = err.kind();
        if err.get_ref().is_none() {
            return if kind == io::ErrorKind::UnexpectedEof {
                DecodeError::UnexpectedEof { context: "stream" }
            } else {
                DecodeError::Io(err)
            };
        }
        match err.into_inner() {
            Some(inner) => match inner.downcast::<DecodeError>() {
                Ok(decode) => *decode,
                Err(inner) => match inner.downcast::<base64::DecodeError>() {
                    Ok(b64) => DecodeError::Base64(*b64),
                    Err(inner) => DecodeError::Io(io::Error::new(kind, inner)),
                },
            },
            None => DecodeError::Io(io::Error::from(kind)),
        }
    }
}

/// Error while encoding a blueprint string.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("version byte {version:#04x} is not ASCII; the string form needs an ASCII tag")]
    InvalidVersionByte { version: u8 },
}

/// A game version string that is not `major.minor.patch[.build]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid game version {input:?}")]
pub struct ParseVersionError {
    pub input: String,
}

/// Structural invariant violation found by [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("entity number {entity_number} is used more than once")]
    DuplicateEntityNumber { entity_number: u32 },

    #[error("entity {from} is wired to unknown entity {to}")]
    DanglingConnection { from: u32, to: u32 },

    #[error("book entry at position {position} has index {index}")]
    BookIndexMismatch { position: usize, index: u32 },

    #[error("active index {active_index} out of range for {len} entries")]
    ActiveIndexOutOfRange { active_index: u32, len: usize },

    #[error("icon index {index} is outside 1..=4")]
    IconIndexOutOfRange { index: u8 },
}
