//! Factorio blueprint strings: streaming codec and typed data model.
//!
//! This crate encodes and decodes the text strings the game uses to share
//! blueprints and blueprint books, and maps their JSON payload to typed
//! records.
//!
//! # Overview
//!
//! A blueprint string is built from nested layers:
//! - **Version tag**: one byte, `'0'` for every string the game has written
//! - **base64**: standard alphabet with padding
//! - **zlib**: a single deflate stream
//! - **JSON**: `{"blueprint": {...}}` or `{"blueprint-book": {...}}`
//!
//! # Quick Start
//!
//! ```rust
//! use factorio_blueprint::{decode_str, encode_to_string, Document, DEFAULT_VERSION_BYTE};
//! use factorio_blueprint::model::{BlueprintBuilder, GameVersion, Position};
//!
//! let blueprint = BlueprintBuilder::new()
//!     .label("Belt")
//!     .version(GameVersion::new(2, 0, 15, 4))
//!     .entity("transport-belt", Position::new(0.5, 0.5), |e| e.direction(4))
//!     .build();
//! let document = Document::Blueprint(blueprint);
//!
//! // Encode to a blueprint string
//! let string = encode_to_string(&document, DEFAULT_VERSION_BYTE).unwrap();
//!
//! // Decode back
//! let (version, decoded) = decode_str(&string).unwrap();
//! assert_eq!(version, DEFAULT_VERSION_BYTE);
//! assert_eq!(decoded, document);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Records (blueprints, books, entities, control behavior, schedules)
//! - [`codec`]: Streaming reader/writer and whole-document encode/decode
//! - [`validate`]: Structural checks (entity numbers, wires, book indices)
//! - [`error`]: Error types
//! - [`limits`]: Format constants and decoding limits
//!
//! # Books
//!
//! A book holds each child as its own serialized document. Decoding a book
//! does not decode its children; call [`model::BookEntry::decode`] or iterate
//! [`model::BlueprintBook::children`] to expand them level by level.
//!
//! # Security
//!
//! The decoder is designed to handle untrusted input:
//! - The zlib header is checked before any inflation happens
//! - Inflated output is capped ([`codec::ReaderOptions::max_json_len`])
//! - Invalid data is rejected with descriptive errors

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    decode, decode_str, decode_with_options, encode, encode_to_string, encode_with_options,
    BlueprintReader, BlueprintWriter, ReaderOptions, WriterOptions,
};
pub use error::{DecodeError, EncodeError, ErrorCode, ParseVersionError, ValidationError};
pub use limits::DEFAULT_VERSION_BYTE;
pub use model::{parse_from_json, Blueprint, BlueprintBook, BookEntry, Document, DocumentKind, GameVersion};
pub use validate::{validate_blueprint, validate_book, validate_document};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
