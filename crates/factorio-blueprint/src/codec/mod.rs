//! Blueprint string encoding and decoding.
//!
//! A blueprint string is a one-byte version tag followed by base64 text,
//! which decodes to a zlib stream, which inflates to a JSON document. The
//! stream layers live in [`reader`] and [`writer`] and know nothing about
//! JSON; [`document`] glues them to the data model.

pub mod document;
pub mod header;
pub mod reader;
pub mod writer;

#[cfg(test)]
pub(crate) mod testdata;

pub use document::{
    decode, decode_str, decode_with_options, encode, encode_to_string, encode_with_options,
};
pub use header::check_zlib_header;
pub use reader::{BlueprintReader, ReaderOptions};
pub use writer::{BlueprintWriter, WriterOptions};
