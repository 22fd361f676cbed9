//! Whole-document encode and decode.
//!
//! These connect the stream layers to the envelope: decoding buffers the
//! inflated JSON (bounded by [`ReaderOptions::max_json_len`]) and parses it
//! once; encoding serializes the document and streams it through a single
//! [`BlueprintWriter`].

use std::io::{Read, Write};

use tracing::debug;

use crate::codec::reader::{BlueprintReader, ReaderOptions};
use crate::codec::writer::{BlueprintWriter, WriterOptions};
use crate::error::{DecodeError, EncodeError};
use crate::model::{parse_from_json, Document};

/// Decodes a blueprint string into its version tag and document.
pub fn decode<R: Read>(source: R) -> Result<(u8, Document), DecodeError> {
    decode_with_options(source, ReaderOptions::default())
}

/// Decodes a blueprint string with explicit limits.
pub fn decode_with_options<R: Read>(
    source: R,
    options: ReaderOptions,
) -> Result<(u8, Document), DecodeError> {
    let mut reader = BlueprintReader::with_options(source, options)?;
    let mut json = Vec::new();
    reader.read_to_end(&mut json)?;

    let document = parse_from_json(&json)?;
    debug!(
        version = reader.version(),
        kind = document.kind().name(),
        json = json.len(),
        "decoded blueprint string"
    );
    Ok((reader.version(), document))
}

/// Decodes a blueprint string held in memory.
///
/// Surrounding whitespace is ignored; strings copied from the game or a
/// web page often end in a newline.
pub fn decode_str(input: &str) -> Result<(u8, Document), DecodeError> {
    decode(input.trim().as_bytes())
}

/// Encodes a document into `sink` and returns the sink.
pub fn encode<W: Write>(document: &Document, version: u8, sink: W) -> Result<W, EncodeError> {
    encode_with_options(document, version, sink, WriterOptions::default())
}

/// Encodes a document with explicit writer options.
///
/// On error the sink may hold a partial string; callers should discard it.
pub fn encode_with_options<W: Write>(
    document: &Document,
    version: u8,
    sink: W,
    options: WriterOptions,
) -> Result<W, EncodeError> {
    let json = document.to_json()?;
    let mut writer = BlueprintWriter::with_options(sink, version, options);
    writer.write_all(&json)?;
    Ok(writer.finish()?)
}

/// Encodes a document into a new string.
///
/// The base64 body is always ASCII, so only the version tag can break UTF-8:
/// tags of `0x80` and above fail with [`EncodeError::InvalidVersionByte`].
/// Use [`encode`] with a byte sink for those.
pub fn encode_to_string(document: &Document, version: u8) -> Result<String, EncodeError> {
    if !version.is_ascii() {
        return Err(EncodeError::InvalidVersionByte { version });
    }
    let bytes = encode(document, version, Vec::new())?;
    String::from_utf8(bytes).map_err(|_| EncodeError::InvalidVersionByte { version })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::testdata::{CORRUPT_STRING, EXAMPLE_JSON, EXAMPLE_STRING};
    use crate::limits::DEFAULT_VERSION_BYTE;
    use crate::model::{BlueprintBook, BlueprintBuilder, GameVersion, Position, SignalId};
    use flate2::Compression;

    fn sample_blueprint() -> Document {
        BlueprintBuilder::new()
            .label("Smelter")
            .version(GameVersion::new(2, 0, 15, 4))
            .icon(SignalId::item("stone-furnace"))
            .entity("stone-furnace", Position::new(1.0, 1.0), |e| e)
            .entity("burner-inserter", Position::new(0.5, 2.5), |e| e.direction(8))
            .build()
            .into()
    }

    #[test]
    fn test_decode_example_string() {
        let (version, document) = decode(EXAMPLE_STRING.as_bytes()).unwrap();
        assert_eq!(version, 48);

        let expected: serde_json::Value = serde_json::from_str(EXAMPLE_JSON).unwrap();
        let actual: serde_json::Value = serde_json::from_slice(&document.to_json().unwrap()).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_decode_str_trims_whitespace() {
        let pasted = format!("  {EXAMPLE_STRING}\r\n");
        let (version, document) = decode_str(&pasted).unwrap();
        assert_eq!(version, DEFAULT_VERSION_BYTE);
        assert_eq!(document.as_blueprint().unwrap().entities.as_ref().unwrap().len(), 5);
    }

    #[test]
    fn test_round_trip() {
        let document = sample_blueprint();
        let encoded = encode_to_string(&document, DEFAULT_VERSION_BYTE).unwrap();
        assert!(encoded.starts_with("0eN"));

        let (version, decoded) = decode_str(&encoded).unwrap();
        assert_eq!(version, DEFAULT_VERSION_BYTE);
        assert_eq!(decoded, document);
    }

    #[test]
    fn test_round_trip_book() {
        let mut inner = BlueprintBook::new(GameVersion::new(2, 0, 15, 4));
        if let Document::Blueprint(blueprint) = sample_blueprint() {
            inner.add_blueprint(&blueprint).unwrap();
        }
        let mut book = BlueprintBook::new(GameVersion::new(2, 0, 15, 4));
        book.label = Some("Library".to_string());
        book.add_book(&inner).unwrap();
        book.add_book(&inner).unwrap();
        book.active_index = 1;

        let document = Document::Book(book);
        let bytes = encode(&document, b'0', Vec::new()).unwrap();
        let (_, decoded) = decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, document);

        let nested = decoded.as_book().unwrap().active().unwrap().decode().unwrap();
        let first = nested.as_book().unwrap().children().next().unwrap().unwrap();
        assert_eq!(first.label(), Some("Smelter"));
    }

    #[test]
    fn test_non_ascii_version_bytes() {
        let document = sample_blueprint();
        assert!(matches!(
            encode_to_string(&document, 0x80),
            Err(EncodeError::InvalidVersionByte { version: 0x80 })
        ));

        let bytes = encode(&document, 0xFF, Vec::new()).unwrap();
        assert_eq!(bytes[0], 0xFF);
        let (version, decoded) = decode(bytes.as_slice()).unwrap();
        assert_eq!(version, 0xFF);
        assert_eq!(decoded, document);
    }

    #[test]
    fn test_fast_compression_decodes() {
        let document = sample_blueprint();
        let options = WriterOptions::new().compression(Compression::fast());
        let bytes = encode_with_options(&document, b'0', Vec::new(), options).unwrap();
        assert_eq!(decode(bytes.as_slice()).unwrap().1, document);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode(&b""[..]),
            Err(DecodeError::UnexpectedEof { .. })
        ));
        assert!(matches!(
            decode(CORRUPT_STRING.as_bytes()),
            Err(DecodeError::CorruptInput { .. })
        ));
        assert!(matches!(
            decode_with_options(EXAMPLE_STRING.as_bytes(), ReaderOptions::new().max_json_len(100)),
            Err(DecodeError::LengthExceedsLimit { .. })
        ));
    }

    #[test]
    fn test_decode_payload_without_document() {
        let mut writer = BlueprintWriter::new(Vec::new(), b'0');
        writer.write_all(br#"{"upgrade_planner":{"item":"upgrade-planner"}}"#).unwrap();
        let bytes = writer.finish().unwrap();
        assert!(matches!(
            decode(bytes.as_slice()),
            Err(DecodeError::MissingDocument)
        ));
    }
}
