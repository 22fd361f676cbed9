//! Streaming encoder for blueprint strings.
//!
//! Mirror image of the reader: JSON bytes go into a `ZlibEncoder`, whose
//! output goes into a base64 `EncoderWriter`, whose output goes to the sink
//! right after the version byte.

use std::io::{self, Write};
use std::mem;

use base64::engine::general_purpose::{GeneralPurpose, STANDARD};
use base64::write::EncoderWriter;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use tracing::debug;

type Base64Sink<W> = EncoderWriter<'static, GeneralPurpose, W>;

/// Options for encoding blueprint strings.
#[derive(Debug, Clone, Copy)]
pub struct WriterOptions {
    /// zlib compression level. Defaults to best compression, which is what
    /// the game itself exports.
    pub compression: Compression,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            compression: Compression::best(),
        }
    }
}

impl WriterOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

enum State<W: Write> {
    /// Nothing written yet, not even the version byte.
    Pending(W),
    /// Version byte written; payload flows through zlib and base64.
    Streaming(ZlibEncoder<Base64Sink<W>>),
    /// Only observable while a transition is in progress.
    Done,
}

/// Writes a blueprint string from raw JSON bytes.
///
/// The version byte is emitted exactly once, on the first non-empty write or
/// on [`BlueprintWriter::finish`], whichever comes first. All writes share one
/// compression context, so the output is a single zlib stream no matter how
/// the payload is split.
///
/// Call [`BlueprintWriter::finish`] to flush the compressor and the base64
/// padding. A writer dropped without finishing still releases its resources,
/// but the output of an unfinished stream may be truncated.
pub struct BlueprintWriter<W: Write> {
    version: u8,
    compression: Compression,
    state: State<W>,
}

impl<W: Write> BlueprintWriter<W> {
    /// Creates a writer with default options.
    pub fn new(sink: W, version: u8) -> Self {
        Self::with_options(sink, version, WriterOptions::default())
    }

    /// Creates a writer with the given options.
    pub fn with_options(sink: W, version: u8, options: WriterOptions) -> Self {
        Self {
            version,
            compression: options.compression,
            state: State::Pending(sink),
        }
    }

    /// Returns the format-version tag this writer emits.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Writes the version byte if needed and returns the compressor.
    fn start(&mut self) -> io::Result<&mut ZlibEncoder<Base64Sink<W>>> {
        if matches!(self.state, State::Pending(_)) {
            if let State::Pending(mut sink) = mem::replace(&mut self.state, State::Done) {
                if let Err(e) = sink.write_all(&[self.version]) {
                    self.state = State::Pending(sink);
                    return Err(e);
                }
                let base64 = EncoderWriter::new(sink, &STANDARD);
                self.state = State::Streaming(ZlibEncoder::new(base64, self.compression));
                debug!(version = self.version, "blueprint string started");
            }
        }

        match &mut self.state {
            State::Streaming(encoder) => Ok(encoder),
            _ => Err(io::Error::other("blueprint writer is finished")),
        }
    }

    /// Finishes the stream and returns the sink.
    ///
    /// If nothing was written the output is the version byte alone.
    pub fn finish(mut self) -> io::Result<W> {
        match mem::replace(&mut self.state, State::Done) {
            State::Pending(mut sink) => {
                sink.write_all(&[self.version])?;
                sink.flush()?;
                debug!(version = self.version, "empty blueprint string finished");
                Ok(sink)
            }
            State::Streaming(encoder) => {
                let json = encoder.total_in();
                let mut base64 = encoder.finish()?;
                let mut sink = base64.finish()?;
                sink.flush()?;
                debug!(version = self.version, json, "blueprint string finished");
                Ok(sink)
            }
            State::Done => Err(io::Error::other("blueprint writer is finished")),
        }
    }
}

impl<W: Write> Write for BlueprintWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.start()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.state {
            State::Pending(sink) => sink.flush(),
            State::Streaming(encoder) => encoder.flush(),
            State::Done => Ok(()),
        }
    }
}

impl<W: Write> std::fmt::Debug for BlueprintWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            State::Pending(_) => "pending",
            State::Streaming(_) => "streaming",
            State::Done => "done",
        };
        f.debug_struct("BlueprintWriter")
            .field("version", &self.version)
            .field("compression", &self.compression)
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;
    use crate::codec::reader::BlueprintReader;
    use crate::codec::testdata::EXAMPLE_JSON;

    fn decode(bytes: &[u8]) -> (u8, String) {
        let mut reader = BlueprintReader::new(bytes).unwrap();
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        (reader.version(), out)
    }

    #[test]
    fn test_writes_version_first() {
        let mut writer = BlueprintWriter::new(Vec::new(), 48);
        writer.write_all(EXAMPLE_JSON.as_bytes()).unwrap();
        let out = writer.finish().unwrap();

        assert_eq!(out[0], 48);
        assert!(out[1..].iter().all(|b| b.is_ascii_alphanumeric() || b"+/=".contains(b)));
    }

    #[test]
    fn test_roundtrip_through_reader() {
        let mut writer = BlueprintWriter::new(Vec::new(), b'0');
        writer.write_all(EXAMPLE_JSON.as_bytes()).unwrap();
        let out = writer.finish().unwrap();

        let (version, json) = decode(&out);
        assert_eq!(version, b'0');
        assert_eq!(json, EXAMPLE_JSON);
    }

    #[test]
    fn test_finish_without_writes_emits_only_version() {
        let writer = BlueprintWriter::new(Vec::new(), 7);
        assert_eq!(writer.finish().unwrap(), vec![7]);
    }

    #[test]
    fn test_empty_write_does_not_start_stream() {
        let mut writer = BlueprintWriter::new(Vec::new(), 7);
        assert_eq!(writer.write(&[]).unwrap(), 0);
        assert_eq!(writer.finish().unwrap(), vec![7]);
    }

    #[test]
    fn test_multiple_writes_form_one_stream() {
        let (head, tail) = EXAMPLE_JSON.split_at(100);
        let mut writer = BlueprintWriter::new(Vec::new(), b'0');
        writer.write_all(head.as_bytes()).unwrap();
        writer.flush().unwrap();
        writer.write_all(tail.as_bytes()).unwrap();
        let out = writer.finish().unwrap();

        assert_eq!(out[0], b'0');
        assert_eq!(decode(&out).1, EXAMPLE_JSON);
    }

    #[test]
    fn test_fast_compression_roundtrip() {
        let options = WriterOptions::new().compression(Compression::fast());
        let mut writer = BlueprintWriter::with_options(Vec::new(), 1, options);
        writer.write_all(EXAMPLE_JSON.as_bytes()).unwrap();
        let out = writer.finish().unwrap();
        assert_eq!(decode(&out), (1, EXAMPLE_JSON.to_string()));
    }

    #[test]
    fn test_sink_errors_pass_through() {
        #[derive(Debug)]
        struct Failing;
        impl Write for Failing {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut writer = BlueprintWriter::new(Failing, 0);
        let err = writer.write(b"{}").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        let err = writer.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
