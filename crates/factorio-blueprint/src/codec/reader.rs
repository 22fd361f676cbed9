//! Streaming decoder for blueprint strings.
//!
//! The layers are nested readers, outermost first:
//!
//! ```text
//! source ─▶ version byte ─▶ base64 DecoderReader ─▶ ZlibDecoder ─▶ JSON bytes
//! ```
//!
//! Nothing is buffered beyond what the base64 and inflate layers need, so
//! memory grows with the JSON produced rather than the encoded input.

use std::io::{self, Chain, Cursor, Read};

use base64::engine::general_purpose::{GeneralPurpose, STANDARD};
use base64::read::DecoderReader;
use flate2::read::ZlibDecoder;
use tracing::{debug, trace};

use crate::codec::header::check_zlib_header;
use crate::error::DecodeError;
use crate::limits::MAX_JSON_LEN;

type Base64Layer<R> = DecoderReader<'static, GeneralPurpose, Source<R>>;

/// The already-consumed zlib header is replayed in front of the rest of the
/// base64 output.
type ZlibLayer<R> = ZlibDecoder<Chain<Cursor<[u8; 2]>, Base64Layer<R>>>;

/// Options for decoding blueprint strings.
#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    /// Maximum number of inflated JSON bytes before reading fails with
    /// [`DecodeError::LengthExceedsLimit`].
    pub max_json_len: u64,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_json_len: MAX_JSON_LEN,
        }
    }
}

impl ReaderOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inflated size cap.
    pub fn max_json_len(mut self, max: u64) -> Self {
        self.max_json_len = max;
        self
    }
}

/// Reads the JSON document out of a blueprint string.
///
/// Construction consumes the version byte and validates the zlib header;
/// everything after that is decoded lazily as the caller reads. Errors
/// returned from [`Read::read`] wrap a [`DecodeError`], which
/// `DecodeError::from(io_error)` recovers.
///
/// Dropping the reader releases the inflate state; [`BlueprintReader::close`]
/// does the same and hands back the source.
pub struct BlueprintReader<R: Read> {
    version: u8,
    inner: ZlibLayer<R>,
    produced: u64,
    max_json_len: u64,
}

impl<R: Read> BlueprintReader<R> {
    /// Creates a reader with default options.
    pub fn new(source: R) -> Result<Self, DecodeError> {
        Self::with_options(source, ReaderOptions::default())
    }

    /// Creates a reader with the given options.
    ///
    /// Fails with [`DecodeError::UnexpectedEof`] if the input is empty or
    /// holds nothing after the version byte, and with
    /// [`DecodeError::InvalidZlibHeader`] if the compressed stream does not
    /// start with a valid zlib header.
    pub fn with_options(mut source: R, options: ReaderOptions) -> Result<Self, DecodeError> {
        let version = read_version(&mut source)?;

        let mut base64 = DecoderReader::new(Source(source), &STANDARD);
        let mut header = [0u8; 2];
        base64.read_exact(&mut header).map_err(|e| match DecodeError::from(e) {
            DecodeError::UnexpectedEof { .. } => DecodeError::UnexpectedEof {
                context: "zlib header",
            },
            other => other,
        })?;
        check_zlib_header(header)?;

        debug!(version, "blueprint string header accepted");

        Ok(Self {
            version,
            inner: ZlibDecoder::new(Cursor::new(header).chain(base64)),
            produced: 0,
            max_json_len: options.max_json_len,
        })
    }

    /// Returns the format-version tag read from the first byte.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the number of compressed (base64-decoded) bytes consumed.
    pub fn compressed_bytes_read(&self) -> u64 {
        self.inner.total_in()
    }

    /// Returns the number of JSON bytes produced so far.
    pub fn json_bytes_read(&self) -> u64 {
        self.produced
    }

    /// Releases the decoder state and returns the underlying source.
    pub fn close(self) -> R {
        let (_, base64) = self.inner.into_inner().into_inner();
        base64.into_inner().0
    }

    /// Attributes an error raised inside the layer stack.
    ///
    /// Source and base64 failures arrive tagged. Anything untagged comes from
    /// flate2: invalid data is deflate corruption, and an early end means the
    /// deflate stream was cut short.
    fn classify(&self, err: io::Error) -> DecodeError {
        let tagged = err.get_ref().is_some_and(|inner| {
            inner.is::<DecodeError>() || inner.is::<base64::DecodeError>()
        });
        if tagged {
            return DecodeError::from(err);
        }
        match err.kind() {
            io::ErrorKind::InvalidInput
            | io::ErrorKind::InvalidData
            | io::ErrorKind::UnexpectedEof => DecodeError::CorruptInput {
                offset: self.inner.total_in(),
            },
            _ => DecodeError::from(err),
        }
    }
}

impl<R: Read> Read for BlueprintReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self
            .inner
            .read(buf)
            .map_err(|e| self.classify(e).into_io())?;

        self.produced += n as u64;
        if self.produced > self.max_json_len {
            return Err(DecodeError::LengthExceedsLimit {
                field: "json",
                max: self.max_json_len,
            }
            .into_io());
        }

        if n == 0 {
            trace!(
                json = self.produced,
                compressed = self.inner.total_in(),
                "blueprint string fully inflated"
            );
        }
        Ok(n)
    }
}

impl<R: Read> std::fmt::Debug for BlueprintReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlueprintReader")
            .field("version", &self.version)
            .field("produced", &self.produced)
            .field("max_json_len", &self.max_json_len)
            .finish_non_exhaustive()
    }
}

/// The caller's source, below the base64 layer.
///
/// Its errors are tagged as [`DecodeError::Io`] so they are told apart from
/// flate2's own errors and reach the caller unchanged.
struct Source<R>(R);

impl<R: Read> Read for Source<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf).map_err(|e| {
            if e.kind() == io::ErrorKind::Interrupted {
                e
            } else {
                io::Error::new(e.kind(), DecodeError::Io(e))
            }
        })
    }
}

fn read_version<R: Read>(source: &mut R) -> Result<u8, DecodeError> {
    let mut tag = [0u8; 1];
    source.read_exact(&mut tag).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            DecodeError::UnexpectedEof {
                context: "version byte",
            }
        } else {
            DecodeError::Io(e)
        }
    })?;
    Ok(tag[0])
}
