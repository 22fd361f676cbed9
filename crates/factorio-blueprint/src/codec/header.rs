//! zlib stream header (RFC 1950) check.
//!
//! `flate2` only notices a bad header on the first read. Blueprint strings
//! are rejected at construction instead, so the two header bytes are pulled
//! through the base64 layer up front and checked here.

use crate::error::DecodeError;

/// Compression method "deflate".
const CM_DEFLATE: u8 = 8;

/// Largest window size exponent allowed by RFC 1950 (32K window).
const MAX_CINFO: u8 = 7;

/// FDICT flag: a preset dictionary follows the header.
const FLAG_DICT: u8 = 0x20;

/// Checks the CMF/FLG pair at the start of a zlib stream.
///
/// Rejects non-deflate methods, oversized windows, a bad FCHECK and preset
/// dictionaries (blueprint strings never use one).
pub fn check_zlib_header(header: [u8; 2]) -> Result<(), DecodeError> {
    let [cmf, flg] = header;
    let method = cmf & 0x0F;
    let cinfo = cmf >> 4;
    let fcheck_ok = (u16::from(cmf) << 8 | u16::from(flg)) % 31 == 0;

    if method != CM_DEFLATE || cinfo > MAX_CINFO || !fcheck_ok || flg & FLAG_DICT != 0 {
        return Err(DecodeError::InvalidZlibHeader { header });
    }
    Ok(())
}
