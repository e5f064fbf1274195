//! PPM (Netpbm RGB): P3 text and P6 binary rasters.
//!
//! The functions here are the stream-level building blocks: parse a header,
//! then decode the raster from the same source, or write a header and
//! raster back out. [`crate::DecodeRequest`] and [`crate::EncodeRequest`]
//! wrap them with limits, sample policy and cancellation.

mod decode;
mod encode;
mod header;
mod reader;

pub use header::{Header, PpmFormat};

pub(crate) use decode::decode_pixels;
pub(crate) use encode::{encode_ppm, encoded_len_hint};
#[cfg(feature = "std")]
pub(crate) use encode::IoSink;
pub(crate) use header::parse as parse_header_from;
pub(crate) use reader::Reader;

use alloc::vec::Vec;
use enough::Unstoppable;

use crate::error::PpmError;
use crate::pixel::{Pixel, PixelBuffer, SamplePolicy};
use crate::source::ByteSource;

/// Parse a PPM header from `src`, leaving it at the first pixel byte.
///
/// Pass `&mut source` to keep using the source afterwards:
///
/// ```
/// let mut data: &[u8] = b"P6\n# made by hand\n1 1\n255\n\x10\x20\x30";
/// let header = zenppm::ppm::parse_header(&mut data)?;
/// assert_eq!((header.width(), header.height()), (1, 1));
/// let pixels = zenppm::ppm::decode(&header, &mut data)?;
/// assert_eq!(pixels.as_bytes(), &[0x10, 0x20, 0x30]);
/// # Ok::<(), zenppm::PpmError>(())
/// ```
pub fn parse_header<S: ByteSource>(src: S) -> Result<Header, PpmError> {
    // The separator byte is taken through the lookahead slot, so nothing
    // is left buffered in the reader when it is dropped.
    header::parse(&mut Reader::new(src))
}

/// Decode the raster for `header` from `src`.
///
/// Out-of-range samples are rejected and no limits apply; use
/// [`crate::DecodeRequest`] to configure either.
pub fn decode<S: ByteSource>(header: &Header, src: S) -> Result<PixelBuffer, PpmError> {
    decode_pixels(
        &mut Reader::new(src),
        header,
        SamplePolicy::Reject,
        None,
        &Unstoppable,
    )
}

/// Encode `header` and `pixels` into a new byte vector.
pub fn encode_to_vec(header: &Header, pixels: &[Pixel]) -> Result<Vec<u8>, PpmError> {
    let mut out = Vec::with_capacity(encoded_len_hint(header.format(), pixels));
    encode_ppm(header, pixels, &mut out, &Unstoppable)?;
    Ok(out)
}

/// Encode `header` and `pixels` into `writer`.
#[cfg(feature = "std")]
pub fn encode<W: std::io::Write>(
    header: &Header,
    pixels: &[Pixel],
    writer: W,
) -> Result<(), PpmError> {
    encode_ppm(header, pixels, &mut IoSink(writer), &Unstoppable)
}
