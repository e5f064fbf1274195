//! Pixel decoding for P3 and P6 rasters.

use alloc::format;
use alloc::vec;

use enough::Stop;

use super::header::{self, Header, PpmFormat};
use super::reader::{Reader, Token, is_whitespace};
use crate::error::PpmError;
use crate::limits::{Limits, decoded_size};
use crate::pixel::{Pixel, PixelBuffer, SamplePolicy};
use crate::source::ByteSource;

/// Upper bound on the up-front pixel allocation. A header can claim any
/// size; past this the buffer grows only as pixels actually arrive.
const MAX_PREALLOC_PIXELS: usize = 1 << 22;

/// Pixels read per `read_exact` call in the binary raster.
const CHUNK_PIXELS: usize = 4096;

/// Decode the raster that follows `header`. `r` must be positioned at the
/// first pixel byte, which is where [`header::parse`] leaves it.
pub(crate) fn decode_pixels<S: ByteSource>(
    r: &mut Reader<S>,
    header: &Header,
    policy: SamplePolicy,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelBuffer, PpmError> {
    let out_bytes = decoded_size(header)?;
    if let Some(limits) = limits {
        limits.check_header(header)?;
    }

    stop.check()?;

    let pixels = match header.format() {
        PpmFormat::Binary => {
            // Fail a short raster up front rather than after allocating.
            if let Some(remaining) = r.remaining_hint() {
                if remaining < out_bytes {
                    return Err(PpmError::UnexpectedEof {
                        offset: r.offset() + remaining as u64,
                    });
                }
            }
            decode_binary(r, header, policy, stop)?
        }
        PpmFormat::Ascii => decode_ascii(r, header, policy, stop)?,
    };

    log::debug!(
        "decoded {} pixels from P{} raster",
        pixels.len(),
        header.format().tag()
    );
    Ok(pixels)
}

fn decode_binary<S: ByteSource>(
    r: &mut Reader<S>,
    header: &Header,
    policy: SamplePolicy,
    stop: &dyn Stop,
) -> Result<PixelBuffer, PpmError> {
    let total = header.width() as usize * header.height() as usize;
    let max = header.max_color();
    let mut out = PixelBuffer::with_capacity(total.min(MAX_PREALLOC_PIXELS));
    let mut chunk = vec![0u8; total.min(CHUNK_PIXELS) * 3];

    let mut index = 0;
    while index < total {
        stop.check()?;
        let n = (total - index).min(CHUNK_PIXELS);
        let bytes = &mut chunk[..n * 3];
        r.read_exact(bytes)?;
        for rgb in bytes.chunks_exact(3) {
            out.push(Pixel::new(
                sample(policy, u32::from(rgb[0]), max, index)?,
                sample(policy, u32::from(rgb[1]), max, index)?,
                sample(policy, u32::from(rgb[2]), max, index)?,
            ));
            index += 1;
        }
    }

    Ok(out)
}

fn decode_ascii<S: ByteSource>(
    r: &mut Reader<S>,
    header: &Header,
    policy: SamplePolicy,
    stop: &dyn Stop,
) -> Result<PixelBuffer, PpmError> {
    let w = header.width() as usize;
    let h = header.height() as usize;
    let max = header.max_color();
    let mut out = PixelBuffer::with_capacity((w * h).min(MAX_PREALLOC_PIXELS));

    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        for x in 0..w {
            let index = y * w + x;
            let red = sample(policy, ascii_sample(r, index)?, max, index)?;
            let green = sample(policy, ascii_sample(r, index)?, max, index)?;
            let blue = sample(policy, ascii_sample(r, index)?, max, index)?;
            out.push(Pixel::new(red, green, blue));
        }
    }

    Ok(out)
}

fn sample(policy: SamplePolicy, value: u32, max: u8, index: usize) -> Result<u8, PpmError> {
    policy.apply(value, max).map_err(|v| {
        PpmError::InvalidData(format!(
            "sample {v} at pixel {index} exceeds max color {max}"
        ))
    })
}

/// Scan one decimal sample, skipping whitespace and `#` comment lines
/// before it.
fn ascii_sample<S: ByteSource>(r: &mut Reader<S>, index: usize) -> Result<u32, PpmError> {
    loop {
        r.skip_whitespace()?;
        match r.next()? {
            Some(b'#') => {
                r.unread(b'#');
                header::skip_comments(r)?;
            }
            Some(b) => {
                r.unread(b);
                break;
            }
            None => break,
        }
    }

    match r.scan_u32()? {
        Token::Number(v) => {
            if let Some(b) = r.next()? {
                if !is_whitespace(b) && b != b'#' {
                    return Err(PpmError::InvalidData(format!(
                        "unexpected byte 0x{b:02x} after sample at pixel {index}"
                    )));
                }
                r.unread(b);
            }
            Ok(v)
        }
        Token::NotANumber(b) => Err(PpmError::InvalidData(format!(
            "expected a decimal sample at pixel {index}, found byte 0x{b:02x}"
        ))),
        Token::Overflow => Err(PpmError::InvalidData(format!(
            "sample at pixel {index} does not fit in 32 bits"
        ))),
        Token::End => Err(r.eof_error()),
    }
}
