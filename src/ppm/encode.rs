//! PPM encoder: P3 and P6.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use enough::Stop;
use rgb::ComponentBytes as _;

use super::header::{Header, PpmFormat};
use crate::error::PpmError;
use crate::pixel::Pixel;

/// Destination for encoded bytes.
pub(crate) trait Sink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), PpmError>;
}

impl Sink for Vec<u8> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), PpmError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(feature = "std")]
pub(crate) struct IoSink<W>(pub(crate) W);

#[cfg(feature = "std")]
impl<W: std::io::Write> Sink for IoSink<W> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), PpmError> {
        Ok(self.0.write_all(bytes)?)
    }
}

/// Header block: tag, width, height and max color, one per line.
pub(crate) fn header_text(header: &Header) -> String {
    format!(
        "P{}\n{}\n{}\n{}\n",
        header.format().tag(),
        header.width(),
        header.height(),
        header.max_color()
    )
}

/// Upper bound on the encoded size, for pre-allocating output vectors.
/// Output size estimate for `pixels` written as `format`. Taken from the
/// buffer rather than the header, which may claim any size.
pub(crate) fn encoded_len_hint(format: PpmFormat, pixels: &[Pixel]) -> usize {
    let per_sample = match format {
        PpmFormat::Binary => 1,
        // Up to three digits and a newline.
        PpmFormat::Ascii => 4,
    };
    pixels
        .len()
        .saturating_mul(3 * per_sample)
        .saturating_add(48)
}

/// Write `header` followed by `pixels` in the header's format.
///
/// Header fields are written as given; samples are not checked against
/// max color.
pub(crate) fn encode_ppm(
    header: &Header,
    pixels: &[Pixel],
    sink: &mut dyn Sink,
    stop: &dyn Stop,
) -> Result<(), PpmError> {
    let width = header.width();
    let height = header.height();
    let expected = header
        .pixel_count()
        .ok_or(PpmError::DimensionsTooLarge { width, height })?;
    if pixels.len() < expected {
        return Err(PpmError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }
    if pixels.len() > expected {
        return Err(PpmError::InvalidData(format!(
            "buffer holds {} pixels but header declares {width}x{height}",
            pixels.len()
        )));
    }

    stop.check()?;

    sink.write_all(header_text(header).as_bytes())?;
    match header.format() {
        PpmFormat::Ascii => encode_ascii(pixels, width as usize, sink, stop)?,
        PpmFormat::Binary => encode_binary(pixels, width as usize, sink, stop)?,
    }

    log::debug!(
        "encoded {}x{} P{} image",
        width,
        height,
        header.format().tag()
    );
    Ok(())
}

fn encode_ascii(
    pixels: &[Pixel],
    w: usize,
    sink: &mut dyn Sink,
    stop: &dyn Stop,
) -> Result<(), PpmError> {
    // One value per line, red then green then blue.
    let mut text = String::with_capacity(w * 12);
    for (row_idx, row) in pixels.chunks_exact(w).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        text.clear();
        for p in row {
            // Writing to a String cannot fail.
            let _ = write!(text, "{}\n{}\n{}\n", p.r, p.g, p.b);
        }
        sink.write_all(text.as_bytes())?;
    }
    Ok(())
}

fn encode_binary(
    pixels: &[Pixel],
    w: usize,
    sink: &mut dyn Sink,
    stop: &dyn Stop,
) -> Result<(), PpmError> {
    for (row_idx, row) in pixels.chunks_exact(w).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        sink.write_all(row.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    fn encode(header: &Header, pixels: &[Pixel]) -> Result<Vec<u8>, PpmError> {
        let mut out = Vec::new();
        encode_ppm(header, pixels, &mut out, &Unstoppable)?;
        Ok(out)
    }

    #[test]
    fn ascii_one_value_per_line() {
        let header = Header::new(PpmFormat::Ascii, 2, 1, 255).unwrap();
        let out = encode(&header, &[Pixel::new(255, 0, 0), Pixel::new(0, 255, 7)]).unwrap();
        assert_eq!(out, b"P3\n2\n1\n255\n255\n0\n0\n0\n255\n7\n");
    }

    #[test]
    fn binary_raw_bytes() {
        let header = Header::new(PpmFormat::Binary, 1, 2, 200).unwrap();
        let out = encode(&header, &[Pixel::new(1, 2, 3), Pixel::new(10, 13, 35)]).unwrap();
        assert_eq!(out, b"P6\n1\n2\n200\n\x01\x02\x03\x0a\x0d\x23");
    }

    #[test]
    fn samples_written_verbatim_regardless_of_max_color() {
        let header = Header::new(PpmFormat::Ascii, 1, 1, 10).unwrap();
        let out = encode(&header, &[Pixel::new(200, 0, 0)]).unwrap();
        assert!(out.ends_with(b"10\n200\n0\n0\n"));
    }

    #[test]
    fn buffer_length_must_match() {
        let header = Header::new(PpmFormat::Binary, 2, 2, 255).unwrap();
        let short = vec![Pixel::new(0, 0, 0); 3];
        assert!(matches!(
            encode(&header, &short),
            Err(PpmError::BufferTooSmall {
                needed: 4,
                actual: 3
            })
        ));
        let long = vec![Pixel::new(0, 0, 0); 5];
        assert!(matches!(
            encode(&header, &long),
            Err(PpmError::InvalidData(_))
        ));
    }

    #[test]
    fn len_hint_covers_output() {
        let header = Header::new(PpmFormat::Ascii, 3, 3, 255).unwrap();
        let pixels = vec![Pixel::new(255, 255, 255); 9];
        let out = encode(&header, &pixels).unwrap();
        assert!(out.len() <= encoded_len_hint(header.format(), &pixels));
    }

    #[cfg(feature = "std")]
    #[test]
    fn write_errors_surface_as_io() {
        struct Full;
        impl std::io::Write for Full {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("no space left"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let header = Header::new(PpmFormat::Binary, 1, 1, 255).unwrap();
        let err = encode_ppm(
            &header,
            &[Pixel::new(0, 0, 0)],
            &mut IoSink(Full),
            &Unstoppable,
        )
        .unwrap_err();
        assert!(matches!(err, PpmError::Io(_)));
    }
}
