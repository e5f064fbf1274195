use alloc::vec::Vec;

use enough::Stop;

use crate::error::PpmError;
use crate::pixel::Pixel;
use crate::ppm::{self, Header, PpmFormat};

/// Encode configuration.
///
/// By default the pixel encoding named in the header is used;
/// [`EncodeRequest::ppm`] forces one, which converts between P3 and P6.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest {
    format: Option<PpmFormat>,
}

impl EncodeRequest {
    /// Encode in whatever format the header names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode as `format`, ignoring the header's own.
    pub fn ppm(format: PpmFormat) -> Self {
        Self {
            format: Some(format),
        }
    }

    fn effective_header(&self, header: &Header) -> Header {
        match self.format {
            Some(format) => header.with_format(format),
            None => *header,
        }
    }

    pub fn encode(
        &self,
        header: &Header,
        pixels: &[Pixel],
        stop: impl Stop,
    ) -> Result<Vec<u8>, PpmError> {
        let header = self.effective_header(header);
        let mut out = Vec::with_capacity(ppm::encoded_len_hint(header.format(), pixels));
        ppm::encode_ppm(&header, pixels, &mut out, &stop)?;
        Ok(out)
    }

    #[cfg(feature = "std")]
    pub fn encode_to_writer<W: std::io::Write>(
        &self,
        header: &Header,
        pixels: &[Pixel],
        writer: W,
        stop: impl Stop,
    ) -> Result<(), PpmError> {
        let header = self.effective_header(header);
        ppm::encode_ppm(&header, pixels, &mut ppm::IoSink(writer), &stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    #[test]
    fn format_override() {
        let header = Header::new(PpmFormat::Ascii, 1, 1, 255).unwrap();
        let pixels = [Pixel::new(9, 8, 7)];
        let same = EncodeRequest::new()
            .encode(&header, &pixels, Unstoppable)
            .unwrap();
        assert!(same.starts_with(b"P3\n"));
        let binary = EncodeRequest::ppm(PpmFormat::Binary)
            .encode(&header, &pixels, Unstoppable)
            .unwrap();
        assert_eq!(binary, b"P6\n1\n1\n255\n\x09\x08\x07");
    }

    #[cfg(feature = "std")]
    #[test]
    fn writer_matches_vec() {
        let header = Header::new(PpmFormat::Ascii, 2, 1, 255).unwrap();
        let pixels = [Pixel::new(1, 2, 3), Pixel::new(4, 5, 6)];
        let request = EncodeRequest::new();
        let mut written = Vec::new();
        request
            .encode_to_writer(&header, &pixels, &mut written, Unstoppable)
            .unwrap();
        assert_eq!(written, request.encode(&header, &pixels, Unstoppable).unwrap());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_header_with_short_buffer() {
        // The header claims ~100 GB of output; nothing may be reserved
        // for it before the buffer length is checked.
        let header = Header::new(PpmFormat::Ascii, u32::MAX, 2, 255).unwrap();
        let err = EncodeRequest::new()
            .encode(&header, &[], Unstoppable)
            .unwrap_err();
        assert!(matches!(err, PpmError::BufferTooSmall { actual: 0, .. }));

        let header = Header::new(PpmFormat::Binary, u32::MAX, u32::MAX, 255).unwrap();
        let err = EncodeRequest::ppm(PpmFormat::Ascii)
            .encode(&header, &[Pixel::new(1, 2, 3)], Unstoppable)
            .unwrap_err();
        assert!(matches!(err, PpmError::BufferTooSmall { actual: 1, .. }));
    }
}
