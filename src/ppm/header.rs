//! PPM header: `P`, format tag, width, height, max color, one separator byte.

use alloc::format;

use super::reader::{Reader, Token, is_whitespace};
use crate::error::PpmError;
use crate::source::ByteSource;

/// Which PPM pixel encoding follows the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PpmFormat {
    /// P3: decimal text samples.
    Ascii,
    /// P6: raw bytes, three per pixel.
    Binary,
}

impl PpmFormat {
    /// The digit after the `P` magic byte.
    pub fn tag(self) -> u8 {
        match self {
            PpmFormat::Ascii => 3,
            PpmFormat::Binary => 6,
        }
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            3 => Some(PpmFormat::Ascii),
            6 => Some(PpmFormat::Binary),
            _ => None,
        }
    }
}

/// Parsed and validated PPM header.
///
/// Width and height are non-zero and max color is in `1..=255`; the
/// constructor and the parser both enforce this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    format: PpmFormat,
    width: u32,
    height: u32,
    max_color: u8,
}

impl Header {
    pub fn new(
        format: PpmFormat,
        width: u32,
        height: u32,
        max_color: u32,
    ) -> Result<Self, PpmError> {
        if width == 0 || height == 0 {
            return Err(PpmError::InvalidHeader(format!(
                "dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let max_color = check_max_color(max_color)?;
        Ok(Self {
            format,
            width,
            height,
            max_color,
        })
    }

    /// Parse just the header from the start of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PpmError> {
        parse(&mut Reader::new(data))
    }

    pub fn format(&self) -> PpmFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn max_color(&self) -> u8 {
        self.max_color
    }

    /// Same header with a different pixel encoding.
    pub fn with_format(self, format: PpmFormat) -> Self {
        Self { format, ..self }
    }

    /// `width * height`, or `None` if that overflows `usize`.
    pub fn pixel_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

fn check_max_color(max_color: u32) -> Result<u8, PpmError> {
    match max_color {
        0 => Err(PpmError::InvalidHeader("max color must be non-zero".into())),
        1..=255 => Ok(max_color as u8),
        _ => Err(PpmError::UnsupportedVariant(format!(
            "max color {max_color} exceeds 255; only 8-bit samples are supported"
        ))),
    }
}

/// Parse a header, leaving `r` at the first pixel byte.
pub(crate) fn parse<S: ByteSource>(r: &mut Reader<S>) -> Result<Header, PpmError> {
    let magic = r.expect()?;
    if magic != b'P' {
        return Err(PpmError::UnrecognizedFormat { found: magic });
    }

    let tag = field(r, "format tag")?;
    let format = PpmFormat::from_tag(tag)
        .ok_or_else(|| PpmError::UnsupportedVariant(format!("P{tag}")))?;
    r.skip_whitespace()?;
    skip_comments(r)?;

    let width = field(r, "width")?;
    r.skip_whitespace()?;
    skip_comments(r)?;

    let height = field(r, "height")?;
    r.skip_whitespace()?;
    skip_comments(r)?;

    let max_color = check_max_color(field(r, "max color")?)?;

    // Exactly one separator byte; comments are not skipped past this point.
    let sep = r.expect()?;
    if !is_whitespace(sep) {
        return Err(PpmError::InvalidHeader(format!(
            "expected a single whitespace byte after max color, found 0x{sep:02x}"
        )));
    }

    let header = Header::new(format, width, height, u32::from(max_color))?;
    log::debug!(
        "parsed PPM header: P{} {}x{} max {} ({} header bytes)",
        format.tag(),
        width,
        height,
        max_color,
        r.offset()
    );
    Ok(header)
}

fn field<S: ByteSource>(r: &mut Reader<S>, name: &str) -> Result<u32, PpmError> {
    match r.scan_u32()? {
        Token::Number(v) => Ok(v),
        Token::NotANumber(b) => Err(PpmError::InvalidHeader(format!(
            "{name}: expected a decimal integer, found byte 0x{b:02x}"
        ))),
        Token::Overflow => Err(PpmError::InvalidHeader(format!(
            "{name}: value does not fit in 32 bits"
        ))),
        Token::End => Err(r.eof_error()),
    }
}

/// Skip zero or more whole lines starting with `#`.
///
/// The first byte that doesn't start a comment is put back. End of input
/// right at a line start is left for the next read to report.
pub(crate) fn skip_comments<S: ByteSource>(r: &mut Reader<S>) -> Result<(), PpmError> {
    let mut byte = r.next()?;
    while byte == Some(b'#') {
        loop {
            match r.next()? {
                Some(b'\n') => break,
                Some(_) => {}
                None => return Err(PpmError::UnterminatedComment),
            }
        }
        log::trace!("skipped comment line ending at byte {}", r.offset());
        byte = r.next()?;
    }
    if let Some(b) = byte {
        r.unread(b);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_bytes(data: &[u8]) -> Result<(Header, u64), PpmError> {
        let mut r = Reader::new(data);
        let h = parse(&mut r)?;
        Ok((h, r.offset()))
    }

    #[test]
    fn minimal_ascii_header() {
        let (h, consumed) = parse_bytes(b"P3 2 1 255\n255 0 0").unwrap();
        assert_eq!(h.format(), PpmFormat::Ascii);
        assert_eq!((h.width(), h.height(), h.max_color()), (2, 1, 255));
        assert_eq!(consumed, 11);
    }

    #[test]
    fn one_line_per_field() {
        let (h, consumed) = parse_bytes(b"P6\n640\n480\n100\n\x00").unwrap();
        assert_eq!(h.format(), PpmFormat::Binary);
        assert_eq!((h.width(), h.height(), h.max_color()), (640, 480, 100));
        assert_eq!(consumed, 15);
    }

    #[test]
    fn comments_between_every_field() {
        let data = b"P3\n# one\n2\n# two\n# three\n3 # trailing\n# four\n255\n";
        let (h, consumed) = parse_bytes(data).unwrap();
        assert_eq!((h.width(), h.height(), h.max_color()), (2, 3, 255));
        assert_eq!(consumed, data.len() as u64);
    }

    #[test]
    fn comment_with_crlf_and_empty_comment() {
        let (h, _) = parse_bytes(b"P6\r\n#\n#x\r\n4 4 255\n").unwrap();
        assert_eq!((h.width(), h.height()), (4, 4));
    }

    #[test]
    fn wrong_magic_reads_one_byte() {
        let mut r = Reader::new(&b"Q3 1 1 255\n"[..]);
        assert!(matches!(
            parse(&mut r),
            Err(PpmError::UnrecognizedFormat { found: b'Q' })
        ));
        assert_eq!(r.offset(), 1);
    }

    #[test]
    fn unsupported_tags() {
        for data in [&b"P5 1 1 255\n"[..], b"P36 1 1 255\n", b"P0 1 1 255\n"] {
            assert!(matches!(
                parse_bytes(data),
                Err(PpmError::UnsupportedVariant(_))
            ));
        }
    }

    #[test]
    fn non_numeric_fields() {
        for data in [&b"P3 x 1 255\n"[..], b"P3 1 -1 255\n", b"Px 1 1 255\n"] {
            assert!(matches!(parse_bytes(data), Err(PpmError::InvalidHeader(_))));
        }
        let err = parse_bytes(b"P3 1 1 abc\n").unwrap_err();
        assert!(alloc::string::ToString::to_string(&err).contains("max color"));
    }

    #[test]
    fn max_color_range() {
        assert!(matches!(
            parse_bytes(b"P6 1 1 256\n\x00\x00\x00"),
            Err(PpmError::UnsupportedVariant(_))
        ));
        assert!(matches!(
            parse_bytes(b"P6 1 1 65535\n"),
            Err(PpmError::UnsupportedVariant(_))
        ));
        assert!(matches!(
            parse_bytes(b"P6 1 1 0\n"),
            Err(PpmError::InvalidHeader(_))
        ));
    }

    #[test]
    fn zero_dimensions() {
        assert!(matches!(
            parse_bytes(b"P6 0 1 255\n"),
            Err(PpmError::InvalidHeader(_))
        ));
        assert!(matches!(
            parse_bytes(b"P6 1 0 255\n"),
            Err(PpmError::InvalidHeader(_))
        ));
    }

    #[test]
    fn separator_must_be_whitespace() {
        assert!(matches!(
            parse_bytes(b"P6 1 1 255#\n"),
            Err(PpmError::InvalidHeader(_))
        ));
    }

    #[test]
    fn truncated_headers() {
        for data in [
            &b""[..],
            b"P",
            b"P6",
            b"P6 1",
            b"P6 1 1",
            b"P6 1 1 255",
            b"P6\n# dangling\n",
        ] {
            assert!(
                matches!(parse_bytes(data), Err(PpmError::UnexpectedEof { .. })),
                "{data:?}"
            );
        }
    }

    #[test]
    fn unterminated_comment() {
        assert!(matches!(
            parse_bytes(b"P6 1 # no newline"),
            Err(PpmError::UnterminatedComment)
        ));
    }

    #[test]
    fn skip_comments_puts_back_first_data_byte() {
        let mut r = Reader::new(&b"# a\n# b\n7"[..]);
        skip_comments(&mut r).unwrap();
        assert_eq!(r.expect().unwrap(), b'7');

        let mut r = Reader::new(&b"7"[..]);
        skip_comments(&mut r).unwrap();
        assert_eq!(r.offset(), 0);
        assert_eq!(r.expect().unwrap(), b'7');

        let mut r = Reader::new(&b""[..]);
        skip_comments(&mut r).unwrap();
    }

    #[test]
    fn constructor_validates() {
        assert!(Header::new(PpmFormat::Ascii, 1, 1, 255).is_ok());
        assert!(Header::new(PpmFormat::Ascii, 0, 1, 255).is_err());
        assert!(Header::new(PpmFormat::Ascii, 1, 1, 256).is_err());
        let h = Header::new(PpmFormat::Ascii, 4, 2, 15).unwrap();
        assert_eq!(h.with_format(PpmFormat::Binary).format(), PpmFormat::Binary);
        assert_eq!(h.pixel_count(), Some(8));
        assert_eq!(h.aspect_ratio(), 2.0);
    }
}
