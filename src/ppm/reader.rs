//! Byte reader with a one-byte lookahead slot.

use crate::error::PpmError;
use crate::source::ByteSource;

/// Whitespace as the C locale's `isspace` sees it.
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// Result of scanning one decimal token.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Token {
    Number(u32),
    /// First byte after the skipped whitespace was not a digit. It has been
    /// put back.
    NotANumber(u8),
    /// The digits don't fit in a `u32`.
    Overflow,
    /// Input ended before any digit.
    End,
}

/// Wraps a [`ByteSource`], counting consumed bytes and holding at most one
/// byte that was read and then put back.
pub(crate) struct Reader<S> {
    src: S,
    lookahead: Option<u8>,
    offset: u64,
}

impl<S: ByteSource> Reader<S> {
    pub(crate) fn new(src: S) -> Self {
        Self {
            src,
            lookahead: None,
            offset: 0,
        }
    }

    /// Bytes consumed so far (a put-back byte does not count).
    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    pub(crate) fn eof_error(&self) -> PpmError {
        PpmError::UnexpectedEof {
            offset: self.offset,
        }
    }

    pub(crate) fn next(&mut self) -> Result<Option<u8>, PpmError> {
        let byte = match self.lookahead.take() {
            Some(b) => Some(b),
            None => self.src.read_byte()?,
        };
        if byte.is_some() {
            self.offset += 1;
        }
        Ok(byte)
    }

    /// Next byte, treating end of input as an error.
    pub(crate) fn expect(&mut self) -> Result<u8, PpmError> {
        self.next()?.ok_or_else(|| self.eof_error())
    }

    /// Put back the byte most recently returned by [`Reader::next`].
    pub(crate) fn unread(&mut self, byte: u8) {
        debug_assert!(self.lookahead.is_none(), "lookahead slot already full");
        self.lookahead = Some(byte);
        self.offset -= 1;
    }

    pub(crate) fn skip_whitespace(&mut self) -> Result<(), PpmError> {
        while let Some(b) = self.next()? {
            if !is_whitespace(b) {
                self.unread(b);
                break;
            }
        }
        Ok(())
    }

    /// Skip whitespace, then read an unsigned decimal integer. The byte that
    /// ends the digits is put back.
    pub(crate) fn scan_u32(&mut self) -> Result<Token, PpmError> {
        self.skip_whitespace()?;
        let first = match self.next()? {
            Some(b) if b.is_ascii_digit() => b,
            Some(b) => {
                self.unread(b);
                return Ok(Token::NotANumber(b));
            }
            None => return Ok(Token::End),
        };
        let mut value = u32::from(first - b'0');
        let mut overflow = false;
        while let Some(b) = self.next()? {
            if !b.is_ascii_digit() {
                self.unread(b);
                break;
            }
            match value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(b - b'0')))
            {
                Some(v) => value = v,
                None => overflow = true,
            }
        }
        Ok(if overflow {
            Token::Overflow
        } else {
            Token::Number(value)
        })
    }

    /// Fill `buf` completely or fail with `UnexpectedEof`.
    pub(crate) fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), PpmError> {
        if buf.is_empty() {
            return Ok(());
        }
        let mut start = 0;
        if let Some(b) = self.lookahead.take() {
            buf[0] = b;
            self.offset += 1;
            start = 1;
        }
        let n = self.src.read_into(&mut buf[start..])?;
        self.offset += n as u64;
        if start + n < buf.len() {
            return Err(self.eof_error());
        }
        Ok(())
    }

    /// Bytes left, when the underlying source knows.
    pub(crate) fn remaining_hint(&self) -> Option<usize> {
        let pending = usize::from(self.lookahead.is_some());
        self.src.remaining_hint().map(|n| n + pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unread_is_seen_again() {
        let mut r = Reader::new(&b"ab"[..]);
        let a = r.expect().unwrap();
        assert_eq!(r.offset(), 1);
        r.unread(a);
        assert_eq!(r.offset(), 0);
        assert_eq!(r.expect().unwrap(), b'a');
        assert_eq!(r.expect().unwrap(), b'b');
        assert!(matches!(
            r.expect(),
            Err(PpmError::UnexpectedEof { offset: 2 })
        ));
    }

    #[test]
    fn scan_skips_leading_whitespace_and_stops_at_delimiter() {
        let mut r = Reader::new(&b" \n\t 1234 x"[..]);
        assert_eq!(r.scan_u32().unwrap(), Token::Number(1234));
        assert_eq!(r.expect().unwrap(), b' ');
        assert_eq!(r.scan_u32().unwrap(), Token::NotANumber(b'x'));
        assert_eq!(r.expect().unwrap(), b'x');
        assert_eq!(r.scan_u32().unwrap(), Token::End);
    }

    #[test]
    fn scan_rejects_sign_and_overflow() {
        let mut r = Reader::new(&b"-5"[..]);
        assert_eq!(r.scan_u32().unwrap(), Token::NotANumber(b'-'));
        let mut r = Reader::new(&b"4294967295 4294967296"[..]);
        assert_eq!(r.scan_u32().unwrap(), Token::Number(u32::MAX));
        assert_eq!(r.scan_u32().unwrap(), Token::Overflow);
    }

    #[test]
    fn read_exact_drains_lookahead_first() {
        let mut r = Reader::new(&b"xyz"[..]);
        let x = r.expect().unwrap();
        r.unread(x);
        assert_eq!(r.remaining_hint(), Some(3));
        let mut buf = [0u8; 3];
        r.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"xyz");
        assert_eq!(r.offset(), 3);
    }

    #[test]
    fn read_exact_short() {
        let mut r = Reader::new(&b"12345"[..]);
        let mut buf = [0u8; 6];
        assert!(matches!(
            r.read_exact(&mut buf),
            Err(PpmError::UnexpectedEof { offset: 5 })
        ));
    }
}
