//! Byte sources the PPM reader can pull from.
//!
//! Slices work everywhere; any [`std::io::Read`] works through [`IoSource`]
//! when the `std` feature is on. Sources report end of input as `Ok(None)`
//! and leave turning that into [`PpmError::UnexpectedEof`] to the reader,
//! which knows the stream offset.

use crate::error::PpmError;

/// A blocking, forward-only stream of bytes.
pub trait ByteSource {
    /// Next byte, or `None` at end of input.
    fn read_byte(&mut self) -> Result<Option<u8>, PpmError>;

    /// Fill `buf` completely. Returns the number of bytes actually read,
    /// which is less than `buf.len()` only at end of input.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize, PpmError> {
        for (n, slot) in buf.iter_mut().enumerate() {
            match self.read_byte()? {
                Some(b) => *slot = b,
                None => return Ok(n),
            }
        }
        Ok(buf.len())
    }

    /// Bytes left, when the source knows.
    fn remaining_hint(&self) -> Option<usize> {
        None
    }
}

impl ByteSource for &[u8] {
    fn read_byte(&mut self) -> Result<Option<u8>, PpmError> {
        match self.split_first() {
            Some((&b, rest)) => {
                *self = rest;
                Ok(Some(b))
            }
            None => Ok(None),
        }
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize, PpmError> {
        let n = buf.len().min(self.len());
        let (head, rest) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = rest;
        Ok(n)
    }

    fn remaining_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> Result<Option<u8>, PpmError> {
        (**self).read_byte()
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize, PpmError> {
        (**self).read_into(buf)
    }

    fn remaining_hint(&self) -> Option<usize> {
        (**self).remaining_hint()
    }
}

/// Adapts a [`std::io::Read`] into a [`ByteSource`].
///
/// Reads are issued as-is; wrap unbuffered readers such as `File` in a
/// `BufReader`, since the header and ASCII raster are read a byte at a time.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> IoSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ByteSource for IoSource<R> {
    fn read_byte(&mut self) -> Result<Option<u8>, PpmError> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize, PpmError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_source_advances() {
        let data = [1u8, 2, 3, 4];
        let mut src: &[u8] = &data;
        assert_eq!(src.read_byte().unwrap(), Some(1));
        let mut buf = [0u8; 2];
        assert_eq!(src.read_into(&mut buf).unwrap(), 2);
        assert_eq!(buf, [2, 3]);
        assert_eq!(src.remaining_hint(), Some(1));
        let mut big = [0u8; 4];
        assert_eq!(src.read_into(&mut big).unwrap(), 1);
        assert_eq!(src.read_byte().unwrap(), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn io_source_short_read() {
        let mut src = IoSource::new(std::io::Cursor::new(alloc::vec![7u8, 8, 9]));
        let mut buf = [0u8; 5];
        assert_eq!(src.read_into(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &[7, 8, 9]);
        assert_eq!(src.read_byte().unwrap(), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn io_source_propagates_errors() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("device unplugged"))
            }
        }
        let mut src = IoSource::new(Broken);
        assert!(matches!(src.read_byte(), Err(PpmError::Io(_))));
    }
}
