use enough::Stop;

use crate::error::PpmError;
use crate::limits::Limits;
#[cfg(feature = "imgref")]
use crate::pixel::Pixel;
use crate::pixel::{PixelBuffer, SamplePolicy};
use crate::ppm::{self, Header, Reader};
use crate::source::ByteSource;
#[cfg(feature = "std")]
use crate::source::IoSource;

/// A decoded image: the header and the pixels it describes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOutput {
    pub header: Header,
    pixels: PixelBuffer,
}

impl DecodeOutput {
    pub fn width(&self) -> u32 {
        self.header.width()
    }

    pub fn height(&self) -> u32 {
        self.header.height()
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn into_parts(self) -> (Header, PixelBuffer) {
        (self.header, self.pixels)
    }

    /// Zero-copy 2D view of the pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Pixel> {
        imgref::ImgRef::new(
            self.pixels.pixels(),
            self.header.width() as usize,
            self.header.height() as usize,
        )
    }

    /// Copy the pixels into an owned [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<Pixel> {
        imgref::ImgVec::new(
            self.pixels.pixels().to_vec(),
            self.header.width() as usize,
            self.header.height() as usize,
        )
    }
}

/// Decode configuration: where to read from, limits and sample policy.
///
/// ```
/// use zenppm::{DecodeRequest, Limits, SamplePolicy, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(1 << 20), ..Default::default() };
/// let out = DecodeRequest::new(b"P3 1 1 100\n0 50 120\n")
///     .with_limits(&limits)
///     .with_sample_policy(SamplePolicy::Clamp)
///     .decode(Unstoppable)?;
/// assert_eq!(out.pixels().as_bytes(), &[0, 50, 100]);
/// # Ok::<(), zenppm::PpmError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<S> {
    source: S,
    limits: Option<Limits>,
    policy: SamplePolicy,
}

impl<'a> DecodeRequest<&'a [u8]> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::from_source(data)
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> DecodeRequest<IoSource<R>> {
    /// Decode from any reader. Wrap files in a `BufReader`.
    pub fn from_reader(reader: R) -> Self {
        Self::from_source(IoSource::new(reader))
    }
}

impl<S: ByteSource> DecodeRequest<S> {
    pub fn from_source(source: S) -> Self {
        Self {
            source,
            limits: None,
            policy: SamplePolicy::default(),
        }
    }

    pub fn with_limits(mut self, limits: &Limits) -> Self {
        self.limits = Some(limits.clone());
        self
    }

    pub fn with_sample_policy(mut self, policy: SamplePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parse the header and decode the raster. Nothing partial is returned
    /// on error.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, PpmError> {
        let mut reader = Reader::new(self.source);
        let header = ppm::parse_header_from(&mut reader)?;
        let pixels =
            ppm::decode_pixels(&mut reader, &header, self.policy, self.limits.as_ref(), &stop)?;
        Ok(DecodeOutput { header, pixels })
    }
}

/// Decode a PPM held in memory with default settings.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, PpmError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode a PPM from a reader with default settings.
#[cfg(feature = "std")]
pub fn decode_reader<R: std::io::Read>(
    reader: R,
    stop: impl Stop,
) -> Result<DecodeOutput, PpmError> {
    DecodeRequest::from_reader(reader).decode(stop)
}
