use alloc::vec::Vec;
use core::ops::Deref;

use rgb::ComponentBytes as _;

/// One RGB sample, 8 bits per channel, no alpha.
pub type Pixel = rgb::Rgb<u8>;

/// What to do with a decoded channel value above the header's max color.
///
/// Samples are never rescaled to 0–255; the policy only decides whether an
/// out-of-range value is an error or how it is folded back into a byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SamplePolicy {
    /// Fail with [`crate::PpmError::InvalidData`].
    #[default]
    Reject,
    /// Saturate to max color.
    Clamp,
    /// Keep the low 8 bits of the scanned value.
    Wrap,
}

impl SamplePolicy {
    /// Apply the policy to one scanned channel value. `Err` carries the
    /// offending value back to the caller for its error message.
    pub(crate) fn apply(self, value: u32, max_color: u8) -> Result<u8, u32> {
        if value <= u32::from(max_color) {
            return Ok(value as u8);
        }
        match self {
            Self::Reject => Err(value),
            Self::Clamp => Ok(max_color),
            Self::Wrap => Ok((value & 0xff) as u8),
        }
    }
}

/// Decoded pixels in row-major order.
///
/// Holds exactly `width * height` pixels for the header it was decoded
/// with, but keeps no reference to that header; [`crate::DecodeOutput`]
/// carries the pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    pub fn new(pixels: Vec<Pixel>) -> Self {
        Self { pixels }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            pixels: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, pixel: Pixel) {
        self.pixels.push(pixel);
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Interleaved R, G, B bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_bytes()
    }

    pub fn into_vec(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Expand to RGBA with opaque alpha, the layout textures are uploaded in.
    pub fn to_rgba8(&self) -> Vec<rgb::Rgba<u8>> {
        self.pixels
            .iter()
            .map(|p| rgb::Rgba {
                r: p.r,
                g: p.g,
                b: p.b,
                a: 255,
            })
            .collect()
    }
}

impl Deref for PixelBuffer {
    type Target = [Pixel];

    fn deref(&self) -> &[Pixel] {
        &self.pixels
    }
}

impl From<Vec<Pixel>> for PixelBuffer {
    fn from(pixels: Vec<Pixel>) -> Self {
        Self::new(pixels)
    }
}
