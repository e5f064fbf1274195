use alloc::format;

use crate::error::PpmError;
use crate::ppm::Header;

/// Resource caps for decoding, checked against the parsed [`Header`]
/// before any pixel storage is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the decoded RGB buffer, three bytes per pixel.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject `header` if decoding it would exceed any cap.
    pub(crate) fn check_header(&self, header: &Header) -> Result<(), PpmError> {
        let width = u64::from(header.width());
        let height = u64::from(header.height());
        let bytes = decoded_size(header)? as u64;

        let caps = [
            ("width", width, self.max_width),
            ("height", height, self.max_height),
            ("pixel count", width * height, self.max_pixels),
            ("decoded size (bytes)", bytes, self.max_memory_bytes),
        ];
        for (what, value, cap) in caps {
            match cap {
                Some(cap) if value > cap => {
                    return Err(PpmError::LimitExceeded(format!(
                        "P{} {what} {value} exceeds limit {cap}",
                        header.format().tag()
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Bytes needed for the decoded raster of `header`, or
/// [`PpmError::DimensionsTooLarge`] if that overflows `usize`.
pub(crate) fn decoded_size(header: &Header) -> Result<usize, PpmError> {
    header
        .pixel_count()
        .and_then(|n| n.checked_mul(3))
        .ok_or(PpmError::DimensionsTooLarge {
            width: header.width(),
            height: header.height(),
        })
}
