//! # zenppm
//!
//! Streaming decoder and encoder for PPM images, the RGB member of the
//! Netpbm family, plus the window-free half of a minimal PPM viewer.
//!
//! ## Supported Formats
//!
//! - **P3**: decimal text samples, whitespace separated
//! - **P6**: raw bytes, three per pixel
//!
//! Both with max color up to 255. Comment lines (`#` to end of line) are
//! accepted between header fields and, for P3, inside the raster.
//!
//! ## Non-Goals
//!
//! - 16-bit samples (max color above 255)
//! - PBM/PGM/PAM/PFM
//! - Rescaling samples to the full 0–255 range, or any color management
//!
//! ## Usage
//!
//! ```
//! use zenppm::{DecodeRequest, EncodeRequest, ppm::PpmFormat};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = b"P3\n# two pixels\n2 1\n255\n255 0 0  0 255 0\n";
//!
//! // Probe without decoding
//! let header = zenppm::Header::from_bytes(data)?;
//! println!("{}x{} {:?}", header.width(), header.height(), header.format());
//!
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//! assert_eq!(decoded.pixels().as_bytes(), &[255, 0, 0, 0, 255, 0]);
//!
//! // Re-encode as binary P6
//! let encoded = EncodeRequest::ppm(PpmFormat::Binary)
//!     .encode(&decoded.header, decoded.pixels(), Unstoppable)?;
//! assert!(encoded.starts_with(b"P6\n2\n1\n255\n"));
//! # Ok::<(), zenppm::PpmError>(())
//! ```
//!
//! For a stream, parse the header and decode the raster in two steps with
//! [`ppm::parse_header`] and [`ppm::decode`], or use
//! [`DecodeRequest::from_reader`].

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod limits;
mod pixel;
mod source;

pub mod ppm;
#[cfg(feature = "std")]
pub mod view;

mod decode;
mod encode;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest, decode};
#[cfg(feature = "std")]
pub use decode::decode_reader;
pub use encode::EncodeRequest;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{ErrorKind, PpmError};
pub use limits::Limits;
pub use pixel::{Pixel, PixelBuffer, SamplePolicy};
pub use ppm::{Header, PpmFormat};
#[cfg(feature = "std")]
pub use source::IoSource;
pub use source::ByteSource;
