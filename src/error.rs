use alloc::string::String;
use enough::StopReason;

/// Errors from PPM decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PpmError {
    #[error("malformed magic number: expected 'P', found byte 0x{found:02x}")]
    UnrecognizedFormat { found: u8 },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("comment block not terminated before end of input")]
    UnterminatedComment,

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: u64 },

    #[error("buffer too small: need {needed} pixels, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Coarse classification of a [`PpmError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not a well-formed P3/P6 image, or the pixel buffer
    /// handed to the encoder doesn't match its header.
    Format,
    /// The stream failed or ended early.
    Io,
    /// A configured or arithmetic size limit was hit.
    Limit,
    /// The caller's [`enough::Stop`] fired.
    Cancelled,
}

impl PpmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnrecognizedFormat { .. }
            | Self::InvalidHeader(_)
            | Self::UnterminatedComment
            | Self::UnsupportedVariant(_)
            | Self::InvalidData(_)
            | Self::BufferTooSmall { .. } => ErrorKind::Format,
            Self::UnexpectedEof { .. } => ErrorKind::Io,
            #[cfg(feature = "std")]
            Self::Io(_) => ErrorKind::Io,
            Self::DimensionsTooLarge { .. } | Self::LimitExceeded(_) => ErrorKind::Limit,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }
}

impl From<StopReason> for PpmError {
    fn from(r: StopReason) -> Self {
        PpmError::Cancelled(r)
    }
}
