//! Error types for webpify operations.

use core::fmt;
use std::path::PathBuf;

/// Result type for webpify operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for webpify operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// No positional input file was given.
    MissingInput,
    /// The quality value was not an integer in `1..=100`.
    InvalidQuality(String),
    /// Any other malformed command line (unknown flag, missing value).
    Usage(String),
    /// The input path does not exist.
    FileNotFound(PathBuf),
    /// The input could not be read or decoded as an image.
    Decode(String),
    /// Invalid encoder input (dimensions, buffer size).
    InvalidInput(String),
    /// Encoder configuration rejected by libwebp.
    InvalidConfig(String),
    /// libwebp failed to encode.
    EncodeFailed(EncodingError),
    /// The output file could not be written.
    Write {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O message.
        message: String,
    },
}

impl Error {
    /// Whether the usage text should be shown after this error.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::MissingInput)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingInput => write!(f, "No input file specified"),
            Error::InvalidQuality(_) => write!(f, "Quality must be a number between 1 and 100"),
            Error::Usage(msg) => write!(f, "{}", msg),
            Error::FileNotFound(path) => write!(f, "File not found: {}", path.display()),
            Error::Decode(msg) => write!(f, "{}", msg),
            Error::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
            Error::EncodeFailed(e) => write!(f, "encode failed: {}", e),
            Error::Write { path, message } => {
                write!(f, "failed to write {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

/// A libwebp encoder failure, holding the raw `WebPPicture::error_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingError(i32);

impl EncodingError {
    /// `VP8_ENC_ERROR_OUT_OF_MEMORY`, also used when importing pixels fails.
    pub const OUT_OF_MEMORY: EncodingError = EncodingError(1);

    /// The raw libwebp code.
    pub fn code(self) -> i32 {
        self.0
    }

    /// Human-readable text for the code.
    pub fn message(self) -> &'static str {
        match self.0 {
            0 => "ok",
            1 => "out of memory",
            2 => "bitstream out of memory",
            3 => "null parameter",
            4 => "invalid configuration",
            5 => "bad dimension",
            6 => "first partition exceeds 512k",
            7 => "partition exceeds 16M",
            8 => "writer failed",
            9 => "output exceeds 4G",
            10 => "aborted",
            _ => "unknown error",
        }
    }
}

impl From<i32> for EncodingError {
    fn from(code: i32) -> Self {
        EncodingError(code)
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message(), self.0)
    }
}
