//! # webpify
//!
//! Convert an image file to WebP at a chosen quality.
//!
//! Input images are decoded with the `image` crate (PNG, JPEG, GIF, BMP,
//! TIFF, WebP, ...) and re-encoded as lossy WebP through libwebp. The
//! output keeps the input's dimensions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use webpify::{parse_args, run, Command};
//!
//! if let Command::Convert(invocation) = parse_args(["photos/cat.png", "-q", "50"])? {
//!     let result = run(&invocation)?;
//!     println!("{}", result);
//! }
//! # Ok::<(), webpify::Error>(())
//! ```
//!
//! ## Encoding pixels directly
//!
//! ```rust
//! // Create a small 2x2 RGBA image (red, green, blue, white)
//! let rgba_data: Vec<u8> = vec![
//!     255, 0, 0, 255,    // red
//!     0, 255, 0, 255,    // green
//!     0, 0, 255, 255,    // blue
//!     255, 255, 255, 255 // white
//! ];
//!
//! let webp_bytes = webpify::encode_rgba(&rgba_data, 2, 2, 85.0)?;
//! let info = webpify::WebPInfo::from_webp(&webp_bytes)?;
//! assert_eq!((info.width, info.height), (2, 2));
//! # Ok::<(), webpify::Error>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

mod cli;
mod config;
mod convert;
mod encode;
mod error;
mod path;
mod types;

pub use cli::{parse_args, parse_quality, version_line, Command, Invocation, USAGE};
pub use config::{EncoderConfig, DEFAULT_QUALITY};
pub use convert::{convert, run, ConversionResult};
pub use encode::{encode_rgba, Encoder};
pub use error::{EncodingError, Error, Result};
pub use path::resolve_output_path;
pub use types::{BitstreamFormat, SourceInfo, WebPInfo};

