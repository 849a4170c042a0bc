//! Image metadata read from source files and from encoded WebP data.

use crate::error::{Error, Result};
use image::{ImageFormat, ImageReader};
use std::path::Path;

/// Dimensions and container format of a source image, read without decoding pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Detected format, if it could be guessed from content or extension.
    pub format: Option<ImageFormat>,
}

impl SourceInfo {
    /// Read the header of the image at `path`.
    ///
    /// The format is guessed from the file content first, then from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = open_reader(path)?;
        let format = reader.format();
        let (width, height) = reader.into_dimensions()?;

        Ok(SourceInfo {
            width,
            height,
            format,
        })
    }
}

pub(crate) fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>> {
    let reader = ImageReader::open(path)
        .map_err(|e| Error::Decode(format!("{}: {}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| Error::Decode(format!("{}: {}", path.display(), e)))?;
    Ok(reader)
}

/// Information about an encoded WebP bitstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebPInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Lossy (VP8) or lossless (VP8L).
    pub format: BitstreamFormat,
}

impl WebPInfo {
    /// Parse WebP headers without decoding.
    pub fn from_webp(data: &[u8]) -> Result<Self> {
        let mut width: i32 = 0;
        let mut height: i32 = 0;

        let ok =
            unsafe { libwebp_sys::WebPGetInfo(data.as_ptr(), data.len(), &mut width, &mut height) };
        if ok == 0 {
            return Err(Error::Decode("invalid WebP data".into()));
        }

        let mut features = core::mem::MaybeUninit::<libwebp_sys::WebPBitstreamFeatures>::uninit();
        let status = unsafe {
            libwebp_sys::WebPGetFeatures(data.as_ptr(), data.len(), features.as_mut_ptr())
        };
        if status != libwebp_sys::VP8StatusCode::VP8_STATUS_OK {
            return Err(Error::Decode(format!(
                "failed to read WebP features (status {})",
                status as i32
            )));
        }
        let features = unsafe { features.assume_init() };

        let format = match features.format {
            1 => BitstreamFormat::Lossy,
            2 => BitstreamFormat::Lossless,
            _ => BitstreamFormat::Undefined,
        };

        Ok(WebPInfo {
            width: width as u32,
            height: height as u32,
            format,
        })
    }
}

/// Bitstream format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum BitstreamFormat {
    /// Mixed or not determined.
    #[default]
    Undefined,
    /// Lossy compression (VP8).
    Lossy,
    /// Lossless compression (VP8L).
    Lossless,
}
