//! Lossy WebP encoding through libwebp.

use crate::config::EncoderConfig;
use crate::error::{EncodingError, Error, Result};
use core::mem::MaybeUninit;
use imgref::ImgRef;
use rgb::RGBA8;

const MAX_DIMENSION: u32 = 16383;

/// Encode tightly packed RGBA pixels to WebP at the given quality.
///
/// # Example
///
/// ```rust
/// let rgba = vec![255u8; 8 * 8 * 4];
/// let webp = webpify::encode_rgba(&rgba, 8, 8, 75.0)?;
/// assert_eq!(&webp[8..12], b"WEBP");
/// # Ok::<(), webpify::Error>(())
/// ```
pub fn encode_rgba(data: &[u8], width: u32, height: u32, quality: f32) -> Result<Vec<u8>> {
    EncoderConfig::new()
        .quality(quality)
        .encode_rgba(data, width, height)
}

pub(crate) fn encode_packed_rgba(
    data: &[u8],
    width: u32,
    height: u32,
    config: &EncoderConfig,
) -> Result<Vec<u8>> {
    Encoder::new(data, width, height)
        .config(config.clone())
        .encode()
}

/// WebP encoder over a borrowed RGBA image.
///
/// ```rust
/// use imgref::Img;
/// use rgb::RGBA8;
/// use webpify::Encoder;
///
/// let pixels = vec![RGBA8::new(10, 200, 30, 255); 16 * 9];
/// let webp = Encoder::from_rgba(Img::new(&pixels[..], 16, 9))
///     .quality(60.0)
///     .encode()?;
/// let info = webpify::WebPInfo::from_webp(&webp)?;
/// assert_eq!((info.width, info.height), (16, 9));
/// # Ok::<(), webpify::Error>(())
/// ```
pub struct Encoder<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    /// Row stride in pixels.
    stride: usize,
    config: EncoderConfig,
}

impl<'a> Encoder<'a> {
    /// Create an encoder for tightly packed RGBA bytes.
    #[must_use]
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            stride: width as usize,
            config: EncoderConfig::default(),
        }
    }

    /// Create an encoder from an imgref `ImgRef<RGBA8>`. Row stride is honoured.
    #[must_use]
    pub fn from_rgba(image: ImgRef<'a, RGBA8>) -> Self {
        // SAFETY: RGBA8 is repr(C) and has the same layout as [u8; 4]
        let data = unsafe {
            core::slice::from_raw_parts(image.buf().as_ptr() as *const u8, image.buf().len() * 4)
        };
        Self {
            data,
            width: image.width() as u32,
            height: image.height() as u32,
            stride: image.stride(),
            config: EncoderConfig::default(),
        }
    }

    /// Set encoding quality (0.0 = smallest, 100.0 = best).
    #[must_use]
    pub fn quality(mut self, quality: f32) -> Self {
        self.config = self.config.quality(quality);
        self
    }

    /// Replace the full encoder configuration.
    #[must_use]
    pub fn config(mut self, config: EncoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Encode to WebP bytes.
    pub fn encode(self) -> Result<Vec<u8>> {
        let (width, height, stride, data) = (self.width, self.height, self.stride, self.data);
        validate_dimensions(width, height)?;
        if stride < width as usize {
            return Err(Error::InvalidInput(format!(
                "stride {} is smaller than width {}",
                stride, width
            )));
        }
        validate_buffer_size(data.len(), width, stride, height, 4)?;

        let webp_config = self.config.to_libwebp()?;

        let mut picture = libwebp_sys::WebPPicture::new()
            .map_err(|_| Error::InvalidConfig("failed to init picture".into()))?;

        picture.width = width as i32;
        picture.height = height as i32;
        picture.use_argb = 1;

        let import_ok = unsafe {
            libwebp_sys::WebPPictureImportRGBA(&mut picture, data.as_ptr(), (stride * 4) as i32)
        };

        if import_ok == 0 {
            unsafe { libwebp_sys::WebPPictureFree(&mut picture) };
            return Err(Error::EncodeFailed(EncodingError::OUT_OF_MEMORY));
        }

        let mut writer = MaybeUninit::<libwebp_sys::WebPMemoryWriter>::uninit();
        unsafe { libwebp_sys::WebPMemoryWriterInit(writer.as_mut_ptr()) };
        let mut writer = unsafe { writer.assume_init() };

        picture.writer = Some(libwebp_sys::WebPMemoryWrite);
        picture.custom_ptr = &mut writer as *mut _ as *mut _;

        let ok = unsafe { libwebp_sys::WebPEncode(&webp_config, &mut picture) };

        let result = if ok == 0 {
            Err(Error::EncodeFailed(EncodingError::from(
                picture.error_code as i32,
            )))
        } else {
            Ok(unsafe { core::slice::from_raw_parts(writer.mem, writer.size) }.to_vec())
        };

        unsafe {
            libwebp_sys::WebPPictureFree(&mut picture);
            libwebp_sys::WebPMemoryWriterClear(&mut writer);
        }

        log::debug!(
            "libwebp encoded {}x{} at quality {}",
            width,
            height,
            self.config.get_quality()
        );

        result
    }
}

pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(
            "width and height must be non-zero".into(),
        ));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Error::InvalidInput(format!(
            "dimensions exceed maximum ({} x {})",
            MAX_DIMENSION, MAX_DIMENSION
        )));
    }
    Ok(())
}

/// `stride` is in pixels. The last row only needs `width` pixels.
pub(crate) fn validate_buffer_size(
    size: usize,
    width: u32,
    stride: usize,
    height: u32,
    bpp: usize,
) -> Result<()> {
    let expected = stride
        .saturating_mul((height as usize).saturating_sub(1))
        .saturating_add(width as usize)
        .saturating_mul(bpp);

    if size < expected {
        return Err(Error::InvalidInput(format!(
            "buffer too small: got {}, expected {}",
            size, expected
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimensions() {
        assert!(validate_dimensions(0, 100).is_err());
        assert!(validate_dimensions(100, 0).is_err());
        assert!(validate_dimensions(20000, 100).is_err());
        assert!(validate_dimensions(100, 100).is_ok());
        assert!(validate_dimensions(MAX_DIMENSION, 1).is_ok());
    }

    #[test]
    fn test_validate_buffer_size() {
        assert!(validate_buffer_size(100, 10, 10, 10, 4).is_err());
        assert!(validate_buffer_size(400, 10, 10, 10, 4).is_ok());
        assert!(validate_buffer_size(500, 10, 10, 10, 4).is_ok());
        // strided: 9 full rows of 16 plus a last row of 10
        assert!(validate_buffer_size((16 * 9 + 10) * 4, 10, 16, 10, 4).is_ok());
        assert!(validate_buffer_size((16 * 9 + 9) * 4, 10, 16, 10, 4).is_err());
    }

    #[test]
    fn test_short_buffer_rejected_before_ffi() {
        let err = encode_rgba(&[0u8; 12], 2, 2, 80.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_strided_image_encodes() {
        use imgref::Img;

        // 6 pixel stride, 4 pixel wide view
        let buf = vec![RGBA8::new(0, 128, 255, 255); 6 * 5];
        let img = Img::new_stride(&buf[..], 4, 5, 6);
        let webp = Encoder::from_rgba(img).quality(70.0).encode().unwrap();
        let info = crate::WebPInfo::from_webp(&webp).unwrap();
        assert_eq!((info.width, info.height), (4, 5));
    }
}
