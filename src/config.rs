//! Encoder configuration.

use crate::error::{Error, Result};

/// Default quality used when none is given on the command line.
pub const DEFAULT_QUALITY: u8 = 80;

/// Lossy WebP encoder configuration. Dimension-independent, reusable across images.
///
/// # Example
///
/// ```rust
/// use webpify::EncoderConfig;
///
/// let config = EncoderConfig::new().quality(50.0).method(4);
///
/// let rgba = vec![0u8; 4 * 4 * 4]; // 4x4 RGBA
/// let webp = config.encode_rgba(&rgba, 4, 4)?;
/// assert_eq!(&webp[..4], b"RIFF");
/// # Ok::<(), webpify::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    pub(crate) quality: f32,
    pub(crate) method: u8,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY as f32,
            method: 4,
        }
    }
}

impl EncoderConfig {
    /// Create a configuration at the default quality and method 4.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set encoding quality (0.0 = smallest, 100.0 = best).
    #[must_use]
    pub fn quality(mut self, quality: f32) -> Self {
        self.quality = quality.clamp(0.0, 100.0);
        self
    }

    /// Set quality/speed tradeoff (0 = fast, 6 = slower but better).
    #[must_use]
    pub fn method(mut self, method: u8) -> Self {
        self.method = method.min(6);
        self
    }

    /// Encode RGBA pixel data (4 bytes per pixel, tightly packed).
    pub fn encode_rgba(&self, data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        crate::encode::encode_packed_rgba(data, width, height, self)
    }

    pub(crate) fn to_libwebp(&self) -> Result<libwebp_sys::WebPConfig> {
        let mut config = libwebp_sys::WebPConfig::new_with_preset(
            libwebp_sys::WebPPreset::WEBP_PRESET_DEFAULT,
            self.quality,
        )
        .map_err(|_| Error::InvalidConfig("failed to initialize config".into()))?;

        config.lossless = 0;
        config.method = self.method as i32;

        if unsafe { libwebp_sys::WebPValidateConfig(&config) } == 0 {
            return Err(Error::InvalidConfig("config validation failed".into()));
        }

        Ok(config)
    }

    /// Get the quality setting.
    #[must_use]
    pub fn get_quality(&self) -> f32 {
        self.quality
    }

    /// Get the method.
    #[must_use]
    pub fn get_method(&self) -> u8 {
        self.method
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EncoderConfig::new();
        assert_eq!(config.get_quality(), 80.0);
        assert_eq!(config.get_method(), 4);
        assert!(config.to_libwebp().is_ok());
    }

    #[test]
    fn test_builder_clamps() {
        let config = EncoderConfig::new().quality(150.0).method(9);
        assert_eq!(config.get_quality(), 100.0);
        assert_eq!(config.get_method(), 6);

        let config = EncoderConfig::new().quality(-3.0);
        assert_eq!(config.get_quality(), 0.0);
    }

    #[test]
    fn test_boundary_qualities_validate() {
        for q in [1.0, 50.0, 100.0] {
            assert!(EncoderConfig::new().quality(q).to_libwebp().is_ok(), "q={}", q);
        }
    }
}
