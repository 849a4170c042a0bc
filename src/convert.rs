//! Conversion of one input image to a WebP file.

use crate::cli::Invocation;
use crate::config::EncoderConfig;
use crate::encode::Encoder;
use crate::error::{Error, Result};
use crate::path::resolve_output_path;
use crate::types::{open_reader, SourceInfo, WebPInfo};
use core::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// The image that was read.
    pub input_path: PathBuf,
    /// Where the WebP file was written.
    pub output_path: PathBuf,
    /// Width in pixels, identical for input and output.
    pub width: u32,
    /// Height in pixels, identical for input and output.
    pub height: u32,
    /// Quality the encoder ran at.
    pub quality: u8,
    /// Size of the written file.
    pub bytes_written: usize,
}

/// Three-line summary shown after a conversion.
impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "✅ Converted: {} → {}",
            self.input_path.display(),
            self.output_path.display()
        )?;
        writeln!(f, "   Dimensions: {}x{}", self.width, self.height)?;
        write!(f, "   Quality: {}", self.quality)
    }
}

/// Check the input exists, derive the output path and convert.
///
/// The codec is never touched when the input is missing.
pub fn run(invocation: &Invocation) -> Result<ConversionResult> {
    let input = invocation.input();
    if !input.exists() {
        return Err(Error::FileNotFound(input.to_path_buf()));
    }

    let output = resolve_output_path(input, invocation.output());
    convert(input, &output, invocation.quality())
}

/// Convert `input` to a lossy WebP at `output`, keeping its dimensions.
///
/// `output` is created or truncated. Its parent directory must already exist.
pub fn convert(input: &Path, output: &Path, quality: u8) -> Result<ConversionResult> {
    let info = SourceInfo::from_path(input)?;
    log::debug!(
        "{}: {}x{} {:?}",
        input.display(),
        info.width,
        info.height,
        info.format
    );

    let rgba = open_reader(input)?.decode()?.into_rgba8();
    let (width, height) = rgba.dimensions();
    if (width, height) != (info.width, info.height) {
        return Err(Error::Decode(format!(
            "{}: decoded size {}x{} does not match header {}x{}",
            input.display(),
            width,
            height,
            info.width,
            info.height
        )));
    }

    let webp = Encoder::new(rgba.as_raw(), width, height)
        .config(EncoderConfig::new().quality(quality as f32))
        .encode()?;

    let written = WebPInfo::from_webp(&webp)?;
    if (written.width, written.height) != (width, height) {
        return Err(Error::InvalidInput(format!(
            "encoder produced {}x{} for a {}x{} image",
            written.width, written.height, width, height
        )));
    }

    fs::write(output, &webp).map_err(|e| Error::Write {
        path: output.to_path_buf(),
        message: e.to_string(),
    })?;

    log::info!(
        "wrote {} ({} bytes, {}x{}, quality {})",
        output.display(),
        webp.len(),
        width,
        height,
        quality
    );

    Ok(ConversionResult {
        input_path: input.to_path_buf(),
        output_path: output.to_path_buf(),
        width,
        height,
        quality,
        bytes_written: webp.len(),
    })
}
