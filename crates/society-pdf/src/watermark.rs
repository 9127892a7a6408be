//! Watermark raster decoding
//!
//! A watermark is kept as 8-bit RGB samples plus an optional 8-bit alpha
//! plane. The writer embeds the samples as an image XObject, with the alpha
//! plane as its soft mask.

use std::io::{Cursor, Write};

use base64::Engine;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::RenderError;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl WatermarkImage {
    /// Build from raw samples, checking plane sizes against the dimensions
    pub fn new(
        width: u32,
        height: u32,
        rgb: Vec<u8>,
        alpha: Option<Vec<u8>>,
    ) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidImage(format!(
                "empty image ({width}x{height})"
            )));
        }
        let pixels = width as usize * height as usize;
        if rgb.len() != pixels * 3 {
            return Err(RenderError::InvalidImage(format!(
                "expected {} RGB bytes, got {}",
                pixels * 3,
                rgb.len()
            )));
        }
        if let Some(plane) = &alpha {
            if plane.len() != pixels {
                return Err(RenderError::InvalidImage(format!(
                    "expected {} alpha bytes, got {}",
                    pixels,
                    plane.len()
                )));
            }
        }
        Ok(Self {
            width,
            height,
            rgb,
            alpha,
        })
    }

    /// Decode a PNG file of any color type and bit depth
    pub fn from_png(bytes: &[u8]) -> Result<Self, RenderError> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|e| RenderError::InvalidImage(e.to_string()))?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let frame = reader
            .next_frame(&mut buf)
            .map_err(|e| RenderError::InvalidImage(e.to_string()))?;
        let samples = &buf[..frame.buffer_size()];

        let (rgb, alpha) = match frame.color_type {
            png::ColorType::Rgb => (samples.to_vec(), None),
            png::ColorType::Rgba => split_alpha(samples, 4),
            png::ColorType::Grayscale => (samples.iter().flat_map(|&g| [g, g, g]).collect(), None),
            png::ColorType::GrayscaleAlpha => {
                let (gray, alpha) = split_alpha(samples, 2);
                (gray.iter().flat_map(|&g| [g, g, g]).collect(), alpha)
            }
            png::ColorType::Indexed => {
                return Err(RenderError::InvalidImage(
                    "indexed PNG was not expanded".to_string(),
                ))
            }
        };

        tracing::debug!(
            width = frame.width,
            height = frame.height,
            has_alpha = alpha.is_some(),
            "Decoded watermark PNG"
        );
        Self::new(frame.width, frame.height, rgb, alpha)
    }

    /// Decode a `data:image/png;base64,` URL
    pub fn from_data_url(url: &str) -> Result<Self, RenderError> {
        let payload = url.trim().strip_prefix(PNG_DATA_URL_PREFIX).ok_or_else(|| {
            RenderError::InvalidImage("expected a data:image/png;base64 URL".to_string())
        })?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| RenderError::InvalidImage(format!("bad base64 payload: {e}")))?;
        Self::from_png(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// RGB samples, zlib-compressed for a /FlateDecode stream
    pub fn compressed_rgb(&self) -> Result<Vec<u8>, RenderError> {
        deflate(&self.rgb)
    }

    /// Alpha plane, zlib-compressed, if the image has one
    pub fn compressed_alpha(&self) -> Result<Option<Vec<u8>>, RenderError> {
        self.alpha.as_deref().map(deflate).transpose()
    }
}

/// Split interleaved samples whose last channel is alpha
fn split_alpha(samples: &[u8], channels: usize) -> (Vec<u8>, Option<Vec<u8>>) {
    let mut color = Vec::with_capacity(samples.len() / channels * (channels - 1));
    let mut alpha = Vec::with_capacity(samples.len() / channels);
    for pixel in samples.chunks_exact(channels) {
        color.extend_from_slice(&pixel[..channels - 1]);
        alpha.push(pixel[channels - 1]);
    }
    (color, Some(alpha))
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
