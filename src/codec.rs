//! Raster boundary between the grayscale [`Image`] and external image
//! formats.
//!
//! Decoding goes through an [`ImageCodec`], which yields a [`RawImage`]
//! with a colour mode. Only 8-bit grey and RGB-family modes convert to
//! grayscale; every other mode is rejected before any pixel is read.

use grid_labs_common::{ColorMode, RawImage};
use tracing::{debug, warn};

use crate::{
    config::Limits,
    data::Image,
    error::{Error, Result},
};

pub trait ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<RawImage>;
    fn encode(&self, raster: &RawImage) -> Result<Vec<u8>>;
}

/// Keeps rasters as JSON documents; useful for fixtures and debugging.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonRasterCodec;

impl ImageCodec for JsonRasterCodec {
    fn decode(&self, bytes: &[u8]) -> Result<RawImage> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn encode(&self, raster: &RawImage) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(raster)?)
    }
}

fn luma(red: u8, green: u8, blue: u8) -> f64 {
    (0.299 * red as f64 + 0.587 * green as f64 + 0.114 * blue as f64).round_ties_even()
}

impl Image {
    /// Converts a decoded raster to grayscale.
    pub fn from_raster(raster: &RawImage, limits: &Limits) -> Result<Self> {
        let mode = raster.mode;
        let grey = matches!(mode, ColorMode::L | ColorMode::La);
        let channels = match mode.channels() {
            Some(channels) if grey || mode.is_rgb_family() => channels,
            _ => {
                warn!("Rejecting raster in mode {}", mode);
                return Err(Error::UnsupportedFormat(mode));
            }
        };

        let pixels = Image::area(raster.width, raster.height)?;
        if pixels > limits.max_pixels {
            return Err(Error::TooLarge {
                cells: pixels,
                limit: limits.max_pixels,
            });
        }
        let expected = pixels
            .checked_mul(channels)
            .ok_or_else(|| Error::InvalidDimensions(vec![raster.width, raster.height]))?;
        if raster.data.len() != expected {
            return Err(Error::PixelCount {
                expected,
                actual: raster.data.len(),
            });
        }

        let values = raster
            .data
            .chunks(channels)
            .map(|p| {
                if mode.is_rgb_family() {
                    luma(p[0], p[1], p[2])
                } else {
                    p[0] as f64
                }
            })
            .collect();

        debug!("Decoded {}x{} {} raster", raster.width, raster.height, mode);
        Image::from_pixels(raster.width, raster.height, values)
    }

    /// Clipped `L` raster of this image.
    pub fn to_raster(&self) -> RawImage {
        RawImage {
            width: self.width,
            height: self.height,
            mode: ColorMode::L,
            data: self.clip().pixels.iter().map(|&c| c as u8).collect(),
        }
    }

    pub fn load<C: ImageCodec + ?Sized>(codec: &C, bytes: &[u8]) -> Result<Self> {
        Self::from_raster(&codec.decode(bytes)?, &Limits::from_env())
    }

    pub fn save<C: ImageCodec + ?Sized>(&self, codec: &C) -> Result<Vec<u8>> {
        codec.encode(&self.to_raster())
    }
}
