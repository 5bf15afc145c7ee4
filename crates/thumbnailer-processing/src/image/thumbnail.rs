//! Thumbnail generation
//!
//! The output is encoded in whatever format the bytes actually decode as,
//! which may differ from what the object key's extension suggests.

use crate::image::resize::ImageResize;
use anyhow::{anyhow, bail, Context};
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader, Limits};
use std::io::Cursor;
use thumbnailer_core::constants::{JPEG_QUALITY, MAX_DECODE_ALLOC, MAX_THUMBNAIL_HEIGHT};

/// Encoded thumbnail plus the dimensions involved
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub data: Bytes,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub source_width: u32,
    pub source_height: u32,
}

pub struct ThumbnailGenerator;

impl ThumbnailGenerator {
    /// Decode `data`, resize it to `width` and re-encode it in its own format.
    pub fn generate(data: &[u8], width: u32) -> Result<Thumbnail, anyhow::Error> {
        let mut reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .context("Failed to read image data")?;
        let mut limits = Limits::default();
        limits.max_alloc = Some(MAX_DECODE_ALLOC);
        reader.limits(limits);
        let format = reader
            .format()
            .ok_or_else(|| anyhow!("Unrecognized image format"))?;
        let img = reader
            .decode()
            .with_context(|| format!("Failed to decode {:?} image", format))?;

        let (source_width, source_height) = img.dimensions();
        let (_, target_height) =
            ImageResize::calculate_dimensions(source_width, source_height, width);
        if target_height > MAX_THUMBNAIL_HEIGHT {
            bail!(
                "Thumbnail of {}x{} source would be {}x{}, exceeding the {}px height limit",
                source_width,
                source_height,
                width,
                target_height,
                MAX_THUMBNAIL_HEIGHT
            );
        }

        let resized = ImageResize::resize_to_width(&img, width);
        let (width, height) = resized.dimensions();

        let encoded = Self::encode(&resized, format)
            .with_context(|| format!("Failed to encode {:?} thumbnail", format))?;

        tracing::debug!(
            format = ?format,
            source_width,
            source_height,
            width,
            height,
            size_bytes = encoded.len(),
            "Thumbnail generated"
        );

        Ok(Thumbnail {
            data: Bytes::from(encoded),
            format,
            width,
            height,
            source_width,
            source_height,
        })
    }

    fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, anyhow::Error> {
        let (width, height) = img.dimensions();
        let mut buffer = Vec::with_capacity(width as usize * height as usize * 3);

        match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
                img.write_with_encoder(encoder)?;
            }
            other => img.write_to(&mut Cursor::new(&mut buffer), other)?,
        }

        Ok(buffer)
    }
}
