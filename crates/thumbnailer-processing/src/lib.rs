//! Thumbnailer Processing Library
//!
//! Decoding, fixed-width resizing and re-encoding of source images.

pub mod image;

pub use crate::image::{ImageResize, Thumbnail, ThumbnailGenerator};
