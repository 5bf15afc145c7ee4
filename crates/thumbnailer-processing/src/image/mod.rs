//! Image processing module
//!
//! - Target dimension maths and filter selection (resize)
//! - Decode → resize → encode in the source format (thumbnail)

pub mod resize;
pub mod thumbnail;

pub use resize::ImageResize;
pub use thumbnail::{Thumbnail, ThumbnailGenerator};
