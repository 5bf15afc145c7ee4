//! Fixed pipeline parameters.

/// Width in pixels of every generated thumbnail. Height follows the source aspect ratio.
pub const THUMBNAIL_WIDTH: u32 = 200;

/// File extensions accepted by the format gate (compared lowercase).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Largest thumbnail height produced. Very tall or narrow sources are
/// rejected instead of being upscaled past this.
pub const MAX_THUMBNAIL_HEIGHT: u32 = 4096;

/// Upper bound on decoder allocations for a single source image.
pub const MAX_DECODE_ALLOC: u64 = 256 * 1024 * 1024;

/// Quality used when re-encoding JPEG thumbnails.
pub const JPEG_QUALITY: u8 = 80;

/// HTTP-style status reported to the runtime for a successful invocation.
pub const SUCCESS_STATUS_CODE: u16 = 200;
