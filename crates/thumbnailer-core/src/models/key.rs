//! Object key decoding and extension gating
//!
//! S3 delivers object keys form-encoded: spaces arrive as `+` and everything
//! else outside the unreserved set as `%XX`. Replacing `+` must happen before
//! percent-decoding, otherwise an encoded plus (`%2B`) would turn into a space.

use std::fmt;

use percent_encoding::percent_decode_str;

use crate::constants::SUPPORTED_EXTENSIONS;
use crate::error::AppError;

/// Decoded object key, exactly as the storage service names the object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedKey(String);

impl ResolvedKey {
    /// Replace every `+` with a space, then percent-decode the result.
    ///
    /// Decoding is strict: a `%` that is not followed by two hex digits, or
    /// escapes that decode to invalid UTF-8, reject the key.
    pub fn resolve(raw: &str) -> Result<Self, AppError> {
        let spaced = raw.replace('+', " ");

        if let Some(position) = find_malformed_escape(&spaced) {
            return Err(AppError::InvalidKey {
                key: raw.to_string(),
                reason: format!("malformed percent-escape at byte {}", position),
            });
        }

        let decoded = percent_decode_str(&spaced)
            .decode_utf8()
            .map_err(|e| AppError::InvalidKey {
                key: raw.to_string(),
                reason: format!("decoded key is not valid UTF-8: {}", e),
            })?;

        Ok(ResolvedKey(decoded.into_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extension used for format gating.
    ///
    /// Everything after the last `.` on the key's first line, lowercased. When
    /// the first line has no `.` the whole key is returned, so `noext` yields
    /// `noext` and is rejected by the allow-list rather than treated as empty.
    pub fn extension(&self) -> Extension {
        let key = self.0.as_str();
        let first_line_end = key
            .find(|c: char| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
            .unwrap_or(key.len());

        let ext = match key[..first_line_end].rfind('.') {
            Some(dot) => &key[dot + 1..],
            None => key,
        };

        Extension(ext.to_lowercase())
    }
}

impl fmt::Display for ResolvedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResolvedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lowercase file extension of a resolved key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension(String);

impl Extension {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_supported(&self) -> bool {
        SUPPORTED_EXTENSIONS.contains(&self.0.as_str())
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Byte offset of the first `%` not followed by two hex digits
fn find_malformed_escape(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    bytes.iter().enumerate().find_map(|(i, &b)| {
        if b != b'%' {
            return None;
        }
        let well_formed = bytes.len() > i + 2
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        (!well_formed).then_some(i)
    })
}
