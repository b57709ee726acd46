//! Content-type sniffing from magic bytes.
//!
//! Only the byte content is inspected; file names and declared MIME types
//! are never consulted.

use std::fmt;

use serde::{Deserialize, Serialize};

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const GIF87A_MAGIC: &[u8] = b"GIF87a";
const GIF89A_MAGIC: &[u8] = b"GIF89a";
const RIFF_MAGIC: &[u8] = b"RIFF";
const WEBP_MAGIC: &[u8] = b"WEBP";

const BMP_MAGIC: &[u8] = b"BM";
const TIFF_LE_MAGIC: &[u8] = b"II*\0";
const TIFF_BE_MAGIC: &[u8] = b"MM\0*";
const ICO_MAGIC: &[u8] = &[0x00, 0x00, 0x01, 0x00];
const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B, 0x08];

/// Signatures of formats that are recognised but not supported, used only
/// to produce a helpful label in errors.
const OTHER_SIGNATURES: &[(&[u8], &str)] = &[
    (BMP_MAGIC, "image/bmp"),
    (TIFF_LE_MAGIC, "image/tiff"),
    (TIFF_BE_MAGIC, "image/tiff"),
    (ICO_MAGIC, "image/x-icon"),
    (PDF_MAGIC, "application/pdf"),
    (ZIP_MAGIC, "application/zip"),
    (GZIP_MAGIC, "application/x-gzip"),
];

/// Image formats the dispatcher can route to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Jpeg,
    Png,
    Gif,
    Webp,
    Unknown,
}

impl ContentType {
    /// Classify a byte stream by its leading magic bytes.
    pub fn classify(bytes: &[u8]) -> Self {
        if bytes.starts_with(JPEG_MAGIC) {
            Self::Jpeg
        } else if bytes.starts_with(PNG_MAGIC) {
            Self::Png
        } else if bytes.starts_with(GIF87A_MAGIC) || bytes.starts_with(GIF89A_MAGIC) {
            Self::Gif
        } else if is_webp(bytes) {
            Self::Webp
        } else {
            Self::Unknown
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Unknown => "unknown",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::Webp => "WebP",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// `RIFF` <u32 size> `WEBP`
fn is_webp(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && bytes.starts_with(RIFF_MAGIC) && &bytes[8..12] == WEBP_MAGIC
}

/// Best-effort MIME label for any byte stream, for error reporting.
pub fn sniff_label(bytes: &[u8]) -> &'static str {
    let content_type = ContentType::classify(bytes);
    if content_type.is_supported() {
        return content_type.mime_type();
    }
    if let Some(label) = OTHER_SIGNATURES
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))
        .map(|&(_, label)| label)
    {
        return label;
    }
    if looks_like_text(bytes) {
        return "text/plain";
    }
    "unknown"
}

fn looks_like_text(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    !head.is_empty()
        && std::str::from_utf8(head).is_ok()
        && !head
            .iter()
            .any(|&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_jpeg() {
        assert_eq!(ContentType::classify(&[0xFF, 0xD8, 0xFF, 0xE0]), ContentType::Jpeg);
        assert_eq!(ContentType::classify(&[0xFF, 0xD8]), ContentType::Unknown);
    }

    #[test]
    fn test_classify_png() {
        assert_eq!(
            ContentType::classify(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00]),
            ContentType::Png
        );
        assert_eq!(ContentType::classify(b"\x89PNG"), ContentType::Unknown);
    }

    #[test]
    fn test_classify_gif() {
        assert_eq!(ContentType::classify(b"GIF87a...."), ContentType::Gif);
        assert_eq!(ContentType::classify(b"GIF89a"), ContentType::Gif);
        assert_eq!(ContentType::classify(b"GIF88a"), ContentType::Unknown);
    }

    #[test]
    fn test_classify_webp() {
        assert_eq!(
            ContentType::classify(b"RIFF\x24\x00\x00\x00WEBPVP8 "),
            ContentType::Webp
        );
        // RIFF container carrying audio
        assert_eq!(
            ContentType::classify(b"RIFF\x24\x00\x00\x00WAVEfmt "),
            ContentType::Unknown
        );
        assert_eq!(ContentType::classify(b"RIFF\x00\x00\x00\x00WEB"), ContentType::Unknown);
    }

    #[test]
    fn test_classify_empty_and_garbage() {
        assert_eq!(ContentType::classify(&[]), ContentType::Unknown);
        assert_eq!(ContentType::classify(&[0x00, 0x01, 0x02]), ContentType::Unknown);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ContentType::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ContentType::Webp.mime_type(), "image/webp");
        assert_eq!(ContentType::Unknown.mime_type(), "unknown");
        assert!(!ContentType::Unknown.is_supported());
        assert!(ContentType::Gif.is_supported());
    }

    #[test]
    fn test_sniff_label() {
        assert_eq!(sniff_label(&[0xFF, 0xD8, 0xFF]), "image/jpeg");
        assert_eq!(sniff_label(b"BM\x36\x00"), "image/bmp");
        assert_eq!(sniff_label(b"II*\0rest"), "image/tiff");
        assert_eq!(sniff_label(b"%PDF-1.7"), "application/pdf");
        assert_eq!(sniff_label(b"hello world\n"), "text/plain");
        assert_eq!(sniff_label(&[0x00, 0xFE, 0x13]), "unknown");
        assert_eq!(sniff_label(&[]), "unknown");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ContentType::Jpeg).unwrap(), "\"jpeg\"");
    }
}
