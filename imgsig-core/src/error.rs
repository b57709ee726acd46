use thiserror::Error;

use crate::format::ContentType;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImgsigError {
    #[error("unsupported content-type: {0}")]
    UnsupportedFormat(String),

    #[error("invalid format: {0}")]
    FormatError(String),

    #[error("failed to decode {content_type} image: {reason}")]
    NativeDecodeError {
        content_type: ContentType,
        reason: String,
    },
}

impl ImgsigError {
    /// True for errors caused by the image bytes rather than stored text.
    pub fn is_image_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat(_) | Self::NativeDecodeError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ImgsigError>;
