//! Errors for jwtpeek

use crate::segment::Segment;
use thiserror::Error;

/// JWTPeek Errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid JWT format: expected three non-empty parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed{}: {reason}", segment_label(.segment))]
    FormatInvalidBase64 {
        segment: Option<Segment>,
        reason: String,
    },

    #[error("Decoded bytes are not valid UTF-8{}: {reason}", segment_label(.segment))]
    FormatInvalidUtf8 {
        segment: Option<Segment>,
        reason: String,
    },

    #[error("JSON parsing failed for {segment}: {reason}")]
    FormatInvalidJson { segment: Segment, reason: String },

    // ============================================================================
    // Limit Errors
    // ============================================================================
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Decoded {segment} too large: {size} bytes (maximum: {max} bytes)")]
    SegmentTooLarge {
        segment: Segment,
        size: usize,
        max: usize,
    },
}

/// Coarse failure categories, for callers that branch on the cause only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The token does not split into three non-empty segments
    Structure,
    /// A segment is not Base64URL or does not decode to UTF-8 text
    Decoding,
    /// A decoded segment is not a JSON object
    Parse,
    /// A configured size limit was exceeded
    Limit,
}

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FormatInvalid => ErrorKind::Structure,
            Error::FormatInvalidBase64 { .. } | Error::FormatInvalidUtf8 { .. } => {
                ErrorKind::Decoding
            }
            Error::FormatInvalidJson { .. } => ErrorKind::Parse,
            Error::TokenTooLarge { .. } | Error::SegmentTooLarge { .. } => ErrorKind::Limit,
        }
    }

    /// Segment the error was raised for, if any
    pub fn segment(&self) -> Option<Segment> {
        match self {
            Error::FormatInvalidBase64 { segment, .. } | Error::FormatInvalidUtf8 { segment, .. } => {
                *segment
            }
            Error::FormatInvalidJson { segment, .. } | Error::SegmentTooLarge { segment, .. } => {
                Some(*segment)
            }
            Error::FormatInvalid | Error::TokenTooLarge { .. } => None,
        }
    }

    /// Attach the segment to an untagged decoding error
    pub(crate) fn in_segment(self, segment: Segment) -> Self {
        match self {
            Error::FormatInvalidBase64 { reason, .. } => Error::FormatInvalidBase64 {
                segment: Some(segment),
                reason,
            },
            Error::FormatInvalidUtf8 { reason, .. } => Error::FormatInvalidUtf8 {
                segment: Some(segment),
                reason,
            },
            other => other,
        }
    }
}

fn segment_label(segment: &Option<Segment>) -> String {
    segment.map(|s| format!(" for {s}")).unwrap_or_default()
}

/// Result type alias for JWTPeek operations
pub type Result<T> = std::result::Result<T, Error>;
