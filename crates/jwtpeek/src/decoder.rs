use crate::error::{Error, Result};
use crate::limits::{MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_TOKEN_LENGTH};
use crate::segment::{DecodedSegment, Segment, parse_object};
use crate::token::DecodedToken;
use crate::utils::base64url;

/// JWT header/payload decoder
///
/// The decoder is configured once and can be reused for any number of tokens.
/// It never looks at the signature segment beyond checking that it is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDecoder {
    config_max_token_length: Option<usize>,
    config_max_header_size: Option<usize>,
    config_max_payload_size: Option<usize>,
}

impl Default for TokenDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenDecoder {
    /// Create a new decoder with the size limits from [`crate::limits`]
    ///
    /// Use this for untrusted input. [`crate::decode`] applies no limits.
    pub fn new() -> Self {
        Self {
            config_max_token_length: Some(MAX_TOKEN_LENGTH),
            config_max_header_size: Some(MAX_DECODED_HEADER_SIZE),
            config_max_payload_size: Some(MAX_DECODED_PAYLOAD_SIZE),
        }
    }

    /// Maximum length of the whole token string in bytes
    pub fn max_token_length(&mut self, max: usize) -> &mut Self {
        self.config_max_token_length = Some(max);
        self
    }

    /// Maximum size of the decoded header in bytes
    pub fn max_header_size(&mut self, max: usize) -> &mut Self {
        self.config_max_header_size = Some(max);
        self
    }

    /// Maximum size of the decoded payload in bytes
    pub fn max_payload_size(&mut self, max: usize) -> &mut Self {
        self.config_max_payload_size = Some(max);
        self
    }

    /// Disable all size limits
    ///
    /// Only use this for input that does not come from an untrusted source.
    pub fn unbounded(&mut self) -> &mut Self {
        self.config_max_token_length = None;
        self.config_max_header_size = None;
        self.config_max_payload_size = None;
        self
    }

    /// Finish configuration
    pub fn build(&mut self) -> Self {
        self.clone()
    }
}

impl TokenDecoder {
    /// Decoder without size limits, used by the crate-level functions
    pub(crate) const UNBOUNDED: Self = Self {
        config_max_token_length: None,
        config_max_header_size: None,
        config_max_payload_size: None,
    };

    /// Decode the header and payload of a compact token
    ///
    /// The signature is neither decoded nor verified. Both outcomes are
    /// logged at `debug`; the returned error carries the reason.
    pub fn decode(&self, token: &str) -> Result<DecodedToken> {
        let result = self.decode_parts(token);
        match &result {
            Ok(decoded) => tracing::debug!(decoded = %decoded, "Decoded JWT"),
            Err(e) => tracing::debug!(error = %e, "Failed to decode JWT"),
        }
        result
    }

    /// Decode a compact token, reporting failure only through the log
    ///
    /// Returns `None` for every kind of failure and logs the reason at `warn`.
    /// Use [`TokenDecoder::decode`] to find out why a token was rejected.
    pub fn try_decode(&self, token: &str) -> Option<DecodedToken> {
        match self.decode_parts(token) {
            Ok(decoded) => {
                tracing::debug!(decoded = %decoded, "Decoded JWT");
                Some(decoded)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decode JWT");
                None
            }
        }
    }

    fn decode_parts(&self, token: &str) -> Result<DecodedToken> {
        // 1. Validate token string length
        if let Some(max) = self.config_max_token_length {
            if token.len() > max {
                return Err(Error::TokenTooLarge {
                    size: token.len(),
                    max,
                });
            }
        }

        // 2. Check token format (header, payload, signature)
        let (header_b64, payload_b64) = split_token(token)?;

        // 3. Decode and parse header and payload
        let header = decode_segment(Segment::Header, header_b64, self.config_max_header_size)?;
        let payload = decode_segment(Segment::Payload, payload_b64, self.config_max_payload_size)?;

        Ok(DecodedToken::new(header, payload))
    }
}

/// Split a compact token into its header and payload parts
///
/// All three parts must be present and non-empty, and there must be no fourth.
fn split_token(token: &str) -> Result<(&str, &str)> {
    let mut parts = token.split('.');
    let header_b64 = parts.next().ok_or(Error::FormatInvalid)?;
    let payload_b64 = parts.next().ok_or(Error::FormatInvalid)?;
    let signature_b64 = parts.next().ok_or(Error::FormatInvalid)?;
    if parts.next().is_some() {
        return Err(Error::FormatInvalid);
    }

    if header_b64.is_empty() || payload_b64.is_empty() || signature_b64.is_empty() {
        return Err(Error::FormatInvalid);
    }

    Ok((header_b64, payload_b64))
}

fn decode_segment(segment: Segment, input: &str, max_size: Option<usize>) -> Result<DecodedSegment> {
    let bytes = base64url::decode_bytes(input).map_err(|e| e.in_segment(segment))?;

    if let Some(max) = max_size {
        if bytes.len() > max {
            return Err(Error::SegmentTooLarge {
                segment,
                size: bytes.len(),
                max,
            });
        }
    }

    let text = base64url::into_utf8(bytes).map_err(|e| e.in_segment(segment))?;
    parse_object(segment, &text)
}
