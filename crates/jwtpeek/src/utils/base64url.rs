//! Base64URL encoding/decoding per RFC 4648
//!
//! Decoding is lenient: the URL-safe alphabet is mapped onto the
//! standard one, missing `=` padding is restored, and non-canonical trailing
//! bits are accepted. Anything outside the base64 alphabet is still rejected.

use crate::error::{Error, Result};
use base64::{
    Engine, alphabet,
    engine::general_purpose::URL_SAFE_NO_PAD,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encode bytes to an unpadded Base64URL string
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Encode a string to an unpadded Base64URL string
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Rewrite Base64URL text as padded standard base64
fn to_standard(input: &str) -> String {
    let mut base64: String = input
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    while base64.len() % 4 != 0 {
        base64.push('=');
    }

    base64
}

/// Decode a Base64URL string to bytes
pub fn decode_bytes(input: &str) -> Result<Vec<u8>> {
    LENIENT_STANDARD
        .decode(to_standard(input))
        .map_err(|e| Error::FormatInvalidBase64 {
            segment: None,
            reason: e.to_string(),
        })
}

/// Decode a Base64URL string to UTF-8 text
pub fn decode(input: &str) -> Result<String> {
    decode_bytes(input).and_then(into_utf8)
}

pub(crate) fn into_utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| Error::FormatInvalidUtf8 {
        segment: None,
        reason: e.utf8_error().to_string(),
    })
}
