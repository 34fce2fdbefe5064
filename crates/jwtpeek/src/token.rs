use crate::error::{Error, Result};
use crate::segment::{DecodedSegment, Segment};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Header and payload of a compact token, decoded but not verified
///
/// Nothing in here is trustworthy until the signature has been checked by
/// other means. The accessors only read values; no claim is enforced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedToken {
    header: DecodedSegment,
    payload: DecodedSegment,
}

impl DecodedToken {
    pub(crate) fn new(header: DecodedSegment, payload: DecodedSegment) -> Self {
        Self { header, payload }
    }

    /// Decoded header object
    pub fn header(&self) -> &DecodedSegment {
        &self.header
    }

    /// Decoded payload object
    pub fn payload(&self) -> &DecodedSegment {
        &self.payload
    }

    /// Split into `(header, payload)`
    pub fn into_parts(self) -> (DecodedSegment, DecodedSegment) {
        (self.header, self.payload)
    }

    // ============================================================================
    // Header parameters
    // ============================================================================

    /// Algorithm (`alg`) as declared by the token, not checked against anything
    pub fn algorithm(&self) -> Option<&str> {
        string_field(&self.header, "alg")
    }

    /// Token type (`typ`), typically "JWT"
    pub fn token_type(&self) -> Option<&str> {
        string_field(&self.header, "typ")
    }

    /// Key ID (`kid`)
    pub fn key_id(&self) -> Option<&str> {
        string_field(&self.header, "kid")
    }

    /// Content type (`cty`)
    pub fn content_type(&self) -> Option<&str> {
        string_field(&self.header, "cty")
    }

    // ============================================================================
    // Payload claims
    // ============================================================================

    /// Any payload claim by name
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    /// Issuer (`iss`)
    pub fn issuer(&self) -> Option<&str> {
        string_field(&self.payload, "iss")
    }

    /// Subject (`sub`)
    pub fn subject(&self) -> Option<&str> {
        string_field(&self.payload, "sub")
    }

    /// JWT ID (`jti`)
    pub fn jwt_id(&self) -> Option<&str> {
        string_field(&self.payload, "jti")
    }

    /// Audience (`aud`), accepting both the single-string and the array form
    ///
    /// Non-string array entries are skipped.
    pub fn audience(&self) -> Vec<&str> {
        match self.payload.get("aud") {
            Some(Value::String(aud)) => vec![aud.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Expiration time (`exp`) in seconds since the Unix epoch
    pub fn expiration(&self) -> Option<i64> {
        numeric_date(&self.payload, "exp")
    }

    /// Not before (`nbf`) in seconds since the Unix epoch
    pub fn not_before(&self) -> Option<i64> {
        numeric_date(&self.payload, "nbf")
    }

    /// Issued at (`iat`) in seconds since the Unix epoch
    pub fn issued_at(&self) -> Option<i64> {
        numeric_date(&self.payload, "iat")
    }

    // ============================================================================
    // Typed access
    // ============================================================================

    /// Deserialize the header into a caller-defined type
    pub fn deserialize_header<T: DeserializeOwned>(&self) -> Result<T> {
        deserialize_segment(Segment::Header, &self.header)
    }

    /// Deserialize the payload into a caller-defined type
    pub fn deserialize_payload<T: DeserializeOwned>(&self) -> Result<T> {
        deserialize_segment(Segment::Payload, &self.payload)
    }
}

impl fmt::Display for DecodedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl FromStr for DecodedToken {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        crate::decode(token)
    }
}

fn string_field<'a>(segment: &'a DecodedSegment, name: &str) -> Option<&'a str> {
    segment.get(name).and_then(Value::as_str)
}

/// NumericDate values may be fractional; sub-second precision is dropped
///
/// Values outside the `i64` range yield `None`.
fn numeric_date(segment: &DecodedSegment, name: &str) -> Option<i64> {
    let value = segment.get(name)?;
    if let Some(secs) = value.as_i64() {
        return Some(secs);
    }

    let secs = value.as_f64()?.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if secs.is_finite() && secs >= i64::MIN as f64 && secs < i64::MAX as f64 {
        Some(secs as i64)
    } else {
        None
    }
}

fn deserialize_segment<T: DeserializeOwned>(segment: Segment, map: &DecodedSegment) -> Result<T> {
    serde_json::from_value(Value::Object(map.clone())).map_err(|e| Error::FormatInvalidJson {
        segment,
        reason: e.to_string(),
    })
}
