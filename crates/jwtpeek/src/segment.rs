use serde_json::{Map, Value};
use std::fmt;

/// A decoded header or payload: a JSON object with arbitrary values
pub type DecodedSegment = Map<String, Value>;

/// The decoded parts of a compact token
///
/// The signature is only checked for presence, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Header,
    Payload,
}

impl Segment {
    /// Lowercase name used in error messages and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Header => "header",
            Segment::Payload => "payload",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse decoded segment text as a JSON object
///
/// Nesting is limited to serde_json's recursion depth of 128; deeper
/// documents fail with [`crate::Error::FormatInvalidJson`].
pub(crate) fn parse_object(segment: Segment, text: &str) -> crate::Result<DecodedSegment> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| crate::Error::FormatInvalidJson {
            segment,
            reason: e.to_string(),
        })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(crate::Error::FormatInvalidJson {
            segment,
            reason: format!("expected a JSON object, found {}", type_name(&other)),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_parse_object() {
        let map = parse_object(Segment::Header, r#"{"alg":"HS256","typ":"JWT"}"#).unwrap();
        assert_eq!(map.get("alg"), Some(&Value::from("HS256")));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_parse_not_json() {
        let result = parse_object(Segment::Payload, "not json");
        assert!(matches!(
            result,
            Err(Error::FormatInvalidJson {
                segment: Segment::Payload,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        for text in ["null", "true", "42", r#""text""#, "[1,2]"] {
            let result = parse_object(Segment::Header, text);
            assert!(
                matches!(result, Err(Error::FormatInvalidJson { .. })),
                "accepted non-object: {text}"
            );
        }
    }

    #[test]
    fn test_nesting_depth_limit() {
        let nested =
            |depth: usize| format!(r#"{{"a":{}{}}}"#, "[".repeat(depth), "]".repeat(depth));

        assert!(parse_object(Segment::Payload, &nested(100)).is_ok());
        assert!(matches!(
            parse_object(Segment::Payload, &nested(200)),
            Err(Error::FormatInvalidJson {
                segment: Segment::Payload,
                ..
            })
        ));
    }

    #[test]
    fn test_segment_display() {
        assert_eq!(Segment::Header.to_string(), "header");
        assert_eq!(Segment::Payload.to_string(), "payload");
    }
}
