// distpress - Pre-compressed static build output
// Copyright (C) 2025 distpress Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Payloads handed to compression routines and the results they return
//!
//! Hosts hand over asset content either as raw bytes or as text (bundlers
//! emit code chunks as strings). Anything else arrives as an untyped
//! [`serde_json::Value`] from the host boundary and is rejected by the
//! built-in routines.

use crate::error::RoutineError;
use bytes::Bytes;
use serde_json::Value;

/// What the built-in routines accept, used in invalid-argument messages
const EXPECTED_PAYLOAD: &str = "text or binary data";

/// Input to a compression routine
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Raw bytes
    Binary(Bytes),
    /// UTF-8 text, compressed as its byte encoding
    Text(String),
    /// Untyped value from a host boundary that is neither text nor binary
    Value(Value),
}

impl Payload {
    /// Size in bytes of the binary content, zero for untyped values
    pub fn len(&self) -> usize {
        match self {
            Payload::Binary(bytes) => bytes.len(),
            Payload::Text(text) => text.len(),
            Payload::Value(_) => 0,
        }
    }

    /// Whether the binary content is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the payload as bytes, if it is text or binary
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Binary(bytes) => Some(bytes),
            Payload::Text(text) => Some(text.as_bytes()),
            Payload::Value(_) => None,
        }
    }

    /// Convert into bytes, or fail naming `argument` and the offending value
    pub fn into_bytes(self, argument: &str) -> Result<Bytes, RoutineError> {
        match self {
            Payload::Binary(bytes) => Ok(bytes),
            Payload::Text(text) => Ok(Bytes::from(text)),
            Payload::Value(value) => Err(RoutineError::invalid_arg_type(
                argument,
                EXPECTED_PAYLOAD,
                &describe_value(&value),
            )),
        }
    }
}

/// Describe a value the way it appears in invalid-argument messages
fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("type boolean ({})", b),
        Value::Number(n) => format!("type number ({})", n),
        Value::String(s) => format!("type string ({:?})", s),
        Value::Array(_) => "an instance of Array".to_string(),
        Value::Object(_) => "an instance of Object".to_string(),
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Binary(bytes)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Binary(Bytes::from(bytes))
    }
}

impl From<&'static [u8]> for Payload {
    fn from(bytes: &'static [u8]) -> Self {
        Payload::Binary(Bytes::from_static(bytes))
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Payload::Text(text),
            other => Payload::Value(other),
        }
    }
}

/// Successful result of a compression routine
///
/// Routines may hand back any of these shapes; [`RoutineOutput::into_bytes`]
/// normalizes them to [`Bytes`], the canonical type artifacts are written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutineOutput {
    /// Already canonical
    Bytes(Bytes),
    /// Owned buffer
    Vec(Vec<u8>),
    /// Text result, taken as its UTF-8 encoding
    Text(String),
}

impl RoutineOutput {
    /// Whether the result is already in the canonical binary type
    pub fn is_canonical(&self) -> bool {
        matches!(self, RoutineOutput::Bytes(_))
    }

    /// Normalize to [`Bytes`]; canonical results pass through untouched
    pub fn into_bytes(self) -> Bytes {
        match self {
            RoutineOutput::Bytes(bytes) => bytes,
            RoutineOutput::Vec(vec) => Bytes::from(vec),
            RoutineOutput::Text(text) => Bytes::from(text),
        }
    }
}

impl From<Bytes> for RoutineOutput {
    fn from(bytes: Bytes) -> Self {
        RoutineOutput::Bytes(bytes)
    }
}

impl From<Vec<u8>> for RoutineOutput {
    fn from(vec: Vec<u8>) -> Self {
        RoutineOutput::Vec(vec)
    }
}

impl From<String> for RoutineOutput {
    fn from(text: String) -> Self {
        RoutineOutput::Text(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RoutineErrorKind;
    use serde_json::json;

    #[test]
    fn test_text_and_binary_convert() {
        assert_eq!(
            Payload::from("abc").into_bytes("chunk").unwrap(),
            Bytes::from_static(b"abc")
        );
        assert_eq!(
            Payload::from(vec![1u8, 2, 3]).into_bytes("chunk").unwrap(),
            Bytes::from_static(&[1, 2, 3])
        );
    }

    #[test]
    fn test_number_payload_is_rejected() {
        let err = Payload::from(json!(123)).into_bytes("chunk").unwrap_err();
        assert_eq!(err.kind(), RoutineErrorKind::InvalidArgType);
        assert!(err.message().contains("\"chunk\""));
        assert!(err.message().contains("Received type number (123)"));
    }

    #[test]
    fn test_json_string_becomes_text() {
        assert_eq!(Payload::from(json!("hi")), Payload::Text("hi".to_string()));
    }

    #[test]
    fn test_payload_len() {
        assert_eq!(Payload::from("four").len(), 4);
        assert_eq!(Payload::from(json!({"a": 1})).len(), 0);
        assert!(Payload::from(Vec::new()).is_empty());
    }

    #[test]
    fn test_canonical_output_passes_through() {
        let bytes = Bytes::from_static(b"compressed");
        let output = RoutineOutput::from(bytes.clone());
        assert!(output.is_canonical());
        let out = output.into_bytes();
        // Same backing storage, no copy
        assert_eq!(out.as_ptr(), bytes.as_ptr());
    }

    #[test]
    fn test_vec_output_is_converted() {
        let output = RoutineOutput::from(vec![9u8, 8, 7]);
        assert!(!output.is_canonical());
        assert_eq!(output.into_bytes(), Bytes::from_static(&[9, 8, 7]));
    }
}
