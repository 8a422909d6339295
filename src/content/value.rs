//! Document content validation and canonical serialization
//!
//! Content is an opaque key-value document: any JSON object is
//! accepted, anything else is rejected at the edge of the write path.
//!
//! Canonical serialization sorts object keys recursively, so two
//! semantically equal values always produce the same bytes. Revision
//! ids are derived from these bytes.

use serde_json::Value;
use thiserror::Error;

/// Content validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    /// Content must be a JSON object at the top level
    #[error("content must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Validate that a value is usable as document content.
pub fn validate(content: &Value) -> Result<(), ContentError> {
    match content {
        Value::Object(_) => Ok(()),
        Value::Null => Err(ContentError::NotAnObject("null")),
        Value::Bool(_) => Err(ContentError::NotAnObject("a boolean")),
        Value::Number(_) => Err(ContentError::NotAnObject("a number")),
        Value::String(_) => Err(ContentError::NotAnObject("a string")),
        Value::Array(_) => Err(ContentError::NotAnObject("an array")),
    }
}

/// Serialize a value with recursively sorted object keys.
///
/// Independent of serde_json feature flags, so the hash input for
/// revision ids stays stable.
pub fn canonical_bytes(value: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(64);
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => write_json_string(s, out),
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical(item, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            out.push(b'{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_json_string(key, out);
                out.push(b':');
                // Key came from the map, so the entry exists
                if let Some(v) = map.get(*key) {
                    write_canonical(v, out);
                }
            }
            out.push(b'}');
        }
    }
}

fn write_json_string(s: &str, out: &mut Vec<u8>) {
    out.push(b'"');
    for c in s.chars() {
        match c {
            '"' => out.extend_from_slice(b"\\\""),
            '\\' => out.extend_from_slice(b"\\\\"),
            '\n' => out.extend_from_slice(b"\\n"),
            '\r' => out.extend_from_slice(b"\\r"),
            '\t' => out.extend_from_slice(b"\\t"),
            c if c.is_control() => {
                out.extend_from_slice(format!("\\u{:04x}", c as u32).as_bytes());
            }
            c => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    out.push(b'"');
}
