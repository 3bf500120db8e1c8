//! Error types for decoding and encoding schema documents.
use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::pointer::{Location, Pointer};

const EXCERPT_LEN: usize = 40;

/// Error type for `schema-dom`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Input is not well-formed JSON, or a value could not be written out
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A value has a shape its field does not accept
    #[error("{path}: expected {expected}, found {found} `{value}`")]
    TypeMismatch {
        path: Pointer,
        expected: &'static str,
        found: Kind,
        /// Compact JSON of the offending value, cut short if long
        value: String,
    },
    /// The document root is not an object
    #[error("{path}: malformed document: expected an object at the top level, found {found}")]
    MalformedDocument { path: Pointer, found: Kind },
    /// `"type": []`
    #[error("{path}: type list must not be empty")]
    EmptyType { path: Pointer },
}

impl Error {
    pub(crate) fn mismatch(at: &Location<'_>, expected: &'static str, value: &Value) -> Self {
        Error::TypeMismatch {
            path: at.to_pointer(),
            expected,
            found: Kind::of(value),
            value: excerpt(value),
        }
    }

    pub(crate) fn malformed(value: &Value) -> Self {
        Error::MalformedDocument {
            path: Pointer::root(),
            found: Kind::of(value),
        }
    }

    /// Location of the offending value, if the error is tied to one.
    pub fn path(&self) -> Option<&Pointer> {
        match self {
            Error::TypeMismatch { path, .. }
            | Error::MalformedDocument { path, .. }
            | Error::EmptyType { path } => Some(path),
            Error::Json(_) => None,
        }
    }
}

fn excerpt(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= EXCERPT_LEN {
        return text;
    }
    let mut short: String = text.chars().take(EXCERPT_LEN).collect();
    short.push_str("...");
    short
}

/// The kind of a JSON value, as reported in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
