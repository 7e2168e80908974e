//! Normalizer result types

use crate::types::JsonValue;
use std::fmt;

/// Envelope keys that never hold the item list
pub const DEFAULT_METADATA_KEYS: &[&str] =
    &["incomplete_results", "repository_selection", "total_count"];

/// Why a page body could not be reduced to a list of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeWarning {
    /// Body was not valid JSON
    Unparseable {
        /// Parser message
        message: String,
    },
    /// Object left zero or several candidate keys after metadata was removed
    AmbiguousKeys {
        /// Keys remaining after metadata removal
        keys: Vec<String>,
    },
    /// The single remaining key did not hold an array
    NotASequence {
        /// Key that was inspected
        key: String,
        /// JSON type found there
        found: &'static str,
    },
    /// Body was a bare string, number or boolean
    Scalar {
        /// JSON type of the body
        found: &'static str,
    },
}

impl fmt::Display for ShapeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparseable { message } => write!(f, "response body is not JSON: {message}"),
            Self::AmbiguousKeys { keys } if keys.is_empty() => {
                write!(f, "no data key left after removing metadata keys")
            }
            Self::AmbiguousKeys { keys } => {
                write!(f, "could not determine the data key among [{}]", keys.join(", "))
            }
            Self::NotASequence { key, found } => {
                write!(f, "key '{key}' holds {found}, expected an array")
            }
            Self::Scalar { found } => write!(f, "response body is {found}, expected an array or object"),
        }
    }
}

/// Items extracted from one page body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Items in response order
    pub items: Vec<JsonValue>,
    /// Set when the shape was not understood; `items` is then empty
    pub warning: Option<ShapeWarning>,
}

impl Normalized {
    /// Successful extraction
    pub fn items(items: Vec<JsonValue>) -> Self {
        Self {
            items,
            warning: None,
        }
    }

    /// Nothing to extract, nothing wrong
    pub fn empty() -> Self {
        Self::default()
    }

    /// Unrecognised shape
    pub fn warn(warning: ShapeWarning) -> Self {
        Self {
            items: Vec::new(),
            warning: Some(warning),
        }
    }
}

/// JSON type name used in warnings
pub(crate) fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
