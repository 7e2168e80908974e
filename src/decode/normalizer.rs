//! Shape normalizer implementation

use super::types::{kind_of, Normalized, ShapeWarning, DEFAULT_METADATA_KEYS};
use crate::types::JsonValue;

/// Reduces a page body to its ordered list of items
///
/// Rules, applied in order:
///
/// 1. an array is returned as-is;
/// 2. an empty body, `null` or `{}` yields nothing;
/// 3. an object loses its metadata keys; if exactly one key remains, its
///    array is the item list (`null` there means no items);
/// 4. anything else yields nothing and a [`ShapeWarning`].
#[derive(Debug, Clone)]
pub struct ShapeNormalizer {
    metadata_keys: Vec<String>,
}

impl Default for ShapeNormalizer {
    fn default() -> Self {
        Self {
            metadata_keys: DEFAULT_METADATA_KEYS.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

impl ShapeNormalizer {
    /// Create a normalizer with the default metadata keys
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the metadata key list
    #[must_use]
    pub fn with_metadata_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Normalize a raw response body
    pub fn normalize_text(&self, body: &str) -> Normalized {
        if body.trim().is_empty() {
            return Normalized::empty();
        }

        match serde_json::from_str::<JsonValue>(body) {
            Ok(value) => self.normalize(value),
            Err(e) => Normalized::warn(ShapeWarning::Unparseable {
                message: e.to_string(),
            }),
        }
    }

    /// Normalize a parsed response body
    pub fn normalize(&self, body: JsonValue) -> Normalized {
        match body {
            JsonValue::Array(items) => Normalized::items(items),
            JsonValue::Null => Normalized::empty(),
            JsonValue::Object(map) if map.is_empty() => Normalized::empty(),
            JsonValue::Object(mut map) => {
                map.retain(|key, _| !self.is_metadata(key));

                if map.len() != 1 {
                    let keys = map.keys().cloned().collect();
                    return Normalized::warn(ShapeWarning::AmbiguousKeys { keys });
                }

                let Some((key, value)) = map.into_iter().next() else {
                    return Normalized::empty();
                };

                match value {
                    JsonValue::Array(items) => Normalized::items(items),
                    JsonValue::Null => Normalized::empty(),
                    other => Normalized::warn(ShapeWarning::NotASequence {
                        key,
                        found: kind_of(&other),
                    }),
                }
            }
            scalar => Normalized::warn(ShapeWarning::Scalar {
                found: kind_of(&scalar),
            }),
        }
    }

    fn is_metadata(&self, key: &str) -> bool {
        self.metadata_keys.iter().any(|k| k == key)
    }
}
