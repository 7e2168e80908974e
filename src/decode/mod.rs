//! Response shape normalization
//!
//! # Overview
//!
//! Collection endpoints do not agree on an envelope. Most return a bare
//! array; search and installation endpoints wrap it:
//!
//! ```json
//! { "total_count": 2, "incomplete_results": false, "items": [ ... ] }
//! ```
//!
//! The [`ShapeNormalizer`] reduces every page body to one ordered list of
//! items. Shapes it cannot interpret yield no items plus a [`ShapeWarning`],
//! never an error.

mod normalizer;
mod types;

pub use normalizer::ShapeNormalizer;
pub use types::{Normalized, ShapeWarning, DEFAULT_METADATA_KEYS};
