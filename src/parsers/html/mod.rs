//! HTML handling, split in two phases that share nothing but their data:
//!
//! - `tokenizer`: source-order discovery of URL attributes, entity decoding
//!   disabled, excluded elements tracked while tokenizing
//! - `srcset`: `srcset` tokenizing and in-place resolution
//! - `scanner`: resolution of discovered attributes into [`ReplacementGroups`]
//! - `rewriter`: textual replay of [`ReplacementGroups`] on the original markup

pub mod rewriter;
pub mod scanner;
pub mod srcset;
pub mod tokenizer;

pub use rewriter::{apply_replacements, attribute_pattern};
pub use scanner::{
    replacement_key, scan, Replacement, ReplacementGroup, ReplacementGroups, URL_ATTRIBUTES,
};
pub use srcset::{absolutize_srcset, parse_srcset, SrcSetCandidate, WHITESPACES};
pub use tokenizer::{find_url_attributes, AttributeOccurrence};
