//! # Parsers
//!
//! - `html` - discovery of URL attributes in HTML and their surgical rewrite

pub mod html;

// Re-export commonly used items for convenience
pub use html::{apply_replacements, parse_srcset, scan, ReplacementGroups};
