//! # abshtml
//!
//! Rewrites relative `href`, `src` and `srcset` URLs in HTML into absolute
//! ones, leaving every other byte of the markup exactly as it was.
//!
//! The work happens in two phases. The scanner tokenizes the markup only to
//! discover URL attributes and decide, per occurrence, whether it is
//! rewritten or skipped (anything inside `<code>` is skipped). The rewriter
//! then replays those decisions on the original text, one attribute/value
//! pair at a time, without ever building or serializing a tree.
//!
//! ## Module organization
//!
//! - `core` - options, pre-check and the `rewrite` entry points
//! - `parsers` - HTML scanning and rewriting
//! - `utils` - URL resolution
//! - `config` / `env` - configuration file and environment variables
//! - `error` - the error type

pub mod config;
pub mod core;
pub mod env;
pub mod error;
pub mod parsers;
pub mod utils;

// Re-export commonly used items for convenience
pub use crate::config::AbshtmlConfig;
pub use crate::core::{has_candidate_attributes, rewrite, rewrite_with, AbshtmlOptions};
pub use crate::error::{AbshtmlError, AbshtmlResult};
pub use crate::utils::url::{RelativeToAbsolute, UrlResolver};
