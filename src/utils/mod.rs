//! # Utilities
//!
//! - `url` - URL resolution: the [`url::UrlResolver`] seam and the default
//!   relative-to-absolute resolver

pub mod url;

// Re-export commonly used items for convenience
pub use url::{
    is_relative_reference, parse_site_root, relative_to_absolute, RelativeToAbsolute, Url,
    UrlResolver,
};
