use std::borrow::Cow;

use crate::error::{AbshtmlError, AbshtmlResult};
use crate::parsers::html::{apply_replacements, scan, URL_ATTRIBUTES};
use crate::utils::url::{RelativeToAbsolute, UrlResolver};

/// Elements whose contents are displayed markup rather than live markup
pub const DEFAULT_EXCLUDED_ELEMENTS: &[&str] = &["code"];

/// Configuration options for absolutizing a document
///
/// `secure` and `static_image_url_prefix` are read by the resolver;
/// `assets_only` is read by both the pre-check and the resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbshtmlOptions {
    pub assets_only: bool,
    pub secure: bool,
    pub static_image_url_prefix: Option<String>,
    pub excluded_elements: Vec<String>,
}

impl Default for AbshtmlOptions {
    fn default() -> Self {
        AbshtmlOptions {
            assets_only: false,
            secure: false,
            static_image_url_prefix: None,
            excluded_elements: DEFAULT_EXCLUDED_ELEMENTS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl AbshtmlOptions {
    /// The static prefix, or an error when assets-only mode lacks one
    pub fn required_static_prefix(&self) -> AbshtmlResult<&str> {
        match self.static_image_url_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => Ok(prefix),
            _ => Err(AbshtmlError::MissingStaticPrefix),
        }
    }

    pub fn is_excluded_element(&self, name: &str) -> bool {
        self.excluded_elements
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(name))
    }
}

/// Cheap textual check for anything worth parsing
///
/// In assets-only mode the static prefix has to appear somewhere in the
/// markup, otherwise at least one of `href=`, `src=` or `srcset=` has to.
pub fn has_candidate_attributes(markup: &str, options: &AbshtmlOptions) -> AbshtmlResult<bool> {
    if options.assets_only {
        let prefix = options.required_static_prefix()?;
        return Ok(markup.contains(prefix));
    }

    Ok(URL_ATTRIBUTES
        .iter()
        .any(|attr_name| markup.contains(&format!("{attr_name}="))))
}

/// Rewrites relative `href`, `src` and `srcset` values into absolute URLs
///
/// Uses the default [`RelativeToAbsolute`] resolver. Everything but the
/// rewritten values is returned byte-for-byte, and markup with nothing to
/// rewrite comes back borrowed.
///
/// # Examples
///
/// ```
/// use abshtml::{rewrite, AbshtmlOptions};
///
/// let html = r#"<p><a href="/about/">About</a></p>"#;
/// let result = rewrite(html, "https://example.com", "", &AbshtmlOptions::default()).unwrap();
///
/// assert_eq!(result, r#"<p><a href="https://example.com/about/">About</a></p>"#);
/// ```
pub fn rewrite<'a>(
    markup: &'a str,
    site_root: &str,
    item_path: &str,
    options: &AbshtmlOptions,
) -> AbshtmlResult<Cow<'a, str>> {
    rewrite_with(markup, site_root, item_path, options, &RelativeToAbsolute)
}

/// Same as [`rewrite`], with a caller-provided resolver
pub fn rewrite_with<'a, R: UrlResolver + ?Sized>(
    markup: &'a str,
    site_root: &str,
    item_path: &str,
    options: &AbshtmlOptions,
    resolver: &R,
) -> AbshtmlResult<Cow<'a, str>> {
    if markup.is_empty() || !has_candidate_attributes(markup, options)? {
        tracing::trace!("no candidate attributes, leaving markup untouched");
        return Ok(Cow::Borrowed(markup));
    }

    let groups = scan(markup, site_root, item_path, options, resolver)?;
    if groups.is_empty() {
        return Ok(Cow::Borrowed(markup));
    }

    tracing::debug!(groups = groups.len(), "applying replacements");
    apply_replacements(markup, &groups)
}
