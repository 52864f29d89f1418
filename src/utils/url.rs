//! URL resolution.
//!
//! The scanner never resolves URLs itself: it hands every candidate to a
//! [`UrlResolver`]. [`RelativeToAbsolute`] is the resolver used by
//! [`crate::rewrite`]; anything implementing the trait (closures included)
//! can stand in for it via [`crate::rewrite_with`].

pub use url::{ParseError, Url};

use crate::core::AbshtmlOptions;
use crate::error::{AbshtmlError, AbshtmlResult};

/// Turns one URL string into its absolute form
///
/// `Ok(None)`, an empty string or the unchanged input all mean the URL must
/// be left as written.
pub trait UrlResolver {
    fn resolve(
        &self,
        url: &str,
        site_root: &str,
        item_path: &str,
        options: &AbshtmlOptions,
    ) -> AbshtmlResult<Option<String>>;
}

impl<F> UrlResolver for F
where
    F: Fn(&str, &str, &str, &AbshtmlOptions) -> AbshtmlResult<Option<String>>,
{
    fn resolve(
        &self,
        url: &str,
        site_root: &str,
        item_path: &str,
        options: &AbshtmlOptions,
    ) -> AbshtmlResult<Option<String>> {
        self(url, site_root, item_path, options)
    }
}

/// Default resolver, see [`relative_to_absolute`]
#[derive(Clone, Copy, Debug, Default)]
pub struct RelativeToAbsolute;

impl UrlResolver for RelativeToAbsolute {
    fn resolve(
        &self,
        url: &str,
        site_root: &str,
        item_path: &str,
        options: &AbshtmlOptions,
    ) -> AbshtmlResult<Option<String>> {
        relative_to_absolute(url, site_root, item_path, options)
    }
}

/// Resolves a relative URL against the site root and the current item path
///
/// Declines (returns `Ok(None)`) for empty values, fragment-only links,
/// protocol-relative links, anything carrying a scheme, document-relative
/// links when no item path is known, and in assets-only mode anything that
/// does not contain the static prefix.
///
/// Root-relative links land below the site root's subdirectory unless they
/// already start with it; document-relative links land below
/// `subdirectory/item_path/`.
pub fn relative_to_absolute(
    path: &str,
    site_root: &str,
    item_path: &str,
    options: &AbshtmlOptions,
) -> AbshtmlResult<Option<String>> {
    if path.is_empty() {
        return Ok(None);
    }

    if options.assets_only && !path.contains(options.required_static_prefix()?) {
        return Ok(None);
    }

    if path.starts_with('#') || !is_relative_reference(path) {
        return Ok(None);
    }

    if !path.starts_with('/') && item_path.is_empty() {
        return Ok(None);
    }

    let root = parse_site_root(site_root)?;
    let subdir = root.path().to_string();

    let full_path = match path.strip_prefix('/') {
        Some(_) if subdir != "/" && path.starts_with(&subdir) => path.to_string(),
        Some(rest) => format!("{subdir}{rest}"),
        None => format!("{subdir}{}{path}", item_directory(item_path, &subdir)),
    };

    let mut absolute = root.join(&full_path).map_err(|source| AbshtmlError::Resolve {
        path: path.to_string(),
        root: site_root.to_string(),
        source,
    })?;

    if options.secure && absolute.scheme() == "http" {
        // http -> https never fails, both are special schemes
        let _ = absolute.set_scheme("https");
    }

    Ok(Some(absolute.into()))
}

/// True for references that need a base URL to mean anything
pub fn is_relative_reference(url: &str) -> bool {
    if url.starts_with("//") {
        return false;
    }

    matches!(Url::parse(url), Err(ParseError::RelativeUrlWithoutBase))
}

/// Parses the site root, dropping query and fragment and forcing a trailing slash
pub fn parse_site_root(site_root: &str) -> AbshtmlResult<Url> {
    let mut root = Url::parse(site_root.trim()).map_err(|source| AbshtmlError::InvalidSiteRoot {
        url: site_root.to_string(),
        source,
    })?;

    root.set_query(None);
    root.set_fragment(None);

    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }

    Ok(root)
}

/// Item path as a directory relative to the subdirectory, e.g. `my-post/`
fn item_directory(item_path: &str, subdir: &str) -> String {
    let raw_path = match Url::parse(item_path) {
        Ok(url) => url.path().to_string(),
        Err(_) => item_path.to_string(),
    };

    let mut path = raw_path.trim_start_matches('/');
    let subdir = subdir.trim_matches('/');

    if !subdir.is_empty() {
        if let Some(rest) = path.strip_prefix(subdir) {
            if rest.is_empty() || rest.starts_with('/') {
                path = rest.trim_start_matches('/');
            }
        }
    }

    if path.is_empty() || path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}
