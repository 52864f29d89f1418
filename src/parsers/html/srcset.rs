//! `srcset` tokenizing.
//!
//! A `srcset` value packs several image candidates into one attribute:
//!
//! ```text
//! /img/small.jpg 480w, /img/large.jpg 800w
//! ```
//!
//! Only the URL of each candidate is ever resolved; descriptors and the
//! whitespace around them are carried over untouched.

use crate::error::AbshtmlResult;

/// ASCII whitespace
pub const WHITESPACES: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];

/// One image candidate of a `srcset` value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SrcSetCandidate<'a> {
    /// Image URL, the first whitespace-delimited token of the candidate
    pub url: &'a str,
    /// Byte offset of `url` within the whole `srcset` value
    pub offset: usize,
    /// Width or density descriptor (`480w`, `2x`), empty when absent
    pub descriptor: &'a str,
}

/// Splits a `srcset` value into its candidates
///
/// Best effort: the value is split on commas and the first token of each
/// part is taken as the URL, so URLs containing commas are not supported.
/// Empty parts are dropped.
///
/// ```
/// use abshtml::parsers::html::parse_srcset;
///
/// let candidates = parse_srcset("small.jpg 480w, large.jpg 800w");
/// assert_eq!(candidates.len(), 2);
/// assert_eq!(candidates[1].url, "large.jpg");
/// assert_eq!(candidates[1].descriptor, "800w");
/// ```
pub fn parse_srcset(srcset: &str) -> Vec<SrcSetCandidate<'_>> {
    let mut candidates = vec![];
    let mut part_offset = 0;

    for part in srcset.split(',') {
        let trimmed = part.trim_start_matches(WHITESPACES);
        let url_len = trimmed.find(WHITESPACES).unwrap_or(trimmed.len());
        let url = &trimmed[..url_len];

        if !url.is_empty() {
            candidates.push(SrcSetCandidate {
                url,
                offset: part_offset + (part.len() - trimmed.len()),
                descriptor: trimmed[url_len..].trim_matches(WHITESPACES),
            });
        }

        // Skip past the part and its trailing comma
        part_offset += part.len() + 1;
    }

    candidates
}

/// Resolves every candidate URL in place
///
/// Each resolved URL is written back at the position its relative form
/// occupied, so repeated URLs with different descriptors are handled one by
/// one. Returns `Ok(None)` when no candidate changed.
pub fn absolutize_srcset<F>(srcset: &str, mut resolve: F) -> AbshtmlResult<Option<String>>
where
    F: FnMut(&str) -> AbshtmlResult<Option<String>>,
{
    let mut absolute_srcset = String::with_capacity(srcset.len() * 2);
    let mut last_end = 0;
    let mut changed = false;

    for candidate in parse_srcset(srcset) {
        let resolved = match resolve(candidate.url)? {
            Some(resolved) if !resolved.is_empty() && resolved != candidate.url => resolved,
            _ => continue,
        };
        tracing::trace!(
            url = candidate.url,
            descriptor = candidate.descriptor,
            "srcset candidate resolved"
        );

        absolute_srcset.push_str(&srcset[last_end..candidate.offset]);
        absolute_srcset.push_str(&resolved);
        last_end = candidate.offset + candidate.url.len();
        changed = true;
    }

    if !changed {
        return Ok(None);
    }

    absolute_srcset.push_str(&srcset[last_end..]);
    Ok(Some(absolute_srcset))
}
