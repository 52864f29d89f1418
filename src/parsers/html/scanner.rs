//! Discovery phase: find every URL-bearing attribute and decide its fate.
//!
//! The scanner only reads the tokenized document, in text order. What it
//! produces is a [`ReplacementGroups`] mapping keyed by the literal
//! `name="value"` pair, which the rewriter later replays against the
//! original text.

use std::collections::HashMap;

use crate::core::AbshtmlOptions;
use crate::error::AbshtmlResult;
use crate::utils::url::UrlResolver;

use super::srcset::absolutize_srcset;
use super::tokenizer::find_url_attributes;

/// Attributes that may carry relative URLs, in scanning order
pub const URL_ATTRIBUTES: [&str; 3] = ["href", "src", "srcset"];

/// What happens to one physical attribute occurrence
#[derive(Clone, Debug, PartialEq, Eq)]
enum ReplacementAction {
    /// Inside an excluded element, must stay as written
    Skip,
    /// Replace the value with this absolute one
    Rewrite(String),
}

/// One physical attribute occurrence found during the scan
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replacement {
    attr_name: &'static str,
    original_value: String,
    action: ReplacementAction,
}

impl Replacement {
    pub fn skip(attr_name: &'static str, original_value: impl Into<String>) -> Self {
        Replacement {
            attr_name,
            original_value: original_value.into(),
            action: ReplacementAction::Skip,
        }
    }

    pub fn rewrite(
        attr_name: &'static str,
        original_value: impl Into<String>,
        absolute_value: impl Into<String>,
    ) -> Self {
        Replacement {
            attr_name,
            original_value: original_value.into(),
            action: ReplacementAction::Rewrite(absolute_value.into()),
        }
    }

    pub fn attr_name(&self) -> &'static str {
        self.attr_name
    }

    pub fn original_value(&self) -> &str {
        &self.original_value
    }

    pub fn absolute_value(&self) -> Option<&str> {
        match &self.action {
            ReplacementAction::Rewrite(absolute_value) => Some(absolute_value),
            ReplacementAction::Skip => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        self.action == ReplacementAction::Skip
    }

    pub fn key(&self) -> String {
        replacement_key(self.attr_name, &self.original_value)
    }
}

/// Grouping key for an attribute/value pair, e.g. `href="/about/"`
pub fn replacement_key(attr_name: &str, original_value: &str) -> String {
    format!("{attr_name}=\"{original_value}\"")
}

/// All occurrences of one literal attribute/value pair, in text order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplacementGroup {
    key: String,
    replacements: Vec<Replacement>,
}

impl ReplacementGroup {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn attr_name(&self) -> &'static str {
        self.replacements[0].attr_name()
    }

    pub fn original_value(&self) -> &str {
        self.replacements[0].original_value()
    }

    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    pub fn has_rewrites(&self) -> bool {
        self.replacements.iter().any(|replacement| !replacement.is_skip())
    }
}

/// Scan result handed to the rewriter
///
/// Built once from the scanned [`Replacement`]s and read-only afterwards.
/// Groups iterate in the order their first occurrence was discovered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplacementGroups {
    groups: Vec<ReplacementGroup>,
    index: HashMap<String, usize>,
}

impl ReplacementGroups {
    pub fn iter(&self) -> impl Iterator<Item = &ReplacementGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn push(&mut self, replacement: Replacement) {
        let key = replacement.key();

        match self.index.get(&key) {
            Some(&i) => self.groups[i].replacements.push(replacement),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push(ReplacementGroup {
                    key,
                    replacements: vec![replacement],
                });
            }
        }
    }
}

impl FromIterator<Replacement> for ReplacementGroups {
    fn from_iter<I: IntoIterator<Item = Replacement>>(iter: I) -> Self {
        let mut groups = ReplacementGroups::default();
        for replacement in iter {
            groups.push(replacement);
        }
        groups
    }
}

/// Finds every `href`, `src` and `srcset` attribute and computes its absolute value
///
/// Occurrences inside an excluded element (see
/// [`AbshtmlOptions::excluded_elements`]) are recorded as skips. Elsewhere a
/// replacement is recorded only when the resolver actually changes the
/// value. Resolver errors are propagated as-is.
pub fn scan<R: UrlResolver + ?Sized>(
    markup: &str,
    site_root: &str,
    item_path: &str,
    options: &AbshtmlOptions,
    resolver: &R,
) -> AbshtmlResult<ReplacementGroups> {
    let occurrences = find_url_attributes(markup, &URL_ATTRIBUTES, |name| {
        options.is_excluded_element(name)
    });
    let mut replacements = Vec::new();

    for occurrence in occurrences {
        let attr_name = occurrence.attr_name;
        let original_value = occurrence.value;

        if occurrence.excluded {
            tracing::trace!(attr_name, value = %original_value, "inside excluded element");
            replacements.push(Replacement::skip(attr_name, original_value));
            continue;
        }

        let absolute_value = if attr_name == "srcset" {
            absolutize_srcset(&original_value, |url| {
                resolver.resolve(url, site_root, item_path, options)
            })?
        } else {
            resolver.resolve(&original_value, site_root, item_path, options)?
        };

        match absolute_value {
            Some(absolute_value) if !absolute_value.is_empty() && absolute_value != original_value => {
                tracing::trace!(attr_name, from = %original_value, to = %absolute_value, "rewrite");
                replacements.push(Replacement::rewrite(attr_name, original_value, absolute_value));
            }
            _ => {}
        }
    }

    Ok(replacements.into_iter().collect())
}
