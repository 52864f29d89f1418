//! Rewrite phase: replay scan results against the original text.
//!
//! Nothing is re-serialized. For each group a pattern locates the literal
//! `name="value"` pair inside single opening tags, quoted or not, and only
//! the value itself is replaced, so indentation, quoting and attribute
//! order survive untouched.

use std::borrow::Cow;

use regex::Regex;

use crate::error::{AbshtmlError, AbshtmlResult};

use super::scanner::{Replacement, ReplacementGroup, ReplacementGroups};

/// One step through the inside of a tag: a whole `=value` (double-quoted,
/// single-quoted or unquoted) or any other character but `>`
///
/// Quoted values are consumed whole, so a `>` written inside one does not
/// end the tag and an attribute name written inside one is never matched.
const TAG_STEP: &str = r#"(?:=\s*"[^"]*"|=\s*'[^']*'|=\s*[^\s"'>][^\s>]*|[^>=])"#;

/// Pattern for one opening tag carrying `attr_name` with exactly `value`
///
/// The attribute has to follow whitespace, which keeps `src` from matching
/// inside `data-src`. Its name matches case-insensitively, its value
/// literally, double-quoted, single-quoted or unquoted; the value is
/// captured as `dq`, `sq` or `uq`. The match runs to the `>` closing the
/// tag, so the next search starts after it.
pub fn attribute_pattern(attr_name: &str, value: &str) -> Result<Regex, regex::Error> {
    let attr_name = regex::escape(attr_name);
    let value = regex::escape(value);

    Regex::new(&format!(
        concat!(
            r#"<[a-zA-Z]{step}*?\s(?i:{name})\s*=\s*"#,
            r#"(?:(?:"(?P<dq>{value})"|'(?P<sq>{value})'){step}*?(?:=\s*)?>"#,
            r#"|(?P<uq>{value})(?:\s{step}*?(?:=\s*)?)?>)"#,
        ),
        step = TAG_STEP,
        name = attr_name,
        value = value,
    ))
}

/// Applies every group, one after the other, to the markup
///
/// Returns the input borrowed when no occurrence was rewritten.
pub fn apply_replacements<'a>(
    markup: &'a str,
    groups: &ReplacementGroups,
) -> AbshtmlResult<Cow<'a, str>> {
    groups
        .iter()
        .try_fold(Cow::Borrowed(markup), |html, group| apply_group(html, group))
}

fn apply_group<'a>(html: Cow<'a, str>, group: &ReplacementGroup) -> AbshtmlResult<Cow<'a, str>> {
    // Nothing to do for groups made only of skips
    if !group.has_rewrites() {
        return Ok(html);
    }

    let pattern = attribute_pattern(group.attr_name(), group.original_value()).map_err(|source| {
        AbshtmlError::Pattern {
            key: group.key().to_string(),
            source,
        }
    })?;

    let mut cursor = GroupCursor::new(group.replacements());
    let mut rewritten = String::with_capacity(html.len());
    let mut last_end = 0;

    for captures in pattern.captures_iter(&html) {
        let Some(value) = captures
            .name("dq")
            .or_else(|| captures.name("sq"))
            .or_else(|| captures.name("uq"))
        else {
            continue;
        };

        if let Some(absolute_value) = cursor.next_match() {
            rewritten.push_str(&html[last_end..value.start()]);
            rewritten.push_str(absolute_value);
            last_end = value.end();
        }
    }

    if cursor.unmatched() > 0 {
        tracing::debug!(
            key = group.key(),
            unmatched = cursor.unmatched(),
            "recorded occurrences without a matching tag"
        );
    }

    tracing::trace!(
        key = group.key(),
        matches = cursor.match_count,
        skipped = cursor.skip_count,
        "group applied"
    );

    if last_end == 0 {
        return Ok(html);
    }

    rewritten.push_str(&html[last_end..]);
    Ok(Cow::Owned(rewritten))
}

/// Pairs the physical matches of a group's pattern with its records
///
/// The n-th match in the text belongs to the n-th record of the group:
/// both follow text order. Skip records leave their match alone;
/// matches past the last record are left alone too.
struct GroupCursor<'g> {
    replacements: &'g [Replacement],
    match_count: usize,
    skip_count: usize,
}

impl<'g> GroupCursor<'g> {
    fn new(replacements: &'g [Replacement]) -> Self {
        GroupCursor {
            replacements,
            match_count: 0,
            skip_count: 0,
        }
    }

    /// Consumes the next match; `Some(absolute_value)` when it must be rewritten
    fn next_match(&mut self) -> Option<&'g str> {
        let replacements = self.replacements;
        let replacement = replacements.get(self.match_count);
        self.match_count += 1;

        let replacement = replacement?;
        if replacement.is_skip() {
            self.skip_count += 1;
        }
        replacement.absolute_value()
    }

    fn unmatched(&self) -> usize {
        self.replacements.len().saturating_sub(self.match_count)
    }
}
