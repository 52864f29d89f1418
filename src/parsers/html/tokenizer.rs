//! Source-order discovery of URL attributes.
//!
//! Only html5ever's tokenizer runs here, never the tree builder. Tree
//! construction moves misnested table content in front of the table and
//! clones formatting elements such as `<a>`, so tree order is not the order
//! in which tags are written. Tokens come out exactly in text order, which
//! is the order the rewriter later meets them in.
//!
//! Exclusion (`closest(tag)` in tree terms) is tracked as a stack of open
//! excluded elements.

use std::borrow::Cow;
use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

/// Private-use characters that may stand in for `&` while tokenizing
const AMPERSAND_PLACEHOLDERS: [char; 4] = ['\u{E000}', '\u{E001}', '\u{F8FE}', '\u{F8FF}'];

/// Elements that never have an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose contents are text to a browser
///
/// Tags written inside them are still reported, since the rewriter sees them
/// in the text too, but they never open or close excluded elements.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "textarea",
    "title", "xmp",
];

/// One URL attribute, as written in the source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeOccurrence {
    pub attr_name: &'static str,
    /// Literal value, character references left undecoded
    pub value: String,
    /// Carried by, or nested in, an excluded element
    pub excluded: bool,
}

/// Every `attr_names` attribute in the markup, in text order
///
/// html5ever always decodes character references, which would make
/// `href="/a?x=1&amp;y=2"` read as `/a?x=1&y=2` and no longer match the
/// source text. Every `&` is therefore swapped for a placeholder character
/// before tokenizing and swapped back when a value is read.
///
/// Comments are tokenized again from their text, so markup that was
/// commented out is reported in place, like anything else the rewriter's
/// pattern can see.
pub fn find_url_attributes<F>(
    markup: &str,
    attr_names: &[&'static str],
    is_excluded: F,
) -> Vec<AttributeOccurrence>
where
    F: Fn(&str) -> bool,
{
    let placeholder = if markup.contains('&') {
        let placeholder = choose_placeholder(markup);
        if placeholder.is_none() {
            tracing::warn!("no free placeholder for '&', character references will be decoded");
        }
        placeholder
    } else {
        None
    };

    let shielded: Cow<str> = match placeholder {
        Some(placeholder) => Cow::Owned(markup.replace('&', placeholder.encode_utf8(&mut [0; 4]))),
        None => Cow::Borrowed(markup),
    };

    let scope = ScanScope {
        attr_names,
        is_excluded: &is_excluded,
        placeholder,
    };

    tokenize(&shielded, &scope, None)
}

fn choose_placeholder(markup: &str) -> Option<char> {
    AMPERSAND_PLACEHOLDERS
        .iter()
        .copied()
        .find(|placeholder| !markup.contains(*placeholder))
}

/// Settings shared by the document and every comment tokenized inside it
struct ScanScope<'s, F> {
    attr_names: &'s [&'static str],
    is_excluded: &'s F,
    placeholder: Option<char>,
}

impl<F> ScanScope<'_, F> {
    fn restore(&self, value: &str) -> String {
        match self.placeholder {
            Some(placeholder) => value.replace(placeholder, "&"),
            None => value.to_string(),
        }
    }
}

/// `inherited_exclusion` is set for comment text: exclusion is then fixed
/// by the enclosing document and tags inside never change it.
fn tokenize<F>(
    input: &str,
    scope: &ScanScope<'_, F>,
    inherited_exclusion: Option<bool>,
) -> Vec<AttributeOccurrence>
where
    F: Fn(&str) -> bool,
{
    let sink = OccurrenceSink {
        scope,
        inherited_exclusion,
        state: RefCell::new(SinkState::default()),
    };
    let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());

    let queue = BufferQueue::default();
    queue.push_back(StrTendril::from_slice(input));
    let _ = tokenizer.feed(&queue);
    tokenizer.end();

    tokenizer.sink.state.into_inner().occurrences
}

#[derive(Default)]
struct SinkState {
    occurrences: Vec<AttributeOccurrence>,
    open_excluded: Vec<String>,
    raw_text: Option<String>,
}

struct OccurrenceSink<'s, F> {
    scope: &'s ScanScope<'s, F>,
    inherited_exclusion: Option<bool>,
    state: RefCell<SinkState>,
}

impl<F> OccurrenceSink<'_, F>
where
    F: Fn(&str) -> bool,
{
    fn in_excluded_element(&self) -> bool {
        self.inherited_exclusion
            .unwrap_or_else(|| !self.state.borrow().open_excluded.is_empty())
    }

    fn process_tag(&self, tag: Tag) {
        let name: &str = &tag.name;

        match tag.kind {
            TagKind::StartTag => {
                let excluded = self.in_excluded_element() || (self.scope.is_excluded)(name);
                let mut state = self.state.borrow_mut();

                for &attr_name in self.scope.attr_names {
                    let Some(attr) = tag.attrs.iter().find(|attr| &*attr.name.local == attr_name)
                    else {
                        continue;
                    };

                    state.occurrences.push(AttributeOccurrence {
                        attr_name,
                        value: self.scope.restore(&attr.value),
                        excluded,
                    });
                }

                if self.inherited_exclusion.is_some() || state.raw_text.is_some() {
                    return;
                }

                if is_one_of(RAW_TEXT_ELEMENTS, name) {
                    state.raw_text = Some(name.to_string());
                } else if (self.scope.is_excluded)(name) && !is_one_of(VOID_ELEMENTS, name) {
                    state.open_excluded.push(name.to_string());
                }
            }
            TagKind::EndTag => {
                let mut state = self.state.borrow_mut();

                if self.inherited_exclusion.is_some() {
                    return;
                }

                if state.raw_text.is_some() {
                    if state.raw_text.as_deref() == Some(name) {
                        state.raw_text = None;
                    }
                    return;
                }

                if let Some(position) = state.open_excluded.iter().rposition(|open| open == name) {
                    state.open_excluded.truncate(position);
                }
            }
        }
    }

    fn process_comment(&self, text: &str) {
        let excluded = self.in_excluded_element();
        let occurrences = tokenize(text, self.scope, Some(excluded));

        self.state.borrow_mut().occurrences.extend(occurrences);
    }
}

fn is_one_of(names: &[&str], name: &str) -> bool {
    names.iter().any(|candidate| *candidate == name)
}

impl<F> TokenSink for OccurrenceSink<'_, F>
where
    F: Fn(&str) -> bool,
{
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => self.process_tag(tag),
            Token::CommentToken(text) => self.process_comment(&text),
            _ => {}
        }

        TokenSinkResult::Continue
    }
}
