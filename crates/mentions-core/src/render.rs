//! Mention tokenizer and markup renderer.
//!
//! A mention token is `@` followed by a maximal run of word characters
//! (alphanumeric or `_`). The scan is a single linear pass; there is no
//! pattern engine involved.

use crate::fold::{eq_ignore_case, is_word_char};
use crate::model::TaggedUsers;
use crate::trigger::TRIGGER;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One `@word` occurrence in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentionToken {
    /// Byte range of `@word` in the scanned text.
    pub span: Range<usize>,
    /// The word after `@`.
    pub word: String,
    /// Whether a space sits directly before the `@`.
    pub leading_space: bool,
}

/// Find every `@word` token in `text`, left to right.
#[must_use]
pub fn tokenize(text: &str) -> Vec<MentionToken> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((at, ch)) = chars.next() {
        if ch != TRIGGER {
            continue;
        }

        let word_start = at + ch.len_utf8();
        let mut word_end = word_start;
        while let Some(&(idx, next)) = chars.peek() {
            if !is_word_char(next) {
                break;
            }
            word_end = idx + next.len_utf8();
            chars.next();
        }

        if word_end > word_start {
            tokens.push(MentionToken {
                span: at..word_end,
                word: text[word_start..word_end].to_string(),
                leading_space: prev_is_space(text, at),
            });
        }
    }

    tokens
}

fn prev_is_space(text: &str, at: usize) -> bool {
    text[..at].chars().next_back() == Some(' ')
}

/// Emphasis markup and escaping applied by [`render_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub emphasis_open: String,
    pub emphasis_close: String,
    /// Escape `&`, `<` and `>` in the text so typed input cannot inject markup.
    pub escape_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            emphasis_open: "<b>".to_string(),
            emphasis_close: "</b>".to_string(),
            escape_html: true,
        }
    }
}

impl RenderOptions {
    fn push_plain(&self, out: &mut String, plain: &str) {
        if self.escape_html {
            out.push_str(&htmlize::escape_text(plain));
        } else {
            out.push_str(plain);
        }
    }
}

/// Render `text` with default `<b>` emphasis on tagged mentions.
#[must_use]
pub fn render(text: &str, tags: &TaggedUsers) -> String {
    render_with(text, tags, &RenderOptions::default())
}

/// Render `text`, wrapping each token whose word matches a tagged name.
///
/// Untagged `@word` tokens are emitted as plain text. Token text is kept
/// exactly as typed.
#[must_use]
pub fn render_with(text: &str, tags: &TaggedUsers, options: &RenderOptions) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for token in tokenize(text) {
        if !is_tagged(&token.word, tags) {
            continue;
        }
        options.push_plain(&mut out, &text[cursor..token.span.start]);
        out.push_str(&options.emphasis_open);
        options.push_plain(&mut out, &text[token.span.clone()]);
        out.push_str(&options.emphasis_close);
        cursor = token.span.end;
    }

    options.push_plain(&mut out, &text[cursor..]);
    out
}

/// Tokens in `text` that would be emphasized for `tags`.
#[must_use]
pub fn highlighted_tokens(text: &str, tags: &TaggedUsers) -> Vec<MentionToken> {
    tokenize(text)
        .into_iter()
        .filter(|token| is_tagged(&token.word, tags))
        .collect()
}

fn is_tagged(word: &str, tags: &TaggedUsers) -> bool {
    tags.iter().any(|user| eq_ignore_case(word, &user.name))
}
