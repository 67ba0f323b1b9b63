//! Text folding shared by the prefix matcher and query derivation.
//!
//! Folding decomposes to NFD, drops combining marks and lower-cases, so
//! `"Zoë"`, `"ZOE"` and `"zoe"` all fold to `"zoe"`. Both sides of every
//! comparison must go through the same function or matches drift.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold `text` for diacritic- and case-insensitive comparison.
#[must_use]
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// `true` when the folded `name` begins with the folded `query`.
#[must_use]
pub fn folded_prefix_match(name: &str, query: &str) -> bool {
    fold(name).starts_with(&fold(query))
}

/// Lower-case one char at a time, ignoring context.
///
/// Unlike [`str::to_lowercase`], a word-final `Σ` becomes `σ`, not `ς`, so
/// the validator and the renderer agree on every name.
#[must_use]
pub fn lowercase(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Case-insensitive equality without diacritic folding.
///
/// Mention tokens are compared this way: `@Zoe` does not highlight a user
/// named `Zoë`, but `@zoë` does.
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Word characters as the mention tokenizer understands them.
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
