//! Reconciling committed tags with the text they were committed into.

use crate::fold::{is_word_char, lowercase};
use crate::model::TaggedUsers;
use crate::trigger::TRIGGER;

/// `true` when `text` contains `@name` case-insensitively, ending at a word boundary.
///
/// `@Jeffrey` does not count as a mention of `Jeff`; `@JEFF,` does.
#[must_use]
pub fn contains_mention(text: &str, name: &str) -> bool {
    let haystack = lowercase(text);
    let mut needle = String::with_capacity(name.len() + 1);
    needle.push(TRIGGER);
    needle.push_str(&lowercase(name));

    haystack.match_indices(&needle).any(|(at, matched)| {
        haystack[at + matched.len()..]
            .chars()
            .next()
            .is_none_or(|next| !is_word_char(next))
    })
}

/// The subset of `tags` still mentioned in `text`.
///
/// Deleting a mention's text untags the user. Never adds entries, and
/// running it on its own output changes nothing.
#[must_use]
pub fn validate(text: &str, tags: &TaggedUsers) -> TaggedUsers {
    let mut kept = tags.clone();
    kept.retain(|user| contains_mention(text, &user.name));
    kept
}
