//! Splicing a selected user into the draft.

use crate::model::{Draft, User};
use crate::trigger::{QueryState, TRIGGER};
use serde::{Deserialize, Serialize};

/// Where the render adapter should leave the caret after applying markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Caret {
    End,
}

/// Replace the typed `@` and partial query with `@` + the user's name and tag them.
///
/// The result keeps everything before the trigger and drops everything from
/// it onward, so the caret belongs at the end of the new text. Committing a
/// user that is already tagged only rewrites the text.
#[must_use]
pub fn commit(draft: &Draft, query_state: &QueryState, selected: &User) -> Draft {
    let head: String = draft.text.chars().take(query_state.trigger_index).collect();

    let mut text = String::with_capacity(head.len() + selected.name.len() + 1);
    text.push_str(&head);
    text.push(TRIGGER);
    text.push_str(&selected.name);

    let mut tags = draft.tags.clone();
    tags.insert(selected.clone());

    Draft {
        author_id: draft.author_id,
        text,
        tags,
    }
}
