//! Mention trigger state machine.
//!
//! Every keystroke is classified against the tail of the text it produced:
//!
//! 1. `@` at the start of the text or right after a space opens a search.
//! 2. An alphabetic character extends the query, either as the first letter
//!    after a fresh trigger or while a search is already open and everything
//!    after the trigger is still letters.
//! 3. Anything else closes the search.
//!
//! All offsets are character offsets (Unicode scalar values), never bytes.

use crate::fold::fold;
use serde::{Deserialize, Serialize};

/// The character that opens a mention search.
pub const TRIGGER: char = '@';

/// Transient per-keystroke search state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub searching: bool,
    /// Folded text typed after the trigger.
    pub query: String,
    /// Offset of the `@` that opened the search. Only meaningful while searching.
    pub trigger_index: usize,
}

impl QueryState {
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    fn stopped_at(len: usize) -> Self {
        Self {
            searching: false,
            query: String::new(),
            trigger_index: len.saturating_sub(1),
        }
    }
}

/// What a keystroke did to the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerAction {
    StartSearch,
    ContinueQuery,
    /// An open search was closed.
    StopSearch,
    /// Nothing was open and nothing opened.
    ResetToIdle,
}

impl TriggerAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartSearch => "start_search",
            Self::ContinueQuery => "continue_query",
            Self::StopSearch => "stop_search",
            Self::ResetToIdle => "reset_to_idle",
        }
    }
}

/// `true` when `chars[at]` is an `@` at the start of the text or after a space.
fn opens_search(chars: &[char], at: usize) -> bool {
    chars.get(at) == Some(&TRIGGER) && (at == 0 || chars[at - 1] == ' ')
}

/// Classify one inserted character.
///
/// `current_text` is the full text after the insertion, so it ends with
/// `inserted`.
#[must_use]
pub fn handle_character_inserted(
    current_text: &str,
    inserted: char,
    state: &QueryState,
) -> (QueryState, TriggerAction) {
    let chars: Vec<char> = current_text.chars().collect();
    let len = chars.len();

    if len == 0 {
        return stop(state, 0);
    }

    if inserted == TRIGGER && opens_search(&chars, len - 1) {
        let next = QueryState {
            searching: true,
            query: String::new(),
            trigger_index: len - 1,
        };
        return (next, TriggerAction::StartSearch);
    }

    if inserted.is_alphabetic() {
        let trigger_index = if len >= 2 && opens_search(&chars, len - 2) {
            Some(len - 2)
        } else if state.searching
            && state.trigger_index + 1 < len
            && chars[state.trigger_index] == TRIGGER
            && chars[state.trigger_index + 1..]
                .iter()
                .all(|c| c.is_alphabetic())
        {
            Some(state.trigger_index)
        } else {
            None
        };

        if let Some(trigger_index) = trigger_index {
            let typed: String = chars[trigger_index + 1..].iter().collect();
            let next = QueryState {
                searching: true,
                query: fold(&typed),
                trigger_index,
            };
            return (next, TriggerAction::ContinueQuery);
        }
    }

    stop(state, len)
}

/// Re-classify after an arbitrary edit such as a deletion or a paste.
///
/// The last character of the edited text stands in for the inserted one;
/// an emptied text resets to idle.
#[must_use]
pub fn handle_text_changed(text: &str, state: &QueryState) -> (QueryState, TriggerAction) {
    match text.chars().last() {
        Some(last) => handle_character_inserted(text, last, state),
        None => stop(state, 0),
    }
}

fn stop(state: &QueryState, len: usize) -> (QueryState, TriggerAction) {
    let action = if state.searching {
        TriggerAction::StopSearch
    } else {
        TriggerAction::ResetToIdle
    };
    (QueryState::stopped_at(len), action)
}
