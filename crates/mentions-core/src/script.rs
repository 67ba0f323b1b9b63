//! Event scripts: one JSON-encoded [`InputEvent`] per line.
//!
//! Blank lines and lines starting with `#` are skipped, so scripts can be
//! annotated:
//!
//! ```text
//! # type "@je" and pick Jeff
//! {"kind":"character_inserted","ch":"@"}
//! {"kind":"character_inserted","ch":"j"}
//! {"kind":"character_inserted","ch":"e"}
//! {"kind":"candidate_selected","user_id":2}
//! {"kind":"enter_pressed"}
//! ```

use crate::error::{MentionError, Result};
use crate::session::InputEvent;

/// Parse a whole script.
///
/// # Errors
///
/// Returns [`MentionError::Script`] naming the first line (1-based) that is
/// not a valid event.
pub fn parse_script(source: &str) -> Result<Vec<InputEvent>> {
    let mut events = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str::<InputEvent>(line)
            .map_err(|source| MentionError::Script { line: idx + 1, source })?;
        events.push(event);
    }
    Ok(events)
}

/// Expand `text` into one `character_inserted` event per character.
#[must_use]
pub fn typing(text: &str) -> Vec<InputEvent> {
    text.chars()
        .map(|ch| InputEvent::CharacterInserted { ch })
        .collect()
}
