//! The editing session: one live draft, one query state, driven by input events.
//!
//! A session owns its [`Draft`] and [`QueryState`] outright and mutates them
//! only from `&mut self` event handlers, one event at a time. Every effect
//! leaves through [`Effects`]: markup for the render target after each
//! keystroke and commit, and a comment plus an optional notification on
//! submission.
//!
//! ```text
//! Idle --@--> Searching --letter--> Searching --commit/stop--> Idle
//!   \__________________ Enter: validate, render, post, reset ______/
//! ```

use crate::commit::{Caret, commit};
use crate::config::EngineConfig;
use crate::directory::UserDirectory;
use crate::model::{Comment, Draft, User, UserId};
use crate::render::{RenderOptions, render_with};
use crate::trigger::{QueryState, TriggerAction, handle_character_inserted, handle_text_changed};
use crate::validate::validate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One input event from the editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    /// A character was appended at the end of the text.
    CharacterInserted { ch: char },
    /// The text was edited some other way (deletion, paste); carries the full new text.
    TextChanged { text: String },
    /// Submit the draft. Never inserted as text.
    EnterPressed,
    /// A user was picked from the candidate list.
    CandidateSelected { user_id: UserId },
}

/// Transient "these users were alerted" message for the display adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    /// The adapter hides the notification after this long.
    pub dismiss_after_ms: u64,
}

pub trait CommentSink {
    fn post(&mut self, comment: Comment);
}

pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

pub trait RenderTarget {
    fn set_markup(&mut self, markup: &str, caret: Caret);

    /// Empty the surface after a submission.
    fn clear(&mut self) {
        self.set_markup("", Caret::End);
    }
}

/// The three outbound channels of a session, borrowed per event.
pub struct Effects<'a> {
    pub comments: &'a mut dyn CommentSink,
    pub notifications: &'a mut dyn NotificationSink,
    pub render: &'a mut dyn RenderTarget,
}

/// In-memory comment store. Comments live as long as the log does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentLog {
    comments: Vec<Comment>,
}

impl CommentLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A log holding the two demo comments that go with
    /// [`StaticDirectory::demo`](crate::directory::StaticDirectory::demo).
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            comments: vec![
                Comment {
                    author_id: UserId(0),
                    text: "This is comment to @jeff, where I mention @BRYAN".to_string(),
                    tags: vec![User::new(2, "Jeff"), User::new(3, "Bryan")].into(),
                },
                Comment {
                    author_id: UserId(1),
                    text: "This is tagging @Kevin".to_string(),
                    tags: vec![User::new(1, "Kevin")].into(),
                },
            ],
        }
    }

    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

impl CommentSink for CommentLog {
    fn post(&mut self, comment: Comment) {
        self.comments.push(comment);
    }
}

/// What a submission produced. Either part is `None` when intentionally suppressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// Final markup after validation.
    pub markup: String,
    pub comment: Option<Comment>,
    pub notification: Option<Notification>,
}

/// Result of handling one [`InputEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SessionOutcome {
    Keystroke {
        action: TriggerAction,
        state: QueryState,
        markup: String,
    },
    Committed {
        user: User,
        markup: String,
    },
    Submitted(Submission),
    /// The event had no effect, e.g. selecting a user that is not a current candidate.
    Ignored { reason: String },
}

pub struct Session<D> {
    directory: D,
    draft: Draft,
    query: QueryState,
    render_options: RenderOptions,
    notify_header: String,
    dismiss_after_ms: u64,
}

impl<D: UserDirectory> Session<D> {
    #[must_use]
    pub fn new(directory: D, config: &EngineConfig) -> Self {
        Self {
            directory,
            draft: Draft::new(config.session.author_id),
            query: QueryState::idle(),
            render_options: config.render.options(),
            notify_header: config.notify.header.clone(),
            dismiss_after_ms: config.notify.dismiss_after_ms,
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    #[must_use]
    pub const fn query_state(&self) -> &QueryState {
        &self.query
    }

    #[must_use]
    pub const fn directory(&self) -> &D {
        &self.directory
    }

    /// Candidates for the open search, recomputed from the directory on every call.
    ///
    /// Empty while idle.
    #[must_use]
    pub fn candidates(&self) -> Vec<User> {
        if self.query.searching {
            self.directory.candidates(&self.query.query)
        } else {
            Vec::new()
        }
    }

    /// Current draft text rendered with the session's emphasis settings.
    #[must_use]
    pub fn markup(&self) -> String {
        render_with(&self.draft.text, &self.draft.tags, &self.render_options)
    }

    /// Dispatch one event.
    pub fn handle(&mut self, event: InputEvent, fx: &mut Effects<'_>) -> SessionOutcome {
        match event {
            InputEvent::CharacterInserted { ch } => self.insert_char(ch, fx),
            InputEvent::TextChanged { text } => self.replace_text(text, fx),
            InputEvent::EnterPressed => SessionOutcome::Submitted(self.submit(fx)),
            InputEvent::CandidateSelected { user_id } => self.select_id(user_id, fx),
        }
    }

    /// Append `ch` and classify it.
    pub fn insert_char(&mut self, ch: char, fx: &mut Effects<'_>) -> SessionOutcome {
        self.draft.text.push(ch);
        let (next, action) = handle_character_inserted(&self.draft.text, ch, &self.query);
        self.after_keystroke(next, action, fx)
    }

    /// Replace the whole text after an edit that was not a plain append.
    pub fn replace_text(&mut self, text: String, fx: &mut Effects<'_>) -> SessionOutcome {
        self.draft.text = text;
        let (next, action) = handle_text_changed(&self.draft.text, &self.query);
        self.after_keystroke(next, action, fx)
    }

    fn after_keystroke(
        &mut self,
        next: QueryState,
        action: TriggerAction,
        fx: &mut Effects<'_>,
    ) -> SessionOutcome {
        debug!(
            action = action.as_str(),
            query = %next.query,
            trigger_index = next.trigger_index,
            "keystroke classified"
        );
        self.query = next;
        let markup = self.markup();
        fx.render.set_markup(&markup, Caret::End);
        SessionOutcome::Keystroke {
            action,
            state: self.query.clone(),
            markup,
        }
    }

    /// Commit a candidate chosen by id.
    ///
    /// Ids outside the current candidate list are ignored.
    pub fn select_id(&mut self, user_id: UserId, fx: &mut Effects<'_>) -> SessionOutcome {
        let Some(user) = self
            .candidates()
            .into_iter()
            .find(|candidate| candidate.user_id == user_id)
        else {
            warn!(user_id = %user_id, "ignoring selection of a user that is not a candidate");
            return SessionOutcome::Ignored {
                reason: format!("user {user_id} is not a current candidate"),
            };
        };
        self.select(&user, fx)
    }

    /// Commit `user` at the open trigger and close the search.
    pub fn select(&mut self, user: &User, fx: &mut Effects<'_>) -> SessionOutcome {
        if !self.query.searching {
            warn!(user_id = %user.user_id, "ignoring selection while no search is open");
            return SessionOutcome::Ignored {
                reason: "no mention search is open".to_string(),
            };
        }

        self.draft = commit(&self.draft, &self.query, user);
        self.query = QueryState::idle();
        debug!(user_id = %user.user_id, name = %user.name, "committed mention");

        let markup = self.markup();
        fx.render.set_markup(&markup, Caret::End);
        SessionOutcome::Committed {
            user: user.clone(),
            markup,
        }
    }

    /// Validate, render, post and reset.
    ///
    /// Empty text posts nothing; no surviving tags means no notification.
    /// The draft is reset either way.
    pub fn submit(&mut self, fx: &mut Effects<'_>) -> Submission {
        let dropped = self.draft.tags.len();
        self.draft.tags = validate(&self.draft.text, &self.draft.tags);
        let dropped = dropped - self.draft.tags.len();

        let markup = self.markup();
        fx.render.set_markup(&markup, Caret::End);

        let mut submission = Submission {
            markup,
            comment: None,
            notification: None,
        };

        if !self.draft.text.is_empty() {
            if !self.draft.tags.is_empty() {
                let notification = self.notification_for(&self.draft);
                fx.notifications.notify(notification.clone());
                submission.notification = Some(notification);
            }

            let comment = Comment::from(self.draft.clone());
            info!(
                author_id = %comment.author_id,
                tagged = comment.tags.len(),
                dropped,
                "posting comment"
            );
            fx.comments.post(comment.clone());
            submission.comment = Some(comment);
        } else {
            debug!("empty draft submitted, nothing posted");
        }

        self.draft = Draft::new(self.draft.author_id);
        self.query = QueryState::idle();
        fx.render.clear();
        submission
    }

    fn notification_for(&self, draft: &Draft) -> Notification {
        let mut message = format!("{}\n", self.notify_header);
        for user in &draft.tags {
            message.push_str(&user.name);
            message.push('\n');
        }
        Notification {
            message,
            dismiss_after_ms: self.dismiss_after_ms,
        }
    }
}
