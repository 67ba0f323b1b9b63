//! mentions-core: live-text `@mention` tagging.
//!
//! The pipeline, leaf first:
//!
//! - [`fold`]: case and diacritic folding shared by matching and queries.
//! - [`matcher`]: prefix matching of a query against the directory.
//! - [`trigger`]: the per-keystroke search state machine.
//! - [`commit`]: splicing a chosen user into the draft.
//! - [`validate`]: dropping tags whose mention text is gone.
//! - [`render`]: tokenizing and emphasizing tagged mentions.
//! - [`session`]: the event-driven editing session tying them together.
//! - [`script`]: JSON-lines event scripts for replaying sessions.
//!
//! # Conventions
//!
//! - **Errors**: the pipeline is total; only loaders return [`error::Result`].
//! - **Logging**: `tracing` macros (`debug!` for transitions, `info!` for posts).
//! - **Offsets**: character offsets everywhere except token spans, which are byte ranges.

pub mod commit;
pub mod config;
pub mod directory;
pub mod error;
pub mod fold;
pub mod matcher;
pub mod model;
pub mod render;
pub mod script;
pub mod session;
pub mod trigger;
pub mod validate;

pub use commit::{Caret, commit};
pub use directory::{StaticDirectory, UserDirectory};
pub use matcher::find_candidates;
pub use model::{Comment, Draft, TaggedUsers, User, UserId};
pub use render::{render, render_with, tokenize};
pub use session::{InputEvent, Session, SessionOutcome};
pub use trigger::{QueryState, TriggerAction, handle_character_inserted};
pub use validate::validate;
