//! `mn replay`: drive a [`Session`] from scripted input events.

use crate::context::Context;
use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render, render_error};
use anyhow::Context as _;
use clap::Args;
use mentions_core::commit::Caret;
use mentions_core::error::MentionError;
use mentions_core::script::{parse_script, typing};
use mentions_core::session::{
    CommentLog, Effects, Notification, NotificationSink, RenderTarget,
};
use mentions_core::{Comment, InputEvent, Session, SessionOutcome, UserId};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON-lines event script, or `-` for stdin.
    #[arg(required_unless_present = "type_text", conflicts_with = "type_text")]
    pub script: Option<PathBuf>,

    /// Type this text one character at a time instead of reading a script.
    #[arg(long = "type", value_name = "TEXT")]
    pub type_text: Option<String>,

    /// Pick this user id from the candidate list after typing.
    #[arg(long, value_name = "USER_ID", requires = "type_text")]
    pub select: Option<u64>,

    /// Press Enter at the end.
    #[arg(long, requires = "type_text")]
    pub submit: bool,
}

#[derive(Default)]
struct Surface {
    markup: String,
    renders: usize,
}

impl RenderTarget for Surface {
    fn set_markup(&mut self, markup: &str, _caret: Caret) {
        markup.clone_into(&mut self.markup);
        self.renders += 1;
    }
}

#[derive(Default)]
struct Alerts(Vec<Notification>);

impl NotificationSink for Alerts {
    fn notify(&mut self, notification: Notification) {
        self.0.push(notification);
    }
}

#[derive(Debug, Serialize)]
struct ReplayOutput {
    events: usize,
    renders: usize,
    outcomes: Vec<SessionOutcome>,
    notifications: Vec<Notification>,
    comments: Vec<Comment>,
    /// Surface contents after the last event.
    markup: String,
}

fn load_events(args: &ReplayArgs) -> anyhow::Result<Result<Vec<InputEvent>, MentionError>> {
    if let Some(text) = &args.type_text {
        let mut events = typing(text);
        if let Some(id) = args.select {
            events.push(InputEvent::CandidateSelected {
                user_id: UserId(id),
            });
        }
        if args.submit {
            events.push(InputEvent::EnterPressed);
        }
        return Ok(Ok(events));
    }

    let source = match args.script.as_deref() {
        Some(path) if path.as_os_str() == "-" => {
            io::read_to_string(io::stdin()).context("failed to read events from stdin")?
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => String::new(),
    };
    Ok(parse_script(&source))
}

pub fn run_replay(args: &ReplayArgs, ctx: Context, output: OutputMode) -> anyhow::Result<()> {
    let events = match load_events(args)? {
        Ok(events) => events,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            return Err(anyhow::Error::new(err).context("invalid event script"));
        }
    };

    let mut session = Session::new(ctx.directory, &ctx.config);
    let mut log = CommentLog::new();
    let mut alerts = Alerts::default();
    let mut surface = Surface::default();

    let event_count = events.len();
    let mut outcomes = Vec::with_capacity(event_count);
    for event in events {
        let mut fx = Effects {
            comments: &mut log,
            notifications: &mut alerts,
            render: &mut surface,
        };
        outcomes.push(session.handle(event, &mut fx));
    }
    tracing::debug!(events = event_count, renders = surface.renders, "replay finished");

    let result = ReplayOutput {
        events: event_count,
        renders: surface.renders,
        outcomes,
        notifications: alerts.0,
        comments: log.comments().to_vec(),
        markup: surface.markup,
    };

    render(output, &result, |r, w| match output {
        OutputMode::Pretty => render_pretty(r, w),
        _ => render_text(r, w),
    })
}

fn describe(outcome: &SessionOutcome) -> String {
    match outcome {
        SessionOutcome::Keystroke { action, markup, .. } => {
            format!("{:<14} {markup}", action.as_str())
        }
        SessionOutcome::Committed { user, markup } => {
            let label = format!("commit #{}", user.user_id);
            format!("{label:<14} {markup}")
        }
        SessionOutcome::Submitted(submission) => match &submission.comment {
            Some(comment) => format!("{:<14} {}", "submit", comment.text),
            None => "submit         (empty, nothing posted)".to_string(),
        },
        SessionOutcome::Ignored { reason } => format!("{:<14} {reason}", "ignored"),
    }
}

fn render_text(r: &ReplayOutput, w: &mut dyn Write) -> io::Result<()> {
    for outcome in &r.outcomes {
        writeln!(w, "{}", describe(outcome))?;
    }
    for notification in &r.notifications {
        write!(w, "notify\n{}", notification.message)?;
    }
    Ok(())
}

fn render_pretty(r: &ReplayOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Events")?;
    for (idx, outcome) in r.outcomes.iter().enumerate() {
        writeln!(w, "{:>3}  {}", idx + 1, describe(outcome))?;
    }

    if !r.notifications.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Notifications")?;
        for notification in &r.notifications {
            write!(w, "{}", notification.message)?;
            pretty_kv(
                w,
                "dismiss",
                format!("{}ms", notification.dismiss_after_ms),
            )?;
        }
    }

    writeln!(w)?;
    pretty_section(w, "Posted comments")?;
    if r.comments.is_empty() {
        writeln!(w, "(none)")?;
    }
    for comment in &r.comments {
        let names: Vec<&str> = comment.tags.iter().map(|u| u.name.as_str()).collect();
        pretty_kv(w, "author", comment.author_id.to_string())?;
        pretty_kv(w, "text", &comment.text)?;
        pretty_kv(w, "tags", names.join(", "))?;
    }

    writeln!(w)?;
    pretty_kv(w, "surface", &r.markup)
}
