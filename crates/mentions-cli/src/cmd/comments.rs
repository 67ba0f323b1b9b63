//! `mn comments`: the demo comment log, rendered.

use crate::context::Context;
use crate::output::{OutputMode, Renderable, render_list, write_json};
use mentions_core::render::render_with;
use mentions_core::session::CommentLog;
use mentions_core::{Comment, validate};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
pub struct CommentRow {
    #[serde(flatten)]
    comment: Comment,
    markup: String,
}

impl Renderable for CommentRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "#{:<4} {}", self.comment.author_id, self.markup)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        write_json(w, self)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}\t{}", self.comment.author_id, self.markup)
    }

    fn table_headers() -> &'static [&'static str] {
        &["author_id", "markup"]
    }
}

pub fn run_comments(ctx: &Context, output: OutputMode) -> anyhow::Result<()> {
    let options = ctx.config.render.options();
    let rows: Vec<CommentRow> = CommentLog::seeded()
        .comments()
        .iter()
        .map(|comment| CommentRow {
            markup: render_with(
                &comment.text,
                &validate(&comment.text, &comment.tags),
                &options,
            ),
            comment: comment.clone(),
        })
        .collect();
    render_list(&rows, output)?;
    Ok(())
}
