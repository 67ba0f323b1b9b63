//! Read-only directory views for `mn users` and `mn candidates`.

use crate::context::Context;
use crate::output::{OutputMode, Renderable, render_list, write_json};
use clap::Args;
use mentions_core::{User, UserDirectory, find_candidates};
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct CandidatesArgs {
    /// Text typed after `@`. Omit to list everyone.
    #[arg(default_value = "")]
    pub query: String,
}

pub struct UserRow<'a>(pub &'a User);

impl Renderable for UserRow<'_> {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "@{:<20} #{}", self.0.name, self.0.user_id)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        write_json(w, self.0)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}\t{}", self.0.user_id, self.0.name)
    }

    fn table_headers() -> &'static [&'static str] {
        &["user_id", "name"]
    }
}

pub fn run_users(ctx: &Context, output: OutputMode) -> anyhow::Result<()> {
    let rows: Vec<UserRow<'_>> = ctx.directory.list_users().iter().map(UserRow).collect();
    render_list(&rows, output)?;
    Ok(())
}

pub fn run_candidates(
    args: &CandidatesArgs,
    ctx: &Context,
    output: OutputMode,
) -> anyhow::Result<()> {
    let matches = find_candidates(ctx.directory.list_users(), &args.query);
    tracing::debug!(query = %args.query, matches = matches.len(), "candidates");

    if matches.is_empty() && !output.is_json() {
        let mut err = io::stderr().lock();
        writeln!(err, "no users match '{}'", args.query)?;
        return Ok(());
    }

    let rows: Vec<UserRow<'_>> = matches.iter().map(UserRow).collect();
    render_list(&rows, output)?;
    Ok(())
}
