//! `mn render` and `mn validate`: pure text operations on one input.

use crate::context::Context;
use crate::output::{CliError, OutputMode, pretty_kv, render, render_error};
use clap::Args;
use mentions_core::render::{highlighted_tokens, render_with};
use mentions_core::{TaggedUsers, User, validate};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct MentionArgs {
    /// Comment text.
    pub text: String,

    /// Tagged user id (repeatable).
    #[arg(long = "tag", value_name = "USER_ID")]
    pub tags: Vec<u64>,
}

#[derive(Debug, Serialize)]
struct RenderOutput {
    markup: String,
    highlighted: usize,
    tags: TaggedUsers,
}

#[derive(Debug, Serialize)]
struct ValidateOutput {
    kept: Vec<User>,
    dropped: Vec<User>,
}

fn resolve(args: &MentionArgs, ctx: &Context, output: OutputMode) -> anyhow::Result<TaggedUsers> {
    match ctx.resolve_tags(&args.tags) {
        Ok(tags) => Ok(tags),
        Err(missing) => {
            let ids: Vec<String> = missing.iter().map(u64::to_string).collect();
            let msg = format!("unknown user id(s): {}", ids.join(", "));
            render_error(
                output,
                &CliError::with_details(
                    &msg,
                    "Run 'mn users' to list valid ids",
                    "unknown_user",
                ),
            )?;
            anyhow::bail!(msg)
        }
    }
}

pub fn run_render(args: &MentionArgs, ctx: &Context, output: OutputMode) -> anyhow::Result<()> {
    let tags = resolve(args, ctx, output)?;
    let options = ctx.config.render.options();
    let result = RenderOutput {
        markup: render_with(&args.text, &tags, &options),
        highlighted: highlighted_tokens(&args.text, &tags).len(),
        tags,
    };

    render(output, &result, |r, w| writeln!(w, "{}", r.markup))
}

pub fn run_validate(args: &MentionArgs, ctx: &Context, output: OutputMode) -> anyhow::Result<()> {
    let tags = resolve(args, ctx, output)?;
    let kept = validate(&args.text, &tags);
    let dropped: Vec<User> = tags
        .iter()
        .filter(|user| !kept.contains(user.user_id))
        .cloned()
        .collect();
    let result = ValidateOutput {
        kept: kept.iter().cloned().collect(),
        dropped,
    };

    render(output, &result, |r, w| {
        let names = |users: &[User]| {
            users
                .iter()
                .map(|u| u.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        pretty_kv(w, "kept", names(&r.kept))?;
        pretty_kv(w, "dropped", names(&r.dropped))
    })
}
