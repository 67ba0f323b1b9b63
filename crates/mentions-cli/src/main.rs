#![forbid(unsafe_code)]

mod cmd;
mod context;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "mn: live-text @mention tagging engine",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format: pretty, text or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Engine config file (default: ./mentions.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// User directory file, .toml or .json (default: built-in demo users).
    #[arg(long, global = true)]
    directory: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Directory",
        about = "List directory users",
        after_help = "EXAMPLES:\n    # Show the demo directory\n    mn users\n\n    # Use your own directory file\n    mn --directory team.toml users"
    )]
    Users,

    #[command(
        next_help_heading = "Directory",
        about = "Prefix-match users for a mention query",
        long_about = "List users whose name starts with QUERY, ignoring case and diacritics. An empty query lists everyone.",
        after_help = "EXAMPLES:\n    # Everyone (what a bare @ shows)\n    mn candidates\n\n    # Users starting with \"je\"\n    mn candidates je --json"
    )]
    Candidates(cmd::candidates::CandidatesArgs),

    #[command(
        next_help_heading = "Mentions",
        about = "Render text with tagged mentions emphasized",
        after_help = "EXAMPLES:\n    # Emphasize Jeff and Bryan\n    mn render \"@jeff, and @BRYAN\" --tag 2 --tag 3"
    )]
    Render(cmd::mentions::MentionArgs),

    #[command(
        next_help_heading = "Mentions",
        about = "Keep only the tags still mentioned in the text",
        after_help = "EXAMPLES:\n    # Jeff is dropped because the @ was deleted\n    mn validate \"Hi Jeff\" --tag 2"
    )]
    Validate(cmd::mentions::MentionArgs),

    #[command(
        next_help_heading = "Sessions",
        about = "Replay an input event script through an editing session",
        long_about = "Feed JSON-lines input events through a session and print every effect: markup updates, commits, notifications and posted comments.",
        after_help = "EXAMPLES:\n    # Replay a script file\n    mn replay session.jsonl\n\n    # Read events from stdin\n    mn replay - --json < session.jsonl\n\n    # Type text instead of writing events\n    mn replay --type \"Hi @je\" --select 2 --submit"
    )]
    Replay(cmd::replay::ReplayArgs),

    #[command(
        next_help_heading = "Sessions",
        about = "Show the demo comment log with mentions emphasized"
    )]
    Comments,

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    mn completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MENTIONS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "mn=debug,mentions_core=debug,info"
        } else {
            "mn=info,mentions_core=info,warn"
        })
    });

    let format = env::var("MENTIONS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let working_dir = env::current_dir()?;
    let ctx = match context::load_context(
        &working_dir,
        cli.config.as_deref(),
        cli.directory.as_deref(),
    ) {
        Ok(ctx) => ctx,
        Err(err) => {
            output::render_error(output, &CliError::from(&err))?;
            return Err(anyhow::Error::new(err).context("failed to load mentions context"));
        }
    };

    match &cli.command {
        Commands::Users => cmd::candidates::run_users(&ctx, output),
        Commands::Candidates(args) => cmd::candidates::run_candidates(args, &ctx, output),
        Commands::Render(args) => cmd::mentions::run_render(args, &ctx, output),
        Commands::Validate(args) => cmd::mentions::run_validate(args, &ctx, output),
        Commands::Replay(args) => cmd::replay::run_replay(args, ctx, output),
        Commands::Comments => cmd::comments::run_comments(&ctx, output),
        Commands::Completions(_) => Ok(()),
    }
}
