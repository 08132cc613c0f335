use std::path::PathBuf;

use clap::{Parser, Subcommand};
use council_search::personalization::DEFAULT_TOP_TASKS;
use council_search::DEFAULT_LIMIT;

use crate::output::OutputFormat;

/// Query the council site catalog, manage local preferences and inspect the
/// offline caching policy.
#[derive(Parser, Debug)]
#[command(name = "council", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format for all subcommands.
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub output: OutputFormat,

    /// Site config (TOML). Defaults to the built-in district council config.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding persisted preferences.
    #[arg(long, default_value = ".council", global = true)]
    pub state_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fuzzy-search the service catalog.
    Search(SearchArgs),

    /// List the default tasks, most used first.
    TopTasks(TopTasksArgs),

    /// Select an entry: record its usage and print where it leads.
    Select(IdArg),

    /// Forget all recorded task usage.
    ResetUsage,

    /// Show, set or cycle the colour theme preference.
    Theme(ThemeArgs),

    /// Show how the offline controller would route a request.
    Route(RouteArgs),

    /// List the URLs precached at install.
    Manifest,

    /// Show the notification a push message would produce.
    PushPreview(PushPreviewArgs),

    /// Show the popular links and news shown on the home page.
    Home,
}

// ── Shared argument structs ──────────────────────────────────────────

/// Argument struct for subcommands that only need an entry id.
#[derive(clap::Args, Debug)]
pub struct IdArg {
    /// Catalog entry id.
    pub id: String,
}

// ── search ───────────────────────────────────────────────────────────

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Query words; joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Maximum number of results.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,
}

impl SearchArgs {
    /// The query as typed.
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

// ── top-tasks ────────────────────────────────────────────────────────

#[derive(clap::Args, Debug)]
pub struct TopTasksArgs {
    /// Number of tasks to list.
    #[arg(long, default_value_t = DEFAULT_TOP_TASKS)]
    pub count: usize,
}

// ── theme ────────────────────────────────────────────────────────────

#[derive(clap::Args, Debug)]
pub struct ThemeArgs {
    /// Advance auto → light → dark → auto.
    #[arg(long, conflicts_with = "set")]
    pub cycle: bool,

    /// Store a specific theme (auto, light or dark).
    #[arg(long)]
    pub set: Option<String>,

    /// Resolve `auto` as if the system preferred dark.
    #[arg(long)]
    pub system_dark: bool,
}

// ── route ────────────────────────────────────────────────────────────

#[derive(clap::Args, Debug)]
pub struct RouteArgs {
    /// Absolute or root-relative URL.
    pub url: String,

    /// Treat the request as a page navigation.
    #[arg(long)]
    pub document: bool,
}

// ── push-preview ─────────────────────────────────────────────────────

#[derive(clap::Args, Debug)]
pub struct PushPreviewArgs {
    /// Push payload text. Omit for an empty push.
    pub body: Option<String>,
}
