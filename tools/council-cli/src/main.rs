use std::process::ExitCode;

use clap::Parser;
use council_cli::cli::{Cli, Command};
use council_cli::error::CouncilError;
use council_cli::store::PreferenceStore;
use council_cli::{commands, config, logging, output};
use council_search::{ThemePreference, UsageTracker};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(value) => match output::emit(cli.output, &value) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                let err = CouncilError::Json(e);
                output::emit_error(cli.output, err.exit_code_num(), &err.to_string());
                err.exit_code()
            }
        },
        Err(e) => {
            output::emit_error(cli.output, e.exit_code_num(), &e.to_string());
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> Result<serde_json::Value, CouncilError> {
    let site = config::load(cli.config.as_deref())?;

    let value = match &cli.command {
        Command::Search(args) => {
            serde_json::to_value(commands::search(&site, &args.query_text(), args.limit))?
        }
        Command::TopTasks(args) => {
            let usage = UsageTracker::new(PreferenceStore::open(&cli.state_dir));
            serde_json::to_value(commands::top_tasks(&site, &usage, args.count))?
        }
        Command::Select(args) => {
            let mut usage = UsageTracker::new(PreferenceStore::open(&cli.state_dir));
            serde_json::to_value(commands::select(&site, &mut usage, &args.id)?)?
        }
        Command::ResetUsage => {
            let mut usage = UsageTracker::new(PreferenceStore::open(&cli.state_dir));
            serde_json::to_value(commands::reset_usage(&mut usage))?
        }
        Command::Theme(args) => {
            let mut preference = ThemePreference::new(PreferenceStore::open(&cli.state_dir));
            serde_json::to_value(commands::theme(&mut preference, args)?)?
        }
        Command::Route(args) => serde_json::to_value(commands::route(&site, args))?,
        Command::Manifest => serde_json::to_value(commands::manifest(&site))?,
        Command::PushPreview(args) => {
            serde_json::to_value(commands::push_preview(&site, args.body.as_deref()))?
        }
        Command::Home => serde_json::to_value(commands::home(&site))?,
    };
    Ok(value)
}
