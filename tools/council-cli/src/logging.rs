//! Log setup.
//!
//! The library crates log through the `log` facade; the CLI routes those
//! records to stderr so stdout stays clean for command output.

use log::LevelFilter;

/// Map `-v` repetitions to a level. Warnings are always shown.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger. `RUST_LOG` refines the level further.
pub fn init(verbosity: u8) {
    let result = env_logger::Builder::new()
        .filter_level(level_for(verbosity))
        .parse_default_env()
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .try_init();
    if result.is_err() {
        log::debug!("logger already installed");
    }
}
