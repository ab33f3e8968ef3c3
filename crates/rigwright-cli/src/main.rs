//! # Rigwright CLI
//!
//! PC build recommendations that are checked before they are shown.
//!
//! `.env` is read first, then arguments are parsed, then logging comes up,
//! and only then is configuration loaded, so a broken config file is logged
//! and reported like any other failure.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! |  0   | Success                                   |
//! |  1   | Model, I/O or internal failure            |
//! |  2   | Usage error or malformed input            |
//! |  3   | Missing file, invalid build, budget spent |
//! |  4   | Configuration error                       |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod report;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version land here as well and exit 0.
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    let _log_guard = match init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:#}");
            return ExitCode::from(1);
        }
    };

    let verbose = cli.global.verbose > 0;
    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        log_file = ?cli.global.log_file,
        "Arguments parsed"
    );

    match load_and_run(cli) {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

fn load_and_run(cli: Cli) -> CliResult<()> {
    let config =
        AppConfig::load(cli.global.config.as_ref()).map_err(|e| CliError::ConfigError {
            message: format!("{e:#}"),
            source: None,
        })?;
    let output = OutputManager::new(&cli.global, &config);
    run(cli, config, output)
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Recommend(cmd) => commands::recommend::execute(cmd, config, output),
        Commands::Validate(cmd) => commands::validate::execute(cmd, output),
        Commands::CleanParts(cmd) => commands::clean_parts::execute(cmd, output),
        Commands::Init(cmd) => commands::init::execute(cmd, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Log, print to stderr, and turn the error into an exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();
    let color = std::io::IsTerminal::is_terminal(&std::io::stderr());
    eprint!("{}", err.render(verbose, color));
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_comes_from_the_package() {
        assert_eq!(Cli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn config_errors_exit_with_four() {
        let cli = Cli::try_parse_from([
            "rigwright",
            "--config",
            "/definitely/not/here/rigwright.toml",
            "config",
            "list",
        ])
        .unwrap();
        let err = load_and_run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
