//! Subscriber setup. The library crates only emit events; this is the one
//! place a subscriber is installed.
//!
//! Without `RUST_LOG`, the rigwright crates log at WARN, and each `-v` steps
//! down one level (INFO shows revision progress, DEBUG the feedback passed
//! between iterations). `--quiet` pins ERROR. Events from dependencies such as
//! reqwest stay hidden unless `RUST_LOG` asks for them.
//!
//! `--log-file` adds a second layer that appends JSON lines to the file.

use std::{io::IsTerminal as _, path::Path};

use anyhow::Context as _;
use tracing::level_filters::LevelFilter;
use tracing_appender::{non_blocking::WorkerGuard, rolling::RollingFileAppender};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

const CRATES: [&str; 3] = ["rigwright", "rigwright_core", "rigwright_adapters"];

/// Install the subscriber. Hold on to the returned guard until exit, or
/// buffered file lines are lost.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::new(directives(level_for(args))),
    };

    let stderr = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .boxed();

    let mut layers = vec![stderr];
    let mut guard = None;
    if let Some(path) = args.log_file.as_deref() {
        let (writer, file_guard) = tracing_appender::non_blocking(file_appender(path)?);
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed(),
        );
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("a tracing subscriber is already installed")?;

    Ok(guard)
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn directives(level: LevelFilter) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Never rotates; appends to `path`, creating its directory if needed.
fn file_appender(path: &Path) -> anyhow::Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path '{}' has no file name", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory '{}'", dir.display()))?;
    Ok(tracing_appender::rolling::never(dir, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn flags(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            log_file: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn each_v_lowers_the_threshold() {
        let levels: Vec<_> = (0..=4).map(|v| level_for(&flags(v, false))).collect();
        assert_eq!(
            levels,
            [
                LevelFilter::WARN,
                LevelFilter::INFO,
                LevelFilter::DEBUG,
                LevelFilter::TRACE,
                LevelFilter::TRACE
            ]
        );
    }

    #[test]
    fn quiet_wins() {
        assert_eq!(level_for(&flags(0, true)), LevelFilter::ERROR);
        assert_eq!(level_for(&flags(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn directives_cover_every_crate() {
        assert_eq!(
            directives(LevelFilter::DEBUG),
            "rigwright=debug,rigwright_core=debug,rigwright_adapters=debug"
        );
    }

    #[test]
    fn log_file_needs_a_file_name() {
        assert!(file_appender(Path::new("/")).is_err());
    }

    #[test]
    fn log_file_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/nested/rigwright.log");
        assert!(file_appender(&path).is_ok());
        assert!(dir.path().join("logs/nested").is_dir());
    }
}
