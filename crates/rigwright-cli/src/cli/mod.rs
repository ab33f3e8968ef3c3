//! The `rigwright` command tree. Handlers in `commands/` receive these
//! parsed structs and never look at raw arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "rigwright",
    bin_name = "rigwright",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f5a5} PC build recommendations that are checked before they are shown",
    long_about = "Rigwright turns a plain-language request into a complete PC build, \
                  validates socket, memory, clearance, cooling and power compatibility, \
                  and revises the build until it passes.",
    after_help = "EXAMPLES:\n\
        \x20 rigwright recommend \"1440p gaming and streaming, around $1800, quiet\"\n\
        \x20 rigwright recommend                # interactive\n\
        \x20 rigwright validate my-build.json\n\
        \x20 rigwright clean-parts raw.json parts_db.json",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Recommend a validated build for a free-text request.
    #[command(
        visible_alias = "r",
        about = "Recommend a PC build",
        after_help = "EXAMPLES:\n\
            \x20 rigwright recommend \"video editing workstation, $3000, prefers AMD\"\n\
            \x20 rigwright recommend --max-iterations 3 \"budget esports PC under $700\"\n\
            \x20 rigwright recommend --json \"small form factor HTPC\" > build.json"
    )]
    Recommend(RecommendArgs),

    /// Validate a build document.
    #[command(
        visible_alias = "v",
        about = "Check a build for compatibility and power issues",
        after_help = "EXAMPLES:\n\
            \x20 rigwright validate build.json\n\
            \x20 rigwright validate build.json --json"
    )]
    Validate(ValidateArgs),

    /// Drop unpriced listings from a scraped parts dataset.
    #[command(
        about = "Clean a parts dataset",
        after_help = "EXAMPLES:\n\
            \x20 rigwright clean-parts data/raw_parts.json data/parts_db.json"
    )]
    CleanParts(CleanPartsArgs),

    /// Initialise a Rigwright configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 rigwright init           # platform config directory\n\
            \x20 rigwright init --local   # .rigwright.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 rigwright completions bash > ~/.local/share/bash-completion/completions/rigwright\n\
            \x20 rigwright completions zsh  > ~/.zfunc/_rigwright\n\
            \x20 rigwright completions fish > ~/.config/fish/completions/rigwright.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Rigwright configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 rigwright config get llm.provider\n\
            \x20 rigwright config list\n\
            \x20 rigwright config path"
    )]
    Config(ConfigCommands),
}

// ── recommend ─────────────────────────────────────────────────────────────────

/// Arguments for `rigwright recommend`.
#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// The request in plain language.  Omit it to start an interactive
    /// session.
    #[arg(value_name = "REQUEST", help = "What the build is for (omit for interactive mode)")]
    pub request: Vec<String>,

    /// Maximum generate/validate rounds before giving up.
    #[arg(
        short = 'n',
        long = "max-iterations",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Revision budget (overrides config)"
    )]
    pub max_iterations: Option<u32>,

    /// Print the recommendation as JSON.
    #[arg(long = "json", help = "Print the recommendation as JSON")]
    pub json: bool,
}

impl RecommendArgs {
    /// The request words joined back into one string, if any were given.
    pub fn request_text(&self) -> Option<String> {
        if self.request.is_empty() {
            None
        } else {
            Some(self.request.join(" "))
        }
    }
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `rigwright validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to a build JSON document.
    #[arg(value_name = "BUILD", help = "Build JSON file")]
    pub build: PathBuf,

    /// Print the validation result as JSON.
    #[arg(long = "json", help = "Print the validation result as JSON")]
    pub json: bool,
}

// ── clean-parts ───────────────────────────────────────────────────────────────

/// Arguments for `rigwright clean-parts`.
#[derive(Debug, Args)]
pub struct CleanPartsArgs {
    /// Scraped dataset (JSON object of category → parts).
    #[arg(value_name = "INPUT", help = "Raw parts dataset")]
    pub input: PathBuf,

    /// Where to write the cleaned dataset.
    #[arg(value_name = "OUTPUT", help = "Cleaned dataset destination")]
    pub output: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `rigwright init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.rigwright.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `rigwright completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `rigwright config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `llm.provider`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
