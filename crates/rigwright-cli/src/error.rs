//! CLI errors and how they reach the terminal.
//!
//! Every failure ends up as a [`CliError`]. Its [`ExitClass`] picks the
//! process exit code; its suggestions are printed under the message.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use rigwright_adapters::{LlmError, PartsDataError};
use rigwright_core::error::{ErrorCategory, RigError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Bad arguments or an unreadable document.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A build document validated with errors.
    #[error("{summary}")]
    InvalidBuild { summary: String },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error("Recommendation failed: {0}")]
    Core(#[from] RigError),

    /// The model client could not be set up.
    #[error("Model client error: {0}")]
    Llm(#[from] LlmError),

    #[error("Parts data error: {0}")]
    PartsData(#[from] PartsDataError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Compiled without a cargo feature the command needs.
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

/// What kind of failure ended the process.
///
/// | Class    | Code | Examples                                        |
/// |----------|------|-------------------------------------------------|
/// | Failure  |  1   | model unreachable, critique malformed, I/O      |
/// | Usage    |  2   | request too short, malformed build document     |
/// | NoBuild  |  3   | missing file, invalid build, budget exhausted   |
/// | Config   |  4   | bad config value, missing API key               |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitClass {
    Failure,
    Usage,
    NoBuild,
    Config,
}

impl ExitClass {
    pub const fn code(self) -> u8 {
        match self {
            Self::Failure => 1,
            Self::Usage => 2,
            Self::NoBuild => 3,
            Self::Config => 4,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Failure => "failure",
            Self::Usage => "usage error",
            Self::NoBuild => "no valid build",
            Self::Config => "configuration error",
        }
    }
}

impl From<ErrorCategory> for ExitClass {
    fn from(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::Validation => Self::Usage,
            ErrorCategory::NotFound => Self::NoBuild,
            ErrorCategory::Configuration => Self::Config,
            ErrorCategory::Collaborator | ErrorCategory::Internal => Self::Failure,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn exit_class(&self) -> ExitClass {
        match self {
            Self::InvalidInput { .. } => ExitClass::Usage,
            Self::FileNotFound { .. } | Self::InvalidBuild { .. } => ExitClass::NoBuild,
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => ExitClass::Config,
            Self::Core(core) => core.category().into(),
            Self::Llm(LlmError::MissingApiKey { .. }) => ExitClass::Config,
            Self::Llm(_) => ExitClass::Failure,
            Self::PartsData(PartsDataError::Read { .. } | PartsDataError::Write { .. }) => {
                ExitClass::Failure
            }
            Self::PartsData(_) => ExitClass::Usage,
            Self::IoError { .. } => ExitClass::Failure,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_class().code()
    }

    /// Hints shown under the message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Run 'rigwright <command> --help' for usage".into()],

            Self::FileNotFound { path } => vec![format!(
                "Check the path '{}' and try again",
                path.display()
            )],

            Self::InvalidBuild { .. } => vec![
                "Fix the errors listed above and validate again".into(),
                "Use --json to get the full result for scripting".into(),
            ],

            Self::ConfigError { .. } => vec![
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Use 'rigwright init --force' to write a fresh default config".into(),
            ],

            Self::Core(core) => core.suggestions(),

            Self::Llm(LlmError::MissingApiKey { env_var }) => vec![
                format!("Set {env_var} in your environment or in a .env file"),
                "Or switch to a local model: RIGWRIGHT__LLM__PROVIDER=ollama".into(),
            ],

            Self::Llm(_) => vec![
                "Check that the model endpoint is reachable".into(),
                "Inspect the active settings with 'rigwright config list'".into(),
            ],

            Self::PartsData(PartsDataError::Read { .. }) => {
                vec!["Check that the input file exists and is readable".into()]
            }

            Self::PartsData(PartsDataError::Write { .. }) => {
                vec!["Check that the output directory exists and is writable".into()]
            }

            Self::PartsData(_) => vec![
                "The input must be a JSON object mapping category names to arrays of parts"
                    .into(),
            ],

            Self::IoError { .. } => vec!["Check that the path exists and is accessible".into()],

            Self::FeatureNotAvailable { feature } => vec![format!(
                "Reinstall with the feature enabled: cargo install rigwright-cli --features {feature}"
            )],
        }
    }

    /// Message, cause chain (verbose only) and suggestions, ready for stderr.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_string() }
        };

        let mut lines = vec![
            String::new(),
            format!(
                "{} {}",
                paint("Error:", |s| s.red().bold().to_string()),
                paint(&self.to_string(), |s| s.red().to_string())
            ),
        ];

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                lines.push(format!(
                    "  {}",
                    paint(&format!("Caused by: {err}"), |s| s.dimmed().to_string())
                ));
                cause = err.source();
            }
        }

        let hints = self.suggestions();
        if !hints.is_empty() {
            lines.push(String::new());
            lines.push(paint("Suggestions:", |s| s.yellow().bold().to_string()));
            lines.extend(hints.into_iter().map(|hint| format!("  {hint}")));
        }

        if !verbose {
            lines.push(String::new());
            lines.push(paint("Run again with -v for the full cause chain.", |s| {
                s.dimmed().to_string()
            }));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Record the failure before it is printed.
    pub fn log(&self) {
        let class = self.exit_class();
        match class {
            ExitClass::Usage | ExitClass::NoBuild => {
                tracing::warn!(class = class.label(), exit_code = class.code(), "{self}");
            }
            ExitClass::Config | ExitClass::Failure => {
                tracing::error!(class = class.label(), exit_code = class.code(), "{self}");
            }
        }
        if let Some(cause) = self.source() {
            tracing::debug!(cause = %cause, "Underlying error");
        }
    }
}

// ── context ───────────────────────────────────────────────────────────────────

/// Attach a description of what was being attempted to a foreign error.
pub trait CliContext<T> {
    fn cli_context<S: Into<String>>(self, what: impl FnOnce() -> S) -> CliResult<T>;
}

impl<T> CliContext<T> for Result<T, std::io::Error> {
    fn cli_context<S: Into<String>>(self, what: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|source| CliError::IoError {
            message: what().into(),
            source,
        })
    }
}

/// JSON that does not parse is the user's document, not our failure.
impl<T> CliContext<T> for Result<T, serde_json::Error> {
    fn cli_context<S: Into<String>>(self, what: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|e| CliError::InvalidInput {
            message: format!("{}: {e}", what().into()),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigwright_core::{application::ApplicationError, domain::DomainError};
    use std::io;

    fn budget_exhausted() -> CliError {
        CliError::Core(
            ApplicationError::RevisionBudgetExceeded {
                attempts: 5,
                last_errors: vec!["socket".into()],
            }
            .into(),
        )
    }

    #[test]
    fn missing_api_key_names_the_variable() {
        let err = CliError::Llm(LlmError::MissingApiKey {
            env_var: "OPENAI_API_KEY".into(),
        });
        let hints = err.suggestions();
        assert!(hints.iter().any(|s| s.contains("OPENAI_API_KEY")));
        assert!(hints.iter().any(|s| s.contains("ollama")));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn core_suggestions_pass_through() {
        let core: RigError = DomainError::EmptyStorage.into();
        let expected = core.suggestions();
        assert_eq!(CliError::Core(core).suggestions(), expected);
    }

    #[test]
    fn core_categories_map_to_exit_classes() {
        assert_eq!(
            CliError::Core(DomainError::EmptyStorage.into()).exit_class(),
            ExitClass::Usage
        );
        assert_eq!(budget_exhausted().exit_class(), ExitClass::NoBuild);
        let collaborator = CliError::Core(
            ApplicationError::GenerationFailure {
                reason: "timeout".into(),
            }
            .into(),
        );
        assert_eq!(collaborator.exit_class(), ExitClass::Failure);
    }

    #[test]
    fn exit_codes_per_class() {
        let usage = CliError::InvalidInput {
            message: "x".into(),
            source: None,
        };
        let missing = CliError::FileNotFound {
            path: PathBuf::from("build.json"),
        };
        let invalid = CliError::InvalidBuild {
            summary: "Build is invalid: 1 error(s)".into(),
        };
        let config = CliError::ConfigError {
            message: "x".into(),
            source: None,
        };
        let io = CliError::IoError {
            message: "x".into(),
            source: io::Error::other("e"),
        };

        assert_eq!(usage.exit_code(), 2);
        assert_eq!(missing.exit_code(), 3);
        assert_eq!(invalid.exit_code(), 3);
        assert_eq!(config.exit_code(), 4);
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn plain_render_has_message_and_hints() {
        let err = CliError::FileNotFound {
            path: PathBuf::from("/tmp/x.json"),
        };
        let s = err.render(false, false);
        assert!(s.contains("Error: File not found: /tmp/x.json"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("-v"));
        assert!(!s.contains('\u{1b}'));
    }

    #[test]
    fn plain_render_layout() {
        let err = CliError::FileNotFound {
            path: PathBuf::from("/tmp/x.json"),
        };
        let s = err.render(false, false);
        assert!(s.starts_with("\nError: File not found: /tmp/x.json\n\nSuggestions:\n  "));
        assert!(s.ends_with("\n\nRun again with -v for the full cause chain.\n"));
    }

    #[test]
    fn verbose_render_shows_cause_chain() {
        let err = CliError::IoError {
            message: "reading build".into(),
            source: io::Error::other("disk on fire"),
        };
        let s = err.render(true, false);
        assert!(s.contains("Caused by: disk on fire"));
        assert!(!s.contains("Run again with -v"));
    }

    #[test]
    fn io_context_keeps_source() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let err = result.cli_context(|| "reading config").unwrap_err();
        assert!(matches!(err, CliError::IoError { ref message, .. } if message == "reading config"));
        assert!(err.source().is_some());
    }

    #[test]
    fn json_context_is_usage_error() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err = result.cli_context(|| "parsing build.json").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("parsing build.json"));
    }
}
