//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `RIGWRIGHT__LLM__PROVIDER=ollama`,
//!    `RIGWRIGHT__REVISION__MAX_ITERATIONS=3`, ...
//! 3. Config file: `--config FILE` if given, otherwise the platform config
//!    file and then `./.rigwright.toml` (both optional)
//! 4. Built-in defaults (always present)

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context as _, ensure};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use rigwright_adapters::{LlmSettings, Provider, Temperatures};
use rigwright_core::application::DEFAULT_MAX_ITERATIONS;

use crate::{
    cli::OutputFormat,
    error::{CliError, CliResult},
};

/// Per-directory override picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".rigwright.toml";

const ENV_PREFIX: &str = "RIGWRIGHT";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Language model connection.
    pub llm: LlmConfig,
    /// Revision loop limits.
    pub revision: RevisionConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// `openai` or `ollama`.
    pub provider: String,
    /// Falls back to the provider's default model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Falls back to the provider's public endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Environment variable holding the API key.  The key itself is never
    /// stored in the config file.
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub temperature: TemperatureConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default().as_str().into(),
            model: None,
            base_url: None,
            api_key_env: "OPENAI_API_KEY".into(),
            timeout_secs: 60,
            temperature: TemperatureConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureConfig {
    pub interpret: f32,
    pub plan: f32,
    pub critique: f32,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        let t = Temperatures::default();
        Self {
            interpret: t.interpret,
            plan: t.plan,
            critique: t.critique,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevisionConfig {
    pub max_iterations: u32,
}

impl Default for RevisionConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: OutputFormat::Auto,
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file(s), then environment.
    ///
    /// An explicit `config_file` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("serialising default configuration")?,
        );

        builder = match config_file {
            Some(path) => builder.add_source(toml_file(path, true)),
            None => builder
                .add_source(toml_file(&Self::config_path(), false))
                .add_source(toml_file(Path::new(LOCAL_CONFIG_FILE), false)),
        };

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("reading configuration sources")?
            .try_deserialize()
            .context("configuration has an unexpected shape")?;

        config.check()?;
        Ok(config)
    }

    /// Reject values no run could use.
    fn check(&self) -> anyhow::Result<()> {
        self.llm
            .provider
            .parse::<Provider>()
            .map_err(anyhow::Error::msg)?;
        ensure!(self.llm.timeout_secs > 0, "llm.timeout_secs must be positive");
        ensure!(
            self.revision.max_iterations >= 1,
            "revision.max_iterations must be at least 1"
        );
        let t = &self.llm.temperature;
        for (name, value) in [
            ("interpret", t.interpret),
            ("plan", t.plan),
            ("critique", t.critique),
        ] {
            ensure!(
                (0.0..=2.0).contains(&value),
                "llm.temperature.{name} must be between 0 and 2, got {value}"
            );
        }
        Ok(())
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.rigwright.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "rigwright", "rigwright")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Client settings, reading the API key from the configured variable.
    pub fn llm_settings(&self) -> CliResult<LlmSettings> {
        self.llm_settings_with_key(std::env::var(&self.llm.api_key_env).ok())
    }

    pub fn llm_settings_with_key(&self, api_key: Option<String>) -> CliResult<LlmSettings> {
        let provider: Provider =
            self.llm
                .provider
                .parse()
                .map_err(|message| CliError::ConfigError {
                    message,
                    source: None,
                })?;

        let mut settings = LlmSettings::for_provider(provider);
        if let Some(model) = &self.llm.model {
            settings.model = model.clone();
        }
        if let Some(base_url) = &self.llm.base_url {
            settings.base_url = base_url.clone();
        }
        settings.api_key_env = self.llm.api_key_env.clone();
        settings.api_key = api_key.filter(|k| !k.trim().is_empty());
        settings.timeout = Duration::from_secs(self.llm.timeout_secs);
        Ok(settings)
    }

    pub fn temperatures(&self) -> Temperatures {
        let t = self.llm.temperature;
        Temperatures {
            interpret: t.interpret,
            plan: t.plan,
            critique: t.critique,
        }
    }
}

fn toml_file(path: &Path, required: bool) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml).required(required)
}
