//! `rigwright config` - inspect configuration values.

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.data(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.data(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key.  Unset optional keys report the provider default.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let tree = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    let pointer = format!("/{}", key.replace('.', "/"));
    match tree.pointer(&pointer) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Object(_)) => Err(unknown_key(key, "is a section, not a value")),
        Some(other) => Ok(other.to_string()),
        None => {
            let settings = config.llm_settings_with_key(None)?;
            match key {
                "llm.model" => Ok(format!("{} (provider default)", settings.model)),
                "llm.base_url" => Ok(format!("{} (provider default)", settings.base_url)),
                _ => Err(unknown_key(key, "is not a configuration key")),
            }
        }
    }
}

fn unknown_key(key: &str, why: &str) -> CliError {
    CliError::ConfigError {
        message: format!("'{key}' {why}"),
        source: None,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
