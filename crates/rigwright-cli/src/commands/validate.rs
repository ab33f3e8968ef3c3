//! `rigwright validate` - check a build document.

use std::fs;

use tracing::{info, instrument};

use rigwright_core::{
    application::quick_validate,
    domain::{Build, ValidationResult},
};

use crate::{
    cli::{OutputFormat, ValidateArgs},
    error::{CliError, CliResult, CliContext},
    output::OutputManager,
};

#[instrument(skip_all, fields(build = %args.build.display()))]
pub fn execute(args: ValidateArgs, output: OutputManager) -> CliResult<()> {
    if !args.build.is_file() {
        return Err(CliError::FileNotFound { path: args.build });
    }

    let raw = fs::read_to_string(&args.build)
        .cli_context(|| format!("reading '{}'", args.build.display()))?;
    let build: Build = serde_json::from_str(&raw)
        .cli_context(|| format!("'{}' is not a build document", args.build.display()))?;

    let result = quick_validate(&build)?;
    info!(
        valid = result.is_valid(),
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "Build validated"
    );

    if args.json || output.format() == OutputFormat::Json {
        let doc = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::from(std::io::Error::other(e)))?;
        output.data(&doc)?;
    } else {
        render(&build, &result, &output)?;
    }

    if result.is_valid() {
        Ok(())
    } else {
        Err(CliError::InvalidBuild {
            summary: result.summary(),
        })
    }
}

fn render(build: &Build, result: &ValidationResult, output: &OutputManager) -> CliResult<()> {
    let gpu = build
        .gpu
        .as_ref()
        .map_or("integrated graphics", |g| g.model.as_str());
    output.header(&format!("{} + {}", build.cpu.model, gpu))?;

    for e in result.errors() {
        output.error(&format!("[{}] {}: {}", e.kind(), e.component_tag(), e.message))?;
    }
    for w in result.warnings() {
        output.warning(&format!(
            "[{}/{}] {}: {}",
            w.kind(),
            w.severity,
            w.component_tag(),
            w.message
        ))?;
    }

    if !result.metrics().is_empty() {
        output.print("")?;
        output.print("Metrics:")?;
        for (key, value) in result.metrics() {
            output.print(&format!("  {key}: {value}"))?;
        }
    }

    output.print("")?;
    if result.is_valid() {
        output.success(&result.summary())?;
    }
    Ok(())
}
