//! `rigwright recommend` - free text in, validated build out.

use std::{io::IsTerminal as _, sync::Arc};

use tracing::{info, instrument};

use rigwright_adapters::{
    JsonCompletion, LlmCritic, LlmInterpreter, LlmPlanner, OpenAiCompatibleClient,
};
use rigwright_core::application::{AdvisorService, Recommendation, check_request_text};

use crate::{
    cli::{OutputFormat, RecommendArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    report::{build_report, recommendation_json},
};

/// Run one request, or an interactive session when no request was given.
pub fn execute(args: RecommendArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let json = args.json || output.format() == OutputFormat::Json;

    match args.request_text() {
        Some(text) => {
            check_request_text(&text)?;
            let advisor = build_advisor(&config, args.max_iterations)?;
            let rec = run_one(&advisor, &text, &output)?;
            print_recommendation(&rec, json, &output)
        }
        None => {
            if !std::io::stdin().is_terminal() {
                return Err(CliError::InvalidInput {
                    message: "no request given and stdin is not a terminal".into(),
                    source: None,
                });
            }
            let advisor = build_advisor(&config, args.max_iterations)?;
            interactive(&advisor, json, &output)
        }
    }
}

/// Wire the model-backed collaborators around one shared HTTP client.
fn build_advisor(config: &AppConfig, max_iterations: Option<u32>) -> CliResult<AdvisorService> {
    let settings = config.llm_settings()?;
    info!(
        provider = %settings.provider,
        model = %settings.model,
        "Connecting to language model"
    );
    let llm: Arc<dyn JsonCompletion> = Arc::new(OpenAiCompatibleClient::new(settings)?);
    let t = config.temperatures();

    let advisor = AdvisorService::new(
        Box::new(LlmInterpreter::new(Arc::clone(&llm)).with_temperature(t.interpret)),
        Box::new(LlmPlanner::new(Arc::clone(&llm)).with_temperature(t.plan)),
        Box::new(LlmCritic::new(llm).with_temperature(t.critique)),
    )
    .with_max_iterations(max_iterations.unwrap_or(config.revision.max_iterations))?;
    Ok(advisor)
}

#[instrument(skip_all)]
fn run_one(advisor: &AdvisorService, text: &str, output: &OutputManager) -> CliResult<Recommendation> {
    let spinner = output.spinner("Designing and validating your build...");
    let result = advisor.recommend(text);
    spinner.finish_and_clear();
    Ok(result?)
}

fn print_recommendation(rec: &Recommendation, json: bool, output: &OutputManager) -> CliResult<()> {
    if json {
        let doc = serde_json::to_string_pretty(&recommendation_json(rec))
            .map_err(|e| CliError::from(std::io::Error::other(e)))?;
        output.data(&doc)?;
        return Ok(());
    }

    output.print(&build_report(
        &rec.build,
        Some(&rec.constraints),
        Some(&rec.validation),
    ))?;
    output.success(&format!(
        "Compatible build found after {} iteration(s)",
        rec.iterations
    ))?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn interactive(advisor: &AdvisorService, json: bool, output: &OutputManager) -> CliResult<()> {
    use dialoguer::{Input, theme::ColorfulTheme};

    output.header("Rigwright - PC build recommendations")?;
    output.info("Describe the PC you want, or type 'quit' to exit.")?;
    output.print("")?;

    let theme = ColorfulTheme::default();
    loop {
        let line: String = Input::with_theme(&theme)
            .with_prompt("Your requirements")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CliError::IoError {
                message: "reading requirements".into(),
                source: std::io::Error::other(e),
            })?;

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if is_exit_word(text) {
            output.info("Goodbye!")?;
            return Ok(());
        }
        if check_request_text(text).is_err() {
            output.warning("Please provide more details (at least 10 characters).")?;
            continue;
        }

        // A failed request does not end the session.
        match run_one(advisor, text, output) {
            Ok(rec) => print_recommendation(&rec, json, output)?,
            Err(err) => {
                err.log();
                output.error(&err.to_string())?;
            }
        }
        output.print("")?;
    }
}

#[cfg(not(feature = "interactive"))]
fn interactive(_advisor: &AdvisorService, _json: bool, _output: &OutputManager) -> CliResult<()> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

fn is_exit_word(text: &str) -> bool {
    matches!(text.to_ascii_lowercase().as_str(), "quit" | "exit" | "q")
}
