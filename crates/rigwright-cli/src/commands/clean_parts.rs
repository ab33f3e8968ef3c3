//! `rigwright clean-parts` - drop unpriced listings from a parts dataset.

use rigwright_adapters::clean_parts_data;

use crate::{
    cli::{CleanPartsArgs, OutputFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: CleanPartsArgs, output: OutputManager) -> CliResult<()> {
    if !args.input.is_file() {
        return Err(CliError::FileNotFound { path: args.input });
    }

    let report = clean_parts_data(&args.input, &args.output)?;

    if output.format() == OutputFormat::Json {
        let doc = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::from(std::io::Error::other(e)))?;
        output.data(&doc)?;
        return Ok(());
    }

    output.header("Parts by category")?;
    for (category, count) in &report.categories {
        output.print(&format!(
            "  {category:<24} {:>6} -> {:>6}  (removed {})",
            count.before,
            count.after,
            count.removed()
        ))?;
    }
    output.print("")?;
    output.success(&format!(
        "Kept {} of {} parts ({} removed), wrote {}",
        report.total_after(),
        report.total_before(),
        report.total_removed(),
        args.output.display()
    ))?;
    Ok(())
}
