//! Validate command - re-score a previously extracted result.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;

use finstmt_core::{ExtractionResult, PipelineConfig, ProcessedReport, StatementValidator};

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Extraction result JSON produced by `finstmt extract`
    #[arg(required = true)]
    input: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

pub fn run(args: ValidateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = if let Some(path) = config_path {
        PipelineConfig::from_file(Path::new(path))?
    } else {
        PipelineConfig::default()
    };

    let json = fs::read_to_string(&args.input)?;

    // Accept a bare ExtractionResult or a full ProcessedReport.
    let extraction: ExtractionResult = match serde_json::from_str(&json) {
        Ok(extraction) => extraction,
        Err(_) => {
            let report: ProcessedReport = serde_json::from_str(&json)?;
            report.extraction
        }
    };

    let validator = StatementValidator::new(&config.validation);
    let report = validator.validate(&extraction);

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);

    if !report.overall_valid {
        eprintln!(
            "{} Confidence {:.1}% below acceptance threshold",
            style("!").yellow(),
            report.overall_confidence * 100.0
        );
    }

    Ok(())
}
