//! Extract command - process a single page-dump file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use finstmt_core::{Document, PipelineConfig, StatementPipeline, StrategySelection};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input page dump (JSON: pages with text and detected tables)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extraction strategy
    #[arg(short, long, value_enum, default_value = "auto")]
    strategy: StrategyArg,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Show a confidence summary on stderr
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StrategyArg {
    /// Table-grid first, line-pattern fallback
    Auto,
    /// Line-pattern extraction only
    Line,
    /// Table-grid extraction only
    Table,
}

impl From<StrategyArg> for StrategySelection {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => StrategySelection::Auto,
            StrategyArg::Line => StrategySelection::LinePattern,
            StrategyArg::Table => StrategySelection::TableGrid,
        }
    }
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = if let Some(path) = config_path {
        PipelineConfig::from_file(Path::new(path))?
    } else {
        PipelineConfig::default()
    };
    config.extraction.strategy = args.strategy.into();

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing page dump: {}", args.input.display());

    let json = fs::read_to_string(&args.input)?;
    let document = Document::from_json(&json)?;

    let pipeline = StatementPipeline::new(config);
    let report = pipeline.process(&document)?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        let validation = &report.validation;
        let verdict = if validation.overall_valid {
            style("accept").green()
        } else {
            style("review").yellow()
        };
        eprintln!();
        eprintln!(
            "{} Overall confidence: {:.1}% ({})",
            style("ℹ").blue(),
            validation.overall_confidence * 100.0,
            verdict
        );
        for issue in &validation.all_issues {
            eprintln!("  - {}", issue);
        }
    }

    Ok(())
}
