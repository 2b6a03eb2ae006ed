// SPDX-License-Identifier: PMPL-1.0-or-later
//! Auditbot CLI - WCAG rule evaluation and compliance scoring

use anyhow::Context;
use auditbot::compliance::ClassificationTable;
use auditbot::config::{load_config, Config, DEFAULT_CONFIG_FILE};
use auditbot::report::{generate_report, render_scan, OutputFormat};
use auditbot::scanner::{load_document, Scanner};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// WCAG accessibility audit and compliance scoring
#[derive(Parser)]
#[command(name = "auditbot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a file or every HTML file in a directory
    Check {
        /// File or directory to scan
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Project id attached to each report (random if not specified)
        #[arg(long)]
        project_id: Option<Uuid>,

        /// URL recorded on the report (single files only; defaults to the path)
        #[arg(long)]
        url: Option<String>,

        /// Alternate rule classification table
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Exit with status 1 when any overall score is below this value
        #[arg(long)]
        fail_under: Option<f64>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Print the raw passes and violations for a single file
    Analyze {
        /// File to analyze
        file: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Print the active rule classification table
    Rules {
        /// Alternate rule classification table
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool, config: &Config) {
    let filter = if verbose {
        EnvFilter::new("auditbot=debug")
    } else {
        EnvFilter::new(format!("auditbot={}", config.log.level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// `--rules` wins over the configured table
fn classification_table(rules: Option<&Path>, config: &Config) -> anyhow::Result<ClassificationTable> {
    let table = match rules {
        Some(path) => ClassificationTable::load(path),
        None => config.classification_table(),
    };
    table.context("Failed to load rule classification table")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Check {
            path,
            format,
            output,
            project_id,
            url,
            rules,
            fail_under,
            verbose,
        } => {
            init_logging(verbose, &config);
            let table = classification_table(rules.as_deref(), &config)?;
            let scanner = Scanner::new(table)
                .with_config(config.scan.clone())
                .with_project_id(project_id.unwrap_or_else(Uuid::new_v4));

            let outcomes = scanner
                .scan_path(&path, url.as_deref())
                .with_context(|| format!("Failed to scan {}", path.display()))?;
            let reports: Vec<_> = outcomes.into_iter().map(|o| o.report).collect();
            let report = generate_report(&reports, format.into());
            write_output(&report, output.as_deref())?;

            if let Some(threshold) = fail_under {
                if reports.iter().any(|r| r.overall_score < threshold) {
                    std::process::exit(1);
                }
            }
        }

        Commands::Analyze { file, format, verbose } => {
            init_logging(verbose, &config);
            let doc = load_document(&file)?;
            let scan = auditbot::analyzers::evaluate(&doc);
            println!("{}", render_scan(&scan, format.into()));
        }

        Commands::Rules { rules } => {
            let table = classification_table(rules.as_deref(), &config)?;
            print!("{}", table.to_toml()?);
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
