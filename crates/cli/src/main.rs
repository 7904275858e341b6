//! mta-classoutline CLI
//!
//! Outlines GObject-style classes from JSON-encoded JavaScript syntax trees.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use mta_classoutline_core::{
    collect_definitions, format_output, load_module, OutlineConfig, OutlineScanner, OutputFormat,
    RecognizerRule, RecognizerTable,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outline GObject classes from JSON syntax trees
#[derive(Parser)]
#[command(name = "mta-classoutline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Outline GObject-style JavaScript classes from JSON syntax trees")]
#[command(long_about = r#"
mta-classoutline: Structural Outlines for GObject-Style JavaScript

Reads a JSON-encoded syntax tree (for example the output of Reflect.parse)
and reports every class declared with the Lang.Class({...}) convention:
its Name/GTypeName/Extends/Implements metadata, declared properties,
constants and methods.

Output formats:
  - text (default) - Indented outline report
  - json           - Structured JSON for programmatic use
  - yaml           - Human-readable YAML format
  - ansi           - Colorful terminal output
  - summary        - Counts only

Examples:
  mta-classoutline card.json                          # Outline one AST file
  mta-classoutline ast/                               # Every .json file below ast/
  mta-classoutline --recognize _Lang.Class=class card.json
  mta-classoutline definitions card.json              # Classified top-level statements
"#)]
#[command(subcommand_negates_reqs = true)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// AST file or directory of AST files
    #[arg(required = true)]
    pub path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormatArg::Text)]
    pub format: OutputFormatArg,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Extra class/interface call sites, as Namespace.Member=class|interface
    #[arg(long, global = true, action = clap::ArgAction::Append)]
    pub recognize: Vec<String>,

    /// Do not recognize the built-in Lang.Class / Lang.Interface call sites
    #[arg(long, global = true)]
    pub no_default_recognizers: bool,

    /// Leave interfaces and other unsupported definitions out of the report
    #[arg(long)]
    pub hide_unsupported: bool,

    /// Ignore patterns for directory scans (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Number of threads for directory scans (default: auto)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Maximum AST file size in bytes
    #[arg(long)]
    pub max_file_size: Option<usize>,

    /// Follow symlinks during directory scans
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Include hidden files and directories in directory scans
    #[arg(long)]
    pub include_hidden: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List the classified top-level definitions of one AST file
    Definitions {
        /// Path to the AST file
        path: PathBuf,
    },
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Text,
    Json,
    Yaml,
    Ansi,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Ansi => OutputFormat::Ansi,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    match (&args.command, &args.path) {
        (Some(Commands::Definitions { path }), _) => run_definitions(path, &args),
        (None, Some(path)) => run_outline(path, &args),
        (None, None) => anyhow::bail!("No AST path given"),
    }
}

/// Build the recognizer table from args
fn build_recognizers(args: &Args) -> Result<RecognizerTable> {
    let mut table = if args.no_default_recognizers {
        RecognizerTable::empty()
    } else {
        RecognizerTable::default()
    };

    for rule in &args.recognize {
        table = table.with_rule(RecognizerRule::parse(rule)?);
    }

    if table.is_empty() {
        anyhow::bail!("No recognizers configured; pass --recognize or drop --no-default-recognizers");
    }

    Ok(table)
}

/// Build common configuration from args
fn build_config(path: &Path, args: &Args) -> Result<OutlineConfig> {
    let mut config = OutlineConfig::new(path.to_path_buf())
        .with_recognizers(build_recognizers(args)?)
        .with_report_unsupported(!args.hide_unsupported)
        .with_ignore_patterns(args.ignore.clone())
        .with_follow_symlinks(args.follow_symlinks)
        .with_include_hidden(args.include_hidden);

    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    if let Some(size) = args.max_file_size {
        config = config.with_max_file_size(size);
    }

    Ok(config)
}

fn run_outline(path: &Path, args: &Args) -> Result<()> {
    let config = build_config(path, args)?;

    // Show progress spinner
    let spinner = if args.verbose && atty::is(atty::Stream::Stderr) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Invalid spinner template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Outlining {}...", path.display()));
        Some(pb)
    } else {
        None
    };

    let scanner = OutlineScanner::new(config).context("Failed to create scanner")?;
    let result = scanner
        .scan()
        .with_context(|| format!("Failed to outline {}", path.display()))?;

    if let Some(ref pb) = spinner {
        pb.finish_and_clear();
    }

    if args.verbose {
        eprintln!(
            "{} {} module(s), {} class(es) in {}ms",
            "Outlined".green().bold(),
            result.stats.total_modules,
            result.stats.class_declarations,
            result.metadata.scan_duration_ms
        );
        if result.stats.unsupported > 0 {
            eprintln!(
                "{} {} definition(s) have no outline support",
                "Note:".yellow().bold(),
                result.stats.unsupported
            );
        }
    }

    let format: OutputFormat = args.format.clone().into();
    let output = format_output(&result, format)?;

    write_output(&output, args.output.as_ref())
}

fn run_definitions(path: &Path, args: &Args) -> Result<()> {
    let config = build_config(path, args)?;

    let module = load_module(path, config.max_file_size)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let definitions = collect_definitions(&module.root, &config.recognizers)
        .with_context(|| format!("Failed to collect definitions from {}", path.display()))?;
    let summaries: Vec<_> = definitions.iter().map(|d| d.summary()).collect();

    if args.verbose {
        eprintln!(
            "{} {} definition(s) in {}",
            "Collected".green().bold(),
            summaries.len(),
            module.module_name
        );
    }

    let output = match args.format {
        OutputFormatArg::Json => serde_json::to_string_pretty(&summaries)?,
        OutputFormatArg::Yaml => serde_yaml::to_string(&summaries)?,
        OutputFormatArg::Text | OutputFormatArg::Ansi | OutputFormatArg::Summary => summaries
            .iter()
            .map(|s| s.display())
            .collect::<Vec<_>>()
            .join("\n"),
    };

    write_output(&output, args.output.as_ref())
}

fn write_output(output: &str, path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output).context("Failed to write output file")?;
    } else if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
