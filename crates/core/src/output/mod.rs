//! Output formatting module
//!
//! This module provides formatters for the indented text report, JSON, YAML,
//! ANSI and summary output of outline reports.

pub mod ansi;
mod json;
mod text;
mod yaml;

pub use ansi::{format_ansi, format_module_ansi};
pub use json::{format_json, format_module_json};
pub use text::{format_module_text, format_text, render_line};
pub use yaml::{format_module_yaml, format_yaml};

use crate::models::{ModuleReport, OutlineMap};
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Indented plain text report
    #[default]
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// ANSI colored text
    Ansi,
    /// Plain text statistics
    Summary,
}

/// Format scan results in the specified format
pub fn format_output(data: &OutlineMap, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Text => Ok(format_text(data)),
        OutputFormat::Json => format_json(data),
        OutputFormat::Yaml => format_yaml(data),
        OutputFormat::Ansi => Ok(format_ansi(data)),
        OutputFormat::Summary => Ok(format_summary(data)),
    }
}

/// Format a single module report in the specified format
pub fn format_module(report: &ModuleReport, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Text => Ok(format_module_text(report)),
        OutputFormat::Json => format_module_json(report),
        OutputFormat::Yaml => format_module_yaml(report),
        OutputFormat::Ansi => Ok(format_module_ansi(report)),
        OutputFormat::Summary => Ok(format_module_summary(report)),
    }
}

/// Format as plain text summary
fn format_summary(data: &OutlineMap) -> String {
    let mut output = String::new();

    output.push_str("Class Outline Results\n");
    output.push_str("=====================\n\n");
    output.push_str(&format!("Root: {}\n", data.root.display()));
    output.push_str(&format!("Modules: {}\n", data.stats.total_modules));
    output.push_str(&format!("Definitions: {}\n", data.stats.total_definitions));
    output.push_str("\nDefinition Breakdown:\n");
    output.push_str(&format!("  Classes: {}\n", data.stats.class_declarations));
    output.push_str(&format!("  Interfaces: {}\n", data.stats.interface_declarations));
    output.push_str(&format!("  Constants: {}\n", data.stats.constant_declarations));
    output.push_str(&format!("  Expressions: {}\n", data.stats.expression_statements));
    output.push_str("\nClass Members:\n");
    output.push_str(&format!("  Properties: {}\n", data.stats.properties));
    output.push_str(&format!("  Constants: {}\n", data.stats.constants));
    output.push_str(&format!("  Methods: {}\n", data.stats.methods));

    if data.stats.unsupported > 0 {
        output.push_str(&format!(
            "\nUnsupported definitions: {}\n",
            data.stats.unsupported
        ));
    }

    output.push_str(&format!("\nScan Duration: {}ms\n", data.metadata.scan_duration_ms));
    output.push_str(&format!(
        "Processing Speed: {:.2} files/sec\n",
        data.metadata.files_per_second
    ));

    output
}

/// Format a single module as plain text summary
fn format_module_summary(report: &ModuleReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", report.path.display()));
    output.push_str(&format!("Module: {}\n", report.module_name));
    output.push_str(&format!("Definitions: {}\n", report.definitions.len()));

    output.push_str("\nDefinitions:\n");
    for definition in &report.definitions {
        output.push_str(&format!("  {}\n", definition.display()));
    }

    output
}
