//! ANSI colored output formatter
//!
//! This module provides colorful terminal output for class outlines.

use crate::models::{ModuleReport, OutlineMap, ReportLine};

// ANSI escape codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

// Colors
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// Bright colors
const BRIGHT_RED: &str = "\x1b[91m";
const BRIGHT_GREEN: &str = "\x1b[92m";
const BRIGHT_YELLOW: &str = "\x1b[93m";
const BRIGHT_MAGENTA: &str = "\x1b[95m";

// Background colors
const BG_BLUE: &str = "\x1b[44m";

/// Get color for a report line
fn line_color(line: &ReportLine) -> &'static str {
    match line {
        ReportLine::ClassHeader { .. } => BRIGHT_YELLOW,
        ReportLine::Metadata { .. } => WHITE,
        ReportLine::Property { .. } => BLUE,
        ReportLine::Constant { .. } => BRIGHT_MAGENTA,
        ReportLine::Method { .. } => CYAN,
        ReportLine::Unsupported { .. } => BRIGHT_RED,
    }
}

/// Get icon for a report line
fn line_icon(line: &ReportLine) -> &'static str {
    match line {
        ReportLine::ClassHeader { .. } => "🔷",
        ReportLine::Metadata { .. } => "·",
        ReportLine::Property { .. } => "📌",
        ReportLine::Constant { .. } => "🔒",
        ReportLine::Method { .. } => "🔹",
        ReportLine::Unsupported { .. } => "⚠",
    }
}

/// Format scan results as ANSI colored text
pub fn format_ansi(data: &OutlineMap) -> String {
    let mut output = String::new();

    // Header
    output.push_str(&format!(
        "\n{}{}  Class Outline Results  {}{}\n\n",
        BOLD, BG_BLUE, RESET, RESET
    ));

    output.push_str(&format!(
        "{}Root:{} {}\n\n",
        BOLD,
        RESET,
        data.root.display()
    ));

    output.push_str(&format!(
        "{}Modules:{} {}  {}Classes:{} {}  {}Interfaces:{} {}\n\n",
        BOLD,
        RESET,
        data.stats.total_modules,
        BOLD,
        RESET,
        data.stats.class_declarations,
        BOLD,
        RESET,
        data.stats.interface_declarations
    ));

    for module in &data.modules {
        output.push_str(&format_module_ansi(module));
    }

    // Footer
    output.push_str(&format!(
        "\n{}Scan completed in {}ms ({:.2} files/sec){}\n",
        DIM,
        data.metadata.scan_duration_ms,
        data.metadata.files_per_second,
        RESET
    ));

    output
}

/// Format a single module's outline
pub fn format_module_ansi(report: &ModuleReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}{}📦 {}{} {}({}){}\n",
        BOLD,
        BRIGHT_GREEN,
        report.module_name,
        RESET,
        DIM,
        report.path.display(),
        RESET
    ));

    if report.is_empty() {
        output.push_str(&format!("   {}no classes{}\n", DIM, RESET));
    }

    for line in &report.lines {
        output.push_str(&format_line_ansi(line));
    }

    output.push('\n');
    output
}

/// Format a single report line with indentation
fn format_line_ansi(line: &ReportLine) -> String {
    let indent_str = "   ".repeat(line.depth() + 1);
    let color = line_color(line);
    let icon = line_icon(line);

    let body = match line {
        ReportLine::ClassHeader { name } => format!("{}class {}{}", color, BOLD, name),
        ReportLine::Metadata { key, value } => format!("{}{}:{} {}", DIM, key, RESET, value),
        ReportLine::Property { name } => format!("{}prop {}", color, name),
        ReportLine::Constant { name } => format!("{}constant {}", color, name),
        ReportLine::Method { name } => format!("{}method {}", color, name),
        ReportLine::Unsupported { kind, name } => format!(
            "{}unsupported {} {}",
            color,
            kind.label(),
            name.as_deref().unwrap_or("")
        ),
    };

    format!("{}{} {}{}\n", indent_str, icon, body, RESET)
}
