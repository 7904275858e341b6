//! Indented plain text report
//!
//! Definitions sit at column 0, class metadata at 4 spaces, class members at 8.

use crate::models::{ModuleReport, OutlineMap, ReportLine};

const INDENT: &str = "    ";

/// Render one report line without a trailing newline
pub fn render_line(line: &ReportLine) -> String {
    let indent = INDENT.repeat(line.depth());
    match line {
        ReportLine::ClassHeader { name } => format!("{}{}", indent, name),
        ReportLine::Metadata { key, value } => format!("{}{}: {}", indent, key, value),
        ReportLine::Property { name } => format!("{}prop: {}", indent, name),
        ReportLine::Constant { name } => format!("{}constant: {}", indent, name),
        ReportLine::Method { name } => format!("{}method: {}", indent, name),
        ReportLine::Unsupported { kind, name: Some(name) } => {
            format!("{}{} (unsupported {})", indent, name, kind.label())
        }
        ReportLine::Unsupported { kind, name: None } => {
            format!("{}(unsupported {})", indent, kind.label())
        }
    }
}

/// Render a module report; empty reports render as an empty string
pub fn format_module_text(report: &ModuleReport) -> String {
    report
        .lines
        .iter()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render scan results; each module block gets a `# <module>` heading when
/// more than one module is reported
pub fn format_text(data: &OutlineMap) -> String {
    let reports: Vec<&ModuleReport> = data.modules.iter().filter(|m| !m.is_empty()).collect();

    if data.modules.len() <= 1 {
        return reports.first().map(|m| format_module_text(m)).unwrap_or_default();
    }

    reports
        .iter()
        .map(|m| format!("# {}\n{}", m.module_name, format_module_text(m)))
        .collect::<Vec<_>>()
        .join("\n\n")
}
