//! YAML output formatter

use crate::models::{ModuleReport, OutlineMap};
use crate::output::FormatError;

/// Format scan results as YAML
pub fn format_yaml(data: &OutlineMap) -> Result<String, FormatError> {
    serde_yaml::to_string(data).map_err(FormatError::from)
}

/// Format a single module report as YAML
pub fn format_module_yaml(report: &ModuleReport) -> Result<String, FormatError> {
    serde_yaml::to_string(report).map_err(FormatError::from)
}
