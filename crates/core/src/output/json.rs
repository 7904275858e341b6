//! JSON output formatter

use crate::models::{ModuleReport, OutlineMap};
use crate::output::FormatError;

/// Serialize scan results to pretty-printed JSON
pub fn format_json(data: &OutlineMap) -> Result<String, FormatError> {
    serde_json::to_string_pretty(data).map_err(FormatError::from)
}

/// Serialize a single module report to pretty-printed JSON
pub fn format_module_json(report: &ModuleReport) -> Result<String, FormatError> {
    serde_json::to_string_pretty(report).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::{card_report, outline_map};

    #[test]
    fn test_format_json() {
        let json = format_json(&outline_map(vec![card_report()])).unwrap();
        assert!(json.contains("\"root\""));
        assert!(json.contains("\"modules\""));
        assert!(json.contains("\"class_declarations\": 1"));
    }

    #[test]
    fn test_module_json_lines_are_tagged() {
        let json = format_module_json(&card_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["lines"][0]["line"], "class_header");
        assert_eq!(value["lines"][5]["kind"], "interface_declaration");
        assert_eq!(value["definitions"][0]["name"], "Card");
    }
}
