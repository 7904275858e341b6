//! Data models for class outlines
//!
//! This module defines the core data structures used throughout the outline tool:
//! classified top-level definitions, typed report lines, and the per-module and
//! per-scan report values built from them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Classification of a top-level statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionKind {
    ClassDeclaration,
    InterfaceDeclaration,
    ConstantDeclaration,
    ExpressionStatement,
    /// Never produced by the collector; kept for the method outline entry point.
    FunctionDeclaration,
}

impl DefinitionKind {
    /// Get human-readable label for the kind
    pub fn label(&self) -> &'static str {
        match self {
            DefinitionKind::ClassDeclaration => "class",
            DefinitionKind::InterfaceDeclaration => "interface",
            DefinitionKind::ConstantDeclaration => "constant",
            DefinitionKind::ExpressionStatement => "expression",
            DefinitionKind::FunctionDeclaration => "function",
        }
    }
}

/// Declaration kinds a recognizer rule can map a call site to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognizedKind {
    Class,
    Interface,
}

impl RecognizedKind {
    /// Parse a rule kind as written on the command line
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "class" => Some(RecognizedKind::Class),
            "interface" => Some(RecognizedKind::Interface),
            _ => None,
        }
    }
}

/// A classified top-level statement
///
/// Borrows the statement it was built from; the tree stays owned by the
/// loaded module.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition<'a> {
    /// Classification of the statement
    pub kind: DefinitionKind,

    /// Declared identifier (absent for expression statements)
    pub name: Option<String>,

    /// Whether a documentation comment was associated (always false for now)
    pub documented: bool,

    /// The whole top-level statement node
    pub node: &'a Value,
}

impl<'a> Definition<'a> {
    /// Create an undocumented definition
    pub fn new(kind: DefinitionKind, name: Option<String>, node: &'a Value) -> Self {
        Self {
            kind,
            name,
            documented: false,
            node,
        }
    }

    /// Owned summary suitable for serialization
    pub fn summary(&self) -> DefinitionSummary {
        DefinitionSummary {
            kind: self.kind,
            name: self.name.clone(),
            documented: self.documented,
        }
    }
}

/// Serializable view of a definition without its syntax tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSummary {
    pub kind: DefinitionKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub documented: bool,
}

impl DefinitionSummary {
    /// Get display text for this definition
    pub fn display(&self) -> String {
        match &self.name {
            Some(name) => format!("{} {}", self.kind.label(), name),
            None => self.kind.label().to_string(),
        }
    }
}

/// One line of an outline report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "line", rename_all = "snake_case")]
pub enum ReportLine {
    /// Declared class name
    ClassHeader { name: String },

    /// One of the class metadata keys (Name, GTypeName, Extends, Implements)
    Metadata { key: String, value: String },

    /// Property listed in the class `Properties` block
    Property { name: String },

    /// Class body member with a literal value
    Constant { name: String },

    /// Class body member with a function expression value
    Method { name: String },

    /// Definition kind with no outline support yet
    Unsupported {
        kind: DefinitionKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl ReportLine {
    /// Nesting depth of the line (0 = definition, 1 = metadata, 2 = member)
    pub fn depth(&self) -> usize {
        match self {
            ReportLine::ClassHeader { .. } | ReportLine::Unsupported { .. } => 0,
            ReportLine::Metadata { .. } => 1,
            ReportLine::Property { .. } | ReportLine::Constant { .. } | ReportLine::Method { .. } => 2,
        }
    }
}

/// Outline report for a single AST file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleReport {
    /// Path to the AST file as given
    pub path: PathBuf,

    /// Logical module name derived from the path
    pub module_name: String,

    /// Classified top-level definitions in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub definitions: Vec<DefinitionSummary>,

    /// Report lines in source order
    #[serde(default)]
    pub lines: Vec<ReportLine>,
}

impl ModuleReport {
    /// Check if the report has nothing to print
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Count definitions of one kind
    pub fn count_definitions(&self, kind: DefinitionKind) -> usize {
        self.definitions.iter().filter(|d| d.kind == kind).count()
    }

    /// Count lines matching a predicate
    pub fn count_lines<F>(&self, predicate: F) -> usize
    where
        F: Fn(&ReportLine) -> bool,
    {
        self.lines.iter().filter(|l| predicate(l)).count()
    }
}

/// Result of scanning one or more AST files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineMap {
    /// File or directory that was scanned
    pub root: PathBuf,

    /// Module reports in path order
    pub modules: Vec<ModuleReport>,

    /// Summary statistics
    pub stats: OutlineStats,

    /// Scan metadata
    pub metadata: ScanMetadata,
}

/// Summary statistics for a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineStats {
    /// AST files outlined
    pub total_modules: usize,

    /// Top-level definitions collected
    pub total_definitions: usize,

    pub class_declarations: usize,
    pub interface_declarations: usize,
    pub constant_declarations: usize,
    pub expression_statements: usize,

    /// Declared properties across all classes
    pub properties: usize,

    /// Class constants across all classes
    pub constants: usize,

    /// Class methods across all classes
    pub methods: usize,

    /// Definitions reported as unsupported
    pub unsupported: usize,
}

impl OutlineStats {
    /// Aggregate statistics over module reports
    pub fn from_modules(modules: &[ModuleReport]) -> Self {
        let mut stats = OutlineStats {
            total_modules: modules.len(),
            ..Default::default()
        };

        for module in modules {
            stats.total_definitions += module.definitions.len();
            stats.class_declarations += module.count_definitions(DefinitionKind::ClassDeclaration);
            stats.interface_declarations +=
                module.count_definitions(DefinitionKind::InterfaceDeclaration);
            stats.constant_declarations +=
                module.count_definitions(DefinitionKind::ConstantDeclaration);
            stats.expression_statements +=
                module.count_definitions(DefinitionKind::ExpressionStatement);

            stats.properties += module.count_lines(|l| matches!(l, ReportLine::Property { .. }));
            stats.constants += module.count_lines(|l| matches!(l, ReportLine::Constant { .. }));
            stats.methods += module.count_lines(|l| matches!(l, ReportLine::Method { .. }));
            stats.unsupported += module.count_lines(|l| matches!(l, ReportLine::Unsupported { .. }));
        }

        stats
    }
}

/// Metadata about the scan operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    /// Duration of scan in milliseconds
    pub scan_duration_ms: u64,

    /// Files processed per second
    pub files_per_second: f64,

    /// ISO timestamp of scan
    pub timestamp: String,

    /// Tool version
    pub tool_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(lines: Vec<ReportLine>, definitions: Vec<DefinitionSummary>) -> ModuleReport {
        ModuleReport {
            path: PathBuf::from("card.json"),
            module_name: "card".to_string(),
            definitions,
            lines,
        }
    }

    #[test]
    fn test_line_depths() {
        assert_eq!(ReportLine::ClassHeader { name: "Card".into() }.depth(), 0);
        assert_eq!(
            ReportLine::Metadata {
                key: "Name".into(),
                value: "Card".into()
            }
            .depth(),
            1
        );
        assert_eq!(ReportLine::Method { name: "_init".into() }.depth(), 2);
    }

    #[test]
    fn test_definition_is_undocumented() {
        let node = json!({"type": "ExpressionStatement"});
        let def = Definition::new(DefinitionKind::ExpressionStatement, None, &node);
        assert!(!def.documented);
        assert_eq!(def.summary().display(), "expression");
    }

    #[test]
    fn test_stats_from_modules() {
        let summary = |kind| DefinitionSummary {
            kind,
            name: Some("X".into()),
            documented: false,
        };
        let module = report(
            vec![
                ReportLine::ClassHeader { name: "Card".into() },
                ReportLine::Property { name: "title".into() },
                ReportLine::Method { name: "_init".into() },
                ReportLine::Unsupported {
                    kind: DefinitionKind::InterfaceDeclaration,
                    name: Some("Clickable".into()),
                },
            ],
            vec![
                summary(DefinitionKind::ClassDeclaration),
                summary(DefinitionKind::InterfaceDeclaration),
                summary(DefinitionKind::ConstantDeclaration),
            ],
        );

        let stats = OutlineStats::from_modules(&[module]);
        assert_eq!(stats.total_modules, 1);
        assert_eq!(stats.total_definitions, 3);
        assert_eq!(stats.class_declarations, 1);
        assert_eq!(stats.properties, 1);
        assert_eq!(stats.methods, 1);
        assert_eq!(stats.constants, 0);
        assert_eq!(stats.unsupported, 1);
    }

    #[test]
    fn test_report_line_serialization() {
        let line = ReportLine::Metadata {
            key: "Extends".into(),
            value: "Gtk.Button".into(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["line"], "metadata");
        assert_eq!(json["value"], "Gtk.Button");
    }

    #[test]
    fn test_recognized_kind_from_label() {
        assert_eq!(RecognizedKind::from_label("Class"), Some(RecognizedKind::Class));
        assert_eq!(RecognizedKind::from_label("interface"), Some(RecognizedKind::Interface));
        assert_eq!(RecognizedKind::from_label("enum"), None);
    }
}
