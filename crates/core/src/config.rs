//! Configuration module for the outline scanner
//!
//! This module provides the recognizer table that decides which call sites
//! declare classes and interfaces, the scanner configuration, and the ignore
//! filtering used when scanning directories of AST files.

use crate::models::RecognizedKind;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    #[error("Invalid recognizer rule '{rule}': {reason}")]
    InvalidRecognizer { rule: String, reason: String },
}

/// Maps `<namespace>.<member>(...)` call sites to a declaration kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerRule {
    /// Namespace alias identifier, e.g. `Lang`
    pub namespace: String,

    /// Member accessed on the namespace, e.g. `Class`
    pub member: String,

    /// Kind the call site declares
    pub kind: RecognizedKind,
}

impl RecognizerRule {
    pub fn new(namespace: &str, member: &str, kind: RecognizedKind) -> Self {
        Self {
            namespace: namespace.to_string(),
            member: member.to_string(),
            kind,
        }
    }

    /// Parse a rule written as `Namespace.Member=kind`, e.g. `_Lang.Class=class`
    pub fn parse(rule: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidRecognizer {
            rule: rule.to_string(),
            reason: reason.to_string(),
        };

        let (callee, kind) = rule
            .split_once('=')
            .ok_or_else(|| invalid("expected Namespace.Member=kind"))?;
        let (namespace, member) = callee
            .trim()
            .rsplit_once('.')
            .ok_or_else(|| invalid("expected a dotted callee"))?;

        if namespace.is_empty() || member.is_empty() {
            return Err(invalid("namespace and member must not be empty"));
        }

        let kind = RecognizedKind::from_label(kind.trim())
            .ok_or_else(|| invalid("kind must be 'class' or 'interface'"))?;

        Ok(Self::new(namespace, member, kind))
    }

    fn matches(&self, namespace: &str, member: &str) -> bool {
        self.namespace == namespace && self.member == member
    }
}

/// Ordered table of recognizer rules; the first matching rule wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerTable {
    rules: Vec<RecognizerRule>,
}

impl Default for RecognizerTable {
    fn default() -> Self {
        Self {
            rules: vec![
                RecognizerRule::new("Lang", "Class", RecognizedKind::Class),
                RecognizerRule::new("Lang", "Interface", RecognizedKind::Interface),
            ],
        }
    }
}

impl RecognizerTable {
    /// Create a table with no rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule (builder pattern)
    pub fn with_rule(mut self, rule: RecognizerRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Look up the kind declared by `<namespace>.<member>`
    pub fn lookup(&self, namespace: &str, member: &str) -> Option<RecognizedKind> {
        self.rules
            .iter()
            .find(|r| r.matches(namespace, member))
            .map(|r| r.kind)
    }

    pub fn rules(&self) -> &[RecognizerRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Configuration for the outline scanner
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// AST file or directory to scan
    pub root: PathBuf,

    /// Call sites recognized as class/interface declarations
    pub recognizers: RecognizerTable,

    /// Emit explicit lines for definitions without outline support
    pub report_unsupported: bool,

    /// Custom ignore patterns (directory scans)
    pub ignore_patterns: Vec<String>,

    /// Number of threads for parallel processing
    pub threads: usize,

    /// Maximum AST file size to load (bytes)
    pub max_file_size: usize,

    /// Whether to follow symlinks
    pub follow_symlinks: bool,

    /// Whether to include hidden files
    pub include_hidden: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            recognizers: RecognizerTable::default(),
            report_unsupported: true,
            ignore_patterns: Vec::new(),
            threads: num_cpus(),
            max_file_size: 64 * 1024 * 1024, // 64 MB, AST dumps are verbose
            follow_symlinks: false,
            include_hidden: false,
        }
    }
}

impl OutlineConfig {
    /// Create new config with root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    /// Set recognizer table (builder pattern)
    pub fn with_recognizers(mut self, recognizers: RecognizerTable) -> Self {
        self.recognizers = recognizers;
        self
    }

    /// Set whether unsupported definitions are reported (builder pattern)
    pub fn with_report_unsupported(mut self, report: bool) -> Self {
        self.report_unsupported = report;
        self
    }

    /// Set ignore patterns (builder pattern)
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Set number of threads (builder pattern)
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set max file size (builder pattern)
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set follow symlinks (builder pattern)
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set include hidden files (builder pattern)
    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }
}

/// Get number of available CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

/// Filter for ignoring files and directories during directory scans
pub struct IgnoreFilter {
    /// Custom glob patterns
    custom_globs: GlobSet,

    /// Default ignore patterns
    default_ignores: GlobSet,

    /// Whether to include hidden files
    include_hidden: bool,
}

impl IgnoreFilter {
    /// Create a new ignore filter from config
    pub fn new(config: &OutlineConfig) -> Result<Self, ConfigError> {
        let custom_globs = Self::build_globset(&config.ignore_patterns)?;

        let default_patterns = [
            "**/node_modules",
            "**/node_modules/**",
            "**/.git",
            "**/.git/**",
        ];
        let default_ignores = Self::build_globset(
            &default_patterns.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )?;

        Ok(Self {
            custom_globs,
            default_ignores,
            include_hidden: config.include_hidden,
        })
    }

    /// Build a globset from patterns
    fn build_globset(patterns: &[String]) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidGlob(e.to_string()))?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| ConfigError::InvalidGlob(e.to_string()))
    }

    /// Check if a path should be ignored
    pub fn should_ignore(&self, path: &Path) -> bool {
        if !self.include_hidden {
            if let Some(name) = path.file_name() {
                if name.to_string_lossy().starts_with('.') {
                    return true;
                }
            }
        }

        self.default_ignores.is_match(path) || self.custom_globs.is_match(path)
    }

    /// Check if path looks like a JSON syntax tree dump
    pub fn is_ast_file(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = OutlineConfig::new(PathBuf::from("/test"))
            .with_threads(4)
            .with_report_unsupported(false)
            .with_max_file_size(1024);

        assert_eq!(config.threads, 4);
        assert!(!config.report_unsupported);
        assert_eq!(config.max_file_size, 1024);
        assert_eq!(config.recognizers, RecognizerTable::default());
    }

    #[test]
    fn test_default_recognizers() {
        let table = RecognizerTable::default();
        assert_eq!(table.lookup("Lang", "Class"), Some(RecognizedKind::Class));
        assert_eq!(table.lookup("Lang", "Interface"), Some(RecognizedKind::Interface));
        assert_eq!(table.lookup("_Lang", "Class"), None);
        assert_eq!(table.lookup("Lang", "Enum"), None);
    }

    #[test]
    fn test_parse_rule() {
        let rule = RecognizerRule::parse("_Lang.Class=class").unwrap();
        assert_eq!(rule, RecognizerRule::new("_Lang", "Class", RecognizedKind::Class));

        let nested = RecognizerRule::parse("imports.lang.Interface = interface").unwrap();
        assert_eq!(nested.namespace, "imports.lang");
        assert_eq!(nested.kind, RecognizedKind::Interface);
    }

    #[test]
    fn test_parse_rule_rejects_malformed() {
        assert!(RecognizerRule::parse("Lang.Class").is_err());
        assert!(RecognizerRule::parse("Class=class").is_err());
        assert!(RecognizerRule::parse(".Class=class").is_err());
        assert!(matches!(
            RecognizerRule::parse("Lang.Class=struct"),
            Err(ConfigError::InvalidRecognizer { .. })
        ));
    }

    #[test]
    fn test_table_extension() {
        let table = RecognizerTable::empty()
            .with_rule(RecognizerRule::new("GObject", "Class", RecognizedKind::Class));
        assert_eq!(table.lookup("GObject", "Class"), Some(RecognizedKind::Class));
        assert_eq!(table.lookup("Lang", "Class"), None);
        assert_eq!(table.rules().len(), 1);
    }

    #[test]
    fn test_ignore_filter() {
        let config = OutlineConfig::new(PathBuf::from("."))
            .with_ignore_patterns(vec!["**/fixtures/**".to_string()]);
        let filter = IgnoreFilter::new(&config).unwrap();

        assert!(filter.should_ignore(Path::new("src/node_modules")));
        assert!(filter.should_ignore(Path::new("src/.cache")));
        assert!(filter.should_ignore(Path::new("src/fixtures/card.json")));
        assert!(!filter.should_ignore(Path::new("src/card.json")));
        assert!(!filter.should_ignore(Path::new("src/package.json")));
        assert!(!filter.should_ignore(Path::new("target/card.json")));

        assert!(filter.is_ast_file(Path::new("card.json")));
        assert!(filter.is_ast_file(Path::new("card.JSON")));
        assert!(!filter.is_ast_file(Path::new("card.js")));
    }

    #[test]
    fn test_invalid_glob() {
        let config = OutlineConfig::new(PathBuf::from(".")).with_ignore_patterns(vec!["a[".into()]);
        assert!(matches!(IgnoreFilter::new(&config), Err(ConfigError::InvalidGlob(_))));
    }
}
