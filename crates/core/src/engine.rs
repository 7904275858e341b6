//! Outline engine module
//!
//! This module provides the scanner that runs the load, collect and outline
//! pipeline over a single AST file or over every AST file in a directory.

use crate::ast::ShapeError;
use crate::collector::collect_definitions;
use crate::config::{IgnoreFilter, OutlineConfig};
use crate::loader::{load_module, LoadError, LoadedModule};
use crate::models::{ModuleReport, OutlineMap, OutlineStats, ScanMetadata};
use crate::outline::outline_definitions;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

/// Scanner errors
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    LoadError(#[from] LoadError),

    #[error("{}: {source}", .path.display())]
    ShapeError {
        path: PathBuf,
        #[source]
        source: ShapeError,
    },

    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    #[error("Failed to walk directory: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}

/// Main outline scanner
pub struct OutlineScanner {
    config: OutlineConfig,
    ignore_filter: IgnoreFilter,
}

impl OutlineScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: OutlineConfig) -> Result<Self, ScanError> {
        let ignore_filter = IgnoreFilter::new(&config)?;
        Ok(Self {
            config,
            ignore_filter,
        })
    }

    /// Outline the configured file, or every AST file under the configured directory
    pub fn scan(&self) -> Result<OutlineMap, ScanError> {
        let start = Instant::now();
        let root = &self.config.root;

        // Anything that is not a directory goes through the loader, which
        // reports a missing root as `LoadError::NotFound`.
        let modules = if root.is_dir() {
            let ast_files = self.find_ast_files()?;
            self.outline_files(&ast_files)?
        } else {
            vec![outline_file(root, &self.config)?]
        };

        let stats = OutlineStats::from_modules(&modules);

        let duration = start.elapsed();
        let module_count = modules.len();
        let metadata = ScanMetadata {
            scan_duration_ms: duration.as_millis() as u64,
            files_per_second: if duration.as_secs_f64() > 0.0 {
                module_count as f64 / duration.as_secs_f64()
            } else {
                module_count as f64
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Ok(OutlineMap {
            root: root.clone(),
            modules,
            stats,
            metadata,
        })
    }

    /// Outline files in parallel; results keep the order of `paths`
    fn outline_files(&self, paths: &[PathBuf]) -> Result<Vec<ModuleReport>, ScanError> {
        if self.config.threads <= 1 {
            return paths
                .iter()
                .map(|path| outline_file(path, &self.config))
                .collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .map_err(|e| ScanError::ThreadPoolError(e.to_string()))?;

        pool.install(|| {
            paths
                .par_iter()
                .map(|path| outline_file(path, &self.config))
                .collect()
        })
    }

    /// Find all AST files under the root, sorted by path
    ///
    /// Walk errors (unreadable directories, symlink loops) end the scan.
    fn find_ast_files(&self) -> Result<Vec<PathBuf>, ScanError> {
        let root = &self.config.root;

        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                // The root itself is always walked
                if e.depth() == 0 {
                    return true;
                }
                let relative = e.path().strip_prefix(root).unwrap_or(e.path());
                !self.ignore_filter.should_ignore(relative)
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && self.ignore_filter.is_ast_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Outline a loaded syntax tree
pub fn outline_module(module: &LoadedModule, config: &OutlineConfig) -> Result<ModuleReport, ShapeError> {
    let definitions = collect_definitions(&module.root, &config.recognizers)?;
    let lines = outline_definitions(&definitions, config)?;

    Ok(ModuleReport {
        path: module.path.clone(),
        module_name: module.module_name.clone(),
        definitions: definitions.iter().map(|d| d.summary()).collect(),
        lines,
    })
}

/// Load and outline a single AST file
pub fn outline_file(path: &Path, config: &OutlineConfig) -> Result<ModuleReport, ScanError> {
    let module = load_module(path, config.max_file_size)?;
    outline_module(&module, config).map_err(|source| ScanError::ShapeError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DefinitionKind, ReportLine};
    use std::fs;
    use tempfile::TempDir;

    const CARD_AST: &str = r#"{
        "type": "Program",
        "body": [
            {"type": "VariableDeclaration", "declarations": [{"type": "VariableDeclarator",
                "id": {"type": "Identifier", "name": "_Lang"},
                "init": {"type": "MemberExpression", "object": {"name": "imports"}, "property": {"name": "lang"}}}]},
            {"type": "EmptyStatement"},
            {"type": "VariableDeclaration", "declarations": [{"type": "VariableDeclarator",
                "id": {"type": "Identifier", "name": "Card"},
                "init": {"type": "NewExpression",
                    "callee": {"type": "MemberExpression", "object": {"type": "Identifier", "name": "Lang"}, "property": {"type": "Identifier", "name": "Class"}},
                    "arguments": [{"type": "ObjectExpression", "properties": [
                        {"type": "Property", "key": {"type": "Identifier", "name": "Name"}, "value": {"type": "Literal", "value": "Card"}},
                        {"type": "Property", "key": {"type": "Identifier", "name": "Properties"}, "value": {"type": "ObjectExpression", "properties": [
                            {"type": "Property", "key": {"type": "Literal", "value": "title"}, "value": {"type": "CallExpression"}}
                        ]}},
                        {"type": "Property", "key": {"type": "Identifier", "name": "_init"}, "value": {"type": "FunctionExpression"}}
                    ]}]}}]}
        ]
    }"#;

    const INTERFACE_AST: &str = r#"{"body": [{"type": "VariableDeclaration", "declarations": [{
        "id": {"name": "Clickable"},
        "init": {"callee": {"object": {"name": "Lang"}, "property": {"name": "Interface"}}, "arguments": []}}]}]}"#;

    fn create_test_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("overrides")).unwrap();
        fs::write(root.join("overrides/card.json"), CARD_AST).unwrap();
        fs::write(root.join("clickable.json"), INTERFACE_AST).unwrap();
        fs::write(root.join("README.md"), "not an AST").unwrap();

        fs::create_dir_all(root.join("node_modules/dep")).unwrap();
        fs::write(root.join("node_modules/dep/index.json"), "{broken").unwrap();

        dir
    }

    #[test]
    fn test_outline_single_file() {
        let dir = create_test_project();
        let path = dir.path().join("overrides/card.json");

        let report = outline_file(&path, &OutlineConfig::default()).unwrap();

        assert_eq!(report.definitions.len(), 2);
        assert_eq!(report.definitions[0].kind, DefinitionKind::ConstantDeclaration);
        assert_eq!(report.definitions[1].kind, DefinitionKind::ClassDeclaration);
        assert_eq!(
            report.lines,
            vec![
                ReportLine::ClassHeader { name: "Card".into() },
                ReportLine::Metadata {
                    key: "Name".into(),
                    value: "Card".into()
                },
                ReportLine::Property { name: "title".into() },
                ReportLine::Method { name: "_init".into() },
            ]
        );
        assert!(report.module_name.ends_with("overrides.card"));
    }

    #[test]
    fn test_scan_directory() {
        let dir = create_test_project();
        let config = OutlineConfig::new(dir.path().to_path_buf()).with_threads(2);
        let scanner = OutlineScanner::new(config).unwrap();
        let result = scanner.scan().unwrap();

        assert_eq!(result.stats.total_modules, 2);
        assert_eq!(result.stats.class_declarations, 1);
        assert_eq!(result.stats.interface_declarations, 1);
        assert_eq!(result.stats.properties, 1);
        assert_eq!(result.stats.methods, 1);
        assert_eq!(result.stats.unsupported, 1);

        // Path order: clickable.json sorts before overrides/card.json
        assert!(result.modules[0].path.ends_with("clickable.json"));
        assert!(result.modules[1].path.ends_with("overrides/card.json"));
    }

    #[test]
    fn test_scan_sequential_matches_parallel() {
        let dir = create_test_project();
        let scan = |threads| {
            let config = OutlineConfig::new(dir.path().to_path_buf()).with_threads(threads);
            OutlineScanner::new(config).unwrap().scan().unwrap()
        };

        let sequential = scan(1);
        let parallel = scan(4);
        let names = |map: &OutlineMap| map.modules.iter().map(|m| m.module_name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&sequential), names(&parallel));
        assert_eq!(sequential.stats, parallel.stats);
    }

    #[test]
    fn test_scan_single_file_root() {
        let dir = create_test_project();
        let config = OutlineConfig::new(dir.path().join("clickable.json"));
        let result = OutlineScanner::new(config).unwrap().scan().unwrap();

        assert_eq!(result.modules.len(), 1);
        assert_eq!(result.stats.unsupported, 1);
    }

    #[test]
    fn test_malformed_file_fails_scan() {
        let dir = create_test_project();
        fs::write(dir.path().join("broken.json"), "{\"body\": [").unwrap();

        let config = OutlineConfig::new(dir.path().to_path_buf()).with_threads(1);
        let err = OutlineScanner::new(config).unwrap().scan().unwrap_err();
        assert!(matches!(err, ScanError::LoadError(LoadError::Malformed { .. })));
    }

    #[test]
    fn test_shape_error_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"body": [{"type": "VariableDeclaration", "declarations": []}]}"#).unwrap();

        let err = outline_file(&path, &OutlineConfig::default()).unwrap_err();
        assert!(matches!(err, ScanError::ShapeError { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let config = OutlineConfig::new(dir.path().join("absent"));
        let err = OutlineScanner::new(config).unwrap().scan().unwrap_err();
        assert!(matches!(err, ScanError::LoadError(LoadError::NotFound(_))));
    }

    #[test]
    fn test_missing_file_root_is_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.json");
        let config = OutlineConfig::new(missing.clone());
        let err = OutlineScanner::new(config).unwrap().scan().unwrap_err();

        match err {
            ScanError::LoadError(LoadError::NotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_fails_scan() {
        let dir = create_test_project();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("overrides/again")).unwrap();

        let config = OutlineConfig::new(dir.path().to_path_buf())
            .with_threads(1)
            .with_follow_symlinks(true);
        let err = OutlineScanner::new(config).unwrap().scan().unwrap_err();
        assert!(matches!(err, ScanError::WalkError(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_not_followed_by_default() {
        let dir = create_test_project();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("overrides/again")).unwrap();

        let config = OutlineConfig::new(dir.path().to_path_buf()).with_threads(1);
        let result = OutlineScanner::new(config).unwrap().scan().unwrap();
        assert_eq!(result.stats.total_modules, 2);
    }

    #[test]
    fn test_hidden_files() {
        let dir = create_test_project();
        fs::write(dir.path().join(".card.json"), CARD_AST).unwrap();

        let scan = |include_hidden| {
            let config = OutlineConfig::new(dir.path().to_path_buf())
                .with_threads(1)
                .with_include_hidden(include_hidden);
            OutlineScanner::new(config).unwrap().scan().unwrap()
        };

        assert_eq!(scan(false).stats.total_modules, 2);
        assert_eq!(scan(true).stats.total_modules, 3);
    }

    #[test]
    fn test_ignore_patterns() {
        let dir = create_test_project();
        let config = OutlineConfig::new(dir.path().to_path_buf())
            .with_ignore_patterns(vec!["overrides/**".to_string()]);
        let result = OutlineScanner::new(config).unwrap().scan().unwrap();

        assert_eq!(result.stats.total_modules, 1);
        assert_eq!(result.stats.class_declarations, 0);
    }
}
