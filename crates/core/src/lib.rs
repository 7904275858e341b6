//! mta_classoutline_core - Core library for GObject class outlines
//!
//! This crate reads JSON-encoded JavaScript syntax trees (as produced by an
//! external parser such as `Reflect.parse`) and reports the classes declared
//! with the `Lang.Class({...})` convention: their metadata, declared
//! properties, constants and methods.
//!
//! # Features
//!
//! - **Definition Collection**: Classify top-level statements as class,
//!   interface, constant or expression definitions.
//! - **Configurable Recognizers**: Map any `<namespace>.<member>` call site to
//!   a class or interface declaration.
//! - **Typed Reports**: Outlines are values (`ReportLine`, `ModuleReport`)
//!   rendered separately from traversal.
//! - **Multiple Output Formats**: Indented text, JSON, YAML, ANSI and summary.
//!
//! # Example
//!
//! ```rust,no_run
//! use mta_classoutline_core::{format_output, OutlineConfig, OutlineScanner, OutputFormat};
//! use std::path::PathBuf;
//!
//! let config = OutlineConfig::new(PathBuf::from("overrides/card.json"));
//! let scanner = OutlineScanner::new(config).unwrap();
//! let result = scanner.scan().unwrap();
//!
//! let text = format_output(&result, OutputFormat::Text).unwrap();
//! println!("{}", text);
//! ```

pub mod ast;
pub mod collector;
pub mod config;
pub mod engine;
pub mod loader;
pub mod models;
pub mod outline;
pub mod output;

// Re-exports for convenience
pub use ast::ShapeError;
pub use collector::{classify_declarator, collect_definitions};
pub use config::{ConfigError, OutlineConfig, RecognizerRule, RecognizerTable};
pub use engine::{outline_file, outline_module, OutlineScanner, ScanError};
pub use loader::{load_module, module_name, LoadError, LoadedModule};
pub use models::{
    Definition, DefinitionKind, DefinitionSummary, ModuleReport, OutlineMap, OutlineStats,
    RecognizedKind, ReportLine, ScanMetadata,
};
pub use outline::{outline_class, outline_definition, outline_definitions, outline_method};
pub use output::{format_module, format_output, FormatError, OutputFormat};
