//! Definition collector
//!
//! Classifies each top-level statement of a syntax tree into a [`Definition`].

use crate::ast::{decode_init, declarator_name, first_declarator, node_type, InitShape, ShapeError};
use crate::config::RecognizerTable;
use crate::models::{Definition, DefinitionKind};
use serde_json::Value;

/// Collect the top-level definitions of a syntax tree, in source order
///
/// A root without a `body` array yields no definitions. Statements other than
/// variable declarations and expression statements are skipped.
pub fn collect_definitions<'a>(
    root: &'a Value,
    recognizers: &RecognizerTable,
) -> Result<Vec<Definition<'a>>, ShapeError> {
    let Some(body) = root.get("body").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut definitions = Vec::new();

    for statement in body {
        match node_type(statement) {
            Some("VariableDeclaration") => {
                let declarator = first_declarator(statement)?;
                let name = declarator_name(declarator)?.to_string();
                let kind = classify_declarator(declarator, recognizers);
                definitions.push(Definition::new(kind, Some(name), statement));
            }
            Some("ExpressionStatement") => {
                definitions.push(Definition::new(DefinitionKind::ExpressionStatement, None, statement));
            }
            _ => {}
        }
    }

    Ok(definitions)
}

/// Classify a variable declarator by the shape of its initializer
pub fn classify_declarator(declarator: &Value, recognizers: &RecognizerTable) -> DefinitionKind {
    match decode_init(declarator.get("init"), recognizers) {
        InitShape::ClassInit(_) => DefinitionKind::ClassDeclaration,
        InitShape::InterfaceInit(_) => DefinitionKind::InterfaceDeclaration,
        InitShape::Other => DefinitionKind::ConstantDeclaration,
    }
}
