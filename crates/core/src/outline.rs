//! Outline builder
//!
//! Turns classified definitions into typed report lines. Classes get a full
//! outline (metadata, declared properties, constants, methods); interfaces and
//! functions get an explicit unsupported line.

use crate::ast::{
    decode_init, decode_properties, declarator_name, first_declarator, literal_text,
    object_properties, InitShape, ObjectProperty, ShapeError, ValueShape,
};
use crate::config::{OutlineConfig, RecognizerTable};
use crate::models::{Definition, DefinitionKind, ReportLine};
use std::collections::HashSet;

/// Class keys reported as `key: value` metadata
pub const METADATA_KEYS: [&str; 4] = ["Name", "GTypeName", "Extends", "Implements"];

/// Class key holding the declared properties
pub const PROPERTIES_KEY: &str = "Properties";

const CLASS_CONTEXT: &str = "class argument";

/// Build report lines for all definitions, in order
pub fn outline_definitions(
    definitions: &[Definition<'_>],
    config: &OutlineConfig,
) -> Result<Vec<ReportLine>, ShapeError> {
    let mut lines = Vec::new();
    for definition in definitions {
        lines.extend(outline_definition(definition, config)?);
    }
    Ok(lines)
}

/// Build report lines for one definition
pub fn outline_definition(
    definition: &Definition<'_>,
    config: &OutlineConfig,
) -> Result<Vec<ReportLine>, ShapeError> {
    match definition.kind {
        DefinitionKind::ClassDeclaration => outline_class(definition, &config.recognizers),
        DefinitionKind::FunctionDeclaration if config.report_unsupported => {
            Ok(vec![outline_method(definition)])
        }
        DefinitionKind::InterfaceDeclaration if config.report_unsupported => {
            Ok(vec![unsupported(definition)])
        }
        _ => Ok(Vec::new()),
    }
}

/// Outline a class declared through a recognized call, e.g. `Lang.Class({...})`
pub fn outline_class(
    definition: &Definition<'_>,
    recognizers: &RecognizerTable,
) -> Result<Vec<ReportLine>, ShapeError> {
    let declarator = first_declarator(definition.node)?;
    let name = match &definition.name {
        Some(name) => name.clone(),
        None => declarator_name(declarator)?.to_string(),
    };

    let mut lines = vec![ReportLine::ClassHeader { name }];

    let InitShape::ClassInit(site) = decode_init(declarator.get("init"), recognizers) else {
        return Err(ShapeError::WrongType {
            field: "init",
            context: "VariableDeclarator".to_string(),
            expected: "a recognized class call",
        });
    };
    let Some(arguments) = site.node.get("arguments") else {
        return Ok(lines);
    };
    let arguments = arguments.as_array().ok_or_else(|| ShapeError::WrongType {
        field: "arguments",
        context: format!("{} call", site.callee),
        expected: "an array",
    })?;

    let mut class_bodies = Vec::new();
    for argument in arguments {
        if let Some(properties) = object_properties(argument) {
            class_bodies.push(decode_properties(properties, CLASS_CONTEXT)?);
        }
    }

    // Declared names are gathered up front so suppression does not depend on
    // where `Properties` sits in the literal.
    let mut declared = HashSet::new();
    for body in &class_bodies {
        for name in declared_properties(body)? {
            declared.insert(name);
        }
    }

    for body in &class_bodies {
        for property in body {
            let key = property.key.as_str();
            if METADATA_KEYS.contains(&key) {
                if let Some(value) = metadata_value(property) {
                    lines.push(ReportLine::Metadata {
                        key: key.to_string(),
                        value,
                    });
                }
            } else if key == PROPERTIES_KEY {
                for name in declared_properties(std::slice::from_ref(property))? {
                    lines.push(ReportLine::Property { name });
                }
            } else if !is_declared(key, &declared) {
                match property.shape() {
                    ValueShape::Literal(_) => lines.push(ReportLine::Constant {
                        name: key.to_string(),
                    }),
                    ValueShape::FunctionExpression => lines.push(ReportLine::Method {
                        name: key.to_string(),
                    }),
                    // Accessor scaffolding and other shapes are not reported
                    _ => {}
                }
            }
        }
    }

    Ok(lines)
}

/// Outline a function definition
///
/// Function signatures are not extracted yet; the definition is reported as
/// unsupported.
pub fn outline_method(definition: &Definition<'_>) -> ReportLine {
    unsupported(definition)
}

fn unsupported(definition: &Definition<'_>) -> ReportLine {
    ReportLine::Unsupported {
        kind: definition.kind,
        name: definition.name.clone(),
    }
}

/// Names listed in the `Properties` entries of a class body
fn declared_properties(body: &[ObjectProperty<'_>]) -> Result<Vec<String>, ShapeError> {
    let mut names = Vec::new();
    for property in body.iter().filter(|p| p.key == PROPERTIES_KEY) {
        let ValueShape::ObjectLiteral(entries) = property.shape() else {
            return Err(ShapeError::WrongType {
                field: "value",
                context: PROPERTIES_KEY.to_string(),
                expected: "an object literal",
            });
        };
        for entry in decode_properties(entries, PROPERTIES_KEY)? {
            names.push(entry.key);
        }
    }
    Ok(names)
}

/// Text of a metadata value: a literal, or a dotted member access
fn metadata_value(property: &ObjectProperty<'_>) -> Option<String> {
    match property.shape() {
        ValueShape::Literal(value) => Some(literal_text(value)),
        ValueShape::MemberAccess(dotted) => Some(dotted),
        _ => None,
    }
}

/// Check a member key against the declared properties, as written or with
/// underscores turned into hyphens
fn is_declared(key: &str, declared: &HashSet<String>) -> bool {
    declared.contains(key) || declared.contains(&key.replace('_', "-"))
}
