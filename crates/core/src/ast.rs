//! Shape decoding for JSON syntax trees
//!
//! The input tree is untyped. This module decodes the handful of node shapes the
//! outline relies on into small tagged enums, so the collector and the outline
//! builder match on a closed set of variants instead of probing fields.

use crate::config::RecognizerTable;
use crate::models::RecognizedKind;
use serde_json::Value;
use thiserror::Error;

static NULL: Value = Value::Null;

/// A node did not have the shape the traversal relies on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Unexpected shape: missing '{field}' in {context}")]
    MissingField { field: &'static str, context: String },

    #[error("Unexpected shape: '{field}' in {context} is not {expected}")]
    WrongType {
        field: &'static str,
        context: String,
        expected: &'static str,
    },
}

/// Initializer of a variable declarator
#[derive(Debug, Clone, PartialEq)]
pub enum InitShape<'a> {
    /// Call to a recognized class constructor, e.g. `Lang.Class({...})`
    ClassInit(CallSite<'a>),

    /// Call to a recognized interface constructor, e.g. `Lang.Interface({...})`
    InterfaceInit(CallSite<'a>),

    /// Anything else, including a missing initializer
    Other,
}

/// Recognized `<namespace>.<member>(...)` call
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite<'a> {
    /// Dotted callee, e.g. `Lang.Class`
    pub callee: String,

    /// The call expression node
    pub node: &'a Value,
}

/// Value of an object literal property
#[derive(Debug, Clone, PartialEq)]
pub enum ValueShape<'a> {
    /// Literal scalar (the literal's `value` field)
    Literal(&'a Value),

    /// Member access rendered in dotted form, e.g. `Gtk.Button`
    MemberAccess(String),

    FunctionExpression,

    /// Object literal with its property nodes
    ObjectLiteral(&'a [Value]),

    /// Unrecognized shape, with its `type` when present
    Other(Option<&'a str>),
}

/// One `key: value` entry of an object literal
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty<'a> {
    pub key: String,
    pub value: &'a Value,
}

impl<'a> ObjectProperty<'a> {
    pub fn shape(&self) -> ValueShape<'a> {
        decode_value(self.value)
    }
}

/// Get the `type` discriminant of a node
pub fn node_type(node: &Value) -> Option<&str> {
    node.get("type").and_then(Value::as_str)
}

/// Get a required field
pub fn field<'a>(node: &'a Value, name: &'static str, context: &str) -> Result<&'a Value, ShapeError> {
    node.get(name).ok_or_else(|| ShapeError::MissingField {
        field: name,
        context: context.to_string(),
    })
}

/// Get a required array field
pub fn array_field<'a>(
    node: &'a Value,
    name: &'static str,
    context: &str,
) -> Result<&'a [Value], ShapeError> {
    field(node, name, context)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ShapeError::WrongType {
            field: name,
            context: context.to_string(),
            expected: "an array",
        })
}

/// Get a required string field
pub fn str_field<'a>(node: &'a Value, name: &'static str, context: &str) -> Result<&'a str, ShapeError> {
    field(node, name, context)?
        .as_str()
        .ok_or_else(|| ShapeError::WrongType {
            field: name,
            context: context.to_string(),
            expected: "a string",
        })
}

/// Get the first declarator of a `VariableDeclaration` statement
pub fn first_declarator(statement: &Value) -> Result<&Value, ShapeError> {
    array_field(statement, "declarations", "VariableDeclaration")?
        .first()
        .ok_or_else(|| ShapeError::MissingField {
            field: "declarations[0]",
            context: "VariableDeclaration".to_string(),
        })
}

/// Get the identifier a declarator binds
pub fn declarator_name(declarator: &Value) -> Result<&str, ShapeError> {
    let id = field(declarator, "id", "VariableDeclarator")?;
    str_field(id, "name", "VariableDeclarator id")
}

/// Render an identifier or a chain of member accesses in dotted form
pub fn dotted_name(node: &Value) -> Option<String> {
    if let Some(name) = node.get("name").and_then(Value::as_str) {
        return Some(name.to_string());
    }

    let object = dotted_name(node.get("object")?)?;
    let property = node.get("property")?.get("name")?.as_str()?;
    Some(format!("{}.{}", object, property))
}

/// Decode a declarator initializer against the recognizer table
pub fn decode_init<'a>(init: Option<&'a Value>, recognizers: &RecognizerTable) -> InitShape<'a> {
    let Some(init) = init.filter(|i| i.is_object()) else {
        return InitShape::Other;
    };
    let Some(callee) = init.get("callee") else {
        return InitShape::Other;
    };
    let Some(namespace) = callee.get("object").and_then(dotted_name) else {
        return InitShape::Other;
    };
    let Some(member) = callee
        .get("property")
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
    else {
        return InitShape::Other;
    };

    let site = CallSite {
        callee: format!("{}.{}", namespace, member),
        node: init,
    };

    match recognizers.lookup(&namespace, member) {
        Some(RecognizedKind::Class) => InitShape::ClassInit(site),
        Some(RecognizedKind::Interface) => InitShape::InterfaceInit(site),
        None => InitShape::Other,
    }
}

/// Decode the value of an object literal property
pub fn decode_value(node: &Value) -> ValueShape<'_> {
    match node_type(node) {
        Some("Literal") => ValueShape::Literal(node.get("value").unwrap_or(&NULL)),
        Some("MemberExpression") => match dotted_name(node) {
            Some(dotted) => ValueShape::MemberAccess(dotted),
            None => ValueShape::Other(Some("MemberExpression")),
        },
        Some("FunctionExpression") => ValueShape::FunctionExpression,
        other => match node.get("properties").and_then(Value::as_array) {
            Some(properties) => ValueShape::ObjectLiteral(properties),
            None => ValueShape::Other(other),
        },
    }
}

/// Get the properties of an object literal node, if it is one
pub fn object_properties(node: &Value) -> Option<&[Value]> {
    node.get("properties")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

/// Decode the entries of an object literal
pub fn decode_properties<'a>(
    properties: &'a [Value],
    context: &str,
) -> Result<Vec<ObjectProperty<'a>>, ShapeError> {
    properties
        .iter()
        .map(|property| {
            let key = field(property, "key", context)?;
            let value = field(property, "value", context)?;
            Ok(ObjectProperty {
                key: key_name(key, context)?,
                value,
            })
        })
        .collect()
}

/// Name of a property key: identifier `name`, or literal `value`
fn key_name(key: &Value, context: &str) -> Result<String, ShapeError> {
    if let Some(name) = key.get("name").and_then(Value::as_str) {
        return Ok(name.to_string());
    }
    match key.get("value") {
        Some(value) if !value.is_null() => Ok(literal_text(value)),
        _ => Err(ShapeError::MissingField {
            field: "key.name",
            context: context.to_string(),
        }),
    }
}

/// Render a literal scalar as report text
pub fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
