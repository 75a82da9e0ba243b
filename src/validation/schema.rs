// src/validation/schema.rs

// --- Imports ---
use crate::utils::error::SchemaError;
use jsonschema::paths::PathChunk;
use jsonschema::{Draft, JSONSchema};
use serde_json::{Map, Value};
use std::fmt;

// Keywords whose values are plain data, never subschemas.
const DATA_KEYWORDS: [&str; 4] = ["enum", "const", "default", "examples"];
// Keywords whose values map arbitrary names to subschemas.
const SCHEMA_MAPS: [&str; 5] = ["properties", "patternProperties", "definitions", "$defs", "dependencies"];

/// One step of an instance path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathToken::Key(key) => write!(f, "{}", key),
            PathToken::Index(idx) => write!(f, "{}", idx),
        }
    }
}

impl From<&PathChunk> for PathToken {
    fn from(chunk: &PathChunk) -> Self {
        match chunk {
            PathChunk::Property(name) => PathToken::Key(name.to_string()),
            PathChunk::Index(idx) => PathToken::Index(*idx),
            PathChunk::Keyword(keyword) => PathToken::Key(keyword.to_string()),
        }
    }
}

/// A single schema violation at a location inside the checked instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub path: Vec<PathToken>,
    pub message: String,
}

impl Violation {
    /// Dot-joined path, `<root>` for the instance itself.
    pub fn dotted_path(&self) -> String {
        if self.path.is_empty() {
            return "<root>".to_string();
        }
        self.path.iter().map(ToString::to_string).collect::<Vec<_>>().join(".")
    }
}

/// Checks one JSON value against a structural definition. An empty result
/// means the value conforms.
pub trait StructuralValidator {
    fn violations(&self, instance: &Value) -> Vec<Violation>;
}

/// Draft 7 JSON Schema, compiled once and reused for every record.
#[derive(Debug)]
pub struct JsonSchema {
    compiled: JSONSchema,
}

impl JsonSchema {
    /// Rejects schemas that cannot be used: a root that is neither object nor
    /// boolean, a local `$ref` that does not resolve, a `$ref` cycle that never
    /// descends into the instance, or anything the Draft 7 compiler refuses.
    pub fn compile(root: Value) -> Result<Self, SchemaError> {
        if !(root.is_object() || root.is_boolean()) {
            return Err(SchemaError::InvalidRoot(json_type_name(&root).to_string()));
        }
        check_refs(&root)?;

        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&root)
            .map_err(|e| SchemaError::Invalid(e.to_string()))?;
        Ok(Self { compiled })
    }
}

impl StructuralValidator for JsonSchema {
    fn violations(&self, instance: &Value) -> Vec<Violation> {
        match self.compiled.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| Violation {
                    path: error.instance_path.iter().map(PathToken::from).collect(),
                    message: error.to_string(),
                })
                .collect(),
        }
    }
}

/// Follows every local `$ref` in the schema document.
fn check_refs(root: &Value) -> Result<(), SchemaError> {
    let mut refs = Vec::new();
    collect_refs(root, &mut refs);
    for reference in refs {
        follow(root, reference, &mut Vec::new())?;
    }
    Ok(())
}

fn collect_refs<'a>(schema: &'a Value, out: &mut Vec<&'a str>) {
    match schema {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                out.push(reference);
            }
            for (key, child) in map {
                if DATA_KEYWORDS.contains(&key.as_str()) {
                    continue;
                }
                match (SCHEMA_MAPS.contains(&key.as_str()), child) {
                    (true, Value::Object(named)) => named.values().for_each(|sub| collect_refs(sub, out)),
                    _ => collect_refs(child, out),
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_refs(item, out)),
        _ => {}
    }
}

/// Walks the chain of references reachable from `reference` without moving
/// into a child of the instance. Seeing a reference twice on that chain means
/// validation would never terminate.
fn follow<'a>(root: &'a Value, reference: &'a str, trail: &mut Vec<&'a str>) -> Result<(), SchemaError> {
    if !is_local(reference) {
        return Ok(());
    }
    if trail.contains(&reference) {
        return Err(SchemaError::CircularRef(reference.to_string()));
    }
    let target = resolve(root, reference).ok_or_else(|| SchemaError::UnresolvedRef(reference.to_string()))?;

    trail.push(reference);
    for next in in_place_refs(target) {
        follow(root, next, trail)?;
    }
    trail.pop();
    Ok(())
}

fn is_local(reference: &str) -> bool {
    reference == "#" || reference.starts_with("#/")
}

fn resolve<'a>(root: &'a Value, reference: &str) -> Option<&'a Value> {
    match reference.strip_prefix('#') {
        Some("") => Some(root),
        Some(pointer) => root.pointer(pointer),
        None => None,
    }
}

/// References applied to the same instance as `schema` itself.
fn in_place_refs(schema: &Value) -> Vec<&str> {
    let map: &Map<String, Value> = match schema {
        Value::Object(map) => map,
        _ => return Vec::new(),
    };
    // Draft 7: siblings of $ref are ignored.
    if let Some(Value::String(reference)) = map.get("$ref") {
        return vec![reference.as_str()];
    }

    let mut refs = Vec::new();
    for key in ["allOf", "anyOf", "oneOf"] {
        if let Some(Value::Array(subs)) = map.get(key) {
            subs.iter().for_each(|sub| refs.extend(in_place_refs(sub)));
        }
    }
    for key in ["not", "if", "then", "else"] {
        if let Some(sub) = map.get(key) {
            refs.extend(in_place_refs(sub));
        }
    }
    refs
}

/// JSON type name of `value`, as used in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
