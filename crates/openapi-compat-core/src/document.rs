//! Typed contract document model.
//!
//! A [`ContractDocument`] keeps the raw JSON root (the target of every local
//! `$ref`) next to a typed view of its `paths`. Referenceable objects (path
//! items, parameters, request bodies, responses) are resolved while loading,
//! so the differ only ever sees concrete structure. Schemas stay as written
//! and are resolved lazily by the comparator.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::CompatError;
use crate::resolver::{resolve_value, RefChain};
use crate::schema::Schema;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// HTTP methods that name an operation inside a path item.
///
/// Variants are declared in alphabetical order so iteration over a
/// `BTreeMap<Method, _>` is stable and matches the lowercase key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
}

impl Method {
    /// Parse a path-item key, case-insensitively. Non-method keys
    /// (`summary`, `parameters`, `x-*`) yield `None`.
    pub fn parse(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "delete" => Some(Method::Delete),
            "get" => Some(Method::Get),
            "head" => Some(Method::Head),
            "options" => Some(Method::Options),
            "patch" => Some(Method::Patch),
            "post" => Some(Method::Post),
            "put" => Some(Method::Put),
            "trace" => Some(Method::Trace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Delete => "DELETE",
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Cookie,
    Header,
    Path,
    Query,
}

impl ParameterLocation {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cookie" => Some(ParameterLocation::Cookie),
            "header" => Some(ParameterLocation::Header),
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Cookie => "cookie",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Document structure
// ---------------------------------------------------------------------------

/// A parameter, identified by `(location, name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub location: ParameterLocation,
    pub name: String,
    /// Only a literal JSON `true` marks a parameter required.
    pub required: bool,
}

impl Parameter {
    pub fn key(&self) -> (ParameterLocation, &str) {
        (self.location, &self.name)
    }

    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let name = obj.get("name").and_then(Value::as_str)?;
        let location = obj
            .get("in")
            .and_then(Value::as_str)
            .and_then(ParameterLocation::parse)?;
        Some(Self {
            location,
            name: name.to_string(),
            required: obj.get("required") == Some(&Value::Bool(true)),
        })
    }
}

/// An operation's request body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestBody {
    pub required: bool,
    /// Media type → schema.
    pub content: BTreeMap<String, Schema>,
}

/// A single response entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    /// Media type → schema.
    pub content: BTreeMap<String, Schema>,
}

/// One HTTP operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Operation {
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    /// Status code string (`"200"`, `"2XX"`, `"default"`) → response.
    pub responses: BTreeMap<String, Response>,
}

impl Operation {
    /// Status codes that denote success (those starting with `2`).
    pub fn success_codes(&self) -> impl Iterator<Item = &str> {
        self.responses
            .keys()
            .map(String::as_str)
            .filter(|code| code.starts_with('2'))
    }

    /// Whether the operation insists on a request body.
    pub fn requires_body(&self) -> bool {
        self.request_body.as_ref().is_some_and(|body| body.required)
    }
}

/// The operations available under one path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem {
    pub operations: BTreeMap<Method, Operation>,
}

/// A loaded contract document. Read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractDocument {
    root: Value,
    paths: BTreeMap<String, PathItem>,
}

impl ContractDocument {
    /// Build the typed view of a parsed JSON document.
    ///
    /// Fails only when the root is not a JSON object. Every optional piece of
    /// structure that is missing or has an unexpected shape is read as absent.
    pub fn from_value(root: Value) -> Result<Self, CompatError> {
        let Some(obj) = root.as_object() else {
            return Err(CompatError::InvalidDocument {
                message: format!("expected a JSON object at the root, found {}", kind_of(&root)),
            });
        };

        let mut paths = BTreeMap::new();
        match obj.get("paths") {
            Some(Value::Object(raw_paths)) => {
                for (path, raw_item) in raw_paths {
                    let item = resolve_value(raw_item, &root, &RefChain::new());
                    let parsed = match item.as_object() {
                        Some(item) => read_path_item(item, &root),
                        None => {
                            debug!(path = %path, "path item is not an object; treating as empty");
                            PathItem::default()
                        }
                    };
                    paths.insert(path.clone(), parsed);
                }
            }
            Some(other) => {
                debug!(found = kind_of(other), "`paths` is not an object; treating as empty");
            }
            None => {}
        }

        Ok(Self { root, paths })
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, CompatError> {
        let root: Value = serde_json::from_str(text)?;
        Self::from_value(root)
    }

    /// The raw document, used as the target of local `$ref`s.
    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn paths(&self) -> &BTreeMap<String, PathItem> {
        &self.paths
    }
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

fn read_path_item(item: &Map<String, Value>, root: &Value) -> PathItem {
    let shared = read_parameters(item.get("parameters"), root);

    let mut operations = BTreeMap::new();
    for (key, raw_op) in item {
        let Some(method) = Method::parse(key) else {
            continue;
        };
        // Lowercase spelling wins when a method appears under several casings.
        let canonical = key.bytes().all(|b| b.is_ascii_lowercase());
        if operations.contains_key(&method) && !canonical {
            debug!(key = %key, %method, "duplicate method key; keeping the lowercase entry");
            continue;
        }
        if operations
            .insert(method, read_operation(raw_op, root, &shared))
            .is_some()
        {
            debug!(key = %key, %method, "duplicate method key; replaced a differently cased entry");
        }
    }

    PathItem { operations }
}

fn read_operation(raw: &Value, root: &Value, shared: &[Parameter]) -> Operation {
    let Some(obj) = raw.as_object() else {
        debug!("operation is not an object; treating as empty");
        return Operation::default();
    };

    // Path-level parameters apply unless the operation redefines the same
    // (location, name).
    let own = read_parameters(obj.get("parameters"), root);
    let mut parameters: Vec<Parameter> = shared
        .iter()
        .filter(|inherited| own.iter().all(|p| p.key() != inherited.key()))
        .cloned()
        .collect();
    parameters.extend(own);

    let request_body = obj.get("requestBody").and_then(|raw_body| {
        let body = resolve_value(raw_body, root, &RefChain::new()).as_object()?;
        Some(RequestBody {
            required: body.get("required") == Some(&Value::Bool(true)),
            content: read_content(body.get("content")),
        })
    });

    let mut responses = BTreeMap::new();
    if let Some(raw_responses) = obj.get("responses").and_then(Value::as_object) {
        for (code, raw_response) in raw_responses {
            let response = resolve_value(raw_response, root, &RefChain::new());
            let content = read_content(response.get("content"));
            responses.insert(code.clone(), Response { content });
        }
    }

    Operation {
        parameters,
        request_body,
        responses,
    }
}

fn read_parameters(raw: Option<&Value>, root: &Value) -> Vec<Parameter> {
    let Some(entries) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let resolved = resolve_value(entry, root, &RefChain::new());
            let parameter = Parameter::from_value(resolved);
            if parameter.is_none() {
                debug!("skipping parameter without a usable `in`/`name`");
            }
            parameter
        })
        .collect()
}

fn read_content(raw: Option<&Value>) -> BTreeMap<String, Schema> {
    let Some(content) = raw.and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    content
        .iter()
        .map(|(media_type, media)| {
            let schema = media.get("schema").map(Schema::from_value).unwrap_or_default();
            (media_type.clone(), schema)
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ===========================================================================
// Tests
// ===========================================================================
