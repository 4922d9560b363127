//! Typed schema nodes.
//!
//! Payload shapes are read leniently: a keyword with an unexpected JSON shape
//! is ignored rather than rejected, so a malformed contract degrades to "less
//! information" instead of failing the run.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde_json::{Map, Value};

/// A schema position inside a contract document.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Schema {
    /// A `$ref` pointer. Sibling keywords are ignored until the pointer is
    /// resolved; a pointer that stays unresolved is treated as opaque.
    Ref(String),
    /// A schema object.
    Node(SchemaNode),
    /// No schema information: absent, or JSON that is not a schema object
    /// (`true`, `42`, ...).
    #[default]
    Opaque,
}

impl Schema {
    /// Read a schema from raw JSON.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Schema::Opaque;
        };
        match obj.get("$ref").and_then(Value::as_str) {
            Some(reference) => Schema::Ref(reference.to_string()),
            None => Schema::Node(SchemaNode::from_map(obj)),
        }
    }

    /// The `$ref` string, if this position is a pointer.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Schema::Ref(reference) => Some(reference),
            _ => None,
        }
    }
}

/// The `type` keyword: a single name or a union of names (`["string", "null"]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    Single(String),
    Union(BTreeSet<String>),
}

impl SchemaType {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(SchemaType::Single(name.clone())),
            Value::Array(names) => {
                let names: BTreeSet<String> = names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
                match names.len() {
                    0 => None,
                    1 => names.into_iter().next().map(SchemaType::Single),
                    _ => Some(SchemaType::Union(names)),
                }
            }
            _ => None,
        }
    }

    /// Returns `true` only for the single type `name`.
    pub fn is(&self, name: &str) -> bool {
        matches!(self, SchemaType::Single(single) if single == name)
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaType::Single(name) => f.write_str(name),
            SchemaType::Union(names) => {
                let joined: Vec<&str> = names.iter().map(String::as_str).collect();
                f.write_str(&joined.join(" | "))
            }
        }
    }
}

/// A schema object with the keywords the comparator understands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaNode {
    pub schema_type: Option<SchemaType>,
    /// `None` when the node declares no `properties` map.
    pub properties: Option<BTreeMap<String, Schema>>,
    pub required: BTreeSet<String>,
    pub items: Box<Schema>,
    /// `None` when the node declares no `enum`.
    pub enum_values: Option<Vec<Value>>,
}

static NO_PROPERTIES: BTreeMap<String, Schema> = BTreeMap::new();

impl SchemaNode {
    pub fn from_map(obj: &Map<String, Value>) -> Self {
        let schema_type = obj.get("type").and_then(SchemaType::from_value);

        let properties = obj.get("properties").and_then(Value::as_object).map(|props| {
            props
                .iter()
                .map(|(name, schema)| (name.clone(), Schema::from_value(schema)))
                .collect()
        });

        let required = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let items = Box::new(obj.get("items").map(Schema::from_value).unwrap_or_default());

        let enum_values = obj.get("enum").and_then(Value::as_array).cloned();

        Self {
            schema_type,
            properties,
            required,
            items,
            enum_values,
        }
    }

    /// Declared properties, empty when none are declared.
    pub fn properties(&self) -> &BTreeMap<String, Schema> {
        self.properties.as_ref().unwrap_or(&NO_PROPERTIES)
    }

    /// An object schema is one typed `object` or one that declares properties.
    pub fn is_object_like(&self) -> bool {
        self.is_type("object") || self.properties.is_some()
    }

    pub fn is_type(&self, name: &str) -> bool {
        self.schema_type.as_ref().is_some_and(|t| t.is(name))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
