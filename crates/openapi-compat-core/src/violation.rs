//! Compatibility violations.
//!
//! A violation is data, not an error: the differ accumulates them and the
//! report decides the verdict.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{Method, ParameterLocation};

/// A change in the candidate contract that can break a baseline client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Classification of the violation, with the location it concerns.
    pub kind: ViolationKind,
    /// Self-contained, human-readable description.
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Classification of compatibility violations.
///
/// Schema-level variants carry a `context` label of the form
/// `METHOD PATH STATUS [MEDIA_TYPE].field[].field`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViolationKind {
    RemovedPath {
        path: String,
    },
    RemovedOperation {
        method: Method,
        path: String,
    },
    AddedRequiredParameter {
        method: Method,
        path: String,
        location: ParameterLocation,
        name: String,
    },
    RequestBodyBecameRequired {
        method: Method,
        path: String,
    },
    RemovedSuccessResponse {
        method: Method,
        path: String,
        status: String,
    },
    RemovedResponseMediaType {
        method: Method,
        path: String,
        status: String,
        media_type: String,
    },
    SchemaTypeChanged {
        context: String,
        from: String,
        to: String,
    },
    EnumValuesRemoved {
        context: String,
        values: Vec<Value>,
    },
    RequiredFieldsRemoved {
        context: String,
        fields: Vec<String>,
    },
    PropertiesRemoved {
        context: String,
        properties: Vec<String>,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::RemovedPath { path } => write!(f, "Removed path: {path}"),
            ViolationKind::RemovedOperation { method, path } => {
                write!(f, "Removed operation: {method} {path}")
            }
            ViolationKind::AddedRequiredParameter {
                method,
                path,
                location,
                name,
            } => write!(
                f,
                "Added required parameter on {method} {path}: {location}:{name}"
            ),
            ViolationKind::RequestBodyBecameRequired { method, path } => {
                write!(f, "Request body became required: {method} {path}")
            }
            ViolationKind::RemovedSuccessResponse {
                method,
                path,
                status,
            } => write!(f, "Removed success response {status} on {method} {path}"),
            ViolationKind::RemovedResponseMediaType {
                method,
                path,
                status,
                media_type,
            } => write!(
                f,
                "Removed response media type {media_type} for {method} {path} {status}"
            ),
            ViolationKind::SchemaTypeChanged { context, from, to } => {
                write!(f, "{context}: schema type changed from {from} to {to}")
            }
            ViolationKind::EnumValuesRemoved { context, values } => {
                write!(f, "{context}: enum values removed: {}", json_list(values))
            }
            ViolationKind::RequiredFieldsRemoved { context, fields } => {
                write!(f, "{context}: required fields removed: {}", json_list(fields))
            }
            ViolationKind::PropertiesRemoved {
                context,
                properties,
            } => write!(f, "{context}: properties removed: {}", json_list(properties)),
        }
    }
}

/// Render a list as a compact JSON array, e.g. `["archived","deleted"]`.
fn json_list<T: Clone + Into<Value>>(items: &[T]) -> String {
    Value::from(items.to_vec()).to_string()
}
