//! Surface diff between two contract documents.
//!
//! Walks paths, operations, parameters and responses, and hands response
//! payload schemas to the [`Comparator`]. Every check runs; none
//! short-circuits the others.
//!
//! Order of the returned violations:
//!
//! 1. removed paths;
//! 2. then, per shared path: removed operations, followed per shared
//!    operation by newly required parameters, request body becoming
//!    required, removed success codes, removed media types, and response
//!    schema violations.
//!
//! Request schemas are not compared: a server may always accept a superset
//! of what it accepted before.

use std::collections::BTreeSet;

use tracing::debug;

use crate::compare::Comparator;
use crate::config::CompareOptions;
use crate::document::{ContractDocument, Method, Operation, ParameterLocation};
use crate::violation::{Violation, ViolationKind};

/// Diff two documents with default options.
pub fn diff(base_doc: &ContractDocument, candidate_doc: &ContractDocument) -> Vec<Violation> {
    diff_with_options(base_doc, candidate_doc, &CompareOptions::default())
}

/// Diff two documents.
pub fn diff_with_options(
    base_doc: &ContractDocument,
    candidate_doc: &ContractDocument,
    options: &CompareOptions,
) -> Vec<Violation> {
    let comparator = Comparator::new(base_doc, candidate_doc, options);
    let mut out = Vec::new();

    let base_paths = base_doc.paths();
    let candidate_paths = candidate_doc.paths();

    for path in base_paths.keys() {
        if !candidate_paths.contains_key(path) {
            out.push(Violation::new(ViolationKind::RemovedPath { path: path.clone() }));
        }
    }

    for (path, base_item) in base_paths {
        let Some(candidate_item) = candidate_paths.get(path) else {
            continue;
        };

        for method in base_item.operations.keys() {
            if !candidate_item.operations.contains_key(method) {
                out.push(Violation::new(ViolationKind::RemovedOperation {
                    method: *method,
                    path: path.clone(),
                }));
            }
        }

        for (method, base_op) in &base_item.operations {
            if let Some(candidate_op) = candidate_item.operations.get(method) {
                debug!(%method, path = %path, "comparing operation");
                let site = OperationSite { method: *method, path };
                diff_operation(&site, base_op, candidate_op, &comparator, &mut out);
            }
        }
    }

    out
}

/// Where an operation lives, for violation labels.
struct OperationSite<'a> {
    method: Method,
    path: &'a str,
}

fn diff_operation(
    site: &OperationSite<'_>,
    base: &Operation,
    candidate: &Operation,
    comparator: &Comparator<'_>,
    out: &mut Vec<Violation>,
) {
    let method = site.method;
    let path = site.path;

    let base_required = required_parameters(base);
    for (location, name) in required_parameters(candidate) {
        if !base_required.contains(&(location, name)) {
            out.push(Violation::new(ViolationKind::AddedRequiredParameter {
                method,
                path: path.to_string(),
                location,
                name: name.to_string(),
            }));
        }
    }

    if !base.requires_body() && candidate.requires_body() {
        out.push(Violation::new(ViolationKind::RequestBodyBecameRequired {
            method,
            path: path.to_string(),
        }));
    }

    let candidate_success: BTreeSet<&str> = candidate.success_codes().collect();
    for status in base.success_codes() {
        if !candidate_success.contains(status) {
            out.push(Violation::new(ViolationKind::RemovedSuccessResponse {
                method,
                path: path.to_string(),
                status: status.to_string(),
            }));
        }
    }

    for status in base.success_codes() {
        let (Some(base_response), Some(candidate_response)) =
            (base.responses.get(status), candidate.responses.get(status))
        else {
            continue;
        };

        for media_type in base_response.content.keys() {
            if !candidate_response.content.contains_key(media_type) {
                out.push(Violation::new(ViolationKind::RemovedResponseMediaType {
                    method,
                    path: path.to_string(),
                    status: status.to_string(),
                    media_type: media_type.clone(),
                }));
            }
        }

        for (media_type, base_schema) in &base_response.content {
            if let Some(candidate_schema) = candidate_response.content.get(media_type) {
                let label = format!("{method} {path} {status} [{media_type}]");
                out.extend(comparator.compare(base_schema, candidate_schema, &label));
            }
        }
    }
}

/// `(location, name)` of every required parameter, sorted.
fn required_parameters(op: &Operation) -> BTreeSet<(ParameterLocation, &str)> {
    op.parameters
        .iter()
        .filter(|p| p.required)
        .map(|p| p.key())
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
