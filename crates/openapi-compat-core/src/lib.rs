//! # openapi-compat-core
//!
//! Backward-compatibility checking for OpenAPI-style contract documents.
//!
//! Given a *baseline* contract and a *candidate* contract, decide whether a
//! client written against the baseline could break against the candidate.
//! Additions are always safe; removals and narrowings are always flagged.
//!
//! ## Quick Start
//!
//! ```rust
//! use openapi_compat_core::{check, CompareOptions, ContractDocument, Verdict};
//! use serde_json::json;
//!
//! let base = ContractDocument::from_value(json!({
//!     "paths": { "/widgets": { "get": {} }, "/gadgets": { "get": {} } }
//! })).unwrap();
//! let candidate = ContractDocument::from_value(json!({
//!     "paths": { "/widgets": { "get": {} } }
//! })).unwrap();
//!
//! let report = check(&base, &candidate, &CompareOptions::default());
//! assert_eq!(report.verdict(), Verdict::Breaking);
//! assert_eq!(report.violations[0].message, "Removed path: /gadgets");
//! ```

pub mod compare;
pub mod config;
pub mod differ;
pub mod document;
pub mod error;
pub mod pointer;
pub mod report;
pub mod resolver;
pub mod schema;
pub mod violation;

pub use compare::schema_breaks;
pub use config::CompareOptions;
pub use differ::{diff, diff_with_options};
pub use document::{
    ContractDocument, Method, Operation, Parameter, ParameterLocation, PathItem, RequestBody,
    Response,
};
pub use error::CompatError;
pub use report::{Report, Verdict, BREAKING_BANNER, COMPATIBLE_LINE};
pub use resolver::{resolve, RefChain};
pub use schema::{Schema, SchemaNode, SchemaType};
pub use violation::{Violation, ViolationKind};

/// Diff two documents and wrap the result in a [`Report`].
pub fn check(
    base_doc: &ContractDocument,
    candidate_doc: &ContractDocument,
    options: &CompareOptions,
) -> Report {
    let violations = diff_with_options(base_doc, candidate_doc, options);
    tracing::debug!(count = violations.len(), "contract comparison finished");
    Report::new(violations)
}
