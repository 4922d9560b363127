//! Recursive schema compatibility comparison.
//!
//! The compatibility test is "could a baseline client have depended on
//! this?". Additions are never flagged; removals and narrowings always are.
//!
//! Rules, applied per schema position after `$ref` resolution:
//!
//! 1. **Type change**: both sides declare `type` and differ. Reported once;
//!    nothing below the position is compared.
//! 2. **Enum narrowing**: baseline enum values missing from the candidate.
//! 3. **Object**: required names dropped, properties dropped, then recursion
//!    into every property present on both sides (`label.prop`).
//! 4. **Array**: both sides `type: array` → recursion into `items` (`label[]`).
//!
//! A position where either side is not a schema object (absent, opaque, or an
//! unresolved `$ref`) contributes nothing.

use tracing::{debug, warn};

use crate::config::CompareOptions;
use crate::document::ContractDocument;
use crate::pointer::append_segments;
use crate::resolver::{resolve, RefChain};
use crate::schema::{Schema, SchemaNode};
use crate::violation::{Violation, ViolationKind};

/// Compare two schema positions with default options.
///
/// # Example
/// ```
/// use openapi_compat_core::{schema_breaks, ContractDocument, Schema};
/// use serde_json::json;
///
/// let doc = ContractDocument::from_value(json!({ "paths": {} })).unwrap();
/// let base = Schema::from_value(&json!({ "enum": ["active", "archived"] }));
/// let candidate = Schema::from_value(&json!({ "enum": ["active"] }));
///
/// let violations = schema_breaks(&base, &candidate, &doc, &doc, "status");
/// assert_eq!(violations[0].message, "status: enum values removed: [\"archived\"]");
/// ```
pub fn schema_breaks(
    base: &Schema,
    candidate: &Schema,
    base_doc: &ContractDocument,
    candidate_doc: &ContractDocument,
    context_label: &str,
) -> Vec<Violation> {
    let options = CompareOptions::default();
    Comparator::new(base_doc, candidate_doc, &options).compare(base, candidate, context_label)
}

/// Shared comparison context for one document pair.
pub(crate) struct Comparator<'a> {
    base_doc: &'a ContractDocument,
    candidate_doc: &'a ContractDocument,
    options: &'a CompareOptions,
}

impl<'a> Comparator<'a> {
    pub(crate) fn new(
        base_doc: &'a ContractDocument,
        candidate_doc: &'a ContractDocument,
        options: &'a CompareOptions,
    ) -> Self {
        Self {
            base_doc,
            candidate_doc,
            options,
        }
    }

    pub(crate) fn compare(&self, base: &Schema, candidate: &Schema, label: &str) -> Vec<Violation> {
        let mut out = Vec::new();
        self.walk(base, candidate, &Cursor::root(label), &RefChain::new(), &mut out);
        out
    }

    /// `in_progress` holds the `(baseline location, candidate location)`
    /// pairs recorded further up this descent, one per step where either
    /// side followed a `$ref`. A location is the last `$ref` that side
    /// entered plus the schema path walked since, so the pair repeats once
    /// both sides are back where they were even when their refs sit on
    /// different levels. The outer comparison of that pair already covers
    /// everything below it.
    fn walk(
        &self,
        base: &Schema,
        candidate: &Schema,
        at: &Cursor,
        in_progress: &RefChain<'_>,
        out: &mut Vec<Violation>,
    ) {
        if at.depth > self.options.max_depth {
            warn!(
                context = %at.label,
                max_depth = self.options.max_depth,
                "schema nesting exceeds max depth; not descending further"
            );
            return;
        }

        let base_at = base.reference().unwrap_or(at.base_at.as_str());
        let candidate_at = candidate.reference().unwrap_or(at.candidate_at.as_str());
        let entered_ref = base.reference().is_some() || candidate.reference().is_some();
        let pair = entered_ref.then(|| format!("{base_at}\u{0}{candidate_at}"));
        if let Some(pair) = &pair {
            if in_progress.contains(pair) {
                debug!(context = %at.label, "recursive schema pair already under comparison");
                return;
            }
        }
        let chain = match &pair {
            Some(pair) => in_progress.push(pair),
            None => *in_progress,
        };

        let base = resolve(base, self.base_doc, &RefChain::new());
        let candidate = resolve(candidate, self.candidate_doc, &RefChain::new());
        let (Schema::Node(b), Schema::Node(c)) = (base.as_ref(), candidate.as_ref()) else {
            return;
        };
        let label = at.label.as_str();

        if let (Some(b_type), Some(c_type)) = (&b.schema_type, &c.schema_type) {
            if b_type != c_type {
                out.push(Violation::new(ViolationKind::SchemaTypeChanged {
                    context: label.to_string(),
                    from: b_type.to_string(),
                    to: c_type.to_string(),
                }));
                return;
            }
        }

        check_enum(b, c, label, out);

        if b.is_object_like() {
            check_object(b, c, label, out);
            for (name, b_prop) in b.properties() {
                if let Some(c_prop) = c.properties().get(name) {
                    let child = at.step(
                        base_at,
                        candidate_at,
                        &format!(".{name}"),
                        &["properties", name.as_str()],
                    );
                    self.walk(b_prop, c_prop, &child, &chain, out);
                }
            }
        }

        if b.is_type("array") && c.is_type("array") {
            let child = at.step(base_at, candidate_at, "[]", &["items"]);
            self.walk(&b.items, &c.items, &child, &chain, out);
        }
    }
}

/// Where the descent currently is: the violation label, each side's
/// location, and the nesting depth.
struct Cursor {
    label: String,
    base_at: String,
    candidate_at: String,
    depth: usize,
}

impl Cursor {
    /// The comparison root. Its empty location never collides with a `$ref`.
    fn root(label: &str) -> Self {
        Self {
            label: label.to_string(),
            base_at: String::new(),
            candidate_at: String::new(),
            depth: 0,
        }
    }

    fn step(&self, base_at: &str, candidate_at: &str, suffix: &str, segments: &[&str]) -> Self {
        Self {
            label: format!("{}{suffix}", self.label),
            base_at: append_segments(base_at, segments),
            candidate_at: append_segments(candidate_at, segments),
            depth: self.depth + 1,
        }
    }
}

fn check_enum(b: &SchemaNode, c: &SchemaNode, label: &str, out: &mut Vec<Violation>) {
    let (Some(b_enum), Some(c_enum)) = (&b.enum_values, &c.enum_values) else {
        return;
    };
    let mut removed = Vec::new();
    for value in b_enum {
        if !c_enum.contains(value) && !removed.contains(value) {
            removed.push(value.clone());
        }
    }
    if !removed.is_empty() {
        out.push(Violation::new(ViolationKind::EnumValuesRemoved {
            context: label.to_string(),
            values: removed,
        }));
    }
}

fn check_object(b: &SchemaNode, c: &SchemaNode, label: &str, out: &mut Vec<Violation>) {
    let removed_required: Vec<String> = b.required.difference(&c.required).cloned().collect();
    if !removed_required.is_empty() {
        out.push(Violation::new(ViolationKind::RequiredFieldsRemoved {
            context: label.to_string(),
            fields: removed_required,
        }));
    }

    let c_props = c.properties();
    let removed_props: Vec<String> = b
        .properties()
        .keys()
        .filter(|name| !c_props.contains_key(*name))
        .cloned()
        .collect();
    if !removed_props.is_empty() {
        out.push(Violation::new(ViolationKind::PropertiesRemoved {
            context: label.to_string(),
            properties: removed_props,
        }));
    }
}

// ===========================================================================
// Tests
// ===========================================================================
