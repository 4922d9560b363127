//! Local `$ref` resolution.
//!
//! Resolution is pure: it reads the owning document and returns either the
//! target or the input unchanged. It never fails. A reference that is
//! external, malformed, dangling or cyclic simply stays unresolved and the
//! comparator treats it as opaque.
//!
//! The cycle guard is a [`RefChain`]: an immutable stack of the references
//! followed so far, built on the call stack and passed down by reference.

use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

use crate::document::ContractDocument;
use crate::pointer::{is_local_pointer, resolve_pointer};
use crate::schema::Schema;

// ---------------------------------------------------------------------------
// RefChain
// ---------------------------------------------------------------------------

/// References visited in the current resolution chain.
///
/// Extending a chain never mutates it: [`RefChain::push`] returns a new link
/// that borrows its parent, so sibling branches of a traversal never see each
/// other's entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefChain<'a> {
    reference: Option<&'a str>,
    parent: Option<&'a RefChain<'a>>,
}

impl<'a> RefChain<'a> {
    /// The empty chain.
    pub const fn new() -> Self {
        Self {
            reference: None,
            parent: None,
        }
    }

    /// A chain extended by `reference`.
    pub fn push<'b>(&'b self, reference: &'b str) -> RefChain<'b>
    where
        'a: 'b,
    {
        RefChain {
            reference: Some(reference),
            parent: Some(self),
        }
    }

    pub fn contains(&self, reference: &str) -> bool {
        let mut link = Some(self);
        while let Some(current) = link {
            if current.reference == Some(reference) {
                return true;
            }
            link = current.parent;
        }
        false
    }

    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut link = Some(self);
        while let Some(current) = link {
            if current.reference.is_some() {
                count += 1;
            }
            link = current.parent;
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_none() && self.parent.is_none()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a schema position against its owning document.
///
/// Returns the schema unchanged (borrowed) when it is not a pointer, the
/// pointer is not local, the pointer is already in `visited`, or any pointer
/// segment is missing. Otherwise returns the target, itself resolved through
/// any further `$ref` hops.
pub fn resolve<'s>(
    schema: &'s Schema,
    document: &ContractDocument,
    visited: &RefChain<'_>,
) -> Cow<'s, Schema> {
    let Some(reference) = schema.reference() else {
        return Cow::Borrowed(schema);
    };
    if !is_local_pointer(reference) {
        debug!(reference, "non-local $ref left opaque");
        return Cow::Borrowed(schema);
    }
    if visited.contains(reference) {
        debug!(reference, "$ref cycle, left unresolved");
        return Cow::Borrowed(schema);
    }
    let Some(target) = resolve_pointer(document.root(), reference) else {
        debug!(reference, "dangling $ref left unresolved");
        return Cow::Borrowed(schema);
    };

    let chain = visited.push(reference);
    let target = resolve_value(target, document.root(), &chain);
    Cow::Owned(Schema::from_value(target))
}

/// Follow `$ref` hops on raw JSON until reaching a non-pointer value.
///
/// Used for every referenceable object in a contract (schemas, parameters,
/// request bodies, responses, path items). Stops at the last value reached
/// when a hop is non-local, dangling or already in `visited`.
pub fn resolve_value<'a>(value: &'a Value, root: &'a Value, visited: &RefChain<'_>) -> &'a Value {
    let Some(reference) = value.get("$ref").and_then(Value::as_str) else {
        return value;
    };
    if !is_local_pointer(reference) || visited.contains(reference) {
        return value;
    }
    match resolve_pointer(root, reference) {
        Some(target) => resolve_value(target, root, &visited.push(reference)),
        None => value,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
