//! Configuration for contract comparison.

use serde::{Deserialize, Serialize};

/// Options for comparing two contract documents.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `max-depth`), matching the
/// CLI flag names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CompareOptions {
    /// Maximum schema descent depth for the comparator (stack overflow guard).
    /// Reference cycles are already cut by the cycle guards; this only bounds
    /// pathological nesting.
    pub max_depth: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}
