//! JSON Pointer helpers (RFC 6901) for local `$ref` navigation.
//!
//! Only document-local pointers of the form `#/<segment>/...` are navigable.
//! Anything else (`https://...`, `other.json#/...`, `#anchor`) is treated as
//! an opaque reference by the resolver.

use std::borrow::Cow;

use serde_json::Value;

/// Returns `true` when `reference` addresses a location inside the same
/// document (`#/...`).
pub fn is_local_pointer(reference: &str) -> bool {
    reference.starts_with("#/")
}

/// Escape a single path segment per RFC 6901 (`~` → `~0`, `/` → `~1`).
pub fn escape_pointer_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') || segment.contains('/') {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Append escaped segments to a pointer.
///
/// # Example
/// ```
/// use openapi_compat_core::pointer::append_segments;
/// assert_eq!(
///     append_segments("#/components/schemas/Node", &["properties", "a/b"]),
///     "#/components/schemas/Node/properties/a~1b"
/// );
/// ```
pub fn append_segments(pointer: &str, segments: &[&str]) -> String {
    let mut out = pointer.to_string();
    for segment in segments {
        out.push('/');
        out.push_str(&escape_pointer_segment(segment));
    }
    out
}

/// Unescape a single path segment per RFC 6901.
///
/// - `~1` → `/`
/// - `~0` → `~`
///
/// Order matters: unescape `~1` first to avoid double-unescaping.
/// Returns `Cow::Borrowed` when no unescaping is needed (the common case).
pub fn unescape_pointer_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains("~0") || segment.contains("~1") {
        Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Split a local pointer into decoded segments.
///
/// Returns `None` for anything that is not a local pointer. The leading empty
/// segment produced by the `/` after `#` is skipped; later empty segments are
/// significant (`#/a//b` addresses the key `""` under `a`).
///
/// # Example
/// ```
/// use openapi_compat_core::pointer::split_pointer;
/// assert_eq!(
///     split_pointer("#/components/schemas/a~1b"),
///     Some(vec!["components".to_string(), "schemas".to_string(), "a/b".to_string()])
/// );
/// assert_eq!(split_pointer("https://example.com/pet.json"), None);
/// ```
pub fn split_pointer(pointer: &str) -> Option<Vec<String>> {
    let stripped = pointer.strip_prefix("#/")?;
    Some(
        stripped
            .split('/')
            .map(|s| unescape_pointer_segment(s).into_owned())
            .collect(),
    )
}

/// Walk `root` along a local pointer.
///
/// Returns `None` if the pointer is not local or any segment is missing.
/// Array elements are addressed by decimal index.
pub fn resolve_pointer<'a>(root: &'a Value, pointer: &str) -> Option<&'a Value> {
    let segments = split_pointer(pointer)?;

    let mut current = root;
    for key in &segments {
        current = match current {
            Value::Object(obj) => obj.get(key)?,
            Value::Array(arr) => {
                let idx: usize = key.parse().ok()?;
                arr.get(idx)?
            }
            _ => return None,
        };
    }

    Some(current)
}

// ===========================================================================
// Tests
// ===========================================================================
