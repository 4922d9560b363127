//! End-to-end tests that run the full differ against the shared fixture
//! contracts in `tests/contracts`.

use openapi_compat_core::{check, diff, CompareOptions, ContractDocument, Verdict};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;

// ── Helpers ─────────────────────────────────────────────────────────────────

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/contracts");

fn fixture_names() -> Vec<&'static str> {
    vec!["baseline", "candidate_compatible", "candidate_breaking"]
}

fn load_raw(name: &str) -> Value {
    let path = Path::new(FIXTURES_DIR).join(format!("{name}.json"));
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {name}.json: {e}"));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {name}.json: {e}"))
}

fn load_fixture(name: &str) -> ContractDocument {
    ContractDocument::from_value(load_raw(name))
        .unwrap_or_else(|e| panic!("Fixture {name}.json is not a contract: {e}"))
}

fn messages(base: &str, candidate: &str) -> Vec<String> {
    diff(&load_fixture(base), &load_fixture(candidate))
        .into_iter()
        .map(|v| v.message)
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[test]
fn test_every_fixture_is_compatible_with_itself() {
    for name in fixture_names() {
        let doc = load_fixture(name);
        assert!(diff(&doc, &doc).is_empty(), "{name} differs from itself");
    }
}

#[test]
fn test_additions_only_candidate_is_compatible() {
    assert_eq!(
        messages("baseline", "candidate_compatible"),
        Vec::<String>::new()
    );
}

#[test]
fn test_breaking_candidate_full_report() {
    assert_eq!(
        messages("baseline", "candidate_breaking"),
        vec![
            "Removed path: /health",
            "GET /categories 200 [application/json]: required fields removed: [\"name\"]",
            "Added required parameter on GET /widgets: query:limit",
            "Removed response media type text/csv for GET /widgets 200",
            "GET /widgets 200 [application/json].items[]: required fields removed: [\"name\"]",
            "GET /widgets 200 [application/json].items[]: properties removed: [\"tags\"]",
            "GET /widgets 200 [application/json].items[].dimensions.width: schema type changed from number to string",
            "GET /widgets 200 [application/json].items[].status: enum values removed: [\"archived\"]",
            "Request body became required: POST /widgets",
            "POST /widgets 201 [application/json]: required fields removed: [\"name\"]",
            "POST /widgets 201 [application/json]: properties removed: [\"tags\"]",
            "POST /widgets 201 [application/json].dimensions.width: schema type changed from number to string",
            "POST /widgets 201 [application/json].status: enum values removed: [\"archived\"]",
            "Removed operation: DELETE /widgets/{id}",
            "GET /widgets/{id} 200 [application/json]: required fields removed: [\"name\"]",
            "GET /widgets/{id} 200 [application/json]: properties removed: [\"tags\"]",
            "GET /widgets/{id} 200 [application/json].dimensions.width: schema type changed from number to string",
            "GET /widgets/{id} 200 [application/json].status: enum values removed: [\"archived\"]",
        ]
    );
}

#[test]
fn test_reverting_the_additions_is_breaking() {
    // Going from the richer contract back to the baseline removes what was added.
    let removed = messages("candidate_compatible", "baseline");
    assert!(removed.contains(&"Removed path: /gadgets".to_string()));
    assert!(removed.contains(&"Removed operation: PATCH /widgets/{id}".to_string()));
    assert!(removed.contains(&"Removed success response 202 on POST /widgets".to_string()));
    assert!(removed
        .contains(&"Removed response media type application/xml for GET /widgets 200".to_string()));
    assert!(removed.iter().any(|m| m.contains("enum values removed: [\"draft\"]")));
    assert!(removed.iter().any(|m| m.contains("properties removed: [\"color\"]")));
}

#[test]
fn test_report_verdicts() {
    let options = CompareOptions::default();
    let base = load_fixture("baseline");

    let ok = check(&base, &load_fixture("candidate_compatible"), &options);
    assert_eq!(ok.verdict(), Verdict::Compatible);
    assert!(!ok.breaking);

    let broken = check(&base, &load_fixture("candidate_breaking"), &options);
    assert_eq!(broken.verdict(), Verdict::Breaking);
    assert_eq!(broken.violations.len(), 18);

    let text = broken.render_text();
    assert!(text.starts_with("Breaking API contract changes detected:\n"));
    assert!(text.contains("\n - Removed path: /health\n"));
}

#[test]
fn test_diff_is_deterministic() {
    let first = messages("baseline", "candidate_breaking");
    for _ in 0..5 {
        assert_eq!(messages("baseline", "candidate_breaking"), first);
    }
}
