//! Seed scenarios for the contract differ, one per kind of edit.

use openapi_compat_core::{diff, ContractDocument, ViolationKind};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn doc(value: Value) -> ContractDocument {
    ContractDocument::from_value(value).unwrap()
}

fn widget_contract() -> Value {
    json!({
        "paths": {
            "/widgets": {
                "get": {
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": { "id": { "type": "string" } },
                                        "required": ["id"]
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

fn single_response(schema: Value) -> Value {
    json!({
        "paths": {
            "/items": {
                "get": {
                    "responses": {
                        "200": { "content": { "application/json": { "schema": schema } } }
                    }
                }
            }
        }
    })
}

#[test]
fn scenario_removed_path() {
    let violations = diff(&doc(widget_contract()), &doc(json!({ "paths": {} })));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, "Removed path: /widgets");
    assert_eq!(
        violations[0].kind,
        ViolationKind::RemovedPath {
            path: "/widgets".into()
        }
    );
}

#[test]
fn scenario_newly_required_query_parameter() {
    let base = json!({ "paths": { "/items": { "get": { "responses": { "200": {} } } } } });
    let candidate = json!({
        "paths": { "/items": { "get": {
            "parameters": [{ "in": "query", "name": "limit", "required": true }],
            "responses": { "200": {} }
        } } }
    });
    let violations = diff(&doc(base), &doc(candidate));
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.contains("query:limit"));
}

#[test]
fn scenario_enum_narrowed() {
    let base = single_response(json!({ "enum": ["active", "archived"] }));
    let candidate = single_response(json!({ "enum": ["active"] }));
    let violations = diff(&doc(base), &doc(candidate));
    assert_eq!(violations.len(), 1);
    match &violations[0].kind {
        ViolationKind::EnumValuesRemoved { context, values } => {
            assert_eq!(context, "GET /items 200 [application/json]");
            assert_eq!(values, &vec![json!("archived")]);
        }
        other => panic!("unexpected violation {other:?}"),
    }
}

#[test]
fn scenario_request_body_became_required() {
    let base = json!({ "paths": { "/items": { "post": {
        "requestBody": { "required": false, "content": { "application/json": {} } }
    } } } });
    let candidate = json!({ "paths": { "/items": { "post": {
        "requestBody": { "required": true, "content": { "application/json": {} } }
    } } } });
    let violations = diff(&doc(base), &doc(candidate));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, "Request body became required: POST /items");
}

#[test]
fn scenario_removed_media_type() {
    let base = single_response(json!({ "type": "object" }));
    let mut candidate = base.clone();
    candidate["paths"]["/items"]["get"]["responses"]["200"]["content"] = json!({});
    let violations = diff(&doc(base), &doc(candidate));
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "Removed response media type application/json for GET /items 200"
    );
}

#[test]
fn scenario_whitespace_and_ordering_only() {
    let compact = r#"{"paths":{"/a":{"get":{"responses":{"200":{"content":{"application/json":{"schema":{"type":"object","required":["x","y"],"properties":{"x":{},"y":{}}}}}}}}},"/b":{"post":{}}}}"#;
    let reordered = r#"
    {
        "paths": {
            "/b": { "post": {} },
            "/a": {
                "get": {
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "properties": { "y": {}, "x": {} },
                                        "required": ["y", "x"],
                                        "type": "object"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }"#;
    let base = ContractDocument::from_json_str(compact).unwrap();
    let candidate = ContractDocument::from_json_str(reordered).unwrap();
    assert!(diff(&base, &candidate).is_empty());
}

#[test]
fn scenario_response_property_made_optional() {
    let base = widget_contract();
    let mut candidate = base.clone();
    candidate["paths"]["/widgets"]["get"]["responses"]["200"]["content"]["application/json"]
        ["schema"]["required"] = json!([]);
    let violations = diff(&doc(base), &doc(candidate));
    assert_eq!(violations.len(), 1);
    match &violations[0].kind {
        ViolationKind::RequiredFieldsRemoved { fields, .. } => {
            assert_eq!(fields, &vec!["id".to_string()])
        }
        other => panic!("unexpected violation {other:?}"),
    }
}

#[test]
fn scenario_missing_optional_structure_never_errors() {
    let base = json!({
        "paths": {
            "/a": { "get": {} },
            "/b": { "post": { "responses": { "200": {} } } },
            "/c": { "put": { "responses": { "201": { "content": { "application/json": {} } } } } }
        }
    });
    let candidate = json!({
        "paths": {
            "/a": { "get": { "parameters": "oops" } },
            "/b": { "post": { "responses": "oops" } },
            "/c": { "put": { "responses": { "201": { "content": { "application/json": { "schema": 5 } } } } } }
        }
    });
    assert_eq!(
        diff(&doc(base), &doc(candidate))
            .into_iter()
            .map(|v| v.message)
            .collect::<Vec<_>>(),
        vec!["Removed success response 200 on POST /b"]
    );
}

#[test]
fn scenario_cross_document_reference_is_opaque() {
    let base = single_response(json!({ "$ref": "shared.json#/Widget" }));
    let candidate = single_response(json!({ "type": "string" }));
    assert!(diff(&doc(base), &doc(candidate)).is_empty());
}
