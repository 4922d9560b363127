#![no_main]

use libfuzzer_sys::fuzz_target;
use openapi_compat_core::{diff, ContractDocument};

// Accepts arbitrary bytes, splits them into two JSON documents, and diffs them.
// Goal: no panics, even on malformed input.
fuzz_target!(|data: &[u8]| {
    let split = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    let (left, right) = data.split_at(split);
    let right = right.get(1..).unwrap_or_default();

    let (Ok(base), Ok(candidate)) = (
        serde_json::from_slice::<serde_json::Value>(left),
        serde_json::from_slice::<serde_json::Value>(right),
    ) else {
        return;
    };
    let (Ok(base), Ok(candidate)) = (
        ContractDocument::from_value(base),
        ContractDocument::from_value(candidate),
    ) else {
        return;
    };

    let _ = diff(&base, &candidate);
    assert!(diff(&base, &base).is_empty());
});
