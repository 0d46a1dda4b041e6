//! Recursive partial-match predicate.
//!
//! This predicate is the sole query mechanism in JotDB. There is no
//! index; every query is a full scan of a collection's documents.

use serde_json::Value;

/// Checks whether `pattern` matches `candidate`.
///
/// The pattern is a filter, not a full equality check:
/// - Loosely equal scalars match immediately (this also makes any
///   value match itself, the base case that terminates recursion).
/// - A composite pattern (object or array) matches if every key or
///   index present in the *pattern* recursively matches the
///   candidate's value there; keys present only in the candidate are
///   ignored. An empty composite therefore matches anything.
/// - Anything else does not match.
///
/// Loose scalar equality is plain value equality widened two ways:
/// numbers compare through `f64` (so `1` matches `1.0`), and a null
/// pattern matches an absent candidate key.
///
/// # Example
///
/// ```rust
/// use jotdb_core::matches;
/// use serde_json::json;
///
/// assert!(matches(&json!({"x": 1}), &json!({"x": 1, "y": 2})));
/// assert!(!matches(&json!({"x": 1, "y": 2}), &json!({"x": 1})));
/// assert!(matches(&json!({}), &json!("anything")));
/// ```
#[must_use]
pub fn matches(pattern: &Value, candidate: &Value) -> bool {
    matches_entry(pattern, Some(candidate))
}

/// Matches against a candidate slot that may be absent.
fn matches_entry(pattern: &Value, candidate: Option<&Value>) -> bool {
    if loose_eq(pattern, candidate) {
        return true;
    }

    match pattern {
        Value::Object(fields) => fields.iter().all(|(key, sub)| {
            let nested = candidate
                .and_then(Value::as_object)
                .and_then(|obj| obj.get(key));
            matches_entry(sub, nested)
        }),
        Value::Array(items) => items.iter().enumerate().all(|(index, sub)| {
            let nested = candidate
                .and_then(Value::as_array)
                .and_then(|arr| arr.get(index));
            matches_entry(sub, nested)
        }),
        _ => false,
    }
}

fn loose_eq(pattern: &Value, candidate: Option<&Value>) -> bool {
    let Some(candidate) = candidate else {
        // An absent candidate slot only equals a null pattern.
        return pattern.is_null();
    };

    if pattern == candidate {
        return true;
    }

    // 1 and 1.0 are distinct serde_json numbers but loosely equal.
    match (pattern.as_f64(), candidate.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
