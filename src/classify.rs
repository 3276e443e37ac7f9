//! Enum Classifier over encoded definitions.
//!
//! The encoding has no enum discriminant: an enum is a string schema whose
//! `anyOf` arms are each a singleton-literal `enum`. This recovers that shape.

use serde_json::Value;

pub fn is_enum(def: &Value) -> bool {
    if def.get("type").and_then(Value::as_str) != Some("string") {
        return false;
    }
    match def.get("anyOf").and_then(Value::as_array) {
        Some(arms) if !arms.is_empty() => arms.iter().all(is_literal_arm),
        _ => false,
    }
}

fn is_literal_arm(arm: &Value) -> bool {
    arm.as_object()
        .and_then(|o| o.get("enum"))
        .and_then(Value::as_array)
        .is_some_and(|values| !values.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn singleton_literal_arms_are_enum() {
        assert!(is_enum(&json!({ "type": "string", "anyOf": [{ "enum": ["A"] }, { "enum": ["B"] }] })));
    }

    #[test]
    fn plain_or_empty_strings_are_not() {
        assert!(!is_enum(&json!({ "type": "string" })));
        assert!(!is_enum(&json!({ "type": "string", "anyOf": [] })));
    }

    #[test]
    fn every_arm_must_carry_literals() {
        assert!(!is_enum(&json!({ "type": "string", "anyOf": [{ "enum": ["A"] }, { "enum": [] }] })));
        assert!(!is_enum(&json!({ "type": "string", "anyOf": [{ "enum": ["A"] }, { "$ref": "#/definitions/B" }] })));
        assert!(!is_enum(&json!({ "type": "string", "anyOf": [{ "enum": ["A"] }, "B"] })));
        assert!(!is_enum(&json!({ "type": "string", "anyOf": [{ "enum": "A" }] })));
    }

    #[test]
    fn type_must_be_string() {
        assert!(!is_enum(&json!({ "anyOf": [{ "enum": ["A"] }] })));
        assert!(!is_enum(&json!({ "type": "integer", "anyOf": [{ "enum": [1] }] })));
        assert!(!is_enum(&json!("string")));
    }
}
