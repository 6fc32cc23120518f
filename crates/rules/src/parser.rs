//! Rule-creation payload decoding.
//!
//! A rule arrives as a loose JSON object:
//!
//! ```json
//! {
//!   "input": "Tech companies founded recently",
//!   "feature_name": "is_young_tech",
//!   "match": 1,
//!   "default": 0,
//!   "operation": {
//!     "AND": [
//!       { "operator": "EQUALS", "target_object": "industry", "value": "Technology" },
//!       { "operator": "LESS_THAN", "target_object": "founded_year", "value": "2020" }
//!     ]
//!   }
//! }
//! ```
//!
//! `operation` is either a single condition object, or a wrapper whose
//! one key is AND/OR (case-insensitive) mapping to a list of condition
//! objects. Nested groups are not supported.

use serde_json::Value;
use uuid::Uuid;

use crate::error::ParseError;
use crate::model::{Condition, Operator, Rule};

/// Canonical shape of a decoded `operation` block.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationBlock {
    Single(Condition),
    Group {
        operator: String,
        conditions: Vec<Condition>,
    },
}

/// Decode an `operation` block.
///
/// Branch order is part of the contract: a list-shaped block reports
/// "invalid boolean operator", while any other non-object reports
/// "invalid operation block".
pub fn decode_operation(block: &Value) -> Result<OperationBlock, ParseError> {
    let object = match block {
        Value::Array(_) => return Err(ParseError::InvalidBooleanOperator),
        Value::Object(map) => map,
        _ => return Err(ParseError::InvalidOperationBlock),
    };

    let first_key = object
        .keys()
        .next()
        .ok_or(ParseError::InvalidOperationBlock)?;

    let operator = first_key.to_uppercase();
    if operator == "AND" || operator == "OR" {
        let entries = object
            .get(first_key)
            .and_then(Value::as_array)
            .ok_or(ParseError::InvalidConditionFormat)?;
        let conditions = entries
            .iter()
            .map(decode_condition)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OperationBlock::Group {
            operator,
            conditions,
        })
    } else {
        // Single-condition shape: the block itself is the condition.
        Ok(OperationBlock::Single(decode_condition(block)?))
    }
}

fn decode_condition(raw: &Value) -> Result<Condition, ParseError> {
    let object = raw.as_object().ok_or(ParseError::InvalidConditionFormat)?;

    let operator = object
        .get("operator")
        .and_then(Value::as_str)
        .ok_or(ParseError::InvalidConditionFormat)?;
    let target_object = object
        .get("target_object")
        .and_then(Value::as_str)
        .ok_or(ParseError::InvalidConditionFormat)?;
    let value = object
        .get("value")
        .ok_or(ParseError::InvalidConditionFormat)?;

    Ok(Condition {
        operator: Operator::parse(operator),
        target_object: target_object.to_string(),
        value: stringify(value),
    })
}

/// String form of a condition literal: JSON strings verbatim, everything
/// else in its JSON rendering (`100` → "100", `true` → "true").
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode a full rule payload for `user_id`.
///
/// `match` and `default` fall back to 0 when absent; `input` and
/// `feature_name` are required.
pub fn parse_rule(user_id: Uuid, payload: &Value) -> Result<Rule, ParseError> {
    let input = required_str(payload, "input")?;
    let feature_name = required_str(payload, "feature_name")?;
    let match_value = payload.get("match").and_then(Value::as_i64).unwrap_or(0);
    let default_value = payload.get("default").and_then(Value::as_i64).unwrap_or(0);

    let operation = payload.get("operation").unwrap_or(&Value::Null);
    let (boolean_operator, conditions) = match decode_operation(operation)? {
        OperationBlock::Single(condition) => (None, vec![condition]),
        OperationBlock::Group {
            operator,
            conditions,
        } => (Some(operator), conditions),
    };

    Ok(Rule {
        id: Uuid::new_v4(),
        user_id,
        input: input.to_string(),
        feature_name: feature_name.to_string(),
        match_value,
        default_value,
        boolean_operator,
        conditions,
    })
}

fn required_str<'a>(payload: &'a Value, field: &'static str) -> Result<&'a str, ParseError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingField(field))
}

// ── Tests ───────────────────────────────────────────────────────────
