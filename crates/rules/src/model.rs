//! Rule and condition records.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Operators ───────────────────────────────────────────────────────

/// Comparison operator for one condition.
///
/// Stored rules may carry operator names this build does not know;
/// [`Operator::Unknown`] absorbs them so evaluation falls through to
/// "no match" instead of failing the rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
    NotContains,
    Llm,
    #[serde(other)]
    Unknown,
}

impl Operator {
    /// Parse an operator name as it appears in rule payloads.
    /// Unrecognized names map to [`Operator::Unknown`] rather than failing.
    pub fn parse(name: &str) -> Self {
        match name {
            "EQUALS" => Self::Equals,
            "NOT_EQUALS" => Self::NotEquals,
            "GREATER_THAN" => Self::GreaterThan,
            "LESS_THAN" => Self::LessThan,
            "CONTAINS" => Self::Contains,
            "NOT_CONTAINS" => Self::NotContains,
            "LLM" => Self::Llm,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Equals => "EQUALS",
            Self::NotEquals => "NOT_EQUALS",
            Self::GreaterThan => "GREATER_THAN",
            Self::LessThan => "LESS_THAN",
            Self::Contains => "CONTAINS",
            Self::NotContains => "NOT_CONTAINS",
            Self::Llm => "LLM",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

// ── Records ─────────────────────────────────────────────────────────

/// One atomic predicate: operator + attribute path + literal.
///
/// The literal is stored in string form regardless of its JSON source
/// type; ordering operators re-parse it numerically at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub operator: Operator,
    pub target_object: String,
    pub value: String,
}

/// A named derived feature for one user: a boolean decision procedure
/// over an entity, emitting `match_value` when it holds and
/// `default_value` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Label of the rule invocation, as submitted.
    pub input: String,
    /// Output key this rule writes.
    pub feature_name: String,
    #[serde(rename = "match")]
    pub match_value: i64,
    #[serde(rename = "default")]
    pub default_value: i64,
    /// `"AND"` / `"OR"`, or `None` for a single bare condition. Kept as
    /// a string so composition can name an unsupported operator when a
    /// stored rule carries one.
    pub boolean_operator: Option<String>,
    /// Conditions in declaration order, owned exclusively by this rule.
    pub conditions: Vec<Condition>,
}

/// Outcome of applying a rule to one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub matched: bool,
    /// `match_value` when matched, `default_value` otherwise.
    pub value: i64,
}

// ── Tests ───────────────────────────────────────────────────────────
