//! Rule definition and evaluation engine.
//!
//! This crate provides:
//! - Decoding of loose rule-creation payloads into [`Rule`]s with ordered
//!   conditions (single condition, or one level of AND/OR over a flat list)
//! - Per-condition evaluation against resolved entity attributes under a
//!   fixed operator table, including semantic-oracle (`LLM`) questions
//! - Boolean composition of condition results and the rule-level outcome

pub mod composer;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;

pub use engine::RuleEngine;
pub use error::{EngineError, ParseError};
pub use model::{Condition, Operator, Rule, RuleOutcome};
pub use parser::{decode_operation, parse_rule, OperationBlock};
