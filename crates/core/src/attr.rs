//! String-path attribute resolution over typed accessor maps.
//!
//! Rule conditions name entity attributes by string path
//! (`"total_employees"`, `"headquarters_country"`). Instead of reflecting
//! over structs, each entity type builds an [`AttributeMap`] once: a table
//! of path → accessor function. Computed attributes register alongside
//! stored fields, and nested attributes register under their dotted path,
//! so lookup stays a single table probe.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

// ── Resolved values ─────────────────────────────────────────────────

/// A value resolved from an entity attribute.
///
/// The rule engine treats these asymmetrically: equality and containment
/// compare the [`fmt::Display`] form, while ordering operators go through
/// [`AttrValue::as_f64`]. Rule authors rely on both behaviors, so neither
/// side may be unified into the other.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    /// Numeric view of the value, if it has one. Text is parsed, `Null`
    /// has none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Null => None,
            AttrValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            AttrValue::Int(n) => Some(*n as f64),
            AttrValue::Float(f) => Some(*f),
            AttrValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => Ok(()),
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Int(n) => write!(f, "{}", n),
            AttrValue::Float(x) => write!(f, "{}", x),
            AttrValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(i64::from(v))
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<DateTime<Utc>> for AttrValue {
    fn from(v: DateTime<Utc>) -> Self {
        AttrValue::Text(v.to_rfc3339())
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(AttrValue::Null)
    }
}

// ── Resolution errors ───────────────────────────────────────────────

/// A condition referenced an attribute path the entity does not expose.
///
/// This is a rule-definition bug and must surface to the caller; it is
/// never silently defaulted.
#[derive(Debug, Clone, thiserror::Error)]
#[error("cannot resolve attribute path '{path}' on {entity}")]
pub struct AttributeError {
    pub entity: &'static str,
    pub path: String,
}

// ── Accessor maps ───────────────────────────────────────────────────

type Accessor<T> = fn(&T) -> AttrValue;

/// Accessor table for one entity type, built once and shared.
pub struct AttributeMap<T> {
    entity: &'static str,
    fields: BTreeMap<&'static str, Accessor<T>>,
}

impl<T> AttributeMap<T> {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            fields: BTreeMap::new(),
        }
    }

    /// Register an accessor under `path`. Dotted paths are plain keys here.
    pub fn field(mut self, path: &'static str, accessor: Accessor<T>) -> Self {
        self.fields.insert(path, accessor);
        self
    }

    /// Resolve `path` against `entity`, failing when no accessor exists.
    pub fn resolve(&self, entity: &T, path: &str) -> Result<AttrValue, AttributeError> {
        match self.fields.get(path) {
            Some(accessor) => Ok(accessor(entity)),
            None => Err(AttributeError {
                entity: self.entity,
                path: path.to_string(),
            }),
        }
    }
}

/// Lookup of attribute values by string path. The rule engine depends on
/// entities only through this trait.
pub trait AttributeSource {
    fn attribute(&self, path: &str) -> Result<AttrValue, AttributeError>;
}

// ── Tests ───────────────────────────────────────────────────────────
