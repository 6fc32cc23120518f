//! Validated company input records.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use firmo_core::Company;

use crate::parse::number_or_none;

/// One incoming company record, from a JSON payload or a CSV row.
/// Field names match the JSON keys and CSV headers of the export format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub url: String,
    pub founded_year: i32,
    pub total_employees: i64,
    pub headquarters_city: String,
    pub employee_locations: String,
    #[serde(default)]
    pub employee_growth_2y: Option<f64>,
    #[serde(default)]
    pub employee_growth_1y: Option<f64>,
    #[serde(default)]
    pub employee_growth_6m: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

/// Why a CSV row could not become a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("column '{0}' is not numeric")]
    NonNumeric(&'static str),
}

impl CompanyRecord {
    /// Build a record from a header-keyed CSV row.
    ///
    /// Text cells are trimmed and may be empty; the two required numeric
    /// columns fail the row, while growth cells parse leniently to
    /// `None`. The export header names the company column `company_name`
    /// and uppercases the growth-window suffixes.
    pub fn from_row(row: &HashMap<String, String>) -> Result<Self, RecordError> {
        Ok(Self {
            name: text(row, "company_name"),
            url: text(row, "url"),
            founded_year: required_number(row, "founded_year")?,
            total_employees: required_number(row, "total_employees")?,
            headquarters_city: text(row, "headquarters_city"),
            employee_locations: text(row, "employee_locations"),
            employee_growth_2y: number_or_none(cell(row, "employee_growth_2Y")),
            employee_growth_1y: number_or_none(cell(row, "employee_growth_1Y")),
            employee_growth_6m: number_or_none(cell(row, "employee_growth_6M")),
            description: optional_text(row, "description"),
            industry: optional_text(row, "industry"),
        })
    }

    /// Materialize the record as a stored company, stamping import time.
    pub fn into_company(self) -> Company {
        Company {
            id: Uuid::new_v4(),
            name: self.name,
            url: self.url,
            founded_year: self.founded_year,
            total_employees: self.total_employees,
            headquarters_city: self.headquarters_city,
            employee_locations: self.employee_locations,
            employee_growth_2y: self.employee_growth_2y,
            employee_growth_1y: self.employee_growth_1y,
            employee_growth_6m: self.employee_growth_6m,
            description: self.description,
            industry: self.industry,
            imported_at: Utc::now(),
            last_processed_at: None,
        }
    }
}

fn cell<'a>(row: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    row.get(key).map(String::as_str)
}

fn text(row: &HashMap<String, String>, key: &str) -> String {
    cell(row, key).unwrap_or_default().trim().to_string()
}

fn optional_text(row: &HashMap<String, String>, key: &str) -> Option<String> {
    let value = text(row, key);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn required_number<T: std::str::FromStr>(
    row: &HashMap<String, String>,
    key: &'static str,
) -> Result<T, RecordError> {
    let raw = cell(row, key).ok_or(RecordError::MissingColumn(key))?;
    number_or_none(Some(raw)).ok_or(RecordError::NonNumeric(key))
}

// ── Tests ───────────────────────────────────────────────────────────
