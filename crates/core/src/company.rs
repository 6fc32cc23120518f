//! Company records and their rule-visible attribute surface.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attr::{AttrValue, AttributeError, AttributeMap, AttributeSource};

/// An imported company with its firmographic attributes.
///
/// Rules never touch this struct directly; they go through the
/// [`AttributeSource`] impl below, which also exposes the computed
/// `headquarters_country` and `company_age` attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub founded_year: i32,
    pub total_employees: i64,
    pub headquarters_city: String,
    pub employee_locations: String,
    pub employee_growth_2y: Option<f64>,
    pub employee_growth_1y: Option<f64>,
    pub employee_growth_6m: Option<f64>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub imported_at: DateTime<Utc>,
    pub last_processed_at: Option<DateTime<Utc>>,
}

impl Company {
    /// Country extracted from the city string:
    /// "Paris (France)" → "France", "Berlin (Deutschland)" → "Deutschland".
    pub fn headquarters_country(&self) -> Option<String> {
        let open = self.headquarters_city.find('(')?;
        let rest = &self.headquarters_city[open + 1..];
        let close = rest.find(')')?;
        let country = rest[..close].trim();
        if country.is_empty() {
            None
        } else {
            Some(country.to_string())
        }
    }

    /// Age in years based on the foundation year.
    pub fn company_age(&self) -> i32 {
        Utc::now().year() - self.founded_year
    }
}

static ATTRIBUTES: LazyLock<AttributeMap<Company>> = LazyLock::new(|| {
    AttributeMap::new("Company")
        .field("name", |c: &Company| AttrValue::from(c.name.as_str()))
        .field("url", |c: &Company| AttrValue::from(c.url.as_str()))
        .field("founded_year", |c: &Company| AttrValue::from(c.founded_year))
        .field("total_employees", |c: &Company| {
            AttrValue::from(c.total_employees)
        })
        .field("headquarters_city", |c: &Company| {
            AttrValue::from(c.headquarters_city.as_str())
        })
        .field("employee_locations", |c: &Company| {
            AttrValue::from(c.employee_locations.as_str())
        })
        .field("employee_growth_2y", |c: &Company| {
            AttrValue::from(c.employee_growth_2y)
        })
        .field("employee_growth_1y", |c: &Company| {
            AttrValue::from(c.employee_growth_1y)
        })
        .field("employee_growth_6m", |c: &Company| {
            AttrValue::from(c.employee_growth_6m)
        })
        .field("description", |c: &Company| {
            AttrValue::from(c.description.clone())
        })
        .field("industry", |c: &Company| AttrValue::from(c.industry.clone()))
        .field("imported_at", |c: &Company| AttrValue::from(c.imported_at))
        .field("last_processed_at", |c: &Company| {
            AttrValue::from(c.last_processed_at)
        })
        // Computed attributes
        .field("headquarters_country", |c: &Company| {
            AttrValue::from(c.headquarters_country())
        })
        .field("company_age", |c: &Company| AttrValue::from(c.company_age()))
});

impl AttributeSource for Company {
    fn attribute(&self, path: &str) -> Result<AttrValue, AttributeError> {
        ATTRIBUTES.resolve(self, path)
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_company() -> Company {
        Company {
            id: Uuid::new_v4(),
            name: "Acme Robotics".to_string(),
            url: "https://acme.example".to_string(),
            founded_year: 2015,
            total_employees: 150,
            headquarters_city: "Paris (France)".to_string(),
            employee_locations: "Paris; Lyon; Berlin".to_string(),
            employee_growth_2y: Some(0.35),
            employee_growth_1y: Some(0.12),
            employee_growth_6m: None,
            description: Some("Industrial robot arms".to_string()),
            industry: Some("Technology".to_string()),
            imported_at: Utc::now(),
            last_processed_at: None,
        }
    }

    #[test]
    fn extracts_country_from_city() {
        let mut company = sample_company();
        assert_eq!(company.headquarters_country().as_deref(), Some("France"));

        company.headquarters_city = "Berlin (Deutschland)".to_string();
        assert_eq!(
            company.headquarters_country().as_deref(),
            Some("Deutschland")
        );

        company.headquarters_city = "Remote".to_string();
        assert_eq!(company.headquarters_country(), None);

        company.headquarters_city = "Oslo ()".to_string();
        assert_eq!(company.headquarters_country(), None);
    }

    #[test]
    fn company_age_from_founded_year() {
        let company = sample_company();
        assert_eq!(company.company_age(), Utc::now().year() - 2015);
    }

    #[test]
    fn attribute_lookup_covers_stored_and_computed_fields() {
        let company = sample_company();

        assert_eq!(
            company.attribute("total_employees").unwrap(),
            AttrValue::Int(150)
        );
        assert_eq!(
            company.attribute("industry").unwrap(),
            AttrValue::Text("Technology".into())
        );
        assert_eq!(
            company.attribute("headquarters_country").unwrap(),
            AttrValue::Text("France".into())
        );
        assert_eq!(
            company.attribute("employee_growth_6m").unwrap(),
            AttrValue::Null
        );
    }

    #[test]
    fn attribute_lookup_rejects_unknown_path() {
        let company = sample_company();
        let err = company.attribute("ticker_symbol").unwrap_err();
        assert_eq!(err.path, "ticker_symbol");
    }
}
