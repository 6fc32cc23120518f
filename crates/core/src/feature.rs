//! Processed feature records: the timestamped output of applying a rule
//! to a company.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedFeature {
    pub id: Uuid,
    pub company_id: Uuid,
    pub rule_id: Uuid,
    pub user_id: Uuid,
    pub feature_name: String,
    pub value: i64,
    pub processed_at: DateTime<Utc>,
}

impl ProcessedFeature {
    pub fn new(
        company_id: Uuid,
        rule_id: Uuid,
        user_id: Uuid,
        feature_name: impl Into<String>,
        value: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            rule_id,
            user_id,
            feature_name: feature_name.into(),
            value,
            processed_at: Utc::now(),
        }
    }
}
