//! Company import and listing endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use firmo_core::Company;
use firmo_ingest::{parse_csv, CompanyRecord};

use crate::state::AppState;

// ── Types ───────────────────────────────────────────────────────────

/// Result counts for an import batch.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ImportSummary {
    pub imported_records: usize,
    pub skipped_duplicates: usize,
    pub record_errors: usize,
    /// Names of the records that failed to import.
    pub errors: Vec<String>,
}

/// One company with its data map and processed features.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CompanyOut {
    pub id: Uuid,
    pub url: String,
    /// Raw attributes minus identity and bookkeeping timestamps.
    #[schema(value_type = Object)]
    pub data: Value,
    pub processed_features: Vec<FeatureOut>,
    pub imported_at: DateTime<Utc>,
    pub last_processed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FeatureOut {
    pub feature_name: String,
    pub value: i64,
    pub processed_at: DateTime<Utc>,
}

// ── Endpoints ───────────────────────────────────────────────────────

/// Import companies from a JSON array.
#[utoipa::path(
    post,
    path = "/companies/import",
    tag = "Companies",
    request_body = Vec<Object>,
    responses(
        (status = 200, description = "Import summary", body = ImportSummary)
    )
)]
pub(crate) async fn import_companies(
    State(state): State<Arc<AppState>>,
    Json(records): Json<Vec<CompanyRecord>>,
) -> Json<ImportSummary> {
    Json(import_records(&state, records, Vec::new()))
}

/// Import companies from a raw CSV body with a header row.
#[utoipa::path(
    post,
    path = "/companies/import/csv",
    tag = "Companies",
    request_body = String,
    responses(
        (status = 200, description = "Import summary", body = ImportSummary)
    )
)]
pub(crate) async fn import_companies_csv(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Json<ImportSummary> {
    let batch = parse_csv(&body);
    let row_errors = batch.errors.iter().map(|e| e.name.clone()).collect();
    Json(import_records(&state, batch.records, row_errors))
}

fn import_records(
    state: &AppState,
    records: Vec<CompanyRecord>,
    row_errors: Vec<String>,
) -> ImportSummary {
    let mut imported = 0;
    let mut skipped = 0;
    for record in records {
        if state.db.insert_company(record.into_company()) {
            imported += 1;
        } else {
            skipped += 1;
        }
    }

    info!(
        "company import: {} imported, {} duplicates, {} errors",
        imported,
        skipped,
        row_errors.len()
    );

    ImportSummary {
        imported_records: imported,
        skipped_duplicates: skipped,
        record_errors: row_errors.len(),
        errors: row_errors,
    }
}

/// List all companies with their raw data and processed features.
#[utoipa::path(
    get,
    path = "/companies",
    tag = "Companies",
    responses(
        (status = 200, description = "All imported companies", body = Vec<CompanyOut>)
    )
)]
pub(crate) async fn list_companies(State(state): State<Arc<AppState>>) -> Json<Vec<CompanyOut>> {
    let out = state
        .db
        .all_companies()
        .into_iter()
        .map(|company| {
            let features = state
                .db
                .features_for_company(company.id)
                .into_iter()
                .map(|f| FeatureOut {
                    feature_name: f.feature_name,
                    value: f.value,
                    processed_at: f.processed_at,
                })
                .collect();

            CompanyOut {
                id: company.id,
                url: company.url.clone(),
                data: data_map(&company),
                processed_features: features,
                imported_at: company.imported_at,
                last_processed_at: company.last_processed_at,
            }
        })
        .collect();

    Json(out)
}

/// Serialize a company and drop identity/bookkeeping keys.
fn data_map(company: &Company) -> Value {
    let mut value = serde_json::to_value(company).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        map.remove("id");
        map.remove("imported_at");
        map.remove("last_processed_at");
    }
    value
}
