//! Rule creation and company processing endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use futures::future;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use firmo_core::ProcessedFeature;
use firmo_rules::parse_rule;

use crate::error::ApiError;
use crate::state::AppState;

// ── Types ───────────────────────────────────────────────────────────

/// Request body for POST /rules: a batch of loose rule payloads.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RuleCreate {
    pub user_name: String,
    /// Loose rule payloads: `{input, feature_name, match?, default?, operation}`.
    #[schema(value_type = Vec<Object>)]
    pub rules: Vec<Value>,
}

/// Summary of one rule that was actually created.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreatedRule {
    pub input: String,
    pub feature_name: String,
    #[serde(rename = "match")]
    pub match_value: i64,
    #[serde(rename = "default")]
    pub default_value: i64,
    pub boolean_operator: String,
    pub conditions: usize,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RuleOut {
    pub success: bool,
    pub message: String,
    pub user_name: String,
    /// Duplicates are skipped silently, so this can be shorter than the
    /// submitted batch.
    pub created: Vec<CreatedRule>,
}

/// Request body for POST /companies/process.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ProcessRequest {
    pub user_name: String,
    pub urls: Vec<String>,
}

// ── Endpoints ───────────────────────────────────────────────────────

/// Create rules for a user, creating the user if needed.
#[utoipa::path(
    post,
    path = "/rules",
    tag = "Rules",
    request_body = RuleCreate,
    responses(
        (status = 201, description = "Created rules summary", body = RuleOut),
        (status = 400, description = "Malformed rule payload")
    )
)]
pub(crate) async fn create_rules(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RuleCreate>,
) -> Result<(StatusCode, Json<RuleOut>), ApiError> {
    if payload.user_name.is_empty() || payload.rules.is_empty() {
        return Err(ApiError::bad_request("missing user_name or rules"));
    }

    let user = state.db.find_or_create_user(&payload.user_name);

    let mut created = Vec::new();
    for raw in &payload.rules {
        let rule = parse_rule(user.id, raw)?;

        // Same user + input + feature_name: silent skip, never an update.
        if state.db.rule_exists(user.id, &rule.input, &rule.feature_name) {
            continue;
        }

        created.push(CreatedRule {
            input: rule.input.clone(),
            feature_name: rule.feature_name.clone(),
            match_value: rule.match_value,
            default_value: rule.default_value,
            boolean_operator: rule
                .boolean_operator
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            conditions: rule.conditions.len(),
        });
        state.db.insert_rule(rule);
    }

    info!(
        "created {} rule(s) for user '{}'",
        created.len(),
        user.user_name
    );

    Ok((
        StatusCode::CREATED,
        Json(RuleOut {
            success: true,
            message: "Rule created successfully".to_string(),
            user_name: user.user_name,
            created,
        }),
    ))
}

/// Apply all of a user's rules to the companies matching `urls`.
///
/// Evaluations are independent per company and run concurrently; within
/// one company, rules apply in creation order. Each applied rule is
/// recorded as a processed feature.
#[utoipa::path(
    post,
    path = "/companies/process",
    tag = "Rules",
    request_body = ProcessRequest,
    responses(
        (status = 200, description = "Per-company feature rows", body = Vec<Object>),
        (status = 404, description = "Unknown user or no matching companies"),
        (status = 422, description = "A rule failed against a company's attributes")
    )
)]
pub(crate) async fn process_companies(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProcessRequest>,
) -> Result<Json<Vec<Value>>, ApiError> {
    if payload.user_name.is_empty() || payload.urls.is_empty() {
        return Err(ApiError::bad_request("missing user_name or urls"));
    }

    let user = state
        .db
        .find_user(&payload.user_name)
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    let companies = state.db.companies_by_urls(&payload.urls);
    if companies.is_empty() {
        return Err(ApiError::not_found("no companies found"));
    }

    let rules = state.db.rules_for_user(user.id);

    let engine = &state.engine;
    let rules_ref = &rules;
    let evaluations = future::join_all(companies.iter().map(|company| async move {
        let mut row = serde_json::Map::new();
        row.insert("company".to_string(), json!(company.name));

        let mut features = Vec::with_capacity(rules_ref.len());
        for rule in rules_ref {
            let outcome = engine.apply(rule, company).await?;
            row.insert(rule.feature_name.clone(), json!(outcome.value));
            features.push(ProcessedFeature::new(
                company.id,
                rule.id,
                rule.user_id,
                rule.feature_name.clone(),
                outcome.value,
            ));
        }

        Ok::<_, firmo_rules::EngineError>((company.id, Value::Object(row), features))
    }))
    .await;

    let now = Utc::now();
    let mut output = Vec::with_capacity(evaluations.len());
    for evaluation in evaluations {
        let (company_id, row, features) = evaluation?;
        for feature in features {
            state.db.record_feature(feature);
        }
        state.db.mark_processed(company_id, now);
        output.push(row);
    }

    info!(
        "processed {} companies with {} rules for '{}'",
        output.len(),
        rules.len(),
        user.user_name
    );

    Ok(Json(output))
}
