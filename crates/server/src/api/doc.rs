//! OpenAPI documentation aggregator.
//!
//! Collects the `#[utoipa::path]`-annotated handlers and schema types
//! into one OpenAPI spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "firmograph API",
        version = "0.1.0",
        description = "Rule-based company classification with semantic-oracle conditions.",
    ),
    tags(
        (name = "Health", description = "Server readiness and record counts"),
        (name = "Users", description = "User management"),
        (name = "Rules", description = "Rule creation and company processing"),
        (name = "Companies", description = "Company import and listing"),
    ),
    paths(
        crate::api::health::health,
        crate::api::users::create_user,
        crate::api::rules::create_rules,
        crate::api::rules::process_companies,
        crate::api::companies::import_companies,
        crate::api::companies::import_companies_csv,
        crate::api::companies::list_companies,
    )
)]
pub struct ApiDoc;
