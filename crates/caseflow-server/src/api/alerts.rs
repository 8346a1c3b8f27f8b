use crate::api::pagination::PaginationParams;
use crate::api::{error_response, success_paginated_response, success_response};
use crate::logging::TraceId;
use crate::reconcile;
use crate::state::AppState;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use caseflow_common::types::{AlertWithMatch, MatchStatus, WorkflowStatus};
use caseflow_engine::status::StatusUpdate;
use caseflow_engine::views::AlertsIndex;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Alert working set grouped by match status for display collaborators.
#[derive(Serialize, ToSchema)]
pub struct AlertsIndexResponse {
    pub matched: Vec<AlertWithMatch>,
    pub unmatched: Vec<AlertWithMatch>,
    pub missing_identifier: Vec<AlertWithMatch>,
    pub by_case: HashMap<String, Vec<AlertWithMatch>>,
}

impl From<AlertsIndex> for AlertsIndexResponse {
    fn from(index: AlertsIndex) -> Self {
        Self {
            matched: index.matched,
            unmatched: index.unmatched,
            missing_identifier: index.missing_identifier,
            by_case: index.by_case,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateAlertStatusRequest {
    pub workflow_status: WorkflowStatus,
    pub resolution_notes: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Alert list query parameters.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
struct ListAlertsParams {
    /// Exact match-status filter (matched / unmatched / missing-identifier).
    #[param(required = false, rename = "match_status__eq")]
    #[serde(rename = "match_status__eq")]
    match_status_eq: Option<MatchStatus>,
    /// Exact workflow-status filter.
    #[param(required = false, rename = "workflow_status__eq")]
    #[serde(rename = "workflow_status__eq")]
    workflow_status_eq: Option<WorkflowStatus>,
    #[param(required = false)]
    #[serde(
        default,
        deserialize_with = "crate::api::pagination::deserialize_optional_u64"
    )]
    limit: Option<u64>,
    #[param(required = false)]
    #[serde(
        default,
        deserialize_with = "crate::api::pagination::deserialize_optional_u64"
    )]
    offset: Option<u64>,
}

/// Import a CSV batch of alerts.
///
/// The body is raw CSV text. Rows are matched against the case registry,
/// merged into the stored collection, and unmatched alerts with a usable
/// case number get skeleton cases created for them.
#[utoipa::path(
    post,
    path = "/v1/alerts/import",
    tag = "Alerts",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Import counts", body = reconcile::ImportSummary),
        (status = 400, description = "Unparseable CSV", body = crate::api::ApiError)
    )
)]
async fn import_alerts(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    body: String,
) -> impl IntoResponse {
    let rows = match crate::import::parse_alert_rows(&body) {
        Ok(rows) => rows,
        Err(error) => {
            tracing::warn!(error = %error, "rejected unparseable import");
            return error_response(
                StatusCode::BAD_REQUEST,
                &trace_id,
                "invalid_csv",
                &format!("Unparseable CSV: {error}"),
            );
        }
    };
    match reconcile::run_import(&state, &rows).await {
        Ok(summary) => success_response(StatusCode::OK, &trace_id, summary),
        Err(error) => {
            tracing::error!(error = %error, "import failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                "Import failed",
            )
        }
    }
}

/// Paginated alert list with current match classification.
#[utoipa::path(
    get,
    path = "/v1/alerts",
    tag = "Alerts",
    params(ListAlertsParams),
    responses(
        (status = 200, description = "Paginated alert list", body = Vec<AlertWithMatch>)
    )
)]
async fn list_alerts(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Query(params): Query<ListAlertsParams>,
) -> impl IntoResponse {
    let limit = PaginationParams::resolve_limit(params.limit);
    let offset = PaginationParams::resolve_offset(params.offset);

    let working_set = match reconcile::load_working_set(&state).await {
        Ok(set) => set,
        Err(error) => {
            tracing::error!(error = %error, "failed to load alert working set");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                "Database error",
            );
        }
    };

    let filtered: Vec<AlertWithMatch> = working_set
        .into_iter()
        .filter(|entry| {
            params
                .match_status_eq
                .map_or(true, |status| entry.match_status == status)
                && params
                    .workflow_status_eq
                    .map_or(true, |status| entry.alert.workflow_status == status)
        })
        .collect();

    let total = filtered.len() as u64;
    let items: Vec<AlertWithMatch> = filtered.into_iter().skip(offset).take(limit).collect();
    success_paginated_response(StatusCode::OK, &trace_id, items, total, limit, offset)
}

/// The working set grouped into matched / unmatched / missing-identifier
/// buckets plus a case-id map.
#[utoipa::path(
    get,
    path = "/v1/alerts/index",
    tag = "Alerts",
    responses(
        (status = 200, description = "Grouped alert index", body = AlertsIndexResponse)
    )
)]
async fn alerts_index(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match reconcile::load_working_set(&state).await {
        Ok(working_set) => {
            let index = AlertsIndex::build(&working_set);
            success_response(StatusCode::OK, &trace_id, AlertsIndexResponse::from(index))
        }
        Err(error) => {
            tracing::error!(error = %error, "failed to build alerts index");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                "Database error",
            )
        }
    }
}

/// Every stored copy sharing a logical alert id, classified against the
/// registry. Plural because historical imports could write duplicates.
#[utoipa::path(
    get,
    path = "/v1/alerts/{id}",
    tag = "Alerts",
    params(("id" = String, Path, description = "Logical alert id")),
    responses(
        (status = 200, description = "Stored copies of the alert", body = Vec<AlertWithMatch>),
        (status = 404, description = "No alert has this id", body = crate::api::ApiError)
    )
)]
async fn get_alert(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let copies = match state.store.get_alerts_by_id(&id).await {
        Ok(copies) => copies,
        Err(error) => {
            tracing::error!(error = %error, "failed to load alert copies");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                "Database error",
            );
        }
    };
    if copies.is_empty() {
        return error_response(StatusCode::NOT_FOUND, &trace_id, "not_found", "Alert not found");
    }
    let cases = match state.store.list_case_summaries().await {
        Ok(cases) => cases,
        Err(error) => {
            tracing::error!(error = %error, "failed to load case snapshot");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                "Database error",
            );
        }
    };
    let index = caseflow_engine::lookup::CaseLookupIndex::build(&cases);
    let classified: Vec<AlertWithMatch> = copies
        .into_iter()
        .map(|alert| caseflow_engine::matcher::match_alert(alert, &index))
        .collect();
    success_response(StatusCode::OK, &trace_id, classified)
}

/// Apply a workflow-status transition to one alert.
///
/// The target may be the alert id or, failing that, a unique identity key
/// value. Updates propagate to every stored copy sharing the id.
#[utoipa::path(
    post,
    path = "/v1/alerts/{id}/status",
    tag = "Alerts",
    params(("id" = String, Path, description = "Alert id or unique identity key value")),
    request_body = UpdateAlertStatusRequest,
    responses(
        (status = 200, description = "Updated alert", body = AlertWithMatch),
        (status = 404, description = "Target not found or ambiguous", body = crate::api::ApiError)
    )
)]
async fn update_alert_status(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAlertStatusRequest>,
) -> impl IntoResponse {
    let update = StatusUpdate {
        workflow_status: request.workflow_status,
        resolution_notes: request.resolution_notes,
        resolved_at: request.resolved_at,
    };
    match reconcile::run_status_update(&state, &id, &update).await {
        Ok(Some(result)) => success_response(StatusCode::OK, &trace_id, result),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            &trace_id,
            "ambiguous_target",
            "Alert not found or target is ambiguous",
        ),
        Err(error) => {
            tracing::error!(error = %error, "status update failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                "Database error",
            )
        }
    }
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_alerts))
        .routes(routes!(import_alerts))
        .routes(routes!(alerts_index))
        .routes(routes!(get_alert))
        .routes(routes!(update_alert_status))
}
