use crate::api::pagination::PaginationParams;
use crate::api::{error_response, success_empty_response, success_paginated_response, success_response};
use crate::logging::TraceId;
use crate::state::AppState;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use caseflow_storage::{CaseFilter, CaseRow, CaseUpdate, NewCase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Case record as returned by the registry API.
#[derive(Serialize, ToSchema)]
pub struct CaseResponse {
    pub id: String,
    pub name: String,
    pub case_number: String,
    pub status: String,
    pub priority: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CaseRow> for CaseResponse {
    fn from(row: CaseRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            case_number: row.case_number,
            status: row.status,
            priority: row.priority,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CreateCaseRequest {
    pub name: String,
    pub case_number: String,
    /// Defaults to "In Progress" when omitted.
    pub status: Option<String>,
    #[serde(default)]
    pub priority: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateCaseRequest {
    pub name: Option<String>,
    pub case_number: Option<String>,
    pub status: Option<String>,
    pub priority: Option<bool>,
}

/// Case list query parameters.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
struct ListCasesParams {
    /// Exact status match.
    #[param(required = false, rename = "status__eq")]
    #[serde(rename = "status__eq")]
    status_eq: Option<String>,
    /// Name substring match.
    #[param(required = false, rename = "name__contains")]
    #[serde(rename = "name__contains")]
    name_contains: Option<String>,
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

/// Paginated case list, newest first.
#[utoipa::path(
    get,
    path = "/v1/cases",
    tag = "Cases",
    params(ListCasesParams),
    responses(
        (status = 200, description = "Paginated case list", body = Vec<CaseResponse>)
    )
)]
async fn list_cases(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Query(params): Query<ListCasesParams>,
) -> impl IntoResponse {
    let limit = PaginationParams::resolve_limit(params.limit);
    let offset = PaginationParams::resolve_offset(params.offset);
    let filter = CaseFilter {
        status_eq: params.status_eq,
        name_contains: params.name_contains,
    };

    let total = match state.store.count_cases(&filter).await {
        Ok(count) => count,
        Err(error) => {
            tracing::error!(error = %error, "failed to count cases");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                "Database error",
            );
        }
    };
    match state.store.list_cases(&filter, limit, offset).await {
        Ok(rows) => {
            let items: Vec<CaseResponse> = rows.into_iter().map(CaseResponse::from).collect();
            success_paginated_response(StatusCode::OK, &trace_id, items, total, limit, offset)
        }
        Err(error) => {
            tracing::error!(error = %error, "failed to list cases");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                "Database error",
            )
        }
    }
}

/// Create a case.
#[utoipa::path(
    post,
    path = "/v1/cases",
    tag = "Cases",
    request_body = CreateCaseRequest,
    responses(
        (status = 201, description = "Created case", body = CaseResponse),
        (status = 400, description = "Invalid request", body = crate::api::ApiError)
    )
)]
async fn create_case(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Json(request): Json<CreateCaseRequest>,
) -> impl IntoResponse {
    if request.name.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            &trace_id,
            "bad_request",
            "Case name must not be empty",
        );
    }
    let new = NewCase {
        name: request.name,
        case_number: request.case_number,
        status: request
            .status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "In Progress".to_string()),
        priority: request.priority,
    };
    match state.store.insert_case(&new).await {
        Ok(row) => success_response(StatusCode::CREATED, &trace_id, CaseResponse::from(row)),
        Err(error) => {
            tracing::error!(error = %error, "failed to create case");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                "Database error",
            )
        }
    }
}

/// Get a case by id.
#[utoipa::path(
    get,
    path = "/v1/cases/{id}",
    tag = "Cases",
    params(("id" = String, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case record", body = CaseResponse),
        (status = 404, description = "Case not found", body = crate::api::ApiError)
    )
)]
async fn get_case(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_case_by_id(&id).await {
        Ok(Some(row)) => success_response(StatusCode::OK, &trace_id, CaseResponse::from(row)),
        Ok(None) => error_response(StatusCode::NOT_FOUND, &trace_id, "not_found", "Case not found"),
        Err(error) => {
            tracing::error!(error = %error, "failed to get case");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                "Database error",
            )
        }
    }
}

/// Update a case.
#[utoipa::path(
    put,
    path = "/v1/cases/{id}",
    tag = "Cases",
    params(("id" = String, Path, description = "Case id")),
    request_body = UpdateCaseRequest,
    responses(
        (status = 200, description = "Updated case", body = CaseResponse),
        (status = 404, description = "Case not found", body = crate::api::ApiError)
    )
)]
async fn update_case(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCaseRequest>,
) -> impl IntoResponse {
    let update = CaseUpdate {
        name: request.name,
        case_number: request.case_number,
        status: request.status,
        priority: request.priority,
    };
    match state.store.update_case(&id, &update).await {
        Ok(Some(row)) => success_response(StatusCode::OK, &trace_id, CaseResponse::from(row)),
        Ok(None) => error_response(StatusCode::NOT_FOUND, &trace_id, "not_found", "Case not found"),
        Err(error) => {
            tracing::error!(error = %error, "failed to update case");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                "Database error",
            )
        }
    }
}

/// Delete a case. Alerts previously matched to it are downgraded to
/// unmatched on their next read.
#[utoipa::path(
    delete,
    path = "/v1/cases/{id}",
    tag = "Cases",
    params(("id" = String, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case deleted"),
        (status = 404, description = "Case not found", body = crate::api::ApiError)
    )
)]
async fn delete_case(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.delete_case(&id).await {
        Ok(true) => success_empty_response(StatusCode::OK, &trace_id, "case deleted"),
        Ok(false) => error_response(StatusCode::NOT_FOUND, &trace_id, "not_found", "Case not found"),
        Err(error) => {
            tracing::error!(error = %error, "failed to delete case");
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
        .routes(routes!(list_cases, create_case))
        .routes(routes!(get_case, update_case, delete_case))
}
