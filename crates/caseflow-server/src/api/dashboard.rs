use crate::api::pagination::PaginationParams;
use crate::api::{error_response, success_response};
use crate::logging::TraceId;
use crate::reconcile;
use crate::state::AppState;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use caseflow_common::types::{AlertWithMatch, WorkflowStatus};
use caseflow_engine::weight::{alert_type_weight, case_status_weight};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// One entry of the prioritized work queue.
#[derive(Serialize, ToSchema)]
pub struct TodoItem {
    /// Combined alert-type and case-status decay weight; higher first.
    pub weight: u32,
    pub alert: AlertWithMatch,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
struct TodoParams {
    #[param(required = false)]
    #[serde(
        default,
        deserialize_with = "crate::api::pagination::deserialize_optional_u64"
    )]
    limit: Option<u64>,
}

/// Open alerts ranked for the "things to do" view.
///
/// Each open alert scores the decay weight of its type in the configured
/// type order plus the weight of its matched case's status in the opt-in
/// status order. Resolved alerts never appear.
#[utoipa::path(
    get,
    path = "/v1/dashboard/todo",
    tag = "Dashboard",
    params(TodoParams),
    responses(
        (status = 200, description = "Prioritized open alerts", body = Vec<TodoItem>)
    )
)]
async fn todo(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Query(params): Query<TodoParams>,
) -> impl IntoResponse {
    let limit = PaginationParams::resolve_limit(params.limit);

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

    let priority = &state.config.priority;
    let mut items: Vec<TodoItem> = working_set
        .into_iter()
        .filter(|entry| entry.alert.workflow_status != WorkflowStatus::Resolved)
        .map(|entry| {
            let mut weight = alert_type_weight(&entry.alert.alert_type, &priority.alert_type_order);
            if let Some(case_status) = &entry.matched_case_status {
                weight += case_status_weight(case_status, &priority.case_status_order);
            }
            TodoItem {
                weight,
                alert: entry,
            }
        })
        .collect();

    // Highest weight first; older alerts break ties, then id for stability.
    items.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then_with(|| match (a.alert.alert.alert_date, b.alert.alert.alert_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
            .then_with(|| a.alert.alert.id.cmp(&b.alert.alert.id))
    });
    items.truncate(limit);

    success_response(StatusCode::OK, &trace_id, items)
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(todo))
}
