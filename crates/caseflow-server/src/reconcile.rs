use crate::state::AppState;
use anyhow::Result;
use caseflow_common::types::{Alert, AlertRow, AlertWithMatch, CaseSummary};
use caseflow_engine::lookup::CaseLookupIndex;
use caseflow_engine::matcher::rematch_all;
use caseflow_engine::merge::merge_batch;
use caseflow_engine::provision::{provision_skeleton_cases, CaseRegistry, SkeletonCaseRequest};
use caseflow_engine::status::{apply_status_update, StatusUpdate};
use caseflow_storage::{CaseStore, NewCase};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

/// Counts reported back to the import caller.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImportSummary {
    pub added: usize,
    pub updated: usize,
    pub total: usize,
    pub cases_created: usize,
}

/// Case-registry seam backed by the store: skeleton cases are ordinary
/// case rows with minimal fields.
struct StoreCaseRegistry<'a> {
    store: &'a CaseStore,
}

#[async_trait::async_trait]
impl CaseRegistry for StoreCaseRegistry<'_> {
    async fn create_skeleton_case(&self, request: SkeletonCaseRequest) -> Result<CaseSummary> {
        let row = self
            .store
            .insert_case(&NewCase {
                name: request.display_name,
                case_number: request.case_number,
                status: request.status,
                priority: false,
            })
            .await?;
        Ok(row.summary())
    }
}

/// Run one full import: snapshot → merge → provision skeleton cases →
/// re-match → persist the replacement snapshot. Serialized behind the
/// state's write lock so concurrent imports cannot race.
pub async fn run_import(state: &AppState, rows: &[AlertRow]) -> Result<ImportSummary> {
    let _guard = state.write_lock.lock().await;

    let cases = state.store.list_case_summaries().await?;
    let existing = state.store.list_alerts().await?;

    let outcome = merge_batch(rows, &existing, &cases, Utc::now());

    let registry = StoreCaseRegistry {
        store: &state.store,
    };
    let created = provision_skeleton_cases(&outcome.merged, &registry).await;

    let merged = if created.is_empty() {
        outcome.merged
    } else {
        let mut all_cases = cases;
        all_cases.extend(created.iter().cloned());
        let index = CaseLookupIndex::build(&all_cases);
        rematch_all(outcome.merged, &index)
    };

    let alerts: Vec<Alert> = merged.iter().map(|m| m.alert.clone()).collect();
    state.store.replace_alerts(&alerts).await?;

    let summary = ImportSummary {
        added: outcome.added,
        updated: outcome.updated,
        total: alerts.len(),
        cases_created: created.len(),
    };
    tracing::info!(
        added = summary.added,
        updated = summary.updated,
        total = summary.total,
        cases_created = summary.cases_created,
        "import completed"
    );
    Ok(summary)
}

/// Apply a status update to one logical alert and fan the result out to
/// every stored copy sharing its id. `None` means not found or ambiguous.
pub async fn run_status_update(
    state: &AppState,
    target_id: &str,
    update: &StatusUpdate,
) -> Result<Option<AlertWithMatch>> {
    let _guard = state.write_lock.lock().await;

    let cases = state.store.list_case_summaries().await?;
    let existing = state.store.list_alerts().await?;

    let Some(result) = apply_status_update(&existing, target_id, update, &cases, Utc::now())
    else {
        return Ok(None);
    };

    let touched = state.store.update_alerts_by_id(&result.alert).await?;
    tracing::debug!(
        alert_id = %result.alert.id,
        touched,
        "status update fanned out to stored copies"
    );
    Ok(Some(result))
}

/// The current working set classified against the registry, for read-side
/// views.
pub async fn load_working_set(state: &AppState) -> Result<Vec<AlertWithMatch>> {
    let cases = state.store.list_case_summaries().await?;
    let alerts = state.store.list_alerts().await?;
    let index = CaseLookupIndex::build(&cases);
    Ok(alerts
        .into_iter()
        .map(|alert| caseflow_engine::matcher::match_alert(alert, &index))
        .collect())
}
