use crate::normalize::normalize_case_number;
use caseflow_common::types::{Alert, WorkflowStatus};
use chrono::{DateTime, Utc};

/// Merge two records of the same logical alert into one.
///
/// Workflow status keeps whichever side ranks higher
/// (resolved > snoozed > in-progress > acknowledged > new), ties favoring
/// the existing record. `resolved_at` is recomputed from the chosen status:
/// forced null unless the result is resolved. Resolution notes and metadata
/// keys keep the existing side on conflict, since they may carry caseworker
/// annotations; every other field takes the incoming value because the
/// batch import is the source of truth for alert payload.
///
/// `updated_at` is carried from the existing record; the caller bumps it
/// when the merge actually changed something (see [`differs`]).
pub fn resolve(existing: &Alert, incoming: &Alert, now: DateTime<Utc>) -> Alert {
    let workflow_status = if incoming.workflow_status > existing.workflow_status {
        incoming.workflow_status
    } else {
        existing.workflow_status
    };

    let resolved_at = if workflow_status == WorkflowStatus::Resolved {
        existing
            .resolved_at
            .or(incoming.resolved_at)
            .or(Some(now))
    } else {
        None
    };

    let resolution_notes = existing
        .resolution_notes
        .clone()
        .filter(|notes| !notes.trim().is_empty())
        .or_else(|| incoming.resolution_notes.clone());

    let mut metadata = incoming.metadata.clone();
    for (key, value) in &existing.metadata {
        metadata.insert(key.clone(), value.clone());
    }

    Alert {
        id: existing.id.clone(),
        report_id: incoming.report_id.clone(),
        case_number: incoming.case_number.clone(),
        alert_type: incoming.alert_type.clone(),
        description: incoming.description.clone(),
        alert_date: incoming.alert_date,
        workflow_status,
        resolved_at,
        resolution_notes,
        metadata,
        created_at: existing.created_at,
        updated_at: existing.updated_at,
    }
}

/// Whether two records differ in any durable field other than `updated_at`.
/// Drives the import's `updated` count, so a re-import of identical data
/// registers as no change. Case numbers are compared in normalized form;
/// a formatting-only difference is not a change.
pub fn differs(a: &Alert, b: &Alert) -> bool {
    a.id != b.id
        || a.report_id != b.report_id
        || normalize_case_number(a.case_number.as_deref())
            != normalize_case_number(b.case_number.as_deref())
        || a.alert_type != b.alert_type
        || a.description != b.description
        || a.alert_date != b.alert_date
        || a.workflow_status != b.workflow_status
        || a.resolved_at != b.resolved_at
        || a.resolution_notes != b.resolution_notes
        || a.metadata != b.metadata
        || a.created_at != b.created_at
}
