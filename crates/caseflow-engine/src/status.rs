use crate::identity::{key_value, keys_for};
use crate::lookup::CaseLookupIndex;
use crate::matcher::match_alert;
use caseflow_common::types::{Alert, AlertWithMatch, CaseSummary, WorkflowStatus};
use chrono::{DateTime, Utc};

/// A single caseworker-driven workflow transition.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub workflow_status: WorkflowStatus,
    pub resolution_notes: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Apply one status update to one logical alert and re-classify it.
///
/// The target is located by exact id first; historical imports may have
/// written several rows with one id, in which case the first row stands in
/// for the logical alert and the caller must propagate the result to every
/// stored copy. When no id matches, the target id is tried as an identity
/// key value, strong tier first — but more than one hit within a tier means
/// the operation refuses (`None`) rather than guessing.
///
/// `resolved_at` is forced null unless the new status is resolved; when
/// resolving, an already-set timestamp is kept, then the caller-provided
/// one, then `now`.
pub fn apply_status_update(
    existing: &[Alert],
    target_id: &str,
    update: &StatusUpdate,
    cases: &[CaseSummary],
    now: DateTime<Utc>,
) -> Option<AlertWithMatch> {
    let target = find_target(existing, target_id)?;

    let mut alert = target.clone();
    alert.workflow_status = update.workflow_status;
    alert.resolved_at = if update.workflow_status == WorkflowStatus::Resolved {
        alert.resolved_at.or(update.resolved_at).or(Some(now))
    } else {
        None
    };
    if let Some(notes) = &update.resolution_notes {
        alert.resolution_notes = Some(notes.clone());
    }
    alert.updated_at = now;

    let index = CaseLookupIndex::build(cases);
    Some(match_alert(alert, &index))
}

fn find_target<'a>(existing: &'a [Alert], target_id: &str) -> Option<&'a Alert> {
    if let Some(alert) = existing.iter().find(|a| a.id == target_id) {
        return Some(alert);
    }

    let mut strong_hits: Vec<&Alert> = Vec::new();
    let mut fallback_hits: Vec<&Alert> = Vec::new();
    for alert in existing {
        let keys = keys_for(alert);
        if keys.strong.iter().any(|k| key_value(k) == target_id) {
            strong_hits.push(alert);
        } else if keys.fallback.iter().any(|k| key_value(k) == target_id) {
            fallback_hits.push(alert);
        }
    }

    match strong_hits.len() {
        1 => return Some(strong_hits[0]),
        0 => {}
        count => {
            tracing::warn!(
                target_id,
                count,
                "status update target is ambiguous at the strong key tier"
            );
            return None;
        }
    }
    match fallback_hits.len() {
        1 => Some(fallback_hits[0]),
        0 => None,
        count => {
            tracing::warn!(
                target_id,
                count,
                "status update target is ambiguous at the fallback key tier"
            );
            None
        }
    }
}
