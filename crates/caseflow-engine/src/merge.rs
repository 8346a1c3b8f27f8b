use crate::conflict;
use crate::identity::{self, IdentityKeys};
use crate::lookup::CaseLookupIndex;
use crate::matcher::match_alert;
use crate::normalize::{fold, normalize_case_number};
use caseflow_common::id;
use caseflow_common::types::{
    meta_keys, Alert, AlertRow, AlertWithMatch, CaseSummary, WorkflowStatus,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Resolution note stamped on alerts that can never be matched because they
/// carry no case identifier.
pub const MISSING_IDENTIFIER_NOTE: &str = "auto-resolved: missing case identifier";

/// Result of merging one import batch into the stored alert collection.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Complete replacement working set, re-matched against the registry.
    pub merged: Vec<AlertWithMatch>,
    /// Rows that became new alerts.
    pub added: usize,
    /// Stored alerts that actually changed (merge or stale auto-resolve).
    pub updated: usize,
}

/// Merge an incoming batch into the existing alert collection.
///
/// Existing alerts are indexed once by every candidate identity key. Each
/// incoming row then tries strong keys first, consuming at most one stored
/// alert per row; fallback hits additionally need corroboration before they
/// are trusted. Rows with no surviving match become new alerts, stored
/// alerts absent from the batch are auto-resolved, and nothing is ever
/// dropped. Re-importing the same batch over this function's own output
/// yields `added == 0 && updated == 0`.
pub fn merge_batch(
    incoming: &[AlertRow],
    existing: &[Alert],
    cases: &[CaseSummary],
    now: DateTime<Utc>,
) -> MergeOutcome {
    let index = CaseLookupIndex::build(cases);

    let existing_keys: Vec<IdentityKeys> = existing.iter().map(identity::keys_for).collect();
    let mut strong_index: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut fallback_index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (position, keys) in existing_keys.iter().enumerate() {
        for key in &keys.strong {
            strong_index.entry(key.as_str()).or_default().push(position);
        }
        for key in &keys.fallback {
            fallback_index
                .entry(key.as_str())
                .or_default()
                .push(position);
        }
    }

    let mut consumed = vec![false; existing.len()];
    let mut carried: Vec<Alert> = existing.to_vec();
    let mut additions: Vec<Alert> = Vec::new();
    let mut added = 0;
    let mut updated = 0;

    for row in incoming {
        let mut candidate = alert_from_row(row, now);
        let keys = identity::keys_for(&candidate);

        let hit = find_strong_match(&keys, &strong_index, &consumed).or_else(|| {
            find_fallback_match(&keys, &fallback_index, &consumed, &candidate, existing)
        });

        match hit {
            Some(position) => {
                consumed[position] = true;
                let mut merged = conflict::resolve(&existing[position], &candidate, now);
                if conflict::differs(&merged, &existing[position]) {
                    merged.updated_at = now;
                    carried[position] = merged;
                    updated += 1;
                }
            }
            None => {
                if let Some(key) = identity::storage_key(&candidate) {
                    candidate
                        .metadata
                        .entry(meta_keys::STORAGE_KEY.to_string())
                        .or_insert(key);
                }
                if normalize_case_number(candidate.case_number.as_deref()).is_empty() {
                    // An alert with no identifying field can never be
                    // matched; close it instead of leaving it open forever.
                    candidate.workflow_status = WorkflowStatus::Resolved;
                    candidate.resolved_at = Some(now);
                    candidate.resolution_notes = Some(MISSING_IDENTIFIER_NOTE.to_string());
                }
                added += 1;
                additions.push(candidate);
            }
        }
    }

    // Stored alerts absent from this import are stale: auto-resolve the
    // open ones, carry the already-resolved ones forward unchanged.
    for (position, alert) in existing.iter().enumerate() {
        if consumed[position] || alert.workflow_status == WorkflowStatus::Resolved {
            continue;
        }
        let stale = &mut carried[position];
        stale.workflow_status = WorkflowStatus::Resolved;
        stale.resolved_at = stale.resolved_at.or(Some(now));
        stale.updated_at = now;
        updated += 1;
    }

    let merged = carried
        .into_iter()
        .chain(additions)
        .map(|alert| match_alert(alert, &index))
        .collect();

    MergeOutcome {
        merged,
        added,
        updated,
    }
}

fn alert_from_row(row: &AlertRow, now: DateTime<Utc>) -> Alert {
    Alert {
        id: id::next_id(),
        report_id: non_empty(row.report_id.as_deref()),
        case_number: non_empty(row.case_number.as_deref()),
        alert_type: row.alert_type.trim().to_string(),
        description: row.description.trim().to_string(),
        alert_date: row.alert_date,
        workflow_status: WorkflowStatus::New,
        resolved_at: None,
        resolution_notes: None,
        metadata: row.metadata.clone(),
        created_at: now,
        updated_at: now,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// First strong key that selects exactly one unconsumed stored alert. A
/// strong key hanging over several distinct stored alerts is a data
/// integrity condition, not a merge opportunity; it is logged and skipped.
fn find_strong_match(
    keys: &IdentityKeys,
    strong_index: &HashMap<&str, Vec<usize>>,
    consumed: &[bool],
) -> Option<usize> {
    for key in &keys.strong {
        let Some(positions) = strong_index.get(key.as_str()) else {
            continue;
        };
        let free: Vec<usize> = positions
            .iter()
            .copied()
            .filter(|&p| !consumed[p])
            .collect();
        match free.len() {
            0 => continue,
            1 => return Some(free[0]),
            _ => {
                tracing::warn!(
                    key = %key,
                    count = free.len(),
                    "strong identity key maps to multiple stored alerts, skipping"
                );
            }
        }
    }
    None
}

/// First fallback hit that survives the corroboration gate.
fn find_fallback_match(
    keys: &IdentityKeys,
    fallback_index: &HashMap<&str, Vec<usize>>,
    consumed: &[bool],
    candidate: &Alert,
    existing: &[Alert],
) -> Option<usize> {
    let candidate_has_strong = !keys.strong.is_empty();
    for key in &keys.fallback {
        let Some(positions) = fallback_index.get(key.as_str()) else {
            continue;
        };
        for &position in positions {
            if consumed[position] {
                continue;
            }
            if corroborates(candidate, &existing[position], candidate_has_strong) {
                return Some(position);
            }
        }
    }
    None
}

/// Fallback keys are loose; demand supporting evidence before merging.
///
/// A hit is accepted only when the case numbers do not conflict (unless the
/// incoming alert has no strong identity of its own), the descriptions
/// corroborate through either the normalized text or the raw-description
/// metadata, and the alert dates agree whenever both sides have one.
fn corroborates(incoming: &Alert, existing: &Alert, incoming_has_strong: bool) -> bool {
    let incoming_number = normalize_case_number(incoming.case_number.as_deref());
    let existing_number = normalize_case_number(existing.case_number.as_deref());
    let number_conflict = !incoming_number.is_empty()
        && !existing_number.is_empty()
        && incoming_number != existing_number;
    if number_conflict && incoming_has_strong {
        return false;
    }

    let incoming_description = fold(&incoming.description);
    let description_matches = (!incoming_description.is_empty()
        && incoming_description == fold(&existing.description))
        || raw_descriptions_match(incoming, existing);
    if !description_matches {
        return false;
    }

    match (incoming.alert_date, existing.alert_date) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

fn raw_descriptions_match(incoming: &Alert, existing: &Alert) -> bool {
    match (
        incoming.metadata.get(meta_keys::RAW_DESCRIPTION),
        existing.metadata.get(meta_keys::RAW_DESCRIPTION),
    ) {
        (Some(a), Some(b)) => !a.trim().is_empty() && fold(a) == fold(b),
        _ => false,
    }
}
