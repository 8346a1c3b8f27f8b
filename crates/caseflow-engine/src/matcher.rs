use crate::lookup::CaseLookupIndex;
use crate::normalize::normalize_case_number;
use caseflow_common::types::{Alert, AlertWithMatch, MatchStatus};

/// Classify an alert against the current case registry snapshot.
///
/// Idempotent: feeding the result's alert back in yields the same
/// classification, and an alert whose case has disappeared from the index
/// is downgraded to unmatched with its case-reference fields cleared.
pub fn match_alert(alert: Alert, index: &CaseLookupIndex) -> AlertWithMatch {
    let key = normalize_case_number(alert.case_number.as_deref());
    if key.is_empty() {
        return AlertWithMatch {
            alert,
            match_status: MatchStatus::MissingIdentifier,
            matched_case_id: None,
            matched_case_name: None,
            matched_case_status: None,
        };
    }
    match index.get(&key) {
        Some(case) => AlertWithMatch {
            alert,
            match_status: MatchStatus::Matched,
            matched_case_id: Some(case.id.clone()),
            matched_case_name: Some(case.display_name.clone()),
            matched_case_status: Some(case.status.clone()),
        },
        None => AlertWithMatch {
            alert,
            match_status: MatchStatus::Unmatched,
            matched_case_id: None,
            matched_case_name: None,
            matched_case_status: None,
        },
    }
}

/// Re-run classification for a whole working set, e.g. after the registry
/// gained skeleton cases.
pub fn rematch_all(alerts: Vec<AlertWithMatch>, index: &CaseLookupIndex) -> Vec<AlertWithMatch> {
    alerts
        .into_iter()
        .map(|entry| match_alert(entry.alert, index))
        .collect()
}
