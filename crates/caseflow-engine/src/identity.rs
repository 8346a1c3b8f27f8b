use crate::normalize::{fold, normalize_case_number};
use caseflow_common::types::{meta_keys, Alert};
use std::collections::HashSet;

/// Candidate deduplication keys for one alert, strongest tier first.
///
/// Strong keys come from fields the source system guarantees unique when
/// present; a consumer may merge on a strong hit alone. Fallback keys are
/// looser and require corroborating evidence (see
/// [`crate::merge`]). Keys are prefixed by the field they came from so
/// values from different fields can never collide, and each alert's
/// candidate set is free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityKeys {
    pub strong: Vec<String>,
    pub fallback: Vec<String>,
}

impl IdentityKeys {
    /// All candidate keys, strong tier first.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.strong.iter().chain(self.fallback.iter())
    }
}

/// Storage key computed from stable alert attributes. Stamped into alert
/// metadata at first import so later batches with no upstream record id
/// still dedup exactly. `None` when every contributing attribute is empty.
pub fn storage_key(alert: &Alert) -> Option<String> {
    let number = normalize_case_number(alert.case_number.as_deref());
    let type_code = fold(&alert.alert_type);
    let date = alert
        .alert_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let description = fold(&alert.description);
    if number.is_empty() && type_code.is_empty() && date.is_empty() && description.is_empty() {
        return None;
    }
    Some(format!("{number}|{type_code}|{date}|{description}"))
}

/// Derive the ordered candidate key set for an alert.
pub fn keys_for(alert: &Alert) -> IdentityKeys {
    let mut seen = HashSet::new();
    let mut strong = Vec::new();
    let mut fallback = Vec::new();

    push_key(
        &mut seen,
        &mut strong,
        "src",
        alert.metadata.get(meta_keys::SOURCE_RECORD_ID).map(String::as_str),
    );
    push_key(
        &mut seen,
        &mut strong,
        "sk",
        alert.metadata.get(meta_keys::STORAGE_KEY).map(String::as_str),
    );
    push_key(&mut seen, &mut strong, "sk", storage_key(alert).as_deref());

    push_key(&mut seen, &mut fallback, "rpt", alert.report_id.as_deref());
    push_key(&mut seen, &mut fallback, "id", Some(&alert.id));
    let type_code = fold(&alert.alert_type);
    push_key(&mut seen, &mut fallback, "type", Some(&type_code));

    // Legacy composite key kept for records stored before storage keys
    // existed: base id plus the normalized alert date.
    let base_id = alert
        .report_id
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(&alert.id);
    if let Some(date) = alert.alert_date {
        let composite = format!("{base_id}|{}", date.format("%Y-%m-%d"));
        push_key(&mut seen, &mut fallback, "legacy", Some(&composite));
    }

    IdentityKeys { strong, fallback }
}

fn push_key(
    seen: &mut HashSet<String>,
    out: &mut Vec<String>,
    prefix: &str,
    value: Option<&str>,
) {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return;
    };
    let key = format!("{prefix}:{value}");
    if seen.insert(key.clone()) {
        out.push(key);
    }
}

/// The value part of a prefixed candidate key.
pub(crate) fn key_value(key: &str) -> &str {
    key.split_once(':').map(|(_, v)| v).unwrap_or(key)
}
