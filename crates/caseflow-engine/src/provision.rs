use crate::normalize::normalize_case_number;
use anyhow::Result;
use caseflow_common::types::{meta_keys, AlertWithMatch, CaseSummary, MatchStatus};
use std::collections::HashSet;

/// Status given to auto-created skeleton cases, matching the registry's
/// default for newly opened work.
pub const DEFAULT_CASE_STATUS: &str = "In Progress";

/// Fields for a minimal case record anchoring otherwise-unmatched alerts.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonCaseRequest {
    pub display_name: String,
    pub case_number: String,
    pub status: String,
}

/// Case-creation seam to the external case registry. The engine only ever
/// requests minimal records; full case CRUD belongs to the registry.
#[async_trait::async_trait]
pub trait CaseRegistry: Send + Sync {
    async fn create_skeleton_case(&self, request: SkeletonCaseRequest) -> Result<CaseSummary>;
}

/// Create one skeleton case per distinct normalized case number among the
/// unmatched alerts of a merged working set.
///
/// Creation failures are logged and skipped; the affected alerts simply
/// stay unmatched. Returns the cases that were created so the caller can
/// extend its registry snapshot and run a second match pass.
pub async fn provision_skeleton_cases(
    merged: &[AlertWithMatch],
    registry: &dyn CaseRegistry,
) -> Vec<CaseSummary> {
    let mut seen = HashSet::new();
    let mut groups: Vec<&AlertWithMatch> = Vec::new();
    for entry in merged {
        if entry.match_status != MatchStatus::Unmatched {
            continue;
        }
        let key = normalize_case_number(entry.alert.case_number.as_deref());
        if key.is_empty() || !seen.insert(key) {
            continue;
        }
        groups.push(entry);
    }

    let mut created = Vec::new();
    for entry in groups {
        let case_number = entry.alert.case_number.clone().unwrap_or_default();
        let request = SkeletonCaseRequest {
            display_name: derive_person_name(
                entry.alert.metadata.get(meta_keys::RAW_NAME).map(String::as_str),
            ),
            case_number: case_number.clone(),
            status: DEFAULT_CASE_STATUS.to_string(),
        };
        match registry.create_skeleton_case(request).await {
            Ok(case) => {
                tracing::info!(
                    case_id = %case.id,
                    case_number = %case_number,
                    "created skeleton case for unmatched alerts"
                );
                created.push(case);
            }
            Err(error) => {
                tracing::warn!(
                    case_number = %case_number,
                    error = %error,
                    "skeleton case creation failed, alerts stay unmatched"
                );
            }
        }
    }
    created
}

/// Turn raw "last, first" name metadata into a display name. Input without
/// a comma is used as-is; missing input falls back to a placeholder.
pub fn derive_person_name(raw: Option<&str>) -> String {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return "Unknown".to_string();
    }
    match raw.split_once(',') {
        Some((last, first)) => {
            let first = first.trim();
            let last = last.trim();
            if first.is_empty() {
                last.to_string()
            } else {
                format!("{first} {last}")
            }
        }
        None => raw.to_string(),
    }
}
