use caseflow_common::types::{AlertWithMatch, MatchStatus};
use serde::Serialize;
use std::collections::HashMap;

/// The working set grouped for display collaborators: one bucket per match
/// status plus a case-id map for per-case alert panels.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertsIndex {
    pub matched: Vec<AlertWithMatch>,
    pub unmatched: Vec<AlertWithMatch>,
    pub missing_identifier: Vec<AlertWithMatch>,
    pub by_case: HashMap<String, Vec<AlertWithMatch>>,
}

impl AlertsIndex {
    pub fn build(alerts: &[AlertWithMatch]) -> Self {
        let mut index = AlertsIndex::default();
        for entry in alerts {
            match entry.match_status {
                MatchStatus::Matched => {
                    if let Some(case_id) = &entry.matched_case_id {
                        index
                            .by_case
                            .entry(case_id.clone())
                            .or_default()
                            .push(entry.clone());
                    }
                    index.matched.push(entry.clone());
                }
                MatchStatus::Unmatched => index.unmatched.push(entry.clone()),
                MatchStatus::MissingIdentifier => index.missing_identifier.push(entry.clone()),
            }
        }
        index
    }

    pub fn total(&self) -> usize {
        self.matched.len() + self.unmatched.len() + self.missing_identifier.len()
    }
}
