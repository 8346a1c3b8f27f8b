use crate::normalize::normalize_case_number;
use caseflow_common::types::CaseSummary;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// One-shot map from normalized case number to case summary, built from a
/// registry snapshot.
///
/// When two cases normalize to the same number the first occurrence wins
/// and the later one is dropped; the collision is logged because the
/// registry has no uniqueness guarantee on case numbers.
pub struct CaseLookupIndex {
    by_number: HashMap<String, CaseSummary>,
}

impl CaseLookupIndex {
    pub fn build(cases: &[CaseSummary]) -> Self {
        let mut by_number = HashMap::with_capacity(cases.len());
        for case in cases {
            let key = normalize_case_number(Some(&case.case_number));
            if key.is_empty() {
                continue;
            }
            match by_number.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(case.clone());
                }
                Entry::Occupied(slot) => {
                    tracing::warn!(
                        case_number = %case.case_number,
                        kept_case_id = %slot.get().id,
                        dropped_case_id = %case.id,
                        "duplicate case number in registry, keeping first occurrence"
                    );
                }
            }
        }
        Self { by_number }
    }

    /// Look up by an already-normalized case number.
    pub fn get(&self, normalized: &str) -> Option<&CaseSummary> {
        self.by_number.get(normalized)
    }

    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }
}
