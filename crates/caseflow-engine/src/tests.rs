use crate::conflict;
use crate::identity::{keys_for, storage_key};
use crate::lookup::CaseLookupIndex;
use crate::matcher::{match_alert, rematch_all};
use crate::merge::{merge_batch, MISSING_IDENTIFIER_NOTE};
use crate::normalize::normalize_case_number;
use crate::provision::{
    derive_person_name, provision_skeleton_cases, CaseRegistry, SkeletonCaseRequest,
    DEFAULT_CASE_STATUS,
};
use crate::status::{apply_status_update, StatusUpdate};
use crate::views::AlertsIndex;
use crate::weight::{alert_type_weight, case_status_weight, rank_weight};
use anyhow::anyhow;
use caseflow_common::types::{
    meta_keys, Alert, AlertRow, CaseSummary, MatchStatus, WorkflowStatus,
};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

fn make_case(id: &str, name: &str, number: &str, status: &str) -> CaseSummary {
    CaseSummary {
        id: id.to_string(),
        display_name: name.to_string(),
        case_number: number.to_string(),
        status: status.to_string(),
    }
}

fn make_alert(id: &str, case_number: Option<&str>, alert_type: &str, description: &str) -> Alert {
    let now = Utc::now();
    Alert {
        id: id.to_string(),
        report_id: None,
        case_number: case_number.map(str::to_string),
        alert_type: alert_type.to_string(),
        description: description.to_string(),
        alert_date: NaiveDate::from_ymd_opt(2024, 3, 15),
        workflow_status: WorkflowStatus::New,
        resolved_at: None,
        resolution_notes: None,
        metadata: HashMap::new(),
        created_at: now,
        updated_at: now,
    }
}

fn make_row(case_number: Option<&str>, alert_type: &str, description: &str) -> AlertRow {
    AlertRow {
        case_number: case_number.map(str::to_string),
        report_id: None,
        alert_type: alert_type.to_string(),
        description: description.to_string(),
        alert_date: NaiveDate::from_ymd_opt(2024, 3, 15),
        metadata: HashMap::new(),
    }
}

fn alerts_of(merged: &[caseflow_common::types::AlertWithMatch]) -> Vec<Alert> {
    merged.iter().map(|m| m.alert.clone()).collect()
}

// ---- normalization ----

#[test]
fn normalize_strips_noise_and_uppercases() {
    assert_eq!(normalize_case_number(Some("123-45")), "12345");
    assert_eq!(normalize_case_number(Some("  ab 99/x  ")), "AB99X");
    assert_eq!(normalize_case_number(Some("•••")), "");
    assert_eq!(normalize_case_number(None), "");
}

// ---- case lookup index ----

#[test]
fn lookup_index_first_occurrence_wins_on_collision() {
    let cases = vec![
        make_case("c-1", "Ada Lovelace", "123-45", "In Progress"),
        make_case("c-2", "Grace Hopper", "12345", "Review"),
    ];
    let index = CaseLookupIndex::build(&cases);
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("12345").unwrap().id, "c-1");
}

#[test]
fn lookup_index_skips_blank_case_numbers() {
    let cases = vec![make_case("c-1", "Ada Lovelace", "  - ", "In Progress")];
    let index = CaseLookupIndex::build(&cases);
    assert!(index.is_empty());
}

// ---- matcher ----

#[test]
fn matcher_classifies_all_three_states() {
    let index = CaseLookupIndex::build(&[make_case("c-1", "Ada Lovelace", "12345", "Review")]);

    let matched = match_alert(make_alert("a-1", Some("123-45"), "renewal", "due"), &index);
    assert_eq!(matched.match_status, MatchStatus::Matched);
    assert_eq!(matched.matched_case_id.as_deref(), Some("c-1"));
    assert_eq!(matched.matched_case_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(matched.matched_case_status.as_deref(), Some("Review"));

    let unmatched = match_alert(make_alert("a-2", Some("99999"), "renewal", "due"), &index);
    assert_eq!(unmatched.match_status, MatchStatus::Unmatched);
    assert!(unmatched.matched_case_id.is_none());

    let missing = match_alert(make_alert("a-3", None, "renewal", "due"), &index);
    assert_eq!(missing.match_status, MatchStatus::MissingIdentifier);
    assert!(missing.matched_case_id.is_none());
}

#[test]
fn matcher_downgrades_when_case_disappears() {
    let full = CaseLookupIndex::build(&[make_case("c-1", "Ada Lovelace", "12345", "Review")]);
    let matched = match_alert(make_alert("a-1", Some("12345"), "renewal", "due"), &full);
    assert_eq!(matched.match_status, MatchStatus::Matched);

    let empty = CaseLookupIndex::build(&[]);
    let downgraded = rematch_all(vec![matched], &empty);
    assert_eq!(downgraded[0].match_status, MatchStatus::Unmatched);
    assert!(downgraded[0].matched_case_id.is_none());
}

// ---- identity keys ----

#[test]
fn identity_keys_order_strong_before_fallback() {
    let mut alert = make_alert("a-1", Some("123-45"), "renewal", "annual renewal due");
    alert.report_id = Some("rep-9".to_string());
    alert
        .metadata
        .insert(meta_keys::SOURCE_RECORD_ID.to_string(), "src-7".to_string());

    let keys = keys_for(&alert);
    assert_eq!(keys.strong[0], "src:src-7");
    assert!(keys.strong[1].starts_with("sk:"));
    assert_eq!(keys.fallback[0], "rpt:rep-9");
    assert_eq!(keys.fallback[1], "id:a-1");
    assert_eq!(keys.fallback[2], "type:renewal");
    assert_eq!(keys.fallback[3], "legacy:rep-9|2024-03-15");
}

#[test]
fn identity_keys_skip_empty_and_duplicate_values() {
    let mut alert = make_alert("a-1", None, "", "");
    alert.alert_date = None;
    alert
        .metadata
        .insert(meta_keys::SOURCE_RECORD_ID.to_string(), "  ".to_string());
    let keys = keys_for(&alert);
    assert!(keys.strong.is_empty());
    // Only the internal id and its legacy-free fallback survive.
    assert_eq!(keys.fallback, vec!["id:a-1".to_string()]);

    // A stored storage key identical to the computed one is not repeated.
    let mut alert = make_alert("a-2", Some("123-45"), "renewal", "due");
    let computed = storage_key(&alert).unwrap();
    alert
        .metadata
        .insert(meta_keys::STORAGE_KEY.to_string(), computed);
    let keys = keys_for(&alert);
    assert_eq!(
        keys.strong.iter().filter(|k| k.starts_with("sk:")).count(),
        1
    );
}

#[test]
fn legacy_composite_prefers_report_id_over_internal_id() {
    let mut alert = make_alert("a-1", Some("123-45"), "renewal", "due");
    assert!(keys_for(&alert)
        .fallback
        .contains(&"legacy:a-1|2024-03-15".to_string()));

    alert.report_id = Some("rep-9".to_string());
    assert!(keys_for(&alert)
        .fallback
        .contains(&"legacy:rep-9|2024-03-15".to_string()));
}

// ---- conflict resolution ----

#[test]
fn conflict_keeps_higher_ranked_status() {
    let now = Utc::now();
    let mut existing = make_alert("a-1", Some("12345"), "renewal", "due");
    existing.workflow_status = WorkflowStatus::InProgress;
    let incoming = make_alert("a-1", Some("12345"), "renewal", "due");

    let merged = conflict::resolve(&existing, &incoming, now);
    assert_eq!(merged.workflow_status, WorkflowStatus::InProgress);

    let mut resolved = existing.clone();
    resolved.workflow_status = WorkflowStatus::Resolved;
    resolved.resolved_at = Some(now);
    let merged = conflict::resolve(&resolved, &incoming, now);
    assert_eq!(merged.workflow_status, WorkflowStatus::Resolved);
    assert_eq!(merged.resolved_at, Some(now));
}

#[test]
fn conflict_clears_resolved_at_unless_resolved_wins() {
    let now = Utc::now();
    let mut existing = make_alert("a-1", Some("12345"), "renewal", "due");
    existing.workflow_status = WorkflowStatus::Snoozed;
    // Inconsistent stored data: resolved_at without resolved status.
    existing.resolved_at = Some(now);
    let incoming = make_alert("a-1", Some("12345"), "renewal", "due");

    let merged = conflict::resolve(&existing, &incoming, now);
    assert_eq!(merged.workflow_status, WorkflowStatus::Snoozed);
    assert!(merged.resolved_at.is_none());
}

#[test]
fn conflict_metadata_and_notes_keep_existing_on_collision() {
    let now = Utc::now();
    let mut existing = make_alert("a-1", Some("12345"), "renewal", "due");
    existing.resolution_notes = Some("caseworker note".to_string());
    existing
        .metadata
        .insert("annotation".to_string(), "keep me".to_string());
    existing
        .metadata
        .insert("shared".to_string(), "existing".to_string());

    let mut incoming = make_alert("a-1", Some("12345"), "renewal", "updated description");
    incoming.resolution_notes = Some("import note".to_string());
    incoming
        .metadata
        .insert("shared".to_string(), "incoming".to_string());
    incoming
        .metadata
        .insert("fresh".to_string(), "new value".to_string());

    let merged = conflict::resolve(&existing, &incoming, now);
    assert_eq!(merged.resolution_notes.as_deref(), Some("caseworker note"));
    assert_eq!(merged.metadata["annotation"], "keep me");
    assert_eq!(merged.metadata["shared"], "existing");
    assert_eq!(merged.metadata["fresh"], "new value");
    // Payload fields follow the incoming record.
    assert_eq!(merged.description, "updated description");
    assert_eq!(merged.id, "a-1");
}

// ---- merge / dedup ----

#[test]
fn merge_same_strong_key_with_formatting_noise_is_not_an_update() {
    caseflow_common::id::init(1, 1);
    let mut existing = make_alert("a-1", Some("123-45"), "renewal", "annual renewal");
    existing
        .metadata
        .insert(meta_keys::SOURCE_RECORD_ID.to_string(), "src-1".to_string());

    let mut row = make_row(Some("12345"), "renewal", "annual renewal");
    row.metadata
        .insert(meta_keys::SOURCE_RECORD_ID.to_string(), "src-1".to_string());

    let cases = vec![make_case("c-1", "Ada Lovelace", "12345", "In Progress")];
    let outcome = merge_batch(&[row], &[existing.clone()], &cases, Utc::now());

    assert_eq!(outcome.added, 0);
    assert_eq!(outcome.updated, 0);
    assert_eq!(outcome.merged.len(), 1);
    assert_eq!(outcome.merged[0].alert.workflow_status, WorkflowStatus::New);
    assert_eq!(outcome.merged[0].alert.id, "a-1");
    // Untouched record keeps its stored form.
    assert_eq!(outcome.merged[0].alert.case_number.as_deref(), Some("123-45"));
}

#[test]
fn merge_auto_resolves_rows_without_identifier() {
    caseflow_common::id::init(1, 1);
    let row = make_row(Some("   "), "renewal", "who is this for");
    let outcome = merge_batch(&[row], &[], &[], Utc::now());

    assert_eq!(outcome.added, 1);
    let alert = &outcome.merged[0].alert;
    assert_eq!(alert.workflow_status, WorkflowStatus::Resolved);
    assert!(alert.resolved_at.is_some());
    assert_eq!(alert.resolution_notes.as_deref(), Some(MISSING_IDENTIFIER_NOTE));
    assert_eq!(outcome.merged[0].match_status, MatchStatus::MissingIdentifier);
}

#[test]
fn merge_with_empty_registry_leaves_alerts_unmatched() {
    caseflow_common::id::init(1, 1);
    let row = make_row(Some("123-45"), "renewal", "due");
    let outcome = merge_batch(&[row], &[], &[], Utc::now());
    assert_eq!(outcome.merged[0].match_status, MatchStatus::Unmatched);
    assert_eq!(outcome.merged[0].alert.workflow_status, WorkflowStatus::New);
}

#[test]
fn merge_reimport_of_own_output_is_idempotent() {
    caseflow_common::id::init(1, 1);
    let rows = vec![
        make_row(Some("123-45"), "renewal", "annual renewal"),
        make_row(Some("678-90"), "interview", "schedule interview"),
        make_row(None, "notice", "orphan notice"),
    ];
    let cases = vec![make_case("c-1", "Ada Lovelace", "12345", "In Progress")];

    let first = merge_batch(&rows, &[], &cases, Utc::now());
    assert_eq!(first.added, 3);

    let stored = alerts_of(&first.merged);
    let second = merge_batch(&rows, &stored, &cases, Utc::now());
    assert_eq!(second.added, 0, "re-import must not add");
    assert_eq!(second.updated, 0, "re-import must not update");
    assert_eq!(second.merged.len(), 3);
}

#[test]
fn merge_auto_resolves_stale_alerts_but_never_drops_them() {
    caseflow_common::id::init(1, 1);
    let mut stale = make_alert("a-1", Some("111-11"), "renewal", "old renewal");
    stale.workflow_status = WorkflowStatus::InProgress;
    let mut already_resolved = make_alert("a-2", Some("222-22"), "notice", "old notice");
    already_resolved.workflow_status = WorkflowStatus::Resolved;
    let resolved_stamp = Utc::now() - chrono::Duration::days(7);
    already_resolved.resolved_at = Some(resolved_stamp);

    let row = make_row(Some("333-33"), "interview", "brand new");
    let outcome = merge_batch(
        &[row],
        &[stale.clone(), already_resolved.clone()],
        &[],
        Utc::now(),
    );

    assert_eq!(outcome.merged.len(), 3);
    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.updated, 1);

    let merged_stale = &outcome.merged[0].alert;
    assert_eq!(merged_stale.workflow_status, WorkflowStatus::Resolved);
    assert!(merged_stale.resolved_at.is_some());

    let carried = &outcome.merged[1].alert;
    assert_eq!(carried.resolved_at, Some(resolved_stamp));
    assert_eq!(carried.updated_at, already_resolved.updated_at);
}

#[test]
fn merge_never_unresolves_an_alert() {
    caseflow_common::id::init(1, 1);
    let mut existing = make_alert("a-1", Some("123-45"), "renewal", "annual renewal");
    existing.workflow_status = WorkflowStatus::Resolved;
    existing.resolved_at = Some(Utc::now());
    existing
        .metadata
        .insert(meta_keys::SOURCE_RECORD_ID.to_string(), "src-1".to_string());

    let mut row = make_row(Some("123-45"), "renewal", "annual renewal");
    row.metadata
        .insert(meta_keys::SOURCE_RECORD_ID.to_string(), "src-1".to_string());

    let outcome = merge_batch(&[row], &[existing], &[], Utc::now());
    assert_eq!(
        outcome.merged[0].alert.workflow_status,
        WorkflowStatus::Resolved
    );
    assert!(outcome.merged[0].alert.resolved_at.is_some());
}

#[test]
fn merge_fallback_match_requires_corroboration() {
    caseflow_common::id::init(1, 1);
    let mut existing = make_alert("a-1", Some("123-45"), "renewal", "annual renewal");
    existing.report_id = Some("rep-1".to_string());

    // Same report id but a different description and date: genuinely a
    // different alert, must not merge.
    let mut other = make_row(Some("123-45"), "renewal", "totally different thing");
    other.report_id = Some("rep-1".to_string());
    other.alert_date = NaiveDate::from_ymd_opt(2024, 6, 1);

    let outcome = merge_batch(&[other], &[existing.clone()], &[], Utc::now());
    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.merged.len(), 2);

    // Same report id with matching description and no contradicting date
    // merges through the fallback tier.
    let mut same = make_row(Some("12345"), "renewal", "Annual Renewal");
    same.report_id = Some("rep-1".to_string());
    same.alert_date = None;
    let outcome = merge_batch(&[same], &[existing], &[], Utc::now());
    assert_eq!(outcome.added, 0);
    assert_eq!(outcome.merged.len(), 1);
}

#[test]
fn merge_duplicate_rows_consume_at_most_one_stored_alert() {
    caseflow_common::id::init(1, 1);
    let rows = vec![
        make_row(Some("123-45"), "renewal", "annual renewal"),
        make_row(Some("123-45"), "renewal", "annual renewal"),
    ];
    let first = merge_batch(&rows, &[], &[], Utc::now());
    assert_eq!(first.added, 2);

    // Re-import stabilizes: each row claims one stored copy, nothing new.
    let stored = alerts_of(&first.merged);
    let second = merge_batch(&rows, &stored, &[], Utc::now());
    assert_eq!(second.added, 0);
    assert_eq!(second.updated, 0);
    assert_eq!(second.merged.len(), 2);
}

// ---- skeleton case provisioning ----

struct RecordingRegistry {
    created: Mutex<Vec<SkeletonCaseRequest>>,
    fail: bool,
}

impl RecordingRegistry {
    fn new(fail: bool) -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            fail,
        }
    }
}

#[async_trait::async_trait]
impl CaseRegistry for RecordingRegistry {
    async fn create_skeleton_case(&self, request: SkeletonCaseRequest) -> anyhow::Result<CaseSummary> {
        if self.fail {
            return Err(anyhow!("registry unavailable"));
        }
        let case = CaseSummary {
            id: format!("case-{}", self.created.lock().unwrap().len() + 1),
            display_name: request.display_name.clone(),
            case_number: request.case_number.clone(),
            status: request.status.clone(),
        };
        self.created.lock().unwrap().push(request);
        Ok(case)
    }
}

#[tokio::test]
async fn provisioner_creates_one_case_per_number_and_rematches() {
    caseflow_common::id::init(1, 1);
    let mut row_a = make_row(Some("999-00"), "renewal", "first of pair");
    row_a
        .metadata
        .insert(meta_keys::RAW_NAME.to_string(), "Lovelace, Ada".to_string());
    let row_b = make_row(Some("99900"), "notice", "second of pair");

    let outcome = merge_batch(&[row_a, row_b], &[], &[], Utc::now());
    assert!(outcome.merged.iter().all(|m| m.match_status == MatchStatus::Unmatched));

    let registry = RecordingRegistry::new(false);
    let created = provision_skeleton_cases(&outcome.merged, &registry).await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].display_name, "Ada Lovelace");
    assert_eq!(created[0].status, DEFAULT_CASE_STATUS);

    let index = CaseLookupIndex::build(&created);
    let rematched = rematch_all(outcome.merged, &index);
    assert!(rematched.iter().all(|m| m.match_status == MatchStatus::Matched));
    assert!(rematched
        .iter()
        .all(|m| m.matched_case_id.as_deref() == Some(created[0].id.as_str())));
}

#[tokio::test]
async fn provisioner_failure_is_skipped_not_fatal() {
    caseflow_common::id::init(1, 1);
    let outcome = merge_batch(&[make_row(Some("999-00"), "renewal", "x")], &[], &[], Utc::now());

    let registry = RecordingRegistry::new(true);
    let created = provision_skeleton_cases(&outcome.merged, &registry).await;
    assert!(created.is_empty());
    assert_eq!(outcome.merged[0].match_status, MatchStatus::Unmatched);
}

#[test]
fn person_name_derivation() {
    assert_eq!(derive_person_name(Some("Lovelace, Ada")), "Ada Lovelace");
    assert_eq!(derive_person_name(Some("  Hopper ,  Grace ")), "Grace Hopper");
    assert_eq!(derive_person_name(Some("Cher")), "Cher");
    assert_eq!(derive_person_name(Some("Madonna,")), "Madonna");
    assert_eq!(derive_person_name(Some("   ")), "Unknown");
    assert_eq!(derive_person_name(None), "Unknown");
}

// ---- status transitions ----

#[test]
fn status_update_by_id_applies_resolution_rules() {
    let existing = vec![make_alert("a-1", Some("123-45"), "renewal", "due")];
    let cases = vec![make_case("c-1", "Ada Lovelace", "12345", "Review")];

    let update = StatusUpdate {
        workflow_status: WorkflowStatus::Resolved,
        resolution_notes: Some("handled".to_string()),
        resolved_at: None,
    };
    let result = apply_status_update(&existing, "a-1", &update, &cases, Utc::now()).unwrap();
    assert_eq!(result.alert.workflow_status, WorkflowStatus::Resolved);
    assert!(result.alert.resolved_at.is_some());
    assert_eq!(result.alert.resolution_notes.as_deref(), Some("handled"));
    assert_eq!(result.match_status, MatchStatus::Matched);

    // Moving away from resolved clears the timestamp again.
    let reopened = apply_status_update(
        &[result.alert],
        "a-1",
        &StatusUpdate {
            workflow_status: WorkflowStatus::InProgress,
            resolution_notes: None,
            resolved_at: None,
        },
        &cases,
        Utc::now(),
    )
    .unwrap();
    assert_eq!(reopened.alert.workflow_status, WorkflowStatus::InProgress);
    assert!(reopened.alert.resolved_at.is_none());
    assert_eq!(reopened.alert.resolution_notes.as_deref(), Some("handled"));
}

#[test]
fn status_update_falls_back_to_identity_keys() {
    let mut alert = make_alert("a-1", Some("123-45"), "renewal", "due");
    alert
        .metadata
        .insert(meta_keys::SOURCE_RECORD_ID.to_string(), "src-7".to_string());

    let update = StatusUpdate {
        workflow_status: WorkflowStatus::Acknowledged,
        resolution_notes: None,
        resolved_at: None,
    };
    let result = apply_status_update(&[alert], "src-7", &update, &[], Utc::now()).unwrap();
    assert_eq!(result.alert.id, "a-1");
    assert_eq!(result.alert.workflow_status, WorkflowStatus::Acknowledged);
}

#[test]
fn status_update_refuses_ambiguous_targets() {
    let mut a = make_alert("a-1", Some("123-45"), "renewal", "due");
    a.metadata
        .insert(meta_keys::SOURCE_RECORD_ID.to_string(), "src-7".to_string());
    let mut b = make_alert("a-2", Some("678-90"), "notice", "other");
    b.metadata
        .insert(meta_keys::SOURCE_RECORD_ID.to_string(), "src-7".to_string());

    let update = StatusUpdate {
        workflow_status: WorkflowStatus::Acknowledged,
        resolution_notes: None,
        resolved_at: None,
    };
    assert!(apply_status_update(&[a, b], "src-7", &update, &[], Utc::now()).is_none());

    // Ambiguity at the fallback tier refuses as well.
    let mut c = make_alert("a-3", Some("111-11"), "renewal", "one");
    c.report_id = Some("rep-1".to_string());
    let mut d = make_alert("a-4", Some("222-22"), "renewal", "two");
    d.report_id = Some("rep-1".to_string());
    assert!(apply_status_update(&[c, d], "rep-1", &update, &[], Utc::now()).is_none());
}

#[test]
fn status_update_duplicate_ids_use_first_copy() {
    let mut first = make_alert("a-1", Some("123-45"), "renewal", "due");
    first.workflow_status = WorkflowStatus::Snoozed;
    let second = make_alert("a-1", Some("123-45"), "renewal", "due");

    let update = StatusUpdate {
        workflow_status: WorkflowStatus::InProgress,
        resolution_notes: None,
        resolved_at: None,
    };
    let result = apply_status_update(&[first, second], "a-1", &update, &[], Utc::now()).unwrap();
    assert_eq!(result.alert.workflow_status, WorkflowStatus::InProgress);
}

// ---- priority weighting ----

#[test]
fn rank_weight_boundaries() {
    for n in 2..10 {
        assert_eq!(rank_weight(0, n, 500, 50), 500);
        assert_eq!(rank_weight(n - 1, n, 500, 50), 50);
    }
    assert_eq!(rank_weight(0, 1, 500, 50), 500);
    assert_eq!(rank_weight(0, 0, 500, 50), 500);
    assert_eq!(rank_weight(9, 5, 500, 50), 50);
}

#[test]
fn rank_weight_decays_exponentially() {
    assert_eq!(rank_weight(1, 5, 500, 50), 281);
    assert_eq!(rank_weight(2, 5, 500, 50), 158);
    assert_eq!(rank_weight(3, 5, 500, 50), 89);
}

#[test]
fn alert_type_weight_is_case_insensitive_and_defaults_to_min() {
    let order = vec!["Renewal".to_string(), " Interview ".to_string()];
    assert_eq!(alert_type_weight("renewal", &order), 500);
    assert_eq!(alert_type_weight("INTERVIEW", &order), 50);
    assert_eq!(alert_type_weight("unknown", &order), 50);
}

#[test]
fn case_status_weight_requires_opt_in() {
    let order = vec!["Priority".to_string(), "In Progress".to_string()];
    assert_eq!(case_status_weight("priority", &order), 5000);
    assert_eq!(case_status_weight("in progress", &order), 500);
    assert_eq!(case_status_weight("Completed", &order), 0);
    assert_eq!(case_status_weight("Review", &[]), 0);
}

// ---- alerts index view ----

#[test]
fn alerts_index_buckets_and_case_map() {
    caseflow_common::id::init(1, 1);
    let cases = vec![make_case("c-1", "Ada Lovelace", "12345", "Review")];
    let rows = vec![
        make_row(Some("123-45"), "renewal", "matched one"),
        make_row(Some("999-99"), "notice", "unmatched one"),
        make_row(None, "notice", "orphan"),
    ];
    let outcome = merge_batch(&rows, &[], &cases, Utc::now());

    let index = AlertsIndex::build(&outcome.merged);
    assert_eq!(index.matched.len(), 1);
    assert_eq!(index.unmatched.len(), 1);
    assert_eq!(index.missing_identifier.len(), 1);
    assert_eq!(index.total(), 3);
    assert_eq!(index.by_case["c-1"].len(), 1);
}
