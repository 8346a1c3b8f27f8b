use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known keys in the open [`Alert::metadata`] bag. The import pipeline
/// fills these from source-specific columns; the reconciliation engine reads
/// them for identity and corroboration checks.
pub mod meta_keys {
    /// Unique record id assigned by the upstream source system.
    pub const SOURCE_RECORD_ID: &str = "source_record_id";
    /// Storage key computed from stable alert attributes at first import.
    pub const STORAGE_KEY: &str = "storage_key";
    /// Raw person display name as it appeared in the source ("last, first").
    pub const RAW_NAME: &str = "raw_name";
    /// Raw alert description as it appeared in the source.
    pub const RAW_DESCRIPTION: &str = "raw_description";
}

/// Caseworker-facing workflow state of an alert, ordered from lowest to
/// highest merge priority.
///
/// # Examples
///
/// ```
/// use caseflow_common::types::WorkflowStatus;
///
/// let status: WorkflowStatus = "in-progress".parse().unwrap();
/// assert_eq!(status, WorkflowStatus::InProgress);
/// assert_eq!(status.to_string(), "in-progress");
/// assert!(WorkflowStatus::Resolved > WorkflowStatus::New);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowStatus {
    New,
    Acknowledged,
    InProgress,
    Snoozed,
    Resolved,
}

impl std::fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowStatus::New => write!(f, "new"),
            WorkflowStatus::Acknowledged => write!(f, "acknowledged"),
            WorkflowStatus::InProgress => write!(f, "in-progress"),
            WorkflowStatus::Snoozed => write!(f, "snoozed"),
            WorkflowStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl std::str::FromStr for WorkflowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(WorkflowStatus::New),
            "acknowledged" => Ok(WorkflowStatus::Acknowledged),
            "in-progress" => Ok(WorkflowStatus::InProgress),
            "snoozed" => Ok(WorkflowStatus::Snoozed),
            "resolved" => Ok(WorkflowStatus::Resolved),
            _ => Err(format!("unknown workflow status: {s}")),
        }
    }
}

/// How an alert relates to the case registry. Derived on every read; never
/// authoritative on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    /// The alert's case number resolved to a registered case.
    Matched,
    /// The alert carries a case number but no registered case has it.
    Unmatched,
    /// The alert's case number is absent or empty after normalization.
    MissingIdentifier,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Matched => write!(f, "matched"),
            MatchStatus::Unmatched => write!(f, "unmatched"),
            MatchStatus::MissingIdentifier => write!(f, "missing-identifier"),
        }
    }
}

/// An externally-sourced notice tied to a case via an external case number.
///
/// Only these fields are durable; match classification lives on
/// [`AlertWithMatch`] and is recomputed whenever the case registry changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Alert {
    /// Internally assigned id. Stable across re-imports of the same logical
    /// alert, but historical imports may have written several rows sharing
    /// one id, so it is never assumed unique.
    pub id: String,
    /// Identifier of the source batch record, when the source provides one.
    pub report_id: Option<String>,
    /// External case number this alert concerns. Absence defines the
    /// missing-identifier state.
    pub case_number: Option<String>,
    /// Free-text code classifying the alert.
    pub alert_type: String,
    pub description: String,
    pub alert_date: Option<NaiveDate>,
    pub workflow_status: WorkflowStatus,
    /// Non-null exactly while `workflow_status` is `resolved`.
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolution_notes: Option<String>,
    /// Open key-value bag for source-specific fields (see [`meta_keys`]).
    pub metadata: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An [`Alert`] annotated with its current case-registry classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AlertWithMatch {
    pub alert: Alert,
    pub match_status: MatchStatus,
    pub matched_case_id: Option<String>,
    pub matched_case_name: Option<String>,
    pub matched_case_status: Option<String>,
}

impl AlertWithMatch {
    pub fn is_matched(&self) -> bool {
        self.match_status == MatchStatus::Matched
    }
}

/// Minimal case-matching surface read from the case registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CaseSummary {
    pub id: String,
    pub display_name: String,
    pub case_number: String,
    pub status: String,
}

/// One loosely-typed alert row from a parsed import batch. Produced by the
/// text-parsing collaborator; the engine never sees raw source text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertRow {
    pub case_number: Option<String>,
    pub report_id: Option<String>,
    pub alert_type: String,
    pub description: String,
    pub alert_date: Option<NaiveDate>,
    /// Raw source fields, including the raw display name (see [`meta_keys`]).
    pub metadata: HashMap<String, String>,
}
