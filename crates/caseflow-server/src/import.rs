use anyhow::{Context, Result};
use caseflow_common::types::{meta_keys, AlertRow};
use chrono::NaiveDate;
use std::collections::HashMap;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// Parse uploaded CSV text into loosely-typed alert rows.
///
/// Header matching is forgiving: case, surrounding whitespace, and
/// space/dash separators are ignored. Unknown columns land in the row's
/// metadata bag under their folded header; rows are never dropped, however
/// sparse — the reconciliation engine decides what to do with them.
pub fn parse_alert_rows(text: &str) -> Result<Vec<AlertRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("missing CSV header row")?
        .iter()
        .map(fold_header)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("malformed CSV record")?;
        rows.push(row_from_record(&headers, &record));
    }
    Ok(rows)
}

fn row_from_record(headers: &[String], record: &csv::StringRecord) -> AlertRow {
    let mut row = AlertRow::default();
    let mut metadata = HashMap::new();

    for (header, value) in headers.iter().zip(record.iter()) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match header.as_str() {
            "case_number" | "case_no" | "case" => row.case_number = Some(value.to_string()),
            "report_id" | "report" => row.report_id = Some(value.to_string()),
            "alert_type" | "type" => row.alert_type = value.to_string(),
            "description" | "desc" => {
                row.description = value.to_string();
                metadata.insert(meta_keys::RAW_DESCRIPTION.to_string(), value.to_string());
            }
            "alert_date" | "date" => match parse_date(value) {
                Some(date) => row.alert_date = Some(date),
                // Unparseable dates are carried, not discarded.
                None => {
                    metadata.insert("alert_date".to_string(), value.to_string());
                }
            },
            "name" | "person_name" | "client_name" => {
                metadata.insert(meta_keys::RAW_NAME.to_string(), value.to_string());
            }
            "source_record_id" | "source_id" => {
                metadata.insert(meta_keys::SOURCE_RECORD_ID.to_string(), value.to_string());
            }
            other => {
                metadata.insert(other.to_string(), value.to_string());
            }
        }
    }

    row.metadata = metadata;
    row
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn fold_header(header: &str) -> String {
    header.trim().to_lowercase().replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_forgiving_headers_and_dates() {
        let text = "Case Number,Alert Type,Description,Alert Date,Name\n\
                    123-45,Renewal,annual renewal,2024-03-15,\"Lovelace, Ada\"\n\
                    678-90,Interview,schedule interview,03/20/2024,\"Hopper, Grace\"\n";
        let rows = parse_alert_rows(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].case_number.as_deref(), Some("123-45"));
        assert_eq!(rows[0].alert_type, "Renewal");
        assert_eq!(
            rows[0].alert_date,
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(rows[0].metadata[meta_keys::RAW_NAME], "Lovelace, Ada");
        assert_eq!(
            rows[1].alert_date,
            NaiveDate::from_ymd_opt(2024, 3, 20)
        );
    }

    #[test]
    fn sparse_and_unknown_columns_survive() {
        let text = "case_number,type,desc,date,county\n\
                    ,notice,,not-a-date,Lake\n";
        let rows = parse_alert_rows(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].case_number, None);
        assert_eq!(rows[0].alert_type, "notice");
        assert_eq!(rows[0].alert_date, None);
        assert_eq!(rows[0].metadata["alert_date"], "not-a-date");
        assert_eq!(rows[0].metadata["county"], "Lake");
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse_alert_rows("").unwrap().is_empty());
        assert!(parse_alert_rows("just_one_header\n").unwrap().is_empty());
    }
}
