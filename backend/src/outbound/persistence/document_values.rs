//! Normalisation of loosely typed task document values.
//!
//! Writers disagree on representation: identifiers arrive as strings,
//! numbers, or extended-JSON object ids (`{"$oid": "..."}`); dates as plain
//! dates, RFC 3339 timestamps, extended-JSON dates, or free text; scores as
//! numbers or anything else. Every function here is total: unexpected shapes
//! degrade to "missing" or verbatim text rather than an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::domain::{Score, TargetDate, UserRef};

/// Normalise a single user reference to its string form.
pub(crate) fn user_ref(value: &Value) -> Option<UserRef> {
    match value {
        Value::String(raw) if !raw.trim().is_empty() => Some(UserRef::new(raw.as_str())),
        Value::Number(number) => Some(UserRef::new(number.to_string())),
        Value::Object(fields) => fields.get("$oid").and_then(user_ref),
        _ => None,
    }
}

/// Normalise a delegatee list; anything other than an array is empty.
pub(crate) fn user_refs(value: Option<&Value>) -> Vec<UserRef> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(user_ref).collect(),
        _ => Vec::new(),
    }
}

/// Interpret a score value; only JSON numbers are numeric.
pub(crate) fn score(value: Option<&Value>) -> Score {
    match value {
        None | Some(Value::Null) => Score::Missing,
        Some(Value::Number(number)) => number
            .as_f64()
            .map_or_else(|| Score::Other(number.to_string()), Score::Numeric),
        Some(Value::String(raw)) => Score::Other(raw.clone()),
        Some(other) => Score::Other(other.to_string()),
    }
}

/// Interpret a target date, keeping unparseable text verbatim.
pub(crate) fn target_date(value: Option<&Value>) -> TargetDate {
    match value {
        None | Some(Value::Null) => TargetDate::Missing,
        Some(Value::String(raw)) => parse_date_text(raw),
        Some(Value::Object(fields)) => match fields.get("$date") {
            Some(inner) => target_date(Some(inner)),
            None => TargetDate::Text(Value::Object(fields.clone()).to_string()),
        },
        Some(other) => TargetDate::Text(other.to_string()),
    }
}

fn parse_date_text(raw: &str) -> TargetDate {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return TargetDate::Date(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return TargetDate::Date(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return TargetDate::Date(timestamp.date());
    }
    TargetDate::Text(raw.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> TargetDate {
        TargetDate::Date(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
    }

    #[rstest]
    #[case(json!("64b7f0c2e1a4"), Some("64b7f0c2e1a4"))]
    #[case(json!(" padded "), Some(" padded "))]
    #[case(json!(42), Some("42"))]
    #[case(json!({"$oid": "64b7f0c2e1a4"}), Some("64b7f0c2e1a4"))]
    #[case(json!(""), None)]
    #[case(json!(null), None)]
    #[case(json!(true), None)]
    fn user_refs_normalise_to_strings(#[case] value: Value, #[case] expected: Option<&str>) {
        assert_eq!(user_ref(&value), expected.map(UserRef::new));
    }

    #[rstest]
    fn delegatee_lists_skip_unusable_entries() {
        let value = json!(["a", 7, null, {"$oid": "b"}]);
        let refs = user_refs(Some(&value));
        assert_eq!(refs, vec![UserRef::new("a"), UserRef::new("7"), UserRef::new("b")]);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(json!("a")))]
    #[case(Some(json!({"0": "a"})))]
    fn non_array_delegatees_are_empty(#[case] value: Option<Value>) {
        assert!(user_refs(value.as_ref()).is_empty());
    }

    #[rstest]
    #[case(Some(json!(5)), Score::Numeric(5.0))]
    #[case(Some(json!(2.5)), Score::Numeric(2.5))]
    #[case(Some(json!("bad")), Score::Other("bad".to_owned()))]
    #[case(Some(json!("5")), Score::Other("5".to_owned()))]
    #[case(Some(json!(null)), Score::Missing)]
    #[case(None, Score::Missing)]
    fn scores_are_numeric_only_for_json_numbers(#[case] value: Option<Value>, #[case] expected: Score) {
        assert_eq!(score(value.as_ref()), expected);
    }

    #[rstest]
    #[case(json!("2024-06-30"), date(2024, 6, 30))]
    #[case(json!("2024-06-30T18:45:00Z"), date(2024, 6, 30))]
    #[case(json!("2024-06-30T18:45:00.250"), date(2024, 6, 30))]
    #[case(json!({"$date": "2024-01-02T00:00:00Z"}), date(2024, 1, 2))]
    #[case(json!("next sprint"), TargetDate::Text("next sprint".to_owned()))]
    #[case(json!(20240630), TargetDate::Text("20240630".to_owned()))]
    #[case(json!(null), TargetDate::Missing)]
    fn target_dates_parse_or_stay_verbatim(#[case] value: Value, #[case] expected: TargetDate) {
        assert_eq!(target_date(Some(&value)), expected);
    }
}
