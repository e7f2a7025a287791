//! Raw attendance lines as the ERP serves them.
//!
//! The upstream is not consistent about field shapes: a date may be a
//! string or a `[y, m, d]` triple, an hour may be a number, a numeric
//! string, an `[id, label]` pair or an object, and any field may be the
//! literal `false` when unset. Each field is therefore a tagged union
//! with a single total normalization method; call sites never probe
//! shapes themselves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque server-side identifier of one attendance line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineRecordId(pub i64);

/// One class-hour instance for one course on one day, as fetched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AttendanceLine {
    #[serde(default)]
    pub marking_date: DateField,
    #[serde(default)]
    pub hour: HourField,
    #[serde(default)]
    pub course: LabelField,
    #[serde(default)]
    pub marked_faculty_name: LabelField,
    #[serde(default, alias = "attendance_status")]
    pub attendance_state: StateField,
}

/// The attendance-state string the aggregator counts as attended.
/// Matching there is case-sensitive on purpose: the upstream emits the
/// flag verbatim and fuzzy-matching would hide upstream changes.
pub const PRESENT_STATE: &str = "present";

/// A date as the ERP ships it.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum DateField {
    Text(String),
    /// `[year, month, day]`, month 1-based.
    Triple([i32; 3]),
    /// Odoo encodes "unset" as the boolean `false`.
    Absent(bool),
    Other(Value),
}

impl Default for DateField {
    fn default() -> Self {
        Self::Absent(false)
    }
}

impl DateField {
    /// Resolve to a calendar date, `None` when no valid date is encoded.
    pub fn resolve(&self) -> Option<NaiveDate> {
        match self {
            Self::Text(s) => parse_date_text(s),
            Self::Triple([y, m, d]) => {
                NaiveDate::from_ymd_opt(*y, u32::try_from(*m).ok()?, u32::try_from(*d).ok()?)
            }
            Self::Absent(_) | Self::Other(_) => None,
        }
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| {
            // Odoo datetime columns come through as "YYYY-MM-DD HH:MM:SS".
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
        })
        .ok()
}

/// A class hour as the ERP ships it.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum HourField {
    Number(i64),
    Text(String),
    /// `[id, label]`; the id carries the hour.
    Pair((i64, String)),
    /// `{ "id": n }` or `{ "value": n }`.
    Keyed {
        id: Option<i64>,
        value: Option<i64>,
    },
    Absent(bool),
    Other(Value),
}

impl Default for HourField {
    fn default() -> Self {
        Self::Absent(false)
    }
}

impl HourField {
    /// The raw positive hour number, before any period mapping.
    pub fn raw_number(&self) -> Option<i64> {
        let n = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => {
                let s = s.trim();
                if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                    s.parse::<i64>().ok()
                } else {
                    None
                }
            }
            Self::Pair((id, _)) => Some(*id),
            Self::Keyed { id, value } => id.or(*value),
            Self::Absent(_) => None,
            Self::Other(v) => v.as_i64(),
        }?;
        (n > 0).then_some(n)
    }
}

/// A string-or-`[id, name]` field (course, faculty).
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum LabelField {
    Text(String),
    Pair((i64, String)),
    Absent(bool),
    Other(Value),
}

impl Default for LabelField {
    fn default() -> Self {
        Self::Absent(false)
    }
}

impl LabelField {
    /// The display name: the pair's name when present, the id as a
    /// fallback, the trimmed string otherwise. `None` when nothing
    /// usable is encoded.
    pub fn display(&self) -> Option<String> {
        match self {
            Self::Text(s) => non_empty(s),
            Self::Pair((id, name)) => non_empty(name).or_else(|| Some(id.to_string())),
            Self::Absent(_) => None,
            Self::Other(v) => match v {
                Value::Array(items) => items
                    .get(1)
                    .and_then(value_as_label)
                    .or_else(|| items.first().and_then(value_as_label)),
                other => value_as_label(other),
            },
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn value_as_label(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The attendance-state flag, tolerating `false` for unmarked lines.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum StateField {
    Text(String),
    Absent(bool),
    Other(Value),
}

impl Default for StateField {
    fn default() -> Self {
        Self::Absent(false)
    }
}

impl StateField {
    pub fn raw(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Absent(_) | Self::Other(_) => "",
        }
    }

    /// Case-insensitive presence check, used by the normalizer.
    pub fn is_present(&self) -> bool {
        self.raw().eq_ignore_ascii_case(PRESENT_STATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line_from(value: serde_json::Value) -> AttendanceLine {
        serde_json::from_value(value).expect("line should deserialize")
    }

    #[test]
    fn test_deserialize_pair_shaped_line() {
        let line = line_from(json!({
            "marking_date": "2024-03-15",
            "hour": [9, "Hour 9"],
            "course": [42, "Engineering Mathematics"],
            "marked_faculty_name": [7, "Dr. Iyer"],
            "attendance_state": "present"
        }));

        assert_eq!(
            line.marking_date.resolve(),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(line.hour.raw_number(), Some(9));
        assert_eq!(line.course.display().as_deref(), Some("Engineering Mathematics"));
        assert_eq!(line.marked_faculty_name.display().as_deref(), Some("Dr. Iyer"));
        assert!(line.attendance_state.is_present());
    }

    #[test]
    fn test_deserialize_scalar_shaped_line() {
        let line = line_from(json!({
            "marking_date": [2024, 3, 15],
            "hour": "3",
            "course": "Physics Lab",
            "marked_faculty_name": false,
            "attendance_state": "absent"
        }));

        assert_eq!(
            line.marking_date.resolve(),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(line.hour.raw_number(), Some(3));
        assert_eq!(line.course.display().as_deref(), Some("Physics Lab"));
        assert_eq!(line.marked_faculty_name.display(), None);
        assert!(!line.attendance_state.is_present());
    }

    #[test]
    fn test_unset_fields_are_false_booleans() {
        let line = line_from(json!({
            "marking_date": false,
            "hour": false,
            "course": false,
            "marked_faculty_name": false,
            "attendance_state": false
        }));

        assert_eq!(line.marking_date.resolve(), None);
        assert_eq!(line.hour.raw_number(), None);
        assert_eq!(line.course.display(), None);
        assert_eq!(line.attendance_state.raw(), "");
    }

    #[test]
    fn test_hour_object_shapes() {
        let by_id: HourField = serde_json::from_value(json!({"id": 10})).unwrap();
        let by_value: HourField = serde_json::from_value(json!({"value": 4})).unwrap();
        let empty: HourField = serde_json::from_value(json!({})).unwrap();

        assert_eq!(by_id.raw_number(), Some(10));
        assert_eq!(by_value.raw_number(), Some(4));
        assert_eq!(empty.raw_number(), None);
    }

    #[test]
    fn test_hour_rejects_non_numeric_text_and_zero() {
        let word: HourField = serde_json::from_value(json!("morning")).unwrap();
        let zero: HourField = serde_json::from_value(json!(0)).unwrap();
        let negative: HourField = serde_json::from_value(json!(-2)).unwrap();

        assert_eq!(word.raw_number(), None);
        assert_eq!(zero.raw_number(), None);
        assert_eq!(negative.raw_number(), None);
    }

    #[test]
    fn test_date_text_with_time_component() {
        let dated: DateField =
            serde_json::from_value(json!("2024-07-01 09:30:00")).unwrap();
        assert_eq!(dated.resolve(), NaiveDate::from_ymd_opt(2024, 7, 1));
    }

    #[test]
    fn test_invalid_calendar_triple_resolves_to_none() {
        let bad: DateField = serde_json::from_value(json!([2024, 13, 40])).unwrap();
        assert_eq!(bad.resolve(), None);
    }

    #[test]
    fn test_pair_with_empty_name_falls_back_to_id() {
        let label: LabelField = serde_json::from_value(json!([42, "  "])).unwrap();
        assert_eq!(label.display().as_deref(), Some("42"));
    }

    #[test]
    fn test_missing_fields_default_to_absent() {
        let line = line_from(json!({ "attendance_state": "present" }));
        assert_eq!(line.marking_date.resolve(), None);
        assert_eq!(line.course.display(), None);
        assert!(line.attendance_state.is_present());
    }
}
