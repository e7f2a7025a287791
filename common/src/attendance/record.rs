//! Canonical per-class records for the timeline view.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// The class period a record belongs to, once the upstream hour value has
/// been mapped onto the timetable.
///
/// The ERP mixes two conventions: wall-clock hours 8..=14 (8 AM is the
/// first period) and period numbers 1..=7. Both map onto `Period`; other
/// positive values are kept as-is, anything unparseable is `Unknown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassHour {
    Period(u32),
    Unknown,
}

impl ClassHour {
    /// Map a raw positive hour number into a class period.
    pub fn from_raw(raw: Option<i64>) -> Self {
        match raw {
            Some(n @ 8..=14) => Self::Period((n - 7) as u32),
            Some(n @ 1..=7) => Self::Period(n as u32),
            Some(n) => Self::Period(n as u32),
            None => Self::Unknown,
        }
    }

    /// Sort key within a day; unknown hours sort first.
    pub fn order(&self) -> u32 {
        match self {
            Self::Period(n) => *n,
            Self::Unknown => 0,
        }
    }
}

impl fmt::Display for ClassHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Period(n) => write!(f, "{n}"),
            Self::Unknown => write!(f, "N/A"),
        }
    }
}

/// One class occurrence in canonical shape, ready for presentation.
#[derive(Clone, Debug)]
pub struct CanonicalAttendanceRecord {
    pub date: NaiveDate,
    pub hour: ClassHour,
    pub subject: String,
    pub faculty: String,
    pub is_present: bool,
}

impl CanonicalAttendanceRecord {
    /// Full weekday name, e.g. "Friday".
    pub fn weekday(&self) -> String {
        self.date.format("%A").to_string()
    }

    /// `(year, month)` of the record, for month filtering.
    pub fn year_month(&self) -> (i32, u32) {
        (self.date.year(), self.date.month())
    }
}

/// All records of one calendar day, most-recent-day-first in the grouped
/// timeline.
#[derive(Clone, Debug)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub records: Vec<CanonicalAttendanceRecord>,
}

impl DaySchedule {
    pub fn weekday(&self) -> String {
        self.date.format("%A").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock_hours_map_to_periods() {
        assert_eq!(ClassHour::from_raw(Some(8)), ClassHour::Period(1));
        assert_eq!(ClassHour::from_raw(Some(9)), ClassHour::Period(2));
        assert_eq!(ClassHour::from_raw(Some(14)), ClassHour::Period(7));
    }

    #[test]
    fn test_period_numbers_pass_through() {
        assert_eq!(ClassHour::from_raw(Some(3)), ClassHour::Period(3));
        assert_eq!(ClassHour::from_raw(Some(7)), ClassHour::Period(7));
    }

    #[test]
    fn test_out_of_range_hours_kept_as_is() {
        assert_eq!(ClassHour::from_raw(Some(15)), ClassHour::Period(15));
    }

    #[test]
    fn test_unparseable_hour_is_unknown() {
        assert_eq!(ClassHour::from_raw(None), ClassHour::Unknown);
        assert_eq!(ClassHour::Unknown.to_string(), "N/A");
        assert_eq!(ClassHour::Unknown.order(), 0);
    }
}
