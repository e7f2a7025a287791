//! Record Normalizer: raw lines to canonical, calendar-ready records.
//!
//! The only locally-recovered failure in the pipeline lives here: a line
//! whose date cannot be resolved is dropped alone, logged, and the rest
//! of the batch survives.

use chrono::NaiveDate;
use tracing::warn;

use attendr_common::attendance::line::AttendanceLine;
use attendr_common::attendance::record::{CanonicalAttendanceRecord, ClassHour, DaySchedule};

/// Normalize every line, dropping the ones without a usable date.
///
/// Output ordering: most recent date first, ascending hour within a date
/// (unknown hours first). Ties keep the upstream order.
pub fn normalize(lines: &[AttendanceLine]) -> Vec<CanonicalAttendanceRecord> {
    let mut dropped = 0usize;
    let mut records: Vec<CanonicalAttendanceRecord> = lines
        .iter()
        .filter_map(|line| {
            let Some(date) = line.marking_date.resolve() else {
                dropped += 1;
                return None;
            };
            Some(CanonicalAttendanceRecord {
                date,
                hour: ClassHour::from_raw(line.hour.raw_number()),
                subject: line
                    .course
                    .display()
                    .unwrap_or_else(|| "Unknown".to_string()),
                faculty: line
                    .marked_faculty_name
                    .display()
                    .unwrap_or_else(|| "N/A".to_string()),
                is_present: line.attendance_state.is_present(),
            })
        })
        .collect();

    if dropped > 0 {
        warn!(dropped, "skipped attendance lines with unusable dates");
    }

    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| a.hour.order().cmp(&b.hour.order()))
    });
    records
}

/// Group an already-normalized sequence into per-day schedules,
/// most recent day first.
pub fn group_by_day(records: &[CanonicalAttendanceRecord]) -> Vec<DaySchedule> {
    let mut days: Vec<DaySchedule> = Vec::new();
    for record in records {
        match days.last_mut() {
            Some(day) if day.date == record.date => day.records.push(record.clone()),
            _ => days.push(DaySchedule {
                date: record.date,
                records: vec![record.clone()],
            }),
        }
    }
    days
}

/// The most recent `(year, month)` that has any records, used as the
/// default month filter in the timeline view.
pub fn latest_month(records: &[CanonicalAttendanceRecord]) -> Option<(i32, u32)> {
    records.iter().map(|r| r.year_month()).max()
}

/// Pure post-filter over the normalized sequence; source data is never
/// mutated.
#[derive(Clone, Debug, Default)]
pub struct TimelineFilter {
    /// Exact subject name.
    pub subject: Option<String>,
    /// `(year, month)`, month 1-based.
    pub month: Option<(i32, u32)>,
    /// Exact calendar day.
    pub day: Option<NaiveDate>,
}

impl TimelineFilter {
    /// Parse the view's `dd-mm-yyyy` day format.
    pub fn parse_day(s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), "%d-%m-%Y").ok()
    }

    pub fn apply(&self, records: &[CanonicalAttendanceRecord]) -> Vec<CanonicalAttendanceRecord> {
        records
            .iter()
            .filter(|r| {
                self.subject
                    .as_ref()
                    .map_or(true, |subject| r.subject == *subject)
                    && self.month.map_or(true, |month| r.year_month() == month)
                    && self.day.map_or(true, |day| r.date == day)
            })
            .cloned()
            .collect()
    }
}
