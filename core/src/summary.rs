//! Course Aggregator: the ordered line sequence reduced to per-course
//! health.
//!
//! A pure function of its inputs — same lines, same flags, identical
//! output, with courses in first-seen order.

use std::collections::HashMap;

use attendr_common::attendance::course::{AttendanceSummary, CourseStat, Standing};
use attendr_common::attendance::line::{AttendanceLine, PRESENT_STATE};
use attendr_common::config::CondonationPolicy;

/// Minimum attendance percentage a course must hold.
pub const REQUIRED_PERCENTAGE: f64 = 75.0;
const REQUIRED_RATIO: f64 = 0.75;

/// Reason attached to remedial courses of a student who opted for a minor.
pub const MINOR_DISABLED_REASON: &str = "Opted for Minor";

pub fn summarize(
    lines: &[AttendanceLine],
    eligible: bool,
    policy: &CondonationPolicy,
) -> AttendanceSummary {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, (u32, u32)> = HashMap::new();
    let mut minor_opted = false;

    for line in lines {
        let course = line
            .course
            .display()
            .unwrap_or_else(|| "Unknown".to_string());

        if !minor_opted {
            let lower = course.to_lowercase();
            minor_opted = policy
                .minor_subjects
                .iter()
                .any(|minor| lower.starts_with(&minor.to_lowercase()));
        }

        if !counts.contains_key(&course) {
            order.push(course.clone());
        }
        let (attended, total) = counts.entry(course).or_insert((0, 0));
        *total += 1;
        if line.attendance_state.raw() == PRESENT_STATE {
            *attended += 1;
        }
    }

    let mut summary = AttendanceSummary::default();

    for course in order {
        let (attended, total) = counts[&course];
        let percentage = if total > 0 {
            f64::from(attended) / f64::from(total) * 100.0
        } else {
            0.0
        };

        let disabled_reason = (minor_opted && course.to_lowercase().contains("remedial"))
            .then(|| MINOR_DISABLED_REASON.to_string());

        let standing = if percentage >= REQUIRED_PERCENTAGE {
            let can_skip = (f64::from(attended) / REQUIRED_RATIO - f64::from(total))
                .floor()
                .max(0.0) as u32;
            Standing::Safe { can_skip }
        } else {
            let must_attend = ((REQUIRED_RATIO * f64::from(total) - f64::from(attended)) / 0.25)
                .ceil() as u32;
            Standing::Danger { must_attend }
        };

        let condonation = if eligible && disabled_reason.is_none() && !standing.is_safe() {
            policy.fee
        } else {
            0
        };

        summary.total_attended += attended;
        summary.total_classes += total;
        summary.total_condonation += condonation;
        summary.courses.push(CourseStat {
            course,
            attended_classes: attended,
            total_classes: total,
            percentage,
            standing,
            condonation,
            disabled_reason,
        });
    }

    summary.overall_percentage = if summary.total_classes > 0 {
        f64::from(summary.total_attended) / f64::from(summary.total_classes) * 100.0
    } else {
        0.0
    };

    summary
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
