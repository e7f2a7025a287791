//! Domain values turned into colored detail pairs for the tree printer.

use colored::*;

use attendr_common::attendance::course::{CourseStat, Standing};
use attendr_common::attendance::record::CanonicalAttendanceRecord;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn percentage_str(pct: f64) -> String {
    format!("{pct:.1}%")
}

pub fn percentage_detail(stat: &CourseStat) -> Detail {
    let value = percentage_str(stat.percentage);
    let colored = if stat.is_disabled() {
        value.color(colors::DISABLED)
    } else if stat.standing.is_safe() {
        value.color(colors::SAFE).bold()
    } else {
        value.color(colors::DANGER).bold()
    };
    ("Attendance".to_string(), colored)
}

pub fn ratio_detail(stat: &CourseStat) -> Detail {
    (
        "Classes".to_string(),
        format!("{}/{}", stat.attended_classes, stat.total_classes).normal(),
    )
}

pub fn standing_detail(stat: &CourseStat) -> Option<Detail> {
    if stat.is_disabled() {
        return None;
    }
    Some(match stat.standing {
        Standing::Safe { can_skip } => (
            "Skips left".to_string(),
            can_skip.to_string().color(colors::SAFE),
        ),
        Standing::Danger { must_attend } => (
            "Needed".to_string(),
            format!("{must_attend} more class(es)").color(colors::DANGER),
        ),
    })
}

pub fn fee_detail(stat: &CourseStat) -> Option<Detail> {
    (stat.condonation > 0).then(|| {
        (
            "Fee".to_string(),
            rupees(stat.condonation).color(colors::FEE).bold(),
        )
    })
}

pub fn disabled_detail(stat: &CourseStat) -> Option<Detail> {
    stat.disabled_reason
        .as_ref()
        .map(|reason| ("Note".to_string(), reason.italic().color(colors::DISABLED)))
}

pub fn rupees(amount: u32) -> String {
    format!("₹{amount}")
}

/// One timeline record as a detail pair keyed by its class period.
pub fn record_detail(record: &CanonicalAttendanceRecord) -> Detail {
    let status: ColoredString = if record.is_present {
        "Present".color(colors::SAFE).bold()
    } else {
        "Absent".color(colors::FEE).bold()
    };
    (
        format!("Hour {}", record.hour),
        format!(
            "{} {} {} {}",
            record.subject,
            "·".color(colors::SEPARATOR),
            record.faculty,
            status
        )
        .normal(),
    )
}
